mod gracefullshutdown;
mod logs;
mod metadata;
mod metrics;
mod otel;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metadata::HeaderInjector;
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::otel::{Telemetry, TracingContext};
