pub mod abstract_trait;
pub mod di;
pub mod errors;
pub mod service;
pub mod state;

pub use self::errors::ClientError;
