mod errors;
mod store;

pub use self::errors::RepositoryError;
pub use self::store::{InMemoryStore, now_millis};
