mod error;
mod http;
mod parse;

pub use self::error::ErrorResponse;
pub use self::http::HttpError;
pub use self::parse::ParseEnumError;
