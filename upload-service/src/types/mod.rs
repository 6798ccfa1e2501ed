mod environment;
mod error;

pub use environment::{Environment, LogFormat};
pub use error::{AppError, ErrorResponse};
