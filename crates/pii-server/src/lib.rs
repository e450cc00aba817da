pub mod protocol;
pub mod server;

pub use protocol::{ApiError, RedactRequest, RedactResponse};
pub use server::{RedactServer, router};
