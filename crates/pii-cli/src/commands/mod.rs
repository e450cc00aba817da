pub mod init;
pub mod redact;
pub mod serve;
