pub mod capture;
pub mod logging;
pub mod policy;

pub use logging::{request_logger, LogRecord, LOG_TARGET};
pub use policy::LogPolicy;
