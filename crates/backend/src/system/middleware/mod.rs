pub mod latency;
pub mod request_logger;
