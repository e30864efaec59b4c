pub mod client;
pub mod error;
pub mod upload;

pub use client::ApiClient;
pub use error::user_message;
