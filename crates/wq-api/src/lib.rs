pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod tracing;
pub mod validation;

pub use client::{Operation, QuizClient};
pub use config::{ClientConfig, Environment};
pub use error::ClientError;
