pub mod config;
pub mod error;
pub mod metadata;
pub mod types;

pub use error::{LppError, LppResult};
