pub mod batch;
pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod histogram;
pub mod normalize;
pub mod pixels;
pub mod types;

// Re-export commonly used items
pub use batch::{BatchReport, FileOutcome};
pub use config::{Config, OutputFormat};
pub use error::{ConfigError, DecodeError, ProcessError};
pub use pixels::{PixelBuffer, PixelData};
