pub mod defaults;
pub mod error;
pub mod format;
pub mod generate;
pub mod patterns;
pub mod resolver;
pub mod status;
pub mod timestamp;
