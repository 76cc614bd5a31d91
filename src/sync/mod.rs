pub mod alignment;
pub mod analyzer;
pub mod suggestions;
pub mod timecode;
pub mod types;
