//! Beat detection and cut-to-music synchronization scoring for music videos.
//!
//! [`SyncAnalyzer`] decodes a media file, finds beats with an energy onset
//! detector, estimates tempo, and scores a list of edit points against the
//! beat grid.

pub mod audio;
pub mod config;
pub mod error;
pub mod sync;

pub use audio::decode::{AudioDecoder, MediaSource, SymphoniaDecoder};
pub use audio::features::{BeatEvent, ChannelMode, PcmBuffer};
pub use config::Config;
pub use error::SyncError;
pub use sync::analyzer::SyncAnalyzer;
pub use sync::types::{EditEvent, OffBeatRecord, SyncAnalysisResult};
