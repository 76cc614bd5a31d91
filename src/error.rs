use thiserror::Error;

/// Failures raised while preparing audio for sync analysis.
///
/// None of these escape [`SyncAnalyzer::analyze`](crate::sync::analyzer::SyncAnalyzer::analyze);
/// they are logged and folded into an empty result there.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to open media file: {0}")]
    FileOpen(String),

    #[error("Unsupported media format: {0}")]
    UnsupportedFormat(String),

    #[error("No audio track found")]
    NoAudioTrack,

    #[error("Unknown sample rate")]
    UnknownSampleRate,

    #[error("Failed to create audio decoder: {0}")]
    DecoderInit(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Decoded audio is empty")]
    EmptyAudio,

    #[error("Invalid timestamp label: {0:?}")]
    InvalidTimestamp(String),
}
