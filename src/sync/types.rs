use serde::{Deserialize, Serialize};

use super::timecode::parse_timestamp;
use crate::audio::features::BeatEvent;
use crate::error::SyncError;

pub const UNAVAILABLE_MESSAGE: &str =
    "Music sync analysis was unavailable for this video. The rest of the critique is unaffected.";

/// A cut point in the video timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditEvent {
    #[serde(rename = "timestampLabel")]
    pub label: String,
    pub seconds: f64,
}

impl EditEvent {
    pub fn new(label: impl Into<String>, seconds: f64) -> Self {
        Self { label: label.into(), seconds }
    }

    /// Build an edit whose time is read from a label like `"1:05"`.
    pub fn from_label(label: &str) -> Result<Self, SyncError> {
        Ok(Self::new(label.trim(), parse_timestamp(label)?))
    }
}

/// Edit list entry as written by the critique step; `seconds` may be omitted.
#[derive(Clone, Debug, Deserialize)]
pub struct EditRecord {
    #[serde(alias = "timestampLabel")]
    pub timestamp: String,
    #[serde(default)]
    pub seconds: Option<f64>,
}

impl TryFrom<EditRecord> for EditEvent {
    type Error = SyncError;

    fn try_from(record: EditRecord) -> Result<Self, Self::Error> {
        match record.seconds {
            Some(seconds) => Ok(EditEvent::new(record.timestamp, seconds)),
            None => EditEvent::from_label(&record.timestamp),
        }
    }
}

/// An edit that missed every beat by at least the tolerance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffBeatRecord {
    pub timestamp_label: String,
    /// Edit time minus nearest beat time; negative when the cut comes early
    pub offset_seconds: f64,
}

/// Soundtrack overview reported next to the sync figures.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSummary {
    /// Seconds of analyzed audio
    pub duration: f64,
    pub sample_rate: u32,
    /// Mean RMS over all analysis windows
    pub avg_energy: f32,
    pub beat_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAnalysisResult {
    pub bpm: u32,
    pub beats: Vec<BeatEvent>,
    pub sync_score: u32,
    pub suggestions: Vec<String>,
    pub off_beat_cuts: Vec<OffBeatRecord>,
    pub audio: AudioSummary,
}

impl SyncAnalysisResult {
    /// The degraded result handed back when analysis could not run.
    pub fn unavailable() -> Self {
        Self {
            bpm: 0,
            beats: Vec::new(),
            sync_score: 0,
            suggestions: vec![UNAVAILABLE_MESSAGE.to_string()],
            off_beat_cuts: Vec::new(),
            audio: AudioSummary::default(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }
}
