use serde::{Deserialize, Serialize};

/// Which channels feed the beat detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    /// Analyze channel 0 only.
    #[default]
    First,
    /// Average every channel into one.
    Downmix,
}

/// Mono PCM samples in [-1, 1] plus their sample rate.
#[derive(Clone, Debug, PartialEq)]
pub struct PcmBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl PcmBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    /// Collapse interleaved multi-channel samples into a single channel.
    pub fn from_interleaved(interleaved: &[f32], channels: usize, sample_rate: u32, mode: ChannelMode) -> Self {
        let mut samples = Vec::with_capacity(interleaved.len() / channels.max(1));
        extend_mono(&mut samples, interleaved, channels, mode);
        Self { samples, sample_rate }
    }

    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Append one block of interleaved samples to `out` as a single channel.
pub fn extend_mono(out: &mut Vec<f32>, interleaved: &[f32], channels: usize, mode: ChannelMode) {
    let channels = channels.max(1);
    if channels == 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    match mode {
        ChannelMode::First => out.extend(interleaved.iter().step_by(channels).copied()),
        ChannelMode::Downmix => out.extend(
            interleaved
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
        ),
    }
}

/// A detected onset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatEvent {
    /// Window start, seconds
    pub time: f64,
    /// How far the onset cleared the adaptive threshold (0.0-1.0)
    pub strength: f32,
    /// Set during report assembly when an edit sits near this beat
    pub on_beat: bool,
}

impl BeatEvent {
    pub fn new(time: f64, strength: f32) -> Self {
        Self { time, strength, on_beat: false }
    }
}
