use std::collections::VecDeque;

use super::features::{BeatEvent, PcmBuffer};
use crate::config::DetectorConfig;

/// Plausible music-video tempo range; detections outside it are octave-corrected once.
const MIN_BPM: u32 = 60;
const MAX_BPM: u32 = 180;

/// Output of one detector pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Detection {
    pub beats: Vec<BeatEvent>,
    /// Mean RMS over every analysis window, 0 when no window fits
    pub avg_energy: f32,
}

/// Short-time energy onset detector with an adaptive `mean + k * stddev` threshold.
#[derive(Clone, Debug, Default)]
pub struct BeatDetector {
    config: DetectorConfig,
}

impl BeatDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Window and hop length in samples for the given rate.
    fn frame_sizes(&self, sample_rate: u32) -> (usize, usize) {
        let window = (sample_rate as f64 * self.config.window_ms / 1000.0).round() as usize;
        let window = window.max(1);
        let hop = ((window as f64 * self.config.hop_ratio) as usize).max(1);
        (window, hop)
    }

    /// Scan the buffer for onsets. Beats come back sorted by time, never closer
    /// than `min_beat_gap`, all with `on_beat == false`.
    pub fn detect(&self, pcm: &PcmBuffer) -> Vec<BeatEvent> {
        self.scan(pcm).beats
    }

    /// [`detect`](Self::detect) plus the mean window energy of the whole buffer.
    pub fn scan(&self, pcm: &PcmBuffer) -> Detection {
        let samples = &pcm.samples;
        let sr = pcm.sample_rate;
        if sr == 0 {
            return Detection::default();
        }

        let (window, hop) = self.frame_sizes(sr);
        if samples.len() < window {
            log::debug!("Buffer shorter than one {} sample window, no beats", window);
            return Detection::default();
        }

        let history_len = self.config.history_len.max(1);
        let mut history: VecDeque<f32> = VecDeque::with_capacity(history_len + 1);
        let mut beats: Vec<BeatEvent> = Vec::new();
        let mut energy_sum = 0.0f64;
        let mut windows = 0usize;

        let mut pos = 0;
        while pos + window <= samples.len() {
            let energy = rms(&samples[pos..pos + window]);
            energy_sum += energy as f64;
            windows += 1;

            history.push_back(energy);
            if history.len() > history_len {
                history.pop_front();
            }

            if history.len() == history_len {
                if let Some(beat) = self.check_onset(energy, &history, pos as f64 / sr as f64) {
                    let far_enough = beats
                        .last()
                        .map_or(true, |last| beat.time - last.time >= self.config.min_beat_gap);
                    if far_enough {
                        beats.push(beat);
                    }
                }
            }

            pos += hop;
        }

        let avg_energy = (energy_sum / windows as f64) as f32;

        log::info!(
            "Beat detection: {} windows of {} samples (hop {}), avg energy {:.4}, {} beats",
            windows,
            window,
            hop,
            avg_energy,
            beats.len()
        );

        Detection { beats, avg_energy }
    }

    fn check_onset(&self, energy: f32, history: &VecDeque<f32>, time: f64) -> Option<BeatEvent> {
        // A perfectly flat history (digital silence, DC) has no onsets.
        let first = history[0];
        if history.iter().all(|&e| e == first) {
            return None;
        }

        let n = history.len() as f64;
        let mean = history.iter().map(|&e| e as f64).sum::<f64>() / n;
        let variance = history.iter().map(|&e| (e as f64 - mean).powi(2)).sum::<f64>() / n;
        let threshold = mean + self.config.sensitivity as f64 * variance.sqrt();

        let energy = energy as f64;
        if energy <= threshold || threshold <= 0.0 {
            return None;
        }

        let strength = ((energy - mean) / threshold).clamp(0.0, 1.0) as f32;
        Some(BeatEvent::new(time, strength))
    }
}

fn rms(window: &[f32]) -> f32 {
    if window.is_empty() {
        return 0.0;
    }
    (window.iter().map(|s| s * s).sum::<f32>() / window.len() as f32).sqrt()
}

/// Tempo from the median inter-beat interval, folded once into 60-180 BPM.
/// Returns 0 when fewer than two beats exist.
pub fn estimate_tempo(beats: &[BeatEvent]) -> u32 {
    if beats.len() < 2 {
        return 0;
    }

    let mut intervals: Vec<f64> = beats.windows(2).map(|w| w[1].time - w[0].time).collect();
    intervals.sort_by(|a, b| a.total_cmp(b));
    let median_interval = intervals[intervals.len() / 2];

    if median_interval <= 0.0 {
        return 0;
    }

    let raw = (60.0 / median_interval).round() as u32;
    let bpm = if raw < MIN_BPM {
        raw * 2
    } else if raw > MAX_BPM {
        (raw as f64 / 2.0).round() as u32
    } else {
        raw
    };

    log::info!(
        "Tempo: median interval {:.3}s, raw {} BPM, corrected {} BPM",
        median_interval, raw, bpm
    );

    bpm
}
