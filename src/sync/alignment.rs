use super::types::{EditEvent, OffBeatRecord};
use crate::audio::features::BeatEvent;
use crate::config::AlignmentConfig;

/// Edit classification against a beat grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Alignment {
    pub on_beat_count: usize,
    pub off_beat_cuts: Vec<OffBeatRecord>,
    pub total_edits: usize,
}

impl Alignment {
    /// `round(100 * on / total)`, 0 when there are no edits.
    pub fn sync_score(&self) -> u32 {
        if self.total_edits == 0 {
            return 0;
        }
        let score = (100.0 * self.on_beat_count as f64 / self.total_edits as f64).round();
        score.clamp(0.0, 100.0) as u32
    }
}

#[derive(Clone, Debug, Default)]
pub struct AlignmentScorer {
    config: AlignmentConfig,
}

impl AlignmentScorer {
    pub fn new(config: AlignmentConfig) -> Self {
        Self { config }
    }

    pub fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    /// Classify every edit by its nearest beat. With no beats at all, no edit
    /// is on-beat and none gets an off-beat record.
    pub fn score(&self, beats: &[BeatEvent], edits: &[EditEvent]) -> Alignment {
        let mut alignment = Alignment {
            total_edits: edits.len(),
            ..Default::default()
        };

        for edit in edits {
            let Some(nearest) = nearest_beat(beats, edit.seconds) else {
                continue;
            };

            let offset = edit.seconds - nearest.time;
            if offset.abs() < self.config.tolerance {
                alignment.on_beat_count += 1;
            } else {
                log::debug!("Off-beat cut {} ({:+.3}s)", edit.label, offset);
                alignment.off_beat_cuts.push(OffBeatRecord {
                    timestamp_label: edit.label.clone(),
                    offset_seconds: offset,
                });
            }
        }

        log::info!(
            "Alignment: {}/{} edits on beat, {} off beat",
            alignment.on_beat_count,
            alignment.total_edits,
            alignment.off_beat_cuts.len()
        );

        alignment
    }

    /// Copy of `beats` with `on_beat` set where any edit lies within tolerance.
    pub fn flag_beats(&self, beats: &[BeatEvent], edits: &[EditEvent]) -> Vec<BeatEvent> {
        beats
            .iter()
            .map(|beat| BeatEvent {
                on_beat: edits
                    .iter()
                    .any(|edit| (edit.seconds - beat.time).abs() < self.config.tolerance),
                ..beat.clone()
            })
            .collect()
    }
}

/// Linear scan; the first of two equidistant beats wins.
fn nearest_beat(beats: &[BeatEvent], time: f64) -> Option<&BeatEvent> {
    let mut best: Option<&BeatEvent> = None;
    let mut min_distance = f64::INFINITY;
    for beat in beats {
        let distance = (time - beat.time).abs();
        if distance < min_distance {
            min_distance = distance;
            best = Some(beat);
        }
    }
    best
}
