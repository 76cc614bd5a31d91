use super::types::OffBeatRecord;

pub const EXCELLENT: &str =
    "Excellent synchronization! Your cuts land on the beat and the edit moves with the music.";
pub const GOOD: &str =
    "Good synchronization, but it could be tighter. A few cuts drift away from the beat.";
pub const MODERATE: &str =
    "Moderate synchronization. Consider aligning more of your cuts with the beat of the music.";
pub const LOW: &str =
    "Low sync between cuts and music. Music videos typically benefit from cutting on the beat.";

/// Feedback lines for a sync report: one score tier line, then an off-beat
/// count if any, then a tempo line if the tempo is known.
pub fn generate_suggestions(sync_score: u32, off_beat_cuts: &[OffBeatRecord], bpm: u32) -> Vec<String> {
    let tier = if sync_score >= 80 {
        EXCELLENT
    } else if sync_score >= 60 {
        GOOD
    } else if sync_score >= 40 {
        MODERATE
    } else {
        LOW
    };
    let mut suggestions = vec![tier.to_string()];

    if !off_beat_cuts.is_empty() {
        let n = off_beat_cuts.len();
        suggestions.push(format!(
            "{} cut{} {} off the beat. Try nudging {} to the nearest beat.",
            n,
            if n == 1 { "" } else { "s" },
            if n == 1 { "falls" } else { "fall" },
            if n == 1 { "it" } else { "them" },
        ));
    }

    if bpm > 0 {
        suggestions.push(format!(
            "The track runs at about {} BPM, so a beat lands every {:.2} seconds. Cutting on multiples of this interval keeps the edit in rhythm.",
            bpm,
            60.0 / bpm as f64
        ));
    }

    suggestions
}
