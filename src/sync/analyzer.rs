use super::alignment::AlignmentScorer;
use super::suggestions::generate_suggestions;
use super::types::{AudioSummary, EditEvent, SyncAnalysisResult};
use crate::audio::analysis::{estimate_tempo, BeatDetector};
use crate::audio::decode::{AudioDecoder, MediaSource, SymphoniaDecoder};
use crate::audio::features::PcmBuffer;
use crate::config::Config;
use crate::error::SyncError;

/// Runs decode, beat detection, tempo, alignment and suggestions in order.
///
/// Holds no per-call state; one analyzer can serve any number of analyses.
pub struct SyncAnalyzer<D: AudioDecoder = SymphoniaDecoder> {
    decoder: D,
    detector: BeatDetector,
    scorer: AlignmentScorer,
}

impl SyncAnalyzer<SymphoniaDecoder> {
    pub fn from_config(config: &Config) -> Self {
        Self::with_decoder(SymphoniaDecoder::new(config.audio.channel_mode), config)
    }
}

impl Default for SyncAnalyzer<SymphoniaDecoder> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl<D: AudioDecoder> SyncAnalyzer<D> {
    pub fn with_decoder(decoder: D, config: &Config) -> Self {
        Self {
            decoder,
            detector: BeatDetector::new(config.detector.clone()),
            scorer: AlignmentScorer::new(config.alignment.clone()),
        }
    }

    /// Analyze a media source. Never fails: any decode problem yields
    /// [`SyncAnalysisResult::unavailable`].
    pub fn analyze(&self, source: &MediaSource, edits: &[EditEvent]) -> SyncAnalysisResult {
        match self.try_analyze(source, edits) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Sync analysis unavailable: {}", e);
                SyncAnalysisResult::unavailable()
            }
        }
    }

    /// Like [`analyze`](Self::analyze) but surfaces the failure.
    pub fn try_analyze(&self, source: &MediaSource, edits: &[EditEvent]) -> Result<SyncAnalysisResult, SyncError> {
        let pcm = self.decoder.decode(source)?;
        Ok(self.analyze_pcm(&pcm, edits))
    }

    /// The pure part of the pipeline, on already decoded samples.
    pub fn analyze_pcm(&self, pcm: &PcmBuffer, edits: &[EditEvent]) -> SyncAnalysisResult {
        let detection = self.detector.scan(pcm);
        let beats = detection.beats;
        let bpm = estimate_tempo(&beats);

        let alignment = self.scorer.score(&beats, edits);
        let sync_score = alignment.sync_score();
        let beats = self.scorer.flag_beats(&beats, edits);
        let suggestions = generate_suggestions(sync_score, &alignment.off_beat_cuts, bpm);

        log::info!(
            "Sync analysis: {} beats, {} BPM, score {} ({} edits, tolerance {:.2}s)",
            beats.len(),
            bpm,
            sync_score,
            edits.len(),
            self.scorer.tolerance()
        );

        let audio = AudioSummary {
            duration: pcm.duration(),
            sample_rate: pcm.sample_rate,
            avg_energy: detection.avg_energy,
            beat_count: beats.len(),
        };

        SyncAnalysisResult {
            bpm,
            beats,
            sync_score,
            suggestions,
            off_beat_cuts: alignment.off_beat_cuts,
            audio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::suggestions::EXCELLENT;
    use std::cell::Cell;

    struct FixedDecoder {
        pcm: Option<PcmBuffer>,
        calls: Cell<usize>,
    }

    impl AudioDecoder for FixedDecoder {
        fn decode(&self, _source: &MediaSource) -> Result<PcmBuffer, SyncError> {
            self.calls.set(self.calls.get() + 1);
            self.pcm.clone().ok_or_else(|| SyncError::Decode("corrupt packet".into()))
        }
    }

    fn click_track(clicks: &[f64], seconds: f64) -> PcmBuffer {
        let sr = 44100usize;
        let mut samples = vec![0.0f32; (seconds * sr as f64) as usize];
        for &t in clicks {
            let start = (t * sr as f64) as usize;
            for s in samples.iter_mut().skip(start).take(441) {
                *s = 0.7;
            }
        }
        PcmBuffer::new(samples, sr as u32)
    }

    fn source() -> MediaSource {
        MediaSource::bytes(Vec::<u8>::new(), Some("wav"))
    }

    #[test]
    fn decode_failure_degrades_to_unavailable() {
        let decoder = FixedDecoder { pcm: None, calls: Cell::new(0) };
        let analyzer = SyncAnalyzer::with_decoder(decoder, &Config::default());
        let edits = vec![EditEvent::new("0:01", 1.0)];

        assert!(matches!(analyzer.try_analyze(&source(), &edits), Err(SyncError::Decode(_))));
        let result = analyzer.analyze(&source(), &edits);
        assert!(result.is_unavailable());
        assert_eq!(analyzer.decoder.calls.get(), 2);
    }

    #[test]
    fn silence_gives_zero_tempo_and_score() {
        let analyzer = SyncAnalyzer::from_config(&Config::default());
        let pcm = PcmBuffer::new(vec![0.0; 88200], 44100);
        let result = analyzer.analyze_pcm(&pcm, &[EditEvent::new("0:01", 1.0)]);
        assert_eq!(result.bpm, 0);
        assert!(result.beats.is_empty());
        assert_eq!(result.sync_score, 0);
        assert!(result.off_beat_cuts.is_empty());
        assert_eq!(result.suggestions.len(), 1);
        assert!(!result.is_unavailable());
    }

    #[test]
    fn cuts_on_clicks_score_high() {
        let clicks: Vec<f64> = (2..16).map(|i| i as f64 * 0.5).collect();
        let decoder = FixedDecoder { pcm: Some(click_track(&clicks, 8.5)), calls: Cell::new(0) };
        let analyzer = SyncAnalyzer::with_decoder(decoder, &Config::default());

        let edits = vec![
            EditEvent::new("0:02", 2.0),
            EditEvent::new("0:03", 3.0),
            EditEvent::new("0:04", 4.0),
            EditEvent::new("0:05.25", 5.25),
        ];
        let result = analyzer.analyze(&source(), &edits);

        assert_eq!(result.bpm, 120);
        assert_eq!(result.sync_score, 75);
        assert_eq!(result.off_beat_cuts.len(), 1);
        assert_eq!(result.off_beat_cuts[0].timestamp_label, "0:05.25");
        assert!(result.beats.iter().filter(|b| b.on_beat).count() >= 3);
        assert!(result.suggestions.iter().any(|s| s.contains("120")));
    }

    #[test]
    fn audio_summary_describes_the_buffer() {
        let clicks: Vec<f64> = (2..10).map(|i| i as f64 * 0.5).collect();
        let pcm = click_track(&clicks, 5.0);
        let analyzer = SyncAnalyzer::from_config(&Config::default());
        let result = analyzer.analyze_pcm(&pcm, &[]);

        assert!((result.audio.duration - 5.0).abs() < 1e-9);
        assert_eq!(result.audio.sample_rate, 44100);
        assert_eq!(result.audio.beat_count, result.beats.len());
        assert!(result.audio.beat_count > 0);
        // Mostly silence with short bursts: quiet on average, never above the burst level.
        assert!(result.audio.avg_energy > 0.0);
        assert!(result.audio.avg_energy < 0.7);

        let silent = analyzer.analyze_pcm(&PcmBuffer::new(vec![0.0; 44100], 44100), &[]);
        assert_eq!(silent.audio.avg_energy, 0.0);
        assert_eq!(silent.audio.beat_count, 0);
        assert!((silent.audio.duration - 1.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let clicks = [1.3, 1.8, 2.4, 2.9, 3.6];
        let decoder = FixedDecoder { pcm: Some(click_track(&clicks, 4.0)), calls: Cell::new(0) };
        let analyzer = SyncAnalyzer::with_decoder(decoder, &Config::default());
        let edits = vec![EditEvent::new("0:01.8", 1.8), EditEvent::new("0:03", 3.0)];
        assert_eq!(analyzer.analyze(&source(), &edits), analyzer.analyze(&source(), &edits));
    }

    #[test]
    fn all_cuts_on_beat_is_excellent() {
        let clicks: Vec<f64> = (2..10).map(|i| i as f64 * 0.5).collect();
        let analyzer = SyncAnalyzer::from_config(&Config::default());
        let result = analyzer.analyze_pcm(&click_track(&clicks, 5.0), &[EditEvent::new("0:03", 3.0)]);
        assert_eq!(result.sync_score, 100);
        assert_eq!(result.suggestions[0], EXCELLENT);
    }
}
