use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource as SymphoniaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::features::{extend_mono, ChannelMode, PcmBuffer};
use crate::error::SyncError;

/// Where the media to analyze comes from.
#[derive(Clone, Debug)]
pub enum MediaSource {
    File(PathBuf),
    Bytes {
        data: Arc<[u8]>,
        /// Probe hint only, e.g. "mp4" or "wav"
        extension: Option<String>,
    },
}

impl MediaSource {
    pub fn bytes(data: impl Into<Arc<[u8]>>, extension: Option<&str>) -> Self {
        MediaSource::Bytes {
            data: data.into(),
            extension: extension.map(str::to_owned),
        }
    }

    fn extension(&self) -> Option<&str> {
        match self {
            MediaSource::File(path) => path.extension().and_then(|e| e.to_str()),
            MediaSource::Bytes { extension, .. } => extension.as_deref(),
        }
    }

    fn describe(&self) -> String {
        match self {
            MediaSource::File(path) => path.display().to_string(),
            MediaSource::Bytes { data, .. } => format!("<{} bytes in memory>", data.len()),
        }
    }
}

impl From<PathBuf> for MediaSource {
    fn from(path: PathBuf) -> Self {
        MediaSource::File(path)
    }
}

impl From<&Path> for MediaSource {
    fn from(path: &Path) -> Self {
        MediaSource::File(path.to_path_buf())
    }
}

/// Turns a media container into a mono PCM buffer.
pub trait AudioDecoder {
    fn decode(&self, source: &MediaSource) -> Result<PcmBuffer, SyncError>;
}

/// Default decoder backed by symphonia's probe and codec registries.
#[derive(Clone, Debug, Default)]
pub struct SymphoniaDecoder {
    pub channel_mode: ChannelMode,
}

impl SymphoniaDecoder {
    pub fn new(channel_mode: ChannelMode) -> Self {
        Self { channel_mode }
    }

    fn open(source: &MediaSource) -> Result<Box<dyn SymphoniaSource>, SyncError> {
        match source {
            MediaSource::File(path) => {
                let file = std::fs::File::open(path)
                    .map_err(|e| SyncError::FileOpen(format!("{}: {}", path.display(), e)))?;
                Ok(Box::new(file))
            }
            MediaSource::Bytes { data, .. } => Ok(Box::new(Cursor::new(Arc::clone(data)))),
        }
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, source: &MediaSource) -> Result<PcmBuffer, SyncError> {
        let mss = MediaSourceStream::new(Self::open(source)?, Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = source.extension() {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| SyncError::UnsupportedFormat(e.to_string()))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
            .ok_or(SyncError::NoAudioTrack)?;

        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| SyncError::DecoderInit(e.to_string()))?;

        let mut samples: Vec<f32> = Vec::new();
        let mut channels = track.codec_params.channels.map_or(1, |c| c.count());

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    break;
                }
                Err(e) => return Err(SyncError::Decode(e.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(msg)) => {
                    log::debug!("Skipping corrupt packet: {}", msg);
                    continue;
                }
                Err(e) => return Err(SyncError::Decode(e.to_string())),
            };

            // The packet's own layout wins over container metadata.
            let spec = *decoded.spec();
            channels = spec.channels.count();
            sample_rate.get_or_insert(spec.rate);

            let mut sample_buf = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            extend_mono(&mut samples, sample_buf.samples(), channels, self.channel_mode);
        }

        let sample_rate = sample_rate.ok_or(SyncError::UnknownSampleRate)?;
        let pcm = PcmBuffer::new(samples, sample_rate);
        if pcm.is_empty() {
            return Err(SyncError::EmptyAudio);
        }

        log::info!(
            "Decoded audio from {}: {} samples, {}Hz, {} channel(s), {:.1}s",
            source.describe(),
            pcm.samples.len(),
            sample_rate,
            channels,
            pcm.duration()
        );

        Ok(pcm)
    }
}
