use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cutsync", about = "Score how well a music video's cuts land on the beat")]
pub struct Cli {
    /// Input media file (MP4, WAV, MP3, FLAC, OGG)
    pub input: PathBuf,

    /// JSON edit list: [{"timestamp": "0:05", "seconds": 5.0}, ...]
    #[arg(short, long)]
    pub edits: Option<PathBuf>,

    /// Edit point label (e.g. 0:42 or 1:05.5), repeatable
    #[arg(long = "cut")]
    pub cuts: Vec<String>,

    /// Config file (defaults to ./cutsync.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Average all channels instead of analyzing the first one
    #[arg(long)]
    pub downmix: bool,

    /// On-beat tolerance in seconds
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}
