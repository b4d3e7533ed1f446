//! Root CLI structure for skelanim

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use skelanim::{DEFAULT_MAX_BONES, DEFAULT_MAX_HIERARCHY_DEPTH, EvaluatorConfig};

#[derive(Parser)]
#[command(name = "skelanim")]
#[command(about = "Play back skeletal animations and inspect bone matrices", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Evaluator limits, overridable from the environment
#[derive(Args, Debug, Clone, Copy)]
pub struct LimitArgs {
    /// Size of the bone matrix buffer
    #[arg(long, env = "SKELANIM_MAX_BONES", default_value_t = DEFAULT_MAX_BONES, global = true)]
    pub max_bones: usize,

    /// Deepest skeleton hierarchy accepted
    #[arg(
        long,
        env = "SKELANIM_MAX_DEPTH",
        default_value_t = DEFAULT_MAX_HIERARCHY_DEPTH,
        global = true
    )]
    pub max_depth: usize,
}

impl LimitArgs {
    pub fn to_config(self) -> EvaluatorConfig {
        EvaluatorConfig::default()
            .with_max_bones(self.max_bones)
            .with_max_hierarchy_depth(self.max_depth)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display the skeleton, bone table and clips of a scene
    Info {
        /// Path to the scene description (JSON)
        file: PathBuf,

        /// Maximum skeleton depth to display
        #[arg(short, long)]
        depth: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the bones selectable for single-bone playback
    Bones {
        /// Path to the scene description (JSON)
        file: PathBuf,

        /// Clip to list bones for (defaults to the first clip)
        #[arg(short, long)]
        clip: Option<String>,
    },

    /// Play a clip and print the resulting bone matrices
    Play(PlayArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Path to the scene description (JSON)
    pub file: PathBuf,

    /// Clip to play (defaults to the first clip)
    #[arg(short, long)]
    pub clip: Option<String>,

    /// Number of frames to evaluate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub frames: usize,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f64,

    /// Only animate this bone; everything else stays in bind pose
    #[arg(short, long)]
    pub bone: Option<String>,

    /// Evaluate with playback stopped (bind pose, time frozen)
    #[arg(long)]
    pub paused: bool,

    /// Print every frame instead of only the last one
    #[arg(long)]
    pub all_frames: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
