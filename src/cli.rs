// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::SceneConfig;
use crate::path::Parameterization;

#[derive(Parser, Debug, Clone)]
#[command(name = "path-scene")]
#[command(about = "Model animated along a spline over a procedural background", long_about = None)]
pub struct Cli {
    /// JSON config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// glTF model to animate
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// How time maps onto the path
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Treat the path as open instead of a loop
    #[arg(long)]
    pub open: bool,

    /// Run the frame loop without a window
    #[arg(long)]
    pub headless: bool,

    /// Frames to run headless
    #[arg(long, default_value_t = 120)]
    pub frames: u64,

    /// Headless frame rate
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Index,
    ArcLength,
}

impl From<ModeArg> for Parameterization {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Index => Parameterization::Index,
            ModeArg::ArcLength => Parameterization::ArcLength,
        }
    }
}

impl Cli {
    /// Apply flags on top of a loaded config
    pub fn apply(&self, config: &mut SceneConfig) {
        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(mode) = self.mode {
            config.path.parameterization = mode.into();
        }
        if self.open {
            config.path.closed = false;
        }
    }

    /// Seconds per headless frame
    pub fn frame_step(&self) -> f64 {
        1.0 / self.fps.max(1.0)
    }
}
