pub mod background;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod math;
pub mod path;
pub mod renderer;
pub mod scene;

pub use error::{SceneError, SceneResult};
pub use frame::{FrameLoop, FrameReport};
pub use path::{Parameterization, PathAnimator, PathSpec};
