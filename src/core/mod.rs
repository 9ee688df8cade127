pub mod canvas;
pub mod clock;
pub mod controller;
pub mod display_context;
pub mod gpu_context;
pub mod input_adapter;
pub mod layer;
pub mod surface_renderer;
pub mod timer;

pub use canvas::{Canvas, DrawOp, Rgba};
pub use clock::{FrameInfo, ManualClock, SystemClock, TimeSource};
pub use controller::{Button, Controller, NoInput};
pub use display_context::DisplayContext;
pub use layer::{composite_over, Layer, LayerLogic, LayerOutput, LayerStack, TimedLayer};
pub use timer::{FixedHz, FrameRate};
