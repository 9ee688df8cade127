use std::sync::Arc;

use glam::DVec2;

use crate::core::{DisplayContext, FrameInfo, Layer, LayerLogic, LayerOutput, TimedLayer};
use crate::math::to_rgba8;

use super::field::BackgroundField;

/// Background sits below every other layer
pub const BACKGROUND_PRIORITY: i32 = -100;

/// Layer logic that bakes the background field into an opaque frame.
///
/// Pixels are recomputed on update and resize only; renders between updates
/// reuse the cached frame.
#[derive(Debug, Clone)]
pub struct BackgroundLogic {
    field: BackgroundField,
    context: DisplayContext,
    time: f64,
    pixels: Arc<[u8]>,
}

impl BackgroundLogic {
    pub fn new(context: DisplayContext) -> Self {
        Self::baked(context, 0.0)
    }

    /// Wrap in a layer refreshed at `hz`
    pub fn into_layer(self, hz: f32) -> Box<dyn Layer> {
        Box::new(TimedLayer::new(self, hz, BACKGROUND_PRIORITY))
    }

    fn baked(context: DisplayContext, time: f64) -> Self {
        let field = BackgroundField::new(context.width, context.height);
        Self {
            field,
            context,
            time,
            pixels: bake(&field, &context, time).into(),
        }
    }

    /// Time the cached frame was computed for
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Fragment coordinate of pixel (`x`, `y`) in a top-down buffer of `height` rows.
///
/// Fragments use a bottom-left origin with pixel centers at half offsets.
pub fn fragment_coord(x: u32, y: u32, height: u32) -> DVec2 {
    DVec2::new(x as f64 + 0.5, height as f64 - y as f64 - 0.5)
}

/// Evaluate the field for every pixel, rows top to bottom
pub fn bake(field: &BackgroundField, context: &DisplayContext, time: f64) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(context.buffer_size());
    for y in 0..context.height {
        for x in 0..context.width {
            let color = field.shade_fragment(fragment_coord(x, y, context.height), time);
            pixels.extend_from_slice(&to_rgba8(color));
        }
    }
    pixels
}

impl LayerLogic for BackgroundLogic {
    fn update(&self, frame: &FrameInfo) -> Self {
        Self {
            field: self.field,
            context: self.context,
            time: frame.time,
            pixels: bake(&self.field, &self.context, frame.time).into(),
        }
    }

    fn render(&self, _context: &DisplayContext) -> LayerOutput {
        LayerOutput::opaque(self.pixels.to_vec())
    }

    fn resize(&self, context: &DisplayContext) -> Self {
        log::debug!("Rebaking background at {}x{}", context.width, context.height);
        Self::baked(*context, self.time)
    }
}
