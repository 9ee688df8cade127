use log::debug;

use super::clock::FrameInfo;
use super::display_context::DisplayContext;
use super::timer::FixedHz;

/// Output from a layer's render call - just pixels
#[derive(Debug, Clone)]
pub struct LayerOutput {
    /// RGBA pixel data, rows top to bottom
    pub pixels: Vec<u8>,
    /// Optional alpha mask (0.0 = transparent, 1.0 = opaque)
    pub alpha: Option<Vec<f32>>,
}

impl LayerOutput {
    /// Create output with fully opaque pixels
    pub fn opaque(pixels: Vec<u8>) -> Self {
        Self { pixels, alpha: None }
    }

    /// Create output with alpha mask
    pub fn with_alpha(pixels: Vec<u8>, alpha: Vec<f32>) -> Self {
        Self {
            pixels,
            alpha: Some(alpha),
        }
    }
}

/// Layer with independent update rate control
pub trait Layer {
    /// Returns new layer state (functional style)
    fn update(&self, frame: &FrameInfo) -> Box<dyn Layer>;

    /// Render layer pixels
    fn render(&self, context: &DisplayContext) -> LayerOutput;

    /// Returns layer rebuilt for new display dimensions
    fn resize(&self, context: &DisplayContext) -> Box<dyn Layer>;

    /// Layer priority for composition (lower = background, higher = foreground)
    fn priority(&self) -> i32 {
        0
    }

    /// Target update rate (Hz)
    fn target_fps(&self) -> f32 {
        60.0
    }
}

/// Core layer logic - implemented by specific layers
pub trait LayerLogic: Clone {
    fn update(&self, frame: &FrameInfo) -> Self;

    fn render(&self, context: &DisplayContext) -> LayerOutput;

    /// Logic rebuilt for new display dimensions
    fn resize(&self, context: &DisplayContext) -> Self;
}

/// Layer that manages its own update timing with internal timer
pub struct TimedLayer<T: LayerLogic> {
    logic: T,
    timer: FixedHz,
    priority: i32,
}

impl<T: LayerLogic> TimedLayer<T> {
    /// Create layer with specific update rate
    pub fn new(logic: T, hz: f32, priority: i32) -> Self {
        Self {
            logic,
            timer: FixedHz::new(hz),
            priority,
        }
    }

    pub fn hz(&self) -> f32 {
        1.0 / self.timer.interval
    }

    pub fn logic(&self) -> &T {
        &self.logic
    }
}

impl<T: LayerLogic + 'static> Layer for TimedLayer<T> {
    fn update(&self, frame: &FrameInfo) -> Box<dyn Layer> {
        let mut timer = self.timer;

        // The first frame always runs so a fresh layer never shows stale pixels
        let logic = if timer.tick(frame.delta) || frame.number == 0 {
            self.logic.update(frame)
        } else {
            self.logic.clone()
        };

        Box::new(TimedLayer {
            logic,
            timer,
            priority: self.priority,
        })
    }

    fn render(&self, context: &DisplayContext) -> LayerOutput {
        self.logic.render(context)
    }

    fn resize(&self, context: &DisplayContext) -> Box<dyn Layer> {
        Box::new(TimedLayer {
            logic: self.logic.resize(context),
            timer: self.timer,
            priority: self.priority,
        })
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn target_fps(&self) -> f32 {
        self.hz()
    }
}

/// Composable layer stack
pub struct LayerStack {
    layers: Vec<Box<dyn Layer>>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add layer and return new stack
    pub fn with_layer(mut self, layer: Box<dyn Layer>) -> Self {
        self.layers.push(layer);
        self.layers.sort_by_key(|l| l.priority());
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Update all layers - functional transformation
    pub fn update(&self, frame: &FrameInfo) -> LayerStack {
        LayerStack {
            layers: self.layers.iter().map(|layer| layer.update(frame)).collect(),
        }
    }

    pub fn resize(&self, context: &DisplayContext) -> LayerStack {
        LayerStack {
            layers: self.layers.iter().map(|layer| layer.resize(context)).collect(),
        }
    }

    /// Layer outputs, background first
    pub fn render<'a>(
        &'a self,
        context: &'a DisplayContext,
    ) -> impl Iterator<Item = LayerOutput> + 'a {
        self.layers.iter().map(move |layer| layer.render(context))
    }

    /// Blend every layer over an opaque black frame
    pub fn composite(&self, context: &DisplayContext) -> Vec<u8> {
        let mut frame = black_frame(context);
        for output in self.render(context) {
            composite_over(&mut frame, &output);
        }
        frame
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque black RGBA buffer sized for the display
pub fn black_frame(context: &DisplayContext) -> Vec<u8> {
    let mut pixels = vec![0; context.buffer_size()];
    for alpha in pixels.iter_mut().skip(3).step_by(4) {
        *alpha = 255;
    }
    pixels
}

/// Blend `layer` over `dst` in place.
///
/// Outputs whose size does not match `dst` are skipped; a layer that has not
/// seen the latest resize yet drops out for one frame.
pub fn composite_over(dst: &mut [u8], layer: &LayerOutput) {
    if layer.pixels.len() != dst.len() {
        debug!(
            "Skipping layer output of {} bytes for {} byte frame",
            layer.pixels.len(),
            dst.len()
        );
        return;
    }

    let Some(alpha) = &layer.alpha else {
        dst.copy_from_slice(&layer.pixels);
        return;
    };

    for ((out, src), &a) in dst
        .chunks_exact_mut(4)
        .zip(layer.pixels.chunks_exact(4))
        .zip(alpha.iter())
    {
        if a <= 0.0 {
            continue;
        }
        let a = a.min(1.0);
        for c in 0..3 {
            let blended = src[c] as f32 * a + out[c] as f32 * (1.0 - a);
            out[c] = blended.round() as u8;
        }
        out[3] = out[3].max(src[3]);
    }
}
