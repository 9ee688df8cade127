use crate::background::BackgroundLogic;
use crate::config::BackgroundConfig;
use crate::core::layer::{black_frame, composite_over};
use crate::core::{DisplayContext, FrameInfo, LayerStack};
use crate::scene::{SceneContext, SceneRasterizer};

/// Turns the scene into one RGBA frame per call
pub trait SceneRenderer {
    /// Composited frame at the scene's display size, rows top to bottom
    fn render(&mut self, frame: &FrameInfo, scene: &SceneContext) -> Vec<u8>;
}

/// CPU renderer: background layers first, then the rasterized scene on top.
///
/// The background has no depth and never occludes the scene.
pub struct SoftwareRenderer {
    layers: LayerStack,
    rasterizer: SceneRasterizer,
    display: DisplayContext,
}

impl SoftwareRenderer {
    pub fn new(display: DisplayContext, background: &BackgroundConfig) -> Self {
        let mut layers = LayerStack::new();
        if background.enabled {
            layers = layers.with_layer(BackgroundLogic::new(display).into_layer(background.update_hz));
        }

        Self {
            layers,
            rasterizer: SceneRasterizer::default(),
            display,
        }
    }

    pub fn with_rasterizer(mut self, rasterizer: SceneRasterizer) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn display(&self) -> &DisplayContext {
        &self.display
    }

    fn sync_display(&mut self, display: &DisplayContext) {
        if *display != self.display {
            self.display = *display;
            self.layers = self.layers.resize(display);
        }
    }
}

impl SceneRenderer for SoftwareRenderer {
    fn render(&mut self, frame: &FrameInfo, scene: &SceneContext) -> Vec<u8> {
        self.sync_display(scene.display());
        self.layers = self.layers.update(frame);

        let mut pixels = if self.layers.is_empty() {
            black_frame(&self.display)
        } else {
            self.layers.composite(&self.display)
        };
        composite_over(&mut pixels, &self.rasterizer.render(scene));
        pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::{bake, BackgroundField};
    use crate::config::CameraConfig;
    use crate::scene::{LoadHandle, Model, OrbitCamera};
    use glam::Vec3;

    fn scene(width: u32, height: u32) -> SceneContext {
        let display = DisplayContext::new(width, height);
        SceneContext::new(display, OrbitCamera::from_config(&CameraConfig::default(), display.aspect()))
    }

    fn frame(time: f64) -> FrameInfo {
        FrameInfo {
            number: 0,
            time,
            delta: 0.0,
        }
    }

    #[test]
    fn empty_scene_shows_background() {
        let mut renderer = SoftwareRenderer::new(DisplayContext::new(16, 12), &BackgroundConfig::default());
        let pixels = renderer.render(&frame(1.5), &scene(16, 12));

        let expected = bake(&BackgroundField::new(16, 12), &DisplayContext::new(16, 12), 1.5);
        assert_eq!(pixels, expected);
    }

    #[test]
    fn disabled_background_is_black() {
        let config = BackgroundConfig {
            enabled: false,
            ..BackgroundConfig::default()
        };
        let mut renderer = SoftwareRenderer::new(DisplayContext::new(4, 4), &config);
        let pixels = renderer.render(&frame(0.0), &scene(4, 4));
        assert_eq!(pixels, black_frame(&DisplayContext::new(4, 4)));
    }

    fn lit_pixels(pixels: &[u8]) -> usize {
        pixels.chunks(4).filter(|p| p[..3] != [0, 0, 0]).count()
    }

    #[test]
    fn rasterizer_without_marker_draws_less() {
        let no_background = BackgroundConfig {
            enabled: false,
            ..BackgroundConfig::default()
        };
        let mut scene = scene(64, 48);
        let dot = Model::from_geometry("dot", vec![Vec3::ZERO], vec![]).unwrap();
        scene.track(LoadHandle::ready("dot.gltf", Ok(dot)));
        scene.poll_assets().unwrap();

        let mut marked = SoftwareRenderer::new(DisplayContext::new(64, 48), &no_background);
        let mut plain = SoftwareRenderer::new(DisplayContext::new(64, 48), &no_background)
            .with_rasterizer(SceneRasterizer { marker_radius: 0 });

        let with_marker = lit_pixels(&marked.render(&frame(0.0), &scene));
        let without_marker = lit_pixels(&plain.render(&frame(0.0), &scene));

        // A radius 3 disc covers 29 pixels; the bare dot and its bounds a couple
        assert!(with_marker >= 20, "{}", with_marker);
        assert!((1..=4).contains(&without_marker), "{}", without_marker);
    }

    #[test]
    fn follows_scene_resize() {
        let mut renderer = SoftwareRenderer::new(DisplayContext::new(8, 8), &BackgroundConfig::default());
        let mut scene = scene(8, 8);
        scene.resize(10, 6);

        let pixels = renderer.render(&frame(0.0), &scene);
        assert_eq!(pixels.len(), 10 * 6 * 4);
        assert_eq!(renderer.display().width, 10);
    }
}
