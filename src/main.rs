use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use path_scene::cli::Cli;
use path_scene::config::SceneConfig;
use path_scene::core::input_adapter::WinitController;
use path_scene::core::surface_renderer::SurfaceRenderer;
use path_scene::core::{DisplayContext, FrameRate, ManualClock, SystemClock};
use path_scene::frame::FrameLoop;
use path_scene::path::PathAnimator;
use path_scene::renderer::{SceneRenderer, SoftwareRenderer};
use path_scene::scene::{AssetLoader, GltfLoader, SceneContext};

/// Seconds between FPS reports
const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    config: SceneConfig,
    frames: FrameLoop<SystemClock>,
    input: WinitController,
    fps: FrameRate,
    window: Option<Arc<Window>>,
    presenter: Option<SurfaceRenderer>,
    scene: Option<SceneContext>,
    renderer: Option<SoftwareRenderer>,
}

impl App {
    fn new(config: SceneConfig, animator: PathAnimator) -> Self {
        let frames = FrameLoop::new(SystemClock::new(), animator).with_period(config.path.period_secs);
        Self {
            config,
            frames,
            input: WinitController::new(),
            fps: FrameRate::new(FPS_UPDATE_INTERVAL),
            window: None,
            presenter: None,
            scene: None,
            renderer: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(self.config.window.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            )
            .context("Failed to create window")?;
        let window = Arc::new(window);

        let presenter = SurfaceRenderer::new(window.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize GPU presenter: {}", e))?;

        let size = window.inner_size();
        let display = DisplayContext::new(size.width, size.height);
        let model = GltfLoader.load(&self.config.model_path);

        self.scene = Some(SceneContext::assemble(&self.config, self.frames.animator(), display, model));
        self.renderer = Some(SoftwareRenderer::new(display, &self.config.background));
        self.presenter = Some(presenter);
        self.window = Some(window);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(scene) = &mut self.scene {
            scene.resize(width, height);
        }
        if let Some(presenter) = &mut self.presenter {
            presenter.resize(width, height);
        }
    }

    fn redraw(&mut self) {
        let (Some(scene), Some(renderer), Some(presenter)) =
            (&mut self.scene, &mut self.renderer, &mut self.presenter)
        else {
            return;
        };

        let report = self.frames.tick(scene);
        scene.update_camera(report.frame.delta, &self.input);
        self.input.reset_deltas();

        if let Some(fps) = self.fps.tick(report.frame.delta) {
            debug!("{:.1} fps", fps);
        }

        let display = *scene.display();
        if display.is_empty() {
            return;
        }

        let pixels = renderer.render(&report.frame, scene);
        if let Err(e) = presenter.present(&pixels, display.width, display.height) {
            warn!("Present failed: {}", e);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                error!("{:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            other => self.input.process_event(&other),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_config(cli: &Cli) -> Result<SceneConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            SceneConfig::load(path)?
        }
        None => SceneConfig::default(),
    };
    cli.apply(&mut config);

    info!(
        "Model {:?}, {} control points, {:?} curve, {:?} timing, {}s per loop",
        config.model_path,
        config.path.points.len(),
        config.path.curve,
        config.path.parameterization,
        config.path.period_secs
    );
    Ok(config)
}

/// Fixed-step run without a window; logs where the object is each frame.
///
/// The model loads in the background like the windowed run, so early frames
/// may report the object as not ready yet.
fn run_headless(cli: &Cli, config: &SceneConfig, animator: PathAnimator) -> Result<()> {
    let display = DisplayContext::new(config.window.width, config.window.height);

    let model = GltfLoader.load(&config.model_path);
    let mut scene = SceneContext::assemble(config, &animator, display, model);
    let mut frames = FrameLoop::new(ManualClock::new(), animator).with_period(config.path.period_secs);
    let step = cli.frame_step();

    for _ in 0..cli.frames {
        let report = frames.step(&mut scene, step);
        match report.placement {
            Ok(position) => info!(
                "frame {} t={:.3}s position ({:.3}, {:.3}, {:.3})",
                report.frame.number, report.frame.time, position.x, position.y, position.z
            ),
            Err(e) => debug!("frame {}: {}", report.frame.number, e),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let animator = config.path.spec().build().context("Invalid path configuration")?;

    if cli.headless {
        return run_headless(&cli, &config, animator);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, animator);

    info!("Controls: drag to orbit, scroll or W/S to zoom, Q/E to turn, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
