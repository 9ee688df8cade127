use glam::Vec3;
use path_scene::config::SceneConfig;
use path_scene::core::{DisplayContext, ManualClock, TimeSource};
use path_scene::path::Parameterization;
use path_scene::scene::{LoadHandle, Model, NodeKind, SceneContext, TrackedSlot};
use path_scene::{FrameLoop, PathAnimator, SceneError};

const STEP: f64 = 1.0 / 60.0;

fn config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.stars.count = 16;
    config
}

fn animator(config: &SceneConfig) -> PathAnimator {
    config.path.spec().build().unwrap()
}

fn model() -> Model {
    Model::from_geometry(
        "ship",
        vec![Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)],
        vec![],
    )
    .unwrap()
}

fn setup(model: LoadHandle) -> (FrameLoop<ManualClock>, SceneContext) {
    let config = config();
    let animator = animator(&config);
    let scene = SceneContext::assemble(&config, &animator, DisplayContext::new(160, 120), model);
    let frames = FrameLoop::new(ManualClock::new(), animator).with_period(config.path.period_secs);
    (frames, scene)
}

fn tracked_position(scene: &SceneContext) -> Vec3 {
    let id = scene.tracked().unwrap();
    scene.graph().get(id).unwrap().transform.position
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_no_write_before_model_loads() {
    let (sender, handle) = LoadHandle::channel("ship.gltf");
    let (mut frames, mut scene) = setup(handle);

    for _ in 0..5 {
        let report = frames.tick(&mut scene);
        assert_eq!(report.placement, Err(SceneError::TargetNotReady));
        frames.clock_mut().advance(STEP);
    }
    assert!(matches!(scene.tracked_slot(), TrackedSlot::Pending(_)));

    // Stars and path line only
    assert_eq!(scene.graph().len(), 2);
    assert!(scene
        .graph()
        .iter()
        .all(|(_, node)| !matches!(node.kind, NodeKind::Model(_))));

    drop(sender);
}

#[test]
fn test_model_moves_once_loaded() {
    let (sender, handle) = LoadHandle::channel("ship.gltf");
    let (mut frames, mut scene) = setup(handle);

    frames.tick(&mut scene);
    frames.clock_mut().advance(STEP);
    sender.complete(Ok(model()));

    let report = frames.tick(&mut scene);
    let placed = report.placement.unwrap();
    assert_eq!(tracked_position(&scene), placed);
    assert_eq!(placed, frames.animator().position_at_time(report.frame.time, 2.0));
    assert_eq!(scene.graph().len(), 3);
}

#[test]
fn test_failed_load_keeps_loop_running() {
    let (sender, handle) = LoadHandle::channel("missing.gltf");
    let (mut frames, mut scene) = setup(handle);
    sender.complete_import(Err(anyhow::anyhow!("file not found")));

    for n in 0..10 {
        let report = frames.tick(&mut scene);
        assert_eq!(report.frame.number, n);
        assert_eq!(report.placement, Err(SceneError::TargetNotReady));
        frames.clock_mut().advance(STEP);
    }

    match scene.tracked_slot() {
        TrackedSlot::Failed(SceneError::AssetLoadFailure { message, .. }) => {
            assert!(message.contains("file not found"))
        }
        other => panic!("unexpected slot {:?}", other),
    }
}

#[test]
fn test_fixed_steps_pick_up_late_load() {
    let (sender, handle) = LoadHandle::channel("ship.gltf");
    let (mut frames, mut scene) = setup(handle);
    let mut sender = Some(sender);

    let reports: Vec<_> = (0..6)
        .map(|n| {
            if n == 3 {
                if let Some(sender) = sender.take() {
                    sender.complete(Ok(model()));
                }
            }
            frames.step(&mut scene, STEP)
        })
        .collect();

    for report in &reports[..3] {
        assert_eq!(report.placement, Err(SceneError::TargetNotReady));
    }
    for report in &reports[3..] {
        assert!(report.placement.is_ok());
    }
    assert!((reports[5].frame.time - 5.0 * STEP).abs() < 1e-9);
    assert!((frames.clock().now() - 6.0 * STEP).abs() < 1e-9);
}

// ============================================================================
// Timing
// ============================================================================

#[test]
fn test_position_follows_clock() {
    let (mut frames, mut scene) = setup(LoadHandle::ready("ship.gltf", Ok(model())));
    let start = frames.tick(&mut scene).placement.unwrap();
    assert!(start.distance(Vec3::new(-100.0, 0.0, 100.0)) < 1e-3);

    // Half a period later the object is halfway along by distance
    frames.clock_mut().advance(1.0);
    let half = frames.tick(&mut scene).placement.unwrap();
    assert!(half.distance(frames.animator().position_at(0.5)) < 1e-4);

    // A full period returns to the start
    frames.clock_mut().advance(1.0);
    let again = frames.tick(&mut scene).placement.unwrap();
    assert!(again.distance(start) < 1e-2);
}

#[test]
fn test_frame_deltas_follow_clock() {
    let (mut frames, mut scene) = setup(LoadHandle::ready("ship.gltf", Ok(model())));

    let first = frames.tick(&mut scene).frame;
    frames.clock_mut().advance(0.5);
    let second = frames.tick(&mut scene).frame;

    assert_eq!((first.number, first.delta), (0, 0.0));
    assert_eq!(second.number, 1);
    assert_eq!(second.time, 0.5);
    assert_eq!(second.delta, 0.5);
}

#[test]
fn test_index_mode_passes_through_control_point() {
    let mut config = config();
    config.path.parameterization = Parameterization::Index;
    let animator = animator(&config);
    let mut scene = SceneContext::assemble(
        &config,
        &animator,
        DisplayContext::new(160, 120),
        LoadHandle::ready("ship.gltf", Ok(model())),
    );
    let mut frames = FrameLoop::new(ManualClock::starting_at(1.0), animator).with_period(2.0);

    let placed = frames.tick(&mut scene).placement.unwrap();
    assert!(placed.distance(Vec3::new(50.0, -5.0, 50.0)) < 1e-3);
}
