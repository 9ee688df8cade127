use std::sync::Arc;

use glam::Vec3;
use log::{debug, error, info};

use super::camera::OrbitCamera;
use super::graph::{NodeId, NodeKind, SceneGraph, SceneNode};
use super::loader::{LoadHandle, LoadStatus};
use super::stars::{Starfield, STAR_COLOR};
use crate::config::SceneConfig;
use crate::core::{Controller, DisplayContext};
use crate::error::{SceneError, SceneResult};
use crate::path::PathAnimator;

/// Color of the drawn path line
pub const PATH_LINE_COLOR: [u8; 4] = [255, 0, 0, 255];

/// Where the tracked object is in its lifecycle
#[derive(Debug)]
pub enum TrackedSlot {
    /// Nothing requested
    Absent,
    Pending(LoadHandle),
    Ready(NodeId),
    /// Load gave up; the scene runs without the object
    Failed(SceneError),
}

/// Everything the frame loop mutates: graph, camera, viewport and the
/// tracked object. Owned by the loop and passed down explicitly.
#[derive(Debug)]
pub struct SceneContext {
    graph: SceneGraph,
    camera: OrbitCamera,
    display: DisplayContext,
    tracked: TrackedSlot,
}

impl SceneContext {
    pub fn new(display: DisplayContext, camera: OrbitCamera) -> Self {
        Self {
            graph: SceneGraph::new(),
            camera,
            display,
            tracked: TrackedSlot::Absent,
        }
    }

    /// Scene described by `config`: stars, optional path line, and `model`
    /// as the tracked object once it loads
    pub fn assemble(
        config: &SceneConfig,
        animator: &PathAnimator,
        display: DisplayContext,
        model: LoadHandle,
    ) -> Self {
        let camera = OrbitCamera::from_config(&config.camera, display.aspect());
        let mut scene = Self::new(display, camera);

        scene.graph.add_object(SceneNode::new(
            "stars",
            NodeKind::Points {
                points: Starfield::from_config(&config.stars).into_points(),
                color: STAR_COLOR,
            },
        ));

        if config.path.show_line {
            scene.graph.add_object(SceneNode::new(
                "path",
                NodeKind::Polyline {
                    points: animator.curve().sample(config.path.line_samples.max(1)),
                    color: PATH_LINE_COLOR,
                },
            ));
        }

        scene.track(model);
        scene
    }

    /// Follow a pending load as the tracked object, replacing any previous one
    pub fn track(&mut self, handle: LoadHandle) {
        if let TrackedSlot::Ready(id) = self.tracked {
            self.graph.remove_object(id);
        }
        self.tracked = TrackedSlot::Pending(handle);
    }

    /// Check the pending load without blocking.
    ///
    /// Returns the node id on the frame the object enters the scene. A failed
    /// load is logged here, once, and the slot stays `Failed`.
    pub fn poll_assets(&mut self) -> Option<NodeId> {
        let TrackedSlot::Pending(handle) = &mut self.tracked else {
            return None;
        };

        match handle.poll() {
            LoadStatus::Pending => None,
            LoadStatus::Ready(model) => {
                info!(
                    "Model {:?} entered the scene ({} vertices)",
                    model.name,
                    model.vertices.len()
                );
                let node = SceneNode::new(model.name.clone(), NodeKind::Model(Arc::new(model)));
                let id = self.graph.add_object(node);
                self.tracked = TrackedSlot::Ready(id);
                Some(id)
            }
            LoadStatus::Failed(e) => {
                error!("{}; continuing without the model", e);
                self.tracked = TrackedSlot::Failed(e);
                None
            }
        }
    }

    /// Node of the tracked object, or `TargetNotReady` while it is absent
    pub fn tracked(&self) -> SceneResult<NodeId> {
        match self.tracked {
            TrackedSlot::Ready(id) => Ok(id),
            _ => Err(SceneError::TargetNotReady),
        }
    }

    pub fn tracked_slot(&self) -> &TrackedSlot {
        &self.tracked
    }

    /// Write the tracked object's position
    pub fn place_tracked(&mut self, position: Vec3) -> SceneResult<()> {
        let id = self.tracked()?;
        self.graph.set_position(id, position)
    }

    /// New viewport: camera aspect follows
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("Scene resized to {}x{}", width, height);
        self.display = DisplayContext::new(width, height);
        self.camera.set_aspect(self.display.aspect());
    }

    /// Per-frame camera input
    pub fn update_camera(&mut self, delta: f32, controller: &dyn Controller) {
        self.camera.update(delta, &self.display, controller);
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn display(&self) -> &DisplayContext {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::scene::model::Model;

    fn scene() -> SceneContext {
        let display = DisplayContext::new(800, 600);
        SceneContext::new(display, OrbitCamera::from_config(&CameraConfig::default(), display.aspect()))
    }

    fn model() -> Model {
        Model::from_geometry("box", vec![Vec3::ZERO, Vec3::ONE], vec![]).unwrap()
    }

    #[test]
    fn absent_until_loaded() {
        let mut scene = scene();
        assert_eq!(scene.tracked(), Err(SceneError::TargetNotReady));

        let (sender, handle) = LoadHandle::channel("box.gltf");
        scene.track(handle);
        assert!(scene.poll_assets().is_none());
        assert_eq!(scene.place_tracked(Vec3::X), Err(SceneError::TargetNotReady));

        sender.complete(Ok(model()));
        let id = scene.poll_assets().unwrap();
        assert_eq!(scene.tracked(), Ok(id));
        scene.place_tracked(Vec3::X).unwrap();
        assert_eq!(scene.graph().get(id).unwrap().transform.position, Vec3::X);
    }

    #[test]
    fn failure_is_reported_once() {
        let mut scene = scene();
        scene.track(LoadHandle::ready(
            "gone.gltf",
            Err(SceneError::AssetLoadFailure {
                path: "gone.gltf".into(),
                message: "missing".into(),
            }),
        ));

        assert!(scene.poll_assets().is_none());
        assert!(matches!(scene.tracked_slot(), TrackedSlot::Failed(_)));
        // Later polls are no-ops
        assert!(scene.poll_assets().is_none());
        assert_eq!(scene.tracked(), Err(SceneError::TargetNotReady));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut scene = scene();
        scene.resize(1000, 500);
        assert_eq!(scene.display().width, 1000);
        assert_eq!(scene.camera().aspect, 2.0);
    }

    #[test]
    fn retracking_drops_old_node() {
        let mut scene = scene();
        scene.track(LoadHandle::ready("a.gltf", Ok(model())));
        let first = scene.poll_assets().unwrap();

        scene.track(LoadHandle::ready("b.gltf", Ok(model())));
        assert!(!scene.graph().contains(first));
        assert!(scene.poll_assets().is_some());
        assert_eq!(scene.graph().len(), 1);
    }
}
