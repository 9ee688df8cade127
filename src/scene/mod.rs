//! Scene state around the animated object: graph, camera, assets and the
//! software rasterizer that draws them

pub mod camera;
pub mod context;
pub mod graph;
pub mod loader;
pub mod model;
pub mod overlay;
pub mod stars;

pub use camera::OrbitCamera;
pub use context::{SceneContext, TrackedSlot};
pub use graph::{NodeId, NodeKind, SceneGraph, SceneNode, Transform};
pub use loader::{AssetLoader, GltfLoader, LoadHandle, LoadSender, LoadStatus};
pub use model::Model;
pub use overlay::SceneRasterizer;
pub use stars::Starfield;
