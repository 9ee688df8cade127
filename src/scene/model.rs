use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use log::{debug, info, warn};
use std::path::Path;

use crate::math::Aabb;

/// Static mesh geometry flattened into model space
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    /// Vertex positions with node transforms applied
    pub vertices: Vec<Vec3>,
    /// Triangles as indices into `vertices`
    pub triangles: Vec<[u32; 3]>,
    pub bounds: Aabb,
}

impl Model {
    /// Build a model from raw geometry; `None` if there are no vertices
    pub fn from_geometry(name: impl Into<String>, vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Option<Self> {
        let bounds = Aabb::from_points(&vertices)?;
        Some(Self {
            name: name.into(),
            vertices,
            triangles,
            bounds,
        })
    }

    /// Import every mesh of every scene in a glTF file
    pub fn from_gltf(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading glTF file: {:?}", path);

        let (gltf, buffers, _images) =
            gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

        debug!(
            "glTF has {} scenes, {} nodes, {} meshes",
            gltf.scenes().count(),
            gltf.nodes().count(),
            gltf.meshes().count()
        );

        let mut geometry = Geometry::default();
        for scene in gltf.scenes() {
            for node in scene.nodes() {
                geometry.visit_node(&node, &buffers, &Mat4::IDENTITY)?;
            }
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let model = Self::from_geometry(name, geometry.vertices, geometry.triangles)
            .with_context(|| format!("No geometry found in glTF file: {:?}", path))?;

        info!(
            "Loaded {:?}: {} vertices, {} triangles",
            model.name,
            model.vertices.len(),
            model.triangles.len()
        );
        Ok(model)
    }
}

/// Accumulator for the node walk
#[derive(Default)]
struct Geometry {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl Geometry {
    fn visit_node(&mut self, node: &gltf::Node, buffers: &[gltf::buffer::Data], parent: &Mat4) -> Result<()> {
        let transform = *parent * Mat4::from_cols_array_2d(&node.transform().matrix());

        if let Some(mesh) = node.mesh() {
            self.add_mesh(&mesh, buffers, &transform)?;
        }

        for child in node.children() {
            self.visit_node(&child, buffers, &transform)?;
        }

        Ok(())
    }

    fn add_mesh(&mut self, mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data], transform: &Mat4) -> Result<()> {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                warn!("Skipping {:?} primitive in mesh {:?}", primitive.mode(), mesh.name());
                continue;
            }

            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));
            let positions = reader
                .read_positions()
                .with_context(|| format!("Mesh {:?} has a primitive without positions", mesh.name()))?;

            let base = self.vertices.len() as u32;
            self.vertices
                .extend(positions.map(|p| transform.transform_point3(Vec3::from_array(p))));
            let count = self.vertices.len() as u32 - base;

            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..count).collect(),
            };

            self.triangles.extend(
                indices
                    .chunks_exact(3)
                    .filter(|tri| tri.iter().all(|i| *i < count))
                    .map(|tri| [base + tri[0], base + tri[1], base + tri[2]]),
            );
        }

        Ok(())
    }
}
