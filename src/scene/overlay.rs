use glam::{Mat4, Vec2, Vec3};

use super::context::SceneContext;
use super::graph::NodeKind;
use crate::core::{Canvas, DisplayContext, DrawOp, LayerOutput, Rgba};
use crate::scene::camera::project_with;

/// Model vertices
pub const MODEL_COLOR: Rgba = [120, 200, 255, 255];

/// Model bounding box wireframe
pub const MODEL_BOUNDS_COLOR: Rgba = [255, 220, 80, 255];

/// Projects scene nodes into a transparent canvas for compositing over the
/// background. Nodes draw in graph order, later ones on top.
#[derive(Debug, Clone, Copy)]
pub struct SceneRasterizer {
    /// Radius of the marker at the tracked object's origin; 0 disables it
    pub marker_radius: u32,
}

impl Default for SceneRasterizer {
    fn default() -> Self {
        Self { marker_radius: 3 }
    }
}

impl SceneRasterizer {
    pub fn render(&self, scene: &SceneContext) -> LayerOutput {
        let display = scene.display();
        let projector = Projector {
            view_projection: scene.camera().view_projection(),
            display: *display,
        };

        let mut ops = Vec::new();
        for (_, node) in scene.graph().iter() {
            let offset = node.transform.position;

            match &node.kind {
                NodeKind::Points { points, color } => {
                    ops.extend(points.iter().filter_map(|p| projector.pixel(*p + offset, *color)));
                }
                NodeKind::Polyline { points, color } => {
                    ops.extend(
                        points
                            .windows(2)
                            .filter_map(|pair| projector.line(pair[0] + offset, pair[1] + offset, *color)),
                    );
                }
                NodeKind::Model(model) => {
                    let bounds = model.bounds.translated(offset);
                    ops.extend(
                        bounds
                            .edges()
                            .filter_map(|(a, b)| projector.line(a, b, MODEL_BOUNDS_COLOR)),
                    );
                    ops.extend(
                        model
                            .vertices
                            .iter()
                            .filter_map(|v| projector.pixel(*v + offset, MODEL_COLOR)),
                    );
                    if self.marker_radius > 0 {
                        if let Some(center) = projector.screen(offset) {
                            ops.push(DrawOp::FilledCircle {
                                cx: center.x.floor() as i32,
                                cy: center.y.floor() as i32,
                                radius: self.marker_radius,
                                color: MODEL_COLOR,
                            });
                        }
                    }
                }
            }
        }

        Canvas::new(display.width, display.height)
            .draw_all(ops)
            .execute_ops()
            .into_output()
    }
}

struct Projector {
    view_projection: Mat4,
    display: DisplayContext,
}

impl Projector {
    fn screen(&self, world: Vec3) -> Option<Vec2> {
        project_with(&self.view_projection, world, &self.display)
    }

    fn pixel(&self, world: Vec3, color: Rgba) -> Option<DrawOp> {
        let p = self.screen(world)?;
        Some(DrawOp::Pixel {
            x: p.x.floor() as i32,
            y: p.y.floor() as i32,
            color,
        })
    }

    /// Segments with an endpoint behind the camera are dropped whole
    fn line(&self, a: Vec3, b: Vec3, color: Rgba) -> Option<DrawOp> {
        let a = self.screen(a)?;
        let b = self.screen(b)?;
        Some(DrawOp::Line {
            x1: a.x.floor() as i32,
            y1: a.y.floor() as i32,
            x2: b.x.floor() as i32,
            y2: b.y.floor() as i32,
            color,
        })
    }
}
