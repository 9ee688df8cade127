use std::sync::Arc;

use glam::Vec3;

use super::model::Model;
use crate::core::Rgba;
use crate::error::{SceneError, SceneResult};

/// Stable handle to a node; stale after the node is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Placement of a node. Only translation is animated here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self { position }
    }
}

/// What a node draws
#[derive(Debug, Clone)]
pub enum NodeKind {
    Model(Arc<Model>),
    /// Connected line strip in local space
    Polyline { points: Vec<Vec3>, color: Rgba },
    /// Unconnected points in local space
    Points { points: Vec<Vec3>, color: Rgba },
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::default(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

/// Flat scene graph: every node is a child of the scene root.
///
/// Slots of removed nodes are reused with a bumped generation, so an old
/// `NodeId` never aliases a newer node.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, node: SceneNode) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        }
    }

    /// Detach a node, returning it; `None` if the id is stale
    pub fn remove_object(&mut self, id: NodeId) -> Option<SceneNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }

        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Write a node's position; a missing node is `TargetNotReady`
    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> SceneResult<()> {
        let node = self.get_mut(id).ok_or(SceneError::TargetNotReady)?;
        node.transform.position = position;
        Ok(())
    }

    /// Live nodes in insertion-slot order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    NodeId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    node,
                )
            })
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(name: &str) -> SceneNode {
        SceneNode::new(
            name,
            NodeKind::Points {
                points: vec![Vec3::ZERO],
                color: [255; 4],
            },
        )
    }

    #[test]
    fn stale_id_does_not_alias_reused_slot() {
        let mut graph = SceneGraph::new();
        let first = graph.add_object(points("first"));
        assert!(graph.remove_object(first).is_some());

        let second = graph.add_object(points("second"));
        assert_ne!(first, second);
        assert!(graph.get(first).is_none());
        assert_eq!(graph.get(second).unwrap().name, "second");
        assert_eq!(
            graph.set_position(first, Vec3::ONE),
            Err(SceneError::TargetNotReady)
        );
    }

    #[test]
    fn double_remove_is_harmless() {
        let mut graph = SceneGraph::new();
        let id = graph.add_object(points("a"));
        assert!(graph.remove_object(id).is_some());
        assert!(graph.remove_object(id).is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn iter_skips_removed() {
        let mut graph = SceneGraph::new();
        let a = graph.add_object(points("a"));
        let _b = graph.add_object(points("b"));
        graph.remove_object(a);

        let names: Vec<_> = graph.iter().map(|(_, n)| n.name.as_str()).collect();
        assert_eq!(names, vec!["b"]);
        assert_eq!(graph.len(), 1);
    }
}
