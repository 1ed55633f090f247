// event_core/src/scene/scene.rs
use crate::scene::node::{Node, NodeId};
use std::collections::HashMap;

/// The host-side node table. Nodes own their components; everything
/// else refers to them through [`NodeId`] handles with an explicit
/// presence check at every use.
#[derive(Default)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node and returns its handle.
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        let node = Node::new(name);
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name == name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_nodes_are_resolvable_until_despawned() {
        let mut scene = Scene::new();
        let id = scene.spawn("player");
        assert!(scene.contains(id));
        assert_eq!(scene.get(id).unwrap().name, "player");
        assert!(scene.despawn(id).is_some());
        assert!(scene.get(id).is_none());
    }

    #[test]
    fn find_by_name_matches_exactly() {
        let mut scene = Scene::new();
        scene.spawn("door");
        assert!(scene.find_by_name("door").is_some());
        assert!(scene.find_by_name("Door").is_none());
    }
}
