use super::material::MaterialId;
use super::node::NodeId;

/// Unique identifier for shading groups.
pub type ShadingGroupId = u32;

/// A named set of nodes shaded by one material.
///
/// Membership is exclusive: a node belongs to at most one group at a time.
#[derive(Debug, Clone)]
pub struct ShadingGroup {
    pub id: ShadingGroupId,
    pub name: String,
    pub material: MaterialId,
    members: Vec<NodeId>,
}

impl ShadingGroup {
    pub fn new(id: ShadingGroupId, name: impl Into<String>, material: MaterialId) -> Self {
        Self {
            id,
            name: name.into(),
            material,
            members: Vec::new(),
        }
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    /// Returns false if the node was already a member.
    pub(super) fn insert(&mut self, node: NodeId) -> bool {
        if self.contains(node) {
            return false;
        }
        self.members.push(node);
        true
    }

    pub(super) fn remove(&mut self, node: NodeId) {
        self.members.retain(|&id| id != node);
    }
}
