use super::{InstanceId, ShadingGroupId};
use crate::common::decompose_matrix;
use cgmath::{EuclideanSpace, Matrix4, Point3, Quaternion, Vector3};

/// Unique identifier for a Node in the scene graph.
pub type NodeId = u32;

/// What a node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Group/transform node. Only carries a transform and children.
    #[default]
    Transform,
    /// Leaf node whose instance references mesh data.
    Geometry,
}

/// A node in the scene graph.
///
/// Nodes form a DAG rather than a strict tree: a node may be placed under
/// several parents, in which case it is drawn once per placement. The first
/// entry of `parents` is the primary parent used for path naming.
#[derive(Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: Option<String>,
    kind: NodeKind,

    // Local transform components
    position: Point3<f32>,
    rotation: Quaternion<f32>,
    scale: Vector3<f32>,

    // Hierarchy
    parents: Vec<NodeId>,
    children: Vec<NodeId>,

    // Content
    instance: Option<InstanceId>,
    shading_group: Option<ShadingGroupId>,
}

impl Node {
    /// Creates a new transform node with the given transform components.
    pub fn new(
        id: NodeId,
        name: Option<String>,
        position: Point3<f32>,
        rotation: Quaternion<f32>,
        scale: Vector3<f32>,
    ) -> Self {
        Self {
            id,
            name,
            kind: NodeKind::Transform,
            position,
            rotation,
            scale,
            parents: Vec::new(),
            children: Vec::new(),
            instance: None,
            shading_group: None,
        }
    }

    /// Creates a new node with default transform (identity).
    pub fn new_default(id: NodeId) -> Self {
        Self::new(
            id,
            None,
            Point3::new(0.0, 0.0, 0.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0), // Identity quaternion
            Vector3::new(1.0, 1.0, 1.0),
        )
    }

    /// Computes the local transform matrix from position, rotation, and scale.
    ///
    /// The order of operations is: Translation * Rotation * Scale (TRS)
    pub fn compute_local_transform(&self) -> Matrix4<f32> {
        let translation = Matrix4::from_translation(self.position.to_vec());
        let rotation = Matrix4::from(self.rotation);
        let scale = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);

        translation * rotation * scale
    }

    /// Replaces position, rotation and scale with the decomposition of `matrix`.
    pub fn set_local_transform(&mut self, matrix: &Matrix4<f32>) {
        let (position, rotation, scale) = decompose_matrix(matrix);
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub(super) fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        self.rotation
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    // Hierarchy management

    /// Gets the primary parent node ID.
    pub fn parent(&self) -> Option<NodeId> {
        self.parents.first().copied()
    }

    /// Gets every parent this node is placed under.
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Adds a parent (internal use only - use Scene methods to maintain consistency).
    pub(super) fn add_parent(&mut self, parent: NodeId) {
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
    }

    pub(super) fn clear_parents(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.parents)
    }

    /// Gets the list of child node IDs.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Adds a child node ID (internal use only - use Scene methods to maintain consistency).
    pub(super) fn add_child(&mut self, child: NodeId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Removes a child node ID (internal use only - use Scene methods to maintain consistency).
    pub(super) fn remove_child(&mut self, child: NodeId) {
        self.children.retain(|&id| id != child);
    }

    // Content

    pub fn instance(&self) -> Option<InstanceId> {
        self.instance
    }

    pub fn set_instance(&mut self, instance: Option<InstanceId>) {
        self.instance = instance;
    }

    /// The shading group this node is a member of, if any.
    pub fn shading_group(&self) -> Option<ShadingGroupId> {
        self.shading_group
    }

    pub(super) fn set_shading_group(&mut self, group: Option<ShadingGroupId>) {
        self.shading_group = group;
    }
}
