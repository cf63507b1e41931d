//! In-memory target scene graph.
//!
//! Nodes carry TRS transforms and may be placed under several parents, geometry
//! nodes reference meshes through instances, and shading groups bind sets of
//! nodes to flat-color materials.

pub use pattern_import_common as common;

mod instance;
mod material;
mod mesh;
mod node;
mod shading;
mod tree;

use cgmath::{Matrix4, Point3, Quaternion, Vector3};
use std::collections::HashMap;

pub use instance::{Instance, InstanceId};
pub use material::{Material, MaterialId, DEFAULT_MATERIAL_ID};
pub use mesh::{Mesh, MeshId};
pub use node::{Node, NodeId, NodeKind};
pub use shading::{ShadingGroup, ShadingGroupId};
pub use tree::{walk_tree, TreeVisitor};

use common::RgbaColor;
use tree::{DescendantCollector, PathCollector};

/// The scene container holding all meshes, materials, instances, nodes and
/// shading groups.
///
/// # Examples
///
/// ```
/// use pattern_import_scene::{Mesh, Scene};
/// use pattern_import_scene::common::PolygonMesh;
///
/// let mut scene = Scene::new();
///
/// let world = scene.add_default_node(None, Some("World".to_string())).unwrap();
/// let mesh = scene.add_mesh(Mesh::new(PolygonMesh::default()));
/// let sphere = scene.add_geometry_node(mesh, Some("Sphere".to_string())).unwrap();
/// scene.add_parent(sphere, world).unwrap();
///
/// assert_eq!(scene.node_path(sphere).as_deref(), Some("World/Sphere"));
/// ```
pub struct Scene {
    pub meshes: HashMap<MeshId, Mesh>,
    pub instances: HashMap<InstanceId, Instance>,

    // Scene graph
    pub nodes: HashMap<NodeId, Node>,
    pub root_nodes: Vec<NodeId>,

    pub materials: HashMap<MaterialId, Material>,
    pub shading_groups: HashMap<ShadingGroupId, ShadingGroup>,

    next_mesh_id: MeshId,
    next_instance_id: InstanceId,
    next_node_id: NodeId,
    next_material_id: MaterialId,
    next_shading_group_id: ShadingGroupId,
}

impl Scene {
    /// Creates a new empty scene.
    ///
    /// The scene starts with one magenta material at [`DEFAULT_MATERIAL_ID`]
    /// that unshaded geometry renders with.
    pub fn new() -> Self {
        let mut materials = HashMap::new();
        let mut default_material = Material::new()
            .with_name("defaultMaterial")
            .with_base_color_factor(RgbaColor::MAGENTA);
        default_material.id = DEFAULT_MATERIAL_ID;
        materials.insert(DEFAULT_MATERIAL_ID, default_material);

        Self {
            meshes: HashMap::new(),
            instances: HashMap::new(),

            nodes: HashMap::new(),
            root_nodes: Vec::new(),

            materials,
            shading_groups: HashMap::new(),

            next_mesh_id: 0,
            next_instance_id: 0,
            next_node_id: 0,
            next_material_id: 0,
            next_shading_group_id: 0,
        }
    }

    // ========== Mesh API ==========

    /// Adds a mesh to the scene and returns its assigned ID.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        let id = self.next_mesh_id;
        self.next_mesh_id += 1;

        let mut mesh = mesh;
        mesh.id = id;
        self.meshes.insert(id, mesh);
        id
    }

    pub fn get_mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(&id)
    }

    // ========== Material API ==========

    /// Adds a material to the scene and returns its assigned ID.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = self.next_material_id;
        self.next_material_id += 1;

        let mut material = material;
        material.id = id;
        self.materials.insert(id, material);
        id
    }

    pub fn get_material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    // ========== Instance API ==========

    pub fn add_instance(&mut self, mesh: MeshId, material: MaterialId) -> InstanceId {
        let id = self.next_instance_id;
        self.next_instance_id += 1;

        self.instances.insert(id, Instance::new(id, mesh, material));
        id
    }

    pub fn get_instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    // ========== Node API ==========

    /// Gets a reference to a node by ID.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Gets a mutable reference to a node by ID.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Returns the IDs of nodes without any parent, in creation order.
    pub fn root_nodes(&self) -> &[NodeId] {
        &self.root_nodes
    }

    /// Adds a new transform node to the scene graph.
    ///
    /// # Errors
    /// Returns an error if `parent` is `Some` but the specified node doesn't exist.
    pub fn add_node(
        &mut self,
        parent: Option<NodeId>,
        name: Option<String>,
        position: Point3<f32>,
        rotation: Quaternion<f32>,
        scale: Vector3<f32>,
    ) -> anyhow::Result<NodeId> {
        if let Some(parent_id) = parent {
            if !self.nodes.contains_key(&parent_id) {
                anyhow::bail!("Parent node with ID {} not found in scene", parent_id);
            }
        }

        let id = self.next_node_id;
        self.next_node_id += 1;

        let mut node = Node::new(id, name, position, rotation, scale);

        match parent.and_then(|parent_id| self.nodes.get_mut(&parent_id)) {
            Some(parent_node) => {
                parent_node.add_child(id);
                node.add_parent(parent_node.id);
            }
            None => self.root_nodes.push(id),
        }

        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Adds a node with default transform (identity).
    pub fn add_default_node(
        &mut self,
        parent: Option<NodeId>,
        name: Option<String>,
    ) -> anyhow::Result<NodeId> {
        self.add_node(
            parent,
            name,
            Point3::new(0.0, 0.0, 0.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0), // Identity quaternion
            Vector3::new(1.0, 1.0, 1.0),
        )
    }

    /// Adds an identity-transform node of the given kind.
    pub fn add_node_of_kind(
        &mut self,
        kind: NodeKind,
        parent: Option<NodeId>,
        name: Option<String>,
    ) -> anyhow::Result<NodeId> {
        let id = self.add_default_node(parent, name)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_kind(kind);
        }
        Ok(id)
    }

    /// Adds a root geometry node showing `mesh` with the default material.
    ///
    /// # Errors
    /// Returns an error if the mesh doesn't exist.
    pub fn add_geometry_node(&mut self, mesh: MeshId, name: Option<String>) -> anyhow::Result<NodeId> {
        if !self.meshes.contains_key(&mesh) {
            anyhow::bail!("Mesh with ID {} not found in scene", mesh);
        }

        let instance_id = self.add_instance(mesh, DEFAULT_MATERIAL_ID);
        let node_id = self.add_node_of_kind(NodeKind::Geometry, None, name)?;
        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.set_instance(Some(instance_id));
        }
        Ok(node_id)
    }

    /// Replaces the local transform of a node with the decomposition of `matrix`.
    pub fn set_local_transform(&mut self, node_id: NodeId, matrix: &Matrix4<f32>) -> anyhow::Result<()> {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            anyhow::bail!("Node with ID {} not found in scene", node_id);
        };
        node.set_local_transform(matrix);
        Ok(())
    }

    // ========== Hierarchy API ==========

    /// Returns true if `ancestor` can be reached by walking down from itself to `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut collector = DescendantCollector::default();
        walk_tree(self, ancestor, &mut collector);
        collector.found.contains(&node)
    }

    fn check_parenting(&self, node_id: NodeId, parent_id: NodeId) -> anyhow::Result<()> {
        if !self.nodes.contains_key(&node_id) {
            anyhow::bail!("Node with ID {} not found in scene", node_id);
        }
        if !self.nodes.contains_key(&parent_id) {
            anyhow::bail!("Parent node with ID {} not found in scene", parent_id);
        }
        if self.is_ancestor(node_id, parent_id) {
            anyhow::bail!(
                "Cannot parent node {} under {}: it would create a cycle",
                node_id,
                parent_id
            );
        }
        Ok(())
    }

    fn link(&mut self, node_id: NodeId, parent_id: NodeId) {
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.add_child(node_id);
        }
        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.add_parent(parent_id);
        }
        self.root_nodes.retain(|&id| id != node_id);
    }

    /// Moves a node under `parent`, detaching it from every current parent.
    ///
    /// Passing `None` moves the node to the scene root. Reparenting a node
    /// under its sole current parent is a no-op.
    pub fn reparent(&mut self, node_id: NodeId, parent: Option<NodeId>) -> anyhow::Result<()> {
        let Some(node) = self.nodes.get(&node_id) else {
            anyhow::bail!("Node with ID {} not found in scene", node_id);
        };
        let current: Vec<NodeId> = node.parents().to_vec();

        if let Some(parent_id) = parent {
            if current == [parent_id] {
                return Ok(());
            }
            self.check_parenting(node_id, parent_id)?;
        } else if current.is_empty() {
            return Ok(());
        }

        let old_parents = match self.nodes.get_mut(&node_id) {
            Some(node) => node.clear_parents(),
            None => Vec::new(),
        };
        for old in old_parents {
            if let Some(old_parent) = self.nodes.get_mut(&old) {
                old_parent.remove_child(node_id);
            }
        }

        match parent {
            Some(parent_id) => self.link(node_id, parent_id),
            None => self.root_nodes.push(node_id),
        }
        Ok(())
    }

    /// Places a node under an additional parent, keeping its existing ones.
    ///
    /// The node is then reachable through one more path. Adding a parent the
    /// node already has is a no-op.
    pub fn add_parent(&mut self, node_id: NodeId, parent_id: NodeId) -> anyhow::Result<()> {
        if self
            .nodes
            .get(&node_id)
            .is_some_and(|node| node.parents().contains(&parent_id))
        {
            return Ok(());
        }
        self.check_parenting(node_id, parent_id)?;
        self.link(node_id, parent_id);
        log::debug!("Placed node {} under additional parent {}", node_id, parent_id);
        Ok(())
    }

    /// Path of a node through its primary parents, names joined by `/`.
    pub fn node_path(&self, node_id: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self.nodes.get(&node_id)?;
        loop {
            names.push(current.name_or_empty());
            match current.parent().and_then(|id| self.nodes.get(&id)) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        names.reverse();
        Some(names.join("/"))
    }

    /// Every path through the graph, one per node placement, in walk order.
    pub fn dag_paths(&self) -> Vec<String> {
        let mut collector = PathCollector::default();
        for &root in &self.root_nodes {
            walk_tree(self, root, &mut collector);
        }
        collector.paths
    }

    /// Resolves a `/`-separated name path starting at the scene roots.
    pub fn find_node_by_path(&self, path: &str) -> Option<NodeId> {
        let mut candidates: &[NodeId] = &self.root_nodes;
        let mut found = None;
        for segment in path.split('/') {
            let id = candidates.iter().copied().find(|id| {
                self.nodes
                    .get(id)
                    .is_some_and(|node| node.name_or_empty() == segment)
            })?;
            candidates = self.nodes.get(&id)?.children();
            found = Some(id);
        }
        found
    }

    // ========== Shading API ==========

    /// Creates an empty shading group driven by `material`.
    ///
    /// # Errors
    /// Returns an error if the material doesn't exist or the name is taken.
    pub fn add_shading_group(
        &mut self,
        name: impl Into<String>,
        material: MaterialId,
    ) -> anyhow::Result<ShadingGroupId> {
        let name = name.into();
        if !self.materials.contains_key(&material) {
            anyhow::bail!("Material with ID {} not found in scene", material);
        }
        if self.find_shading_group(&name).is_some() {
            anyhow::bail!("Shading group '{}' already exists", name);
        }

        let id = self.next_shading_group_id;
        self.next_shading_group_id += 1;

        log::debug!("Created shading group '{}' ({}) for material {}", name, id, material);
        self.shading_groups.insert(id, ShadingGroup::new(id, name, material));
        Ok(id)
    }

    pub fn get_shading_group(&self, id: ShadingGroupId) -> Option<&ShadingGroup> {
        self.shading_groups.get(&id)
    }

    pub fn find_shading_group(&self, name: &str) -> Option<ShadingGroupId> {
        self.shading_groups
            .values()
            .find(|group| group.name == name)
            .map(|group| group.id)
    }

    /// Adds a node to a shading group and binds its instance to the group's material.
    ///
    /// The node leaves whatever group it was in before. Returns `false` if it
    /// was already a member of `group_id`.
    pub fn add_shading_member(&mut self, group_id: ShadingGroupId, node_id: NodeId) -> anyhow::Result<bool> {
        let Some(group) = self.shading_groups.get(&group_id) else {
            anyhow::bail!("Shading group with ID {} not found in scene", group_id);
        };
        if group.contains(node_id) {
            return Ok(false);
        }
        let material = group.material;

        let Some(node) = self.nodes.get_mut(&node_id) else {
            anyhow::bail!("Node with ID {} not found in scene", node_id);
        };
        let previous = node.shading_group();
        node.set_shading_group(Some(group_id));
        let instance = node.instance();

        if let Some(old) = previous.and_then(|id| self.shading_groups.get_mut(&id)) {
            old.remove(node_id);
        }
        if let Some(group) = self.shading_groups.get_mut(&group_id) {
            group.insert(node_id);
        }
        if let Some(instance) = instance.and_then(|id| self.instances.get_mut(&id)) {
            instance.material = material;
        }
        Ok(true)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
