//! The scene graph an import is materialized into.

use std::fmt::Debug;
use std::hash::Hash;

use cgmath::Matrix4;

use crate::common::{PolygonMesh, RgbaColor};
use crate::scene::{Material, Mesh, NodeId, NodeKind, Scene, ShadingGroupId};

/// Operations the import needs from a host scene graph.
///
/// Node and shading group handles are cheap copies owned by the host.
pub trait SceneHost {
    type Node: Copy + Eq + Hash + Debug;
    type ShadingGroup: Copy + Eq + Debug;

    /// Creates a node named `name`, under `parent` or at the scene root.
    fn create_node(
        &mut self,
        kind: NodeKind,
        parent: Option<Self::Node>,
        name: &str,
    ) -> anyhow::Result<Self::Node>;

    /// Creates a root geometry node holding `mesh`.
    fn create_geometry(&mut self, mesh: PolygonMesh, name: &str) -> anyhow::Result<Self::Node>;

    /// Moves `node` under `parent`, dropping its other parents.
    fn reparent(&mut self, node: Self::Node, parent: Self::Node) -> anyhow::Result<()>;

    /// Places `node` under `parent` as well, keeping its current parents.
    fn add_parent(&mut self, node: Self::Node, parent: Self::Node) -> anyhow::Result<()>;

    fn set_local_transform(&mut self, node: Self::Node, matrix: &Matrix4<f32>) -> anyhow::Result<()>;

    fn has_parent(&self, node: Self::Node) -> bool;

    /// Full path of the node as the host names it.
    fn node_path(&self, node: Self::Node) -> Option<String>;

    fn find_shading_group(&self, name: &str) -> Option<Self::ShadingGroup>;

    /// Creates a shading group driven by a new flat-color shader.
    fn create_shading_group(
        &mut self,
        name: &str,
        shader_name: &str,
        color: RgbaColor,
    ) -> anyhow::Result<Self::ShadingGroup>;

    /// Returns false if `node` already was a member.
    fn add_shading_member(&mut self, group: Self::ShadingGroup, node: Self::Node) -> anyhow::Result<bool>;
}

impl SceneHost for Scene {
    type Node = NodeId;
    type ShadingGroup = ShadingGroupId;

    fn create_node(
        &mut self,
        kind: NodeKind,
        parent: Option<NodeId>,
        name: &str,
    ) -> anyhow::Result<NodeId> {
        self.add_node_of_kind(kind, parent, Some(name.to_string()))
    }

    fn create_geometry(&mut self, mesh: PolygonMesh, name: &str) -> anyhow::Result<NodeId> {
        let mesh_id = self.add_mesh(Mesh::new(mesh));
        self.add_geometry_node(mesh_id, Some(name.to_string()))
    }

    fn reparent(&mut self, node: NodeId, parent: NodeId) -> anyhow::Result<()> {
        Scene::reparent(self, node, Some(parent))
    }

    fn add_parent(&mut self, node: NodeId, parent: NodeId) -> anyhow::Result<()> {
        Scene::add_parent(self, node, parent)
    }

    fn set_local_transform(&mut self, node: NodeId, matrix: &Matrix4<f32>) -> anyhow::Result<()> {
        Scene::set_local_transform(self, node, matrix)
    }

    fn has_parent(&self, node: NodeId) -> bool {
        self.get_node(node).and_then(|n| n.parent()).is_some()
    }

    fn node_path(&self, node: NodeId) -> Option<String> {
        Scene::node_path(self, node)
    }

    fn find_shading_group(&self, name: &str) -> Option<ShadingGroupId> {
        Scene::find_shading_group(self, name)
    }

    fn create_shading_group(
        &mut self,
        name: &str,
        shader_name: &str,
        color: RgbaColor,
    ) -> anyhow::Result<ShadingGroupId> {
        let material = self.add_material(
            Material::new()
                .with_name(shader_name)
                .with_base_color_factor(color),
        );
        self.add_shading_group(name, material)
    }

    fn add_shading_member(&mut self, group: ShadingGroupId, node: NodeId) -> anyhow::Result<bool> {
        Scene::add_shading_member(self, group, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_host_builds_hierarchy() {
        let mut scene = Scene::new();

        let world = SceneHost::create_node(&mut scene, NodeKind::Transform, None, "World").unwrap();
        let geo = SceneHost::create_node(&mut scene, NodeKind::Transform, Some(world), "Geo").unwrap();

        assert!(!scene.has_parent(world));
        assert!(scene.has_parent(geo));
        assert_eq!(SceneHost::node_path(&scene, geo).as_deref(), Some("World/Geo"));
    }

    #[test]
    fn test_scene_host_geometry_and_shading() {
        let mut scene = Scene::new();
        let node = scene.create_geometry(PolygonMesh::default(), "Ball").unwrap();
        let group = SceneHost::create_shading_group(&mut scene, "redSG", "red", RgbaColor::rgb(1.0, 0.0, 0.0)).unwrap();

        assert_eq!(SceneHost::find_shading_group(&scene, "redSG"), Some(group));
        assert!(SceneHost::add_shading_member(&mut scene, group, node).unwrap());
        assert!(!SceneHost::add_shading_member(&mut scene, group, node).unwrap());

        let material = scene.get_shading_group(group).unwrap().material;
        assert_eq!(scene.get_material(material).unwrap().name(), Some("red"));
    }
}
