use crate::common::matrix_from_row_major;
use crate::error::ImportError;
use crate::host::SceneHost;
use crate::object::ImporterObject;
use crate::scene::NodeKind;
use crate::session::ImportSession;

impl<H: SceneHost> ImportSession<'_, H> {
    /// Copies the object's local transform onto its node.
    ///
    /// Without `node`, the node materialized for the object's path is used.
    /// Returns false when the object has no transform or no node exists yet.
    pub fn update_transform(
        &mut self,
        object: &dyn ImporterObject,
        node: Option<H::Node>,
    ) -> Result<bool, ImportError> {
        let Some(transform) = object.as_transform() else {
            return Ok(false);
        };

        let node = match node {
            Some(node) => node,
            None => {
                let path = self.object_path(object);
                match self.get_or_create_node_for_path(&path, NodeKind::Transform, false)? {
                    Some(node) => node,
                    None => return Ok(false),
                }
            }
        };

        let values = transform
            .local_transform(&self.context)
            .map_err(ImportError::importer("getLocalTransform", object.instance_path()))?;

        // importer rows become cgmath columns
        let matrix = matrix_from_row_major(&values);
        self.host.set_local_transform(node, &matrix)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{PolygonMesh, EPSILON};
    use crate::memory::MemoryObject;
    use crate::scene::{NodeKind, Scene};
    use crate::{ImportError, ImportOptions, ImportSession};

    #[rustfmt::skip]
    const MOVE_XYZ: [f32; 16] = [
        1.0, 0.0, 0.0, 4.0,
        0.0, 1.0, 0.0, 5.0,
        0.0, 0.0, 1.0, 6.0,
        0.0, 0.0, 0.0, 1.0,
    ];

    #[test]
    fn test_applies_translation_to_materialized_node() {
        let mut scene = Scene::new();
        let mut session = ImportSession::new(&mut scene, ImportOptions::default());
        let object = MemoryObject::transform("/World/Geo", MOVE_XYZ);

        session.get_or_create_node_for_object(&object).unwrap();
        assert!(session.update_transform(&object, None).unwrap());

        let node = scene.find_node_by_path("World/Geo").unwrap();
        let position = scene.get_node(node).unwrap().position();
        assert!((position.x - 4.0).abs() < EPSILON);
        assert!((position.y - 5.0).abs() < EPSILON);
        assert!((position.z - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_explicit_node_is_used() {
        let mut scene = Scene::new();
        let mut session = ImportSession::new(&mut scene, ImportOptions::default());
        let target = session
            .get_or_create_node_for_path("Elsewhere", NodeKind::Transform, true)
            .unwrap();
        let object = MemoryObject::transform("/World/Geo", MOVE_XYZ);

        assert!(session.update_transform(&object, target).unwrap());

        let position = scene.get_node(target.unwrap()).unwrap().position();
        assert!((position.x - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_not_applicable() {
        let mut scene = Scene::new();
        let mut session = ImportSession::new(&mut scene, ImportOptions::default());

        let light = MemoryObject::new("Light", "/World/Key");
        assert!(!session.update_transform(&light, None).unwrap());

        let unmaterialized = MemoryObject::transform("/Nowhere", MOVE_XYZ);
        assert!(!session.update_transform(&unmaterialized, None).unwrap());

        let shape = MemoryObject::shape("/World/Ball", "ball", PolygonMesh::default());
        assert!(!session.update_transform(&shape, None).unwrap());
    }

    #[test]
    fn test_importer_failure_is_reported() {
        let mut scene = Scene::new();
        let mut session = ImportSession::new(&mut scene, ImportOptions::default());
        let object = MemoryObject::group("/World").failing("getLocalTransform");

        session.get_or_create_node_for_object(&object).unwrap();
        let result = session.update_transform(&object, None);

        assert!(matches!(
            result,
            Err(ImportError::Importer { call: "getLocalTransform", .. })
        ));
    }
}
