//! Geometry nodes, shared between every placement of the same shape content.

use crate::error::{ImportError, ImportWarning, WarningKind};
use crate::host::SceneHost;
use crate::object::{GeometryType, ImporterObject};
use crate::path::split_parent;
use crate::scene::NodeKind;
use crate::session::ImportSession;

/// Prefix of shape content keys.
const CONTENT_KEY_PREFIX: &str = "uuid | ";

/// Key identifying a shape's content regardless of where it is placed.
pub(crate) fn content_key(object: &dyn ImporterObject) -> String {
    format!("{CONTENT_KEY_PREFIX}{}", object.path())
}

impl<H: SceneHost> ImportSession<'_, H> {
    /// Creates or reuses the geometry node for a shape object.
    ///
    /// The first shape with a given content path creates the geometry, places
    /// it under the node of its parent path and applies transform and
    /// material. Later shapes with the same content only add another parent.
    /// Returns false for non-shapes, curves, points and deforming shapes.
    pub fn update_shape(&mut self, object: &dyn ImporterObject) -> Result<bool, ImportError> {
        let Some(shape) = object.as_shape() else {
            return Ok(false);
        };
        let instance_path = object.instance_path();

        let geometry_type = shape
            .geometry_type(&self.context)
            .map_err(ImportError::importer("getGeometryType", instance_path))?;
        if geometry_type != GeometryType::Mesh {
            log::info!("Shape type {geometry_type} not yet supported.");
            self.warn(ImportWarning::new(
                WarningKind::UnsupportedGeometry,
                instance_path,
                format!("Shape type {geometry_type} not yet supported"),
            ));
            return Ok(false);
        }

        let constant = shape
            .is_constant(&self.context)
            .map_err(ImportError::importer("isConstant", instance_path))?;
        if !constant {
            log::info!("Deforming shapes are not yet supported.");
            self.warn(ImportWarning::new(
                WarningKind::DeformingShape,
                instance_path,
                "Deforming shapes are not yet supported",
            ));
            return Ok(false);
        }

        let key = content_key(object);
        let full_path = self.object_path(object);
        let (parent_path, name) = split_parent(&full_path);
        let parent = self.get_or_create_node_for_path(parent_path, NodeKind::Transform, false)?;

        if let Some(&node) = self.shapes.get(&key) {
            if let Some(parent) = parent {
                self.host.add_parent(node, parent)?;
                log::debug!("Instanced {key} under {parent_path}");
            }
            return Ok(true);
        }

        let Some(mesh) = shape
            .geometry(&self.context)
            .map_err(ImportError::importer("getGeometry", instance_path))?
        else {
            return Ok(false);
        };
        if !mesh.is_consistent() {
            log::warn!("Malformed geometry for {instance_path}, skipping");
            self.warn(ImportWarning::new(
                WarningKind::MalformedGeometry,
                instance_path,
                "Face counts and indices do not match the vertices",
            ));
            return Ok(false);
        }

        let node = self.host.create_geometry(mesh, name)?;
        log::debug!("Created geometry node {full_path} for {key}");
        self.shapes.insert(key, node);
        self.created.push(node);

        if let Some(parent) = parent {
            self.host.reparent(node, parent)?;
        }

        // the node exists from here on, so later failures only cost this step
        if let Err(err) = self.update_transform(object, Some(node)) {
            self.record(object, err);
        }
        if let Err(err) = self.update_material(object, Some(node)) {
            self.record(object, err);
        }
        Ok(true)
    }
}
