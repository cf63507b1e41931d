//! Group and transform nodes, created on demand per hierarchy path.

use crate::error::{ImportError, ImportWarning, WarningKind};
use crate::host::SceneHost;
use crate::object::{ImporterObject, ObjectType};
use crate::path::{normalize_path, split_parent};
use crate::scene::NodeKind;
use crate::session::ImportSession;

impl<H: SceneHost> ImportSession<'_, H> {
    /// Returns the node for a hierarchy path, creating it and any missing
    /// ancestors when `create_if_missing` is set.
    ///
    /// Missing ancestors are always created as [`NodeKind::Transform`]; only
    /// the node for `path` itself gets `kind`. Asking twice for the same path
    /// returns the same node. An empty path yields `None`.
    ///
    /// # Errors
    /// [`ImportError::DepthExceeded`] when the path has more segments than the
    /// configured limit, [`ImportError::Host`] when the host refuses a node.
    pub fn get_or_create_node_for_path(
        &mut self,
        path: &str,
        kind: NodeKind,
        create_if_missing: bool,
    ) -> Result<Option<H::Node>, ImportError> {
        let path = normalize_path(path);
        if path.is_empty() {
            return Ok(None);
        }
        if let Some(&node) = self.nodes.get(&path) {
            return Ok(Some(node));
        }
        if !create_if_missing {
            return Ok(None);
        }

        let max_depth = self.options.max_depth;
        if path.split('/').count() > max_depth {
            return Err(ImportError::DepthExceeded { path, max_depth });
        }

        // walk up until an existing ancestor or the root, remembering what to create
        let mut pending = vec![(path, kind)];
        let mut parent = None;
        let mut current = pending[0].0.clone();
        loop {
            let (parent_path, _) = split_parent(&current);
            if parent_path.is_empty() {
                break;
            }
            if let Some(&node) = self.nodes.get(parent_path) {
                parent = Some(node);
                break;
            }
            let parent_path = parent_path.to_string();
            pending.push((parent_path.clone(), NodeKind::Transform));
            current = parent_path;
        }

        while let Some((node_path, node_kind)) = pending.pop() {
            let (_, name) = split_parent(&node_path);
            let node = self.host.create_node(node_kind, parent, name)?;
            log::debug!("Created {node_kind:?} node {node_path}");
            self.created.push(node);
            self.nodes.insert(node_path, node);
            parent = Some(node);
        }

        Ok(parent)
    }

    /// Creates the hierarchy node for a group-like object.
    ///
    /// Shapes, lights, cameras, materials and textures get no node here.
    /// An unknown object type is reported as a warning.
    pub fn get_or_create_node_for_object(
        &mut self,
        object: &dyn ImporterObject,
    ) -> Result<Option<H::Node>, ImportError> {
        match object.object_type() {
            ObjectType::Layer | ObjectType::Group | ObjectType::Transform | ObjectType::Instance => {
                let path = self.object_path(object);
                self.get_or_create_node_for_path(&path, NodeKind::Transform, true)
            }
            // shapes are handled by update_shape
            ObjectType::Shape => Ok(None),
            // TODO: materialize lights and cameras once the host grows node kinds for them
            ObjectType::Light | ObjectType::Camera => Ok(None),
            ObjectType::Material | ObjectType::Texture => Ok(None),
            ObjectType::Unknown(type_name) => {
                let path = self.object_path(object);
                log::warn!("Unsupported ImporterObject type {type_name} for {path}");
                self.warn(ImportWarning::new(
                    WarningKind::UnsupportedObjectType,
                    object.instance_path(),
                    format!("Unsupported ImporterObject type {type_name}"),
                ));
                Ok(None)
            }
        }
    }
}
