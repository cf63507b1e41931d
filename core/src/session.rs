//! State of one import and the entry point that drives it.

use std::collections::HashMap;

use crate::binding::Binding;
use crate::error::{ImportError, ImportWarning};
use crate::host::SceneHost;
use crate::object::{ImportContext, ImporterObject, ObjectRef};
use crate::options::ImportOptions;
use crate::path::prefixed_path;
use crate::registry::ObjectRegistry;

/// Result of a successful import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Host paths of created nodes that ended up without a parent, in creation order.
    pub top_level_nodes: Vec<String>,
    /// Host paths of every node created by the import, in creation order.
    pub created_nodes: Vec<String>,
    pub warnings: Vec<ImportWarning>,
}

/// Everything one import remembers: the object list, the nodes created per
/// hierarchy path, the geometry created per shape content and the shading
/// groups used per material signature.
///
/// The component passes can be called directly to import a subset of
/// objects; [`ImportSession::invoke`] runs them all in order.
pub struct ImportSession<'h, H: SceneHost> {
    pub(crate) host: &'h mut H,
    pub(crate) options: ImportOptions,
    pub(crate) root_prefix: String,
    pub(crate) context: ImportContext,
    pub(crate) registry: ObjectRegistry,
    pub(crate) nodes: HashMap<String, H::Node>,
    pub(crate) shapes: HashMap<String, H::Node>,
    pub(crate) shading: HashMap<String, H::ShadingGroup>,
    pub(crate) created: Vec<H::Node>,
    pub(crate) warnings: Vec<ImportWarning>,
}

impl<'h, H: SceneHost> ImportSession<'h, H> {
    pub fn new(host: &'h mut H, options: ImportOptions) -> Self {
        let root_prefix = options.root_prefix();
        let context = ImportContext::new(options.host.clone());
        Self {
            host,
            options,
            root_prefix,
            context,
            registry: ObjectRegistry::new(),
            nodes: HashMap::new(),
            shapes: HashMap::new(),
            shading: HashMap::new(),
            created: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &*self.host
    }

    pub fn context(&self) -> &ImportContext {
        &self.context
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Nodes created so far, in creation order.
    pub fn created_nodes(&self) -> &[H::Node] {
        &self.created
    }

    pub fn warnings(&self) -> &[ImportWarning] {
        &self.warnings
    }

    /// Executes the binding and registers its objects and their missing ancestors.
    pub fn register_objects<B: Binding + ?Sized>(&mut self, binding: &mut B) -> Result<(), ImportError> {
        let mut registry = ObjectRegistry::from_binding(binding, &self.root_prefix)?;
        self.warnings.extend(registry.take_warnings());
        self.registry = registry;
        Ok(())
    }

    /// Runs the whole import: registry, hierarchy pass, then transforms and shapes.
    ///
    /// # Errors
    /// Only a binding execution failure is returned. Every other problem is
    /// recorded as a warning and the object is skipped.
    pub fn invoke<B: Binding + ?Sized>(&mut self, binding: &mut B) -> Result<ImportOutcome, ImportError> {
        self.register_objects(binding)?;
        let objects: Vec<ObjectRef> = self.registry.objects().to_vec();

        // hierarchy first so every parent exists before shapes look it up
        for object in &objects {
            if let Err(err) = self.get_or_create_node_for_object(object.as_ref()) {
                self.record(object.as_ref(), err);
            }
        }

        for object in &objects {
            if let Err(err) = self.update_transform(object.as_ref(), None) {
                self.record(object.as_ref(), err);
            }
            if let Err(err) = self.update_shape(object.as_ref()) {
                self.record(object.as_ref(), err);
            }
        }

        let outcome = self.outcome();
        log::info!(
            "import done. {} nodes created, {} warnings",
            outcome.created_nodes.len(),
            outcome.warnings.len()
        );
        Ok(outcome)
    }

    /// Summarizes what the session has created so far.
    pub fn outcome(&self) -> ImportOutcome {
        let mut outcome = ImportOutcome {
            warnings: self.warnings.clone(),
            ..Default::default()
        };
        for &node in &self.created {
            let Some(path) = self.host.node_path(node) else {
                continue;
            };
            if !self.host.has_parent(node) {
                outcome.top_level_nodes.push(path.clone());
            }
            outcome.created_nodes.push(path);
        }
        outcome
    }

    /// Prefixed, normalized instance path of an object.
    pub fn object_path(&self, object: &dyn ImporterObject) -> String {
        prefixed_path(&self.root_prefix, object.instance_path())
    }

    pub(crate) fn warn(&mut self, warning: ImportWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn record(&mut self, object: &dyn ImporterObject, error: ImportError) {
        log::warn!("Skipping {}: {error}", object.instance_path());
        self.warnings
            .push(ImportWarning::from_error(object.instance_path(), &error));
    }
}

/// Materializes everything a binding produces into `host`.
///
/// Returns the paths of the created nodes. Fails only when the binding
/// cannot be executed, in which case nothing has been created.
pub fn materialize<B, H>(
    binding: &mut B,
    host: &mut H,
    options: &ImportOptions,
) -> Result<ImportOutcome, ImportError>
where
    B: Binding + ?Sized,
    H: SceneHost,
{
    ImportSession::new(host, options.clone()).invoke(binding)
}
