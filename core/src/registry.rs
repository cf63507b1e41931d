//! Collects the importer objects one import works on.

use std::collections::HashMap;

use crate::binding::{ArgValue, Binding, PortDirection, IMPORTER_OBJECT_ARRAY};
use crate::error::{ImportError, ImportWarning};
use crate::object::ObjectRef;
use crate::path::prefixed_path;

/// Ordered list of importer objects, indexed by prefixed normalized instance path.
///
/// Order is discovery order: objects from output ports first, then ancestors
/// that were only reachable through [`crate::ImporterTransform::parent`].
#[derive(Default)]
pub struct ObjectRegistry {
    objects: Vec<ObjectRef>,
    index: HashMap<String, usize>,
    warnings: Vec<ImportWarning>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes the binding and gathers its objects plus their missing ancestors.
    ///
    /// # Errors
    /// Returns [`ImportError::BindingExecution`] if the binding fails to execute.
    pub fn from_binding<B: Binding + ?Sized>(
        binding: &mut B,
        root_prefix: &str,
    ) -> Result<Self, ImportError> {
        execute_binding(binding)?;

        let mut registry = Self::new();
        registry.collect_outputs(binding, root_prefix);
        registry.add_missing_parents(root_prefix);
        Ok(registry)
    }

    /// Appends every object found on output ports typed [`IMPORTER_OBJECT_ARRAY`].
    pub fn collect_outputs<B: Binding + ?Sized>(&mut self, binding: &B, root_prefix: &str) {
        for port in binding.ports() {
            if port.direction != PortDirection::Out || port.resolved_type != IMPORTER_OBJECT_ARRAY {
                continue;
            }

            let Some(ArgValue::Objects(objects)) = binding.arg_value(&port.name) else {
                log::debug!("Output port {} holds no importer objects", port.name);
                continue;
            };

            for object in objects {
                let path = prefixed_path(root_prefix, object.instance_path());
                if !self.insert(path, object) {
                    log::debug!("Skipping duplicate object on port {}", port.name);
                }
            }
        }
    }

    /// Appends the parent of every transform whose parent is not registered yet.
    ///
    /// Walks the list by index while it grows, so parents appended here get
    /// their own parents looked up later in the same scan.
    pub fn add_missing_parents(&mut self, root_prefix: &str) {
        let mut i = 0;
        while i < self.objects.len() {
            let object = self.objects[i].clone();
            i += 1;

            let Some(transform) = object.as_transform() else {
                continue;
            };

            let parent = match transform.parent() {
                Ok(Some(parent)) => parent,
                Ok(None) => continue,
                Err(err) => {
                    let error = ImportError::importer("getParent", object.instance_path())(err);
                    log::warn!("{error}");
                    self.warnings
                        .push(ImportWarning::from_error(object.instance_path(), &error));
                    continue;
                }
            };

            let path = prefixed_path(root_prefix, parent.instance_path());
            if self.insert(path, parent) {
                log::debug!("Added missing parent of {}", object.instance_path());
            }
        }
    }

    /// Registers an object under `path`. Returns false if the path is taken.
    pub fn insert(&mut self, path: String, object: ObjectRef) -> bool {
        if self.index.contains_key(&path) {
            return false;
        }
        self.index.insert(path, self.objects.len());
        self.objects.push(object);
        true
    }

    pub fn objects(&self) -> &[ObjectRef] {
        &self.objects
    }

    pub fn get(&self, path: &str) -> Option<&ObjectRef> {
        self.index.get(path).and_then(|&i| self.objects.get(i))
    }

    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.index.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drains the issues met while resolving parents.
    pub fn take_warnings(&mut self) -> Vec<ImportWarning> {
        std::mem::take(&mut self.warnings)
    }
}

fn execute_binding<B: Binding + ?Sized>(binding: &mut B) -> Result<(), ImportError> {
    if let Err(mut error) = binding.execute() {
        log::error!("Binding execution failed: {}", error.message);
        if error.diagnostics.is_empty() {
            error.diagnostics = binding.diagnostics();
        }
        for line in &error.diagnostics {
            log::error!("{line}");
        }
        return Err(ImportError::BindingExecution(error));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBinding, MemoryObject};
    use crate::BindingError;

    #[test]
    fn test_collects_objects_from_output_ports() {
        let world = MemoryObject::group("/World").into_ref();
        let sphere = MemoryObject::group("/World/Sphere").into_ref();
        let mut binding = MemoryBinding::new()
            .with_objects("result", vec![world, sphere])
            .with_output("count", "UInt32", ArgValue::Integer(2));

        let registry = ObjectRegistry::from_binding(&mut binding, "").unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.index_of("World"), Some(0));
        assert_eq!(registry.index_of("World/Sphere"), Some(1));
        assert_eq!(binding.execution_count(), 1);
    }

    #[test]
    fn test_ignores_input_ports_of_object_type() {
        let stray = MemoryObject::group("/Stray").into_ref();
        let mut binding = MemoryBinding::new()
            .with_input("seed", IMPORTER_OBJECT_ARRAY)
            .with_value("seed", ArgValue::Objects(vec![stray]));

        let registry = ObjectRegistry::from_binding(&mut binding, "").unwrap();

        assert!(registry.is_empty());
    }

    #[test]
    fn test_skips_duplicate_paths() {
        let first = MemoryObject::group("/World").into_ref();
        let second = MemoryObject::group("World").into_ref();
        let mut binding = MemoryBinding::new()
            .with_objects("a", vec![first.clone()])
            .with_objects("b", vec![second]);

        let registry = ObjectRegistry::from_binding(&mut binding, "").unwrap();

        assert_eq!(registry.len(), 1);
        assert!(std::rc::Rc::ptr_eq(registry.get("World").unwrap(), &first));
    }

    #[test]
    fn test_adds_missing_ancestors_in_order() {
        let world = MemoryObject::group("/World").into_ref();
        let geo = MemoryObject::group("/World/Geo")
            .with_parent(world.clone())
            .into_ref();
        let leaf = MemoryObject::group("/World/Geo/Leaf")
            .with_parent(geo.clone())
            .into_ref();
        let mut binding = MemoryBinding::new().with_objects("result", vec![leaf]);

        let registry = ObjectRegistry::from_binding(&mut binding, "Imported/").unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.index_of("Imported/World/Geo/Leaf"), Some(0));
        assert_eq!(registry.index_of("Imported/World/Geo"), Some(1));
        assert_eq!(registry.index_of("Imported/World"), Some(2));
    }

    #[test]
    fn test_parent_already_declared_is_not_duplicated() {
        let world = MemoryObject::group("/World").into_ref();
        let geo = MemoryObject::group("/World/Geo")
            .with_parent(world.clone())
            .into_ref();
        let mut binding = MemoryBinding::new().with_objects("result", vec![world, geo]);

        let registry = ObjectRegistry::from_binding(&mut binding, "").unwrap();

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_parent_lookup_failure_becomes_warning() {
        let broken = MemoryObject::group("/Broken").failing("getParent").into_ref();
        let mut binding = MemoryBinding::new().with_objects("result", vec![broken]);

        let mut registry = ObjectRegistry::from_binding(&mut binding, "").unwrap();
        let warnings = registry.take_warnings();

        assert_eq!(registry.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].subject, "/Broken");
    }

    #[test]
    fn test_execution_failure_is_fatal() {
        let mut binding = MemoryBinding::new()
            .with_objects("result", vec![MemoryObject::group("/World").into_ref()])
            .with_failure(
                BindingError::new("graph error")
                    .with_diagnostics(vec!["solve: division by zero".to_string()]),
            );

        let error = ObjectRegistry::from_binding(&mut binding, "").err().unwrap();

        match error {
            ImportError::BindingExecution(error) => {
                assert_eq!(error.message, "graph error");
                assert_eq!(error.diagnostics, vec!["solve: division by zero"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
