//! Materializes import patterns into a host scene graph.
//!
//! An import pattern is a bound computation whose output ports yield importer
//! objects: groups, transforms, shapes and materials addressed by instance
//! path. [`materialize`] executes the binding, collects the objects together
//! with any ancestors they reference, creates one group node per hierarchy
//! path, copies local transforms, creates geometry once per shape content and
//! puts every geometry node in a shading group per material signature.
//!
//! The host is anything implementing [`SceneHost`]; [`scene::Scene`] is the
//! in-memory implementation.

mod args;
mod binding;
mod error;
mod hierarchy;
mod host;
mod material;
pub mod memory;
mod object;
mod options;
mod path;
mod registry;
mod session;
mod shape;
mod transform;

pub use pattern_import_scene as scene;
pub use pattern_import_scene::common;

pub use args::{accepts, apply_arguments};
pub use binding::{ArgValue, Binding, BindingError, Port, PortDirection, IMPORTER_OBJECT_ARRAY};
pub use error::{ImportError, ImportWarning, WarningKind};
pub use host::SceneHost;
pub use material::{flat_color_material_name, material_signature};
pub use object::{
    GeometryType, HostInfo, ImportContext, ImporterMaterial, ImporterObject, ImporterShape,
    ImporterTransform, ObjectRef, ObjectType, PropertyKind,
};
pub use options::{ImportOptions, DEFAULT_MATERIAL_COLOR, DEFAULT_MAX_DEPTH};
pub use path::{normalize_path, split_parent};
pub use registry::ObjectRegistry;
pub use session::{materialize, ImportOutcome, ImportSession};

#[cfg(test)]
mod import_tests;
