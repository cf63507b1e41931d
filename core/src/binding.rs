//! The bound computation that produces importer objects.

use std::fmt;

use thiserror::Error;

use crate::common::PolygonMesh;
use crate::object::ObjectRef;

/// Resolved type of an output port carrying importer objects.
pub const IMPORTER_OBJECT_ARRAY: &str = "Ref<ImporterObject>[]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    In,
    Out,
}

/// A named argument slot of a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub direction: PortDirection,
    /// Type name as resolved by the binding, e.g. `"PolygonMesh"`.
    pub resolved_type: String,
}

impl Port {
    pub fn input(name: impl Into<String>, resolved_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::In,
            resolved_type: resolved_type.into(),
        }
    }

    pub fn output(name: impl Into<String>, resolved_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Out,
            resolved_type: resolved_type.into(),
        }
    }
}

/// A value read from or written to a port.
#[derive(Clone)]
pub enum ArgValue {
    Objects(Vec<ObjectRef>),
    String(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Mesh(PolygonMesh),
}

impl ArgValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Objects(_) => "Objects",
            Self::String(_) => "String",
            Self::Boolean(_) => "Boolean",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Mesh(_) => "Mesh",
        }
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Objects(objects) => write!(f, "Objects({} objects)", objects.len()),
            Self::String(value) => f.debug_tuple("String").field(value).finish(),
            Self::Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
            Self::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Self::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Self::Mesh(mesh) => write!(
                f,
                "Mesh({} vertices, {} faces)",
                mesh.vertex_count(),
                mesh.face_count()
            ),
        }
    }
}

/// Failure reported by [`Binding::execute`].
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BindingError {
    pub message: String,
    /// Diagnostics the binding collected while executing, one per line.
    pub diagnostics: Vec<String>,
}

impl BindingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<String>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

/// A bound computation whose output ports yield importer objects.
pub trait Binding {
    fn execute(&mut self) -> Result<(), BindingError>;

    fn ports(&self) -> Vec<Port>;

    fn arg_value(&self, name: &str) -> Option<ArgValue>;

    fn set_arg_value(&mut self, name: &str, value: ArgValue) -> anyhow::Result<()>;

    /// Diagnostics currently attached to the binding.
    fn diagnostics(&self) -> Vec<String> {
        Vec::new()
    }
}
