//! Capability views over importer objects.
//!
//! An importer object is an opaque handle owned by the importer library. The
//! core only reads it through these traits. Each capability is reached with a
//! checked cast (`as_transform`, `as_shape`, `as_material`) that yields `None`
//! when the object does not support it.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::common::{PolygonMesh, RgbaColor};

/// Shared handle to an importer object.
pub type ObjectRef = Rc<dyn ImporterObject>;

/// The importer's object type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Layer,
    Group,
    Transform,
    Instance,
    Shape,
    Light,
    Camera,
    Material,
    Texture,
    /// A tag this version does not know about.
    Unknown(String),
}

impl ObjectType {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Layer" => Self::Layer,
            "Group" => Self::Group,
            "Transform" => Self::Transform,
            "Instance" => Self::Instance,
            "Shape" => Self::Shape,
            "Light" => Self::Light,
            "Camera" => Self::Camera,
            "Material" => Self::Material,
            "Texture" => Self::Texture,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Layer => "Layer",
            Self::Group => "Group",
            Self::Transform => "Transform",
            Self::Instance => "Instance",
            Self::Shape => "Shape",
            Self::Light => "Light",
            Self::Camera => "Camera",
            Self::Material => "Material",
            Self::Texture => "Texture",
            Self::Unknown(name) => name,
        }
    }

    /// Whether objects of this type become group nodes in the host hierarchy.
    pub fn is_hierarchy(&self) -> bool {
        matches!(self, Self::Layer | Self::Group | Self::Transform | Self::Instance)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of geometry a shape carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Mesh,
    Curves,
    Points,
}

impl GeometryType {
    /// Maps the importer's integer geometry code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Mesh),
            1 => Some(Self::Curves),
            2 => Some(Self::Points),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Mesh => 0,
            Self::Curves => 1,
            Self::Points => 2,
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mesh => f.write_str("Mesh"),
            Self::Curves => f.write_str("Curves"),
            Self::Points => f.write_str("Points"),
        }
    }
}

/// Value type of a material property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Color,
    Scalar,
    String,
    Other(String),
}

impl PropertyKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Color" => Self::Color,
            "Scalar" | "Float32" | "Float64" => Self::Scalar,
            "String" => Self::String,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => f.write_str("Color"),
            Self::Scalar => f.write_str("Scalar"),
            Self::String => f.write_str("String"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Identifies the application performing the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    pub name: String,
    pub version: String,
}

impl Default for HostInfo {
    fn default() -> Self {
        Self {
            name: "pattern-import".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Evaluation context handed to every capability call of one import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportContext {
    pub host: HostInfo,
}

impl ImportContext {
    pub fn new(host: HostInfo) -> Self {
        Self { host }
    }
}

/// Read-only view of one object in the importer's scene graph.
pub trait ImporterObject {
    /// The raw type tag, e.g. `"Shape"`.
    fn type_name(&self) -> &str;

    fn name(&self) -> &str;

    /// Hierarchical, slash-separated placement path.
    fn instance_path(&self) -> &str;

    /// Unique identity of the object's content, independent of placement.
    fn path(&self) -> &str;

    fn object_type(&self) -> ObjectType {
        ObjectType::from_type_name(self.type_name())
    }

    fn as_transform(&self) -> Option<&dyn ImporterTransform> {
        None
    }

    fn as_shape(&self) -> Option<&dyn ImporterShape> {
        None
    }

    fn as_material(&self) -> Option<&dyn ImporterMaterial> {
        None
    }
}

pub trait ImporterTransform {
    /// Local transform as 16 row-major floats, translation at indices 3, 7 and 11.
    fn local_transform(&self, context: &ImportContext) -> anyhow::Result<[f32; 16]>;

    fn parent(&self) -> anyhow::Result<Option<ObjectRef>>;
}

pub trait ImporterShape {
    fn geometry_type(&self, context: &ImportContext) -> anyhow::Result<GeometryType>;

    /// False for deforming or animated shapes.
    fn is_constant(&self, context: &ImportContext) -> anyhow::Result<bool>;

    fn geometry(&self, context: &ImportContext) -> anyhow::Result<Option<PolygonMesh>>;

    fn materials(&self, context: &ImportContext) -> anyhow::Result<Vec<ObjectRef>>;

    /// Flat display color used when no material is referenced.
    fn color(&self, context: &ImportContext) -> anyhow::Result<RgbaColor>;
}

pub trait ImporterMaterial {
    /// Type of the named property, `None` if the material has no such property.
    fn property_kind(&self, name: &str) -> Option<PropertyKind>;

    /// Evaluates the named property so it can be read.
    fn update_property(&self, name: &str, context: &ImportContext) -> anyhow::Result<()>;

    fn color_property(&self, name: &str) -> anyhow::Result<RgbaColor>;
}
