//! In-memory importer document.
//!
//! Lets a host build an import pattern programmatically: [`MemoryObject`]
//! implements every capability view and [`MemoryBinding`] serves the objects
//! from output ports.
//!
//! ```
//! use pattern_import::memory::{MemoryBinding, MemoryObject};
//! use pattern_import::{materialize, ImportOptions};
//! use pattern_import::common::PolygonMesh;
//! use pattern_import::scene::Scene;
//!
//! let world = MemoryObject::group("/World").into_ref();
//! let cube = MemoryObject::shape("/World/Cube", "cube_01", PolygonMesh::default())
//!     .with_parent(world)
//!     .into_ref();
//! let mut binding = MemoryBinding::new().with_objects("result", vec![cube]);
//!
//! let mut scene = Scene::new();
//! let outcome = materialize(&mut binding, &mut scene, &ImportOptions::default()).unwrap();
//! assert_eq!(outcome.top_level_nodes, vec!["World".to_string()]);
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use cgmath::{Matrix4, SquareMatrix};

use crate::binding::{ArgValue, Binding, BindingError, Port, IMPORTER_OBJECT_ARRAY};
use crate::common::{matrix_to_row_major, PolygonMesh, RgbaColor};
use crate::object::{
    GeometryType, ImportContext, ImporterMaterial, ImporterObject, ImporterShape,
    ImporterTransform, ObjectRef, PropertyKind,
};

// ============================================================================
// Objects
// ============================================================================

/// A material property value.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialProperty {
    Color(RgbaColor),
    Scalar(f32),
    String(String),
}

impl MaterialProperty {
    fn kind(&self) -> PropertyKind {
        match self {
            Self::Color(_) => PropertyKind::Color,
            Self::Scalar(_) => PropertyKind::Scalar,
            Self::String(_) => PropertyKind::String,
        }
    }
}

struct TransformData {
    local: [f32; 16],
    parent: Option<ObjectRef>,
}

impl Default for TransformData {
    fn default() -> Self {
        Self {
            local: matrix_to_row_major(&Matrix4::identity()),
            parent: None,
        }
    }
}

struct ShapeData {
    geometry_type: GeometryType,
    constant: bool,
    geometry: Option<PolygonMesh>,
    materials: Vec<ObjectRef>,
    color: RgbaColor,
}

/// An importer object held in memory.
pub struct MemoryObject {
    type_name: String,
    name: String,
    instance_path: String,
    path: String,
    transform: Option<TransformData>,
    shape: Option<ShapeData>,
    properties: Option<Vec<(String, MaterialProperty)>>,
    failing_call: Option<&'static str>,
}

impl MemoryObject {
    /// An object with the given type tag and no capabilities.
    ///
    /// Name and content path default to the last segment and the whole of
    /// the instance path.
    pub fn new(type_name: impl Into<String>, instance_path: impl Into<String>) -> Self {
        let instance_path = instance_path.into();
        let name = instance_path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            type_name: type_name.into(),
            name,
            path: instance_path.clone(),
            instance_path,
            transform: None,
            shape: None,
            properties: None,
            failing_call: None,
        }
    }

    /// A `Group` with an identity local transform.
    pub fn group(instance_path: impl Into<String>) -> Self {
        Self::new("Group", instance_path).with_local_transform(matrix_to_row_major(&Matrix4::identity()))
    }

    /// A `Transform` with the given row-major local transform.
    pub fn transform(instance_path: impl Into<String>, local: [f32; 16]) -> Self {
        Self::new("Transform", instance_path).with_local_transform(local)
    }

    /// A constant mesh `Shape` with identity transform, white flat color and no materials.
    pub fn shape(instance_path: impl Into<String>, path: impl Into<String>, mesh: PolygonMesh) -> Self {
        let mut object = Self::new("Shape", instance_path).with_path(path);
        object.transform = Some(TransformData::default());
        object.shape = Some(ShapeData {
            geometry_type: GeometryType::Mesh,
            constant: true,
            geometry: Some(mesh),
            materials: Vec::new(),
            color: RgbaColor::WHITE,
        });
        object
    }

    /// A `Material` without properties.
    pub fn material(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut object = Self::new("Material", format!("/materials/{name}"));
        object.name = name;
        object.properties = Some(Vec::new());
        object
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_local_transform(mut self, local: [f32; 16]) -> Self {
        self.transform.get_or_insert_with(TransformData::default).local = local;
        self
    }

    pub fn with_parent(mut self, parent: ObjectRef) -> Self {
        self.transform.get_or_insert_with(TransformData::default).parent = Some(parent);
        self
    }

    pub fn with_geometry_type(mut self, geometry_type: GeometryType) -> Self {
        if let Some(shape) = self.shape.as_mut() {
            shape.geometry_type = geometry_type;
        }
        self
    }

    /// Marks a shape as deforming.
    pub fn deforming(mut self) -> Self {
        if let Some(shape) = self.shape.as_mut() {
            shape.constant = false;
        }
        self
    }

    /// Makes a shape yield no geometry.
    pub fn without_geometry(mut self) -> Self {
        if let Some(shape) = self.shape.as_mut() {
            shape.geometry = None;
        }
        self
    }

    pub fn with_color(mut self, color: RgbaColor) -> Self {
        if let Some(shape) = self.shape.as_mut() {
            shape.color = color;
        }
        self
    }

    pub fn with_material(mut self, material: ObjectRef) -> Self {
        if let Some(shape) = self.shape.as_mut() {
            shape.materials.push(material);
        }
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: MaterialProperty) -> Self {
        self.properties
            .get_or_insert_with(Vec::new)
            .push((name.into(), value));
        self
    }

    /// Makes the named capability call fail, e.g. `"getGeometry"`.
    pub fn failing(mut self, call: &'static str) -> Self {
        self.failing_call = Some(call);
        self
    }

    pub fn into_ref(self) -> ObjectRef {
        Rc::new(self)
    }

    fn check(&self, call: &'static str) -> anyhow::Result<()> {
        if self.failing_call == Some(call) {
            anyhow::bail!("{call} failed on {}", self.instance_path);
        }
        Ok(())
    }

    fn shape_data(&self) -> anyhow::Result<&ShapeData> {
        self.shape
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("{} is not a shape", self.instance_path))
    }

    fn property(&self, name: &str) -> Option<&MaterialProperty> {
        self.properties
            .as_ref()?
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl ImporterObject for MemoryObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn instance_path(&self) -> &str {
        &self.instance_path
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn as_transform(&self) -> Option<&dyn ImporterTransform> {
        self.transform.as_ref().map(|_| self as &dyn ImporterTransform)
    }

    fn as_shape(&self) -> Option<&dyn ImporterShape> {
        self.shape.as_ref().map(|_| self as &dyn ImporterShape)
    }

    fn as_material(&self) -> Option<&dyn ImporterMaterial> {
        self.properties.as_ref().map(|_| self as &dyn ImporterMaterial)
    }
}

impl ImporterTransform for MemoryObject {
    fn local_transform(&self, _context: &ImportContext) -> anyhow::Result<[f32; 16]> {
        self.check("getLocalTransform")?;
        Ok(self.transform.as_ref().map(|t| t.local).unwrap_or_default())
    }

    fn parent(&self) -> anyhow::Result<Option<ObjectRef>> {
        self.check("getParent")?;
        Ok(self.transform.as_ref().and_then(|t| t.parent.clone()))
    }
}

impl ImporterShape for MemoryObject {
    fn geometry_type(&self, _context: &ImportContext) -> anyhow::Result<GeometryType> {
        self.check("getGeometryType")?;
        Ok(self.shape_data()?.geometry_type)
    }

    fn is_constant(&self, _context: &ImportContext) -> anyhow::Result<bool> {
        self.check("isConstant")?;
        Ok(self.shape_data()?.constant)
    }

    fn geometry(&self, _context: &ImportContext) -> anyhow::Result<Option<PolygonMesh>> {
        self.check("getGeometry")?;
        Ok(self.shape_data()?.geometry.clone())
    }

    fn materials(&self, _context: &ImportContext) -> anyhow::Result<Vec<ObjectRef>> {
        self.check("getMaterials")?;
        Ok(self.shape_data()?.materials.clone())
    }

    fn color(&self, _context: &ImportContext) -> anyhow::Result<RgbaColor> {
        self.check("getColor")?;
        Ok(self.shape_data()?.color)
    }
}

impl ImporterMaterial for MemoryObject {
    fn property_kind(&self, name: &str) -> Option<PropertyKind> {
        self.property(name).map(MaterialProperty::kind)
    }

    fn update_property(&self, _name: &str, _context: &ImportContext) -> anyhow::Result<()> {
        self.check("updateProperty")
    }

    fn color_property(&self, name: &str) -> anyhow::Result<RgbaColor> {
        self.check("getColorProperty")?;
        match self.property(name) {
            Some(MaterialProperty::Color(color)) => Ok(*color),
            Some(other) => anyhow::bail!("Property {name} is a {}, not a Color", other.kind()),
            None => anyhow::bail!("Material {} has no property {name}", self.name),
        }
    }
}

// ============================================================================
// Binding
// ============================================================================

/// A binding whose ports and values are set up front.
#[derive(Default)]
pub struct MemoryBinding {
    ports: Vec<Port>,
    values: HashMap<String, ArgValue>,
    failure: Option<BindingError>,
    executions: usize,
}

impl MemoryBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, name: impl Into<String>, resolved_type: impl Into<String>) -> Self {
        self.ports.push(Port::input(name, resolved_type));
        self
    }

    pub fn with_output(
        mut self,
        name: impl Into<String>,
        resolved_type: impl Into<String>,
        value: ArgValue,
    ) -> Self {
        let name = name.into();
        self.values.insert(name.clone(), value);
        self.ports.push(Port::output(name, resolved_type));
        self
    }

    /// Adds an output port of importer objects.
    pub fn with_objects(self, name: impl Into<String>, objects: Vec<ObjectRef>) -> Self {
        self.with_output(name, IMPORTER_OBJECT_ARRAY, ArgValue::Objects(objects))
    }

    /// Presets the value of an existing port.
    pub fn with_value(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Makes [`Binding::execute`] fail with `error`.
    pub fn with_failure(mut self, error: BindingError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn execution_count(&self) -> usize {
        self.executions
    }
}

impl Binding for MemoryBinding {
    fn execute(&mut self) -> Result<(), BindingError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.executions += 1;
        Ok(())
    }

    fn ports(&self) -> Vec<Port> {
        self.ports.clone()
    }

    fn arg_value(&self, name: &str) -> Option<ArgValue> {
        self.values.get(name).cloned()
    }

    fn set_arg_value(&mut self, name: &str, value: ArgValue) -> anyhow::Result<()> {
        if !self.ports.iter().any(|port| port.name == name) {
            anyhow::bail!("Binding has no port named {name}");
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn diagnostics(&self) -> Vec<String> {
        self.failure
            .as_ref()
            .map(|error| error.diagnostics.clone())
            .unwrap_or_default()
    }
}
