//! Shading groups, one per material signature.

use crate::common::RgbaColor;
use crate::error::{ImportError, ImportWarning, WarningKind};
use crate::host::SceneHost;
use crate::object::{ImporterObject, PropertyKind};
use crate::session::ImportSession;

/// Material properties read for the representative color, in order. A later
/// match overrides an earlier one.
const COLOR_PROPERTIES: [&str; 2] = ["diffuse", "color"];

const SIGNATURE_SUFFIX: &str = "SG";

/// Name of the shader standing in for a flat color, e.g. `Material_r178g178b178Color`.
///
/// Colors that agree after 8-bit quantization share the name.
pub fn flat_color_material_name(color: RgbaColor) -> String {
    let [r, g, b] = color.quantized_rgb();
    format!("Material_r{r}g{g}b{b}Color")
}

/// Shading group name for a material name.
pub fn material_signature(material_name: &str) -> String {
    format!("{material_name}{SIGNATURE_SUFFIX}")
}

impl<H: SceneHost> ImportSession<'_, H> {
    /// Puts the geometry node of a shape into the shading group for its material.
    ///
    /// Only the first referenced material is honored. Shapes without materials
    /// use a group named after their quantized flat color. A shading group
    /// already present in the host under the same name is reused.
    pub fn update_material(
        &mut self,
        object: &dyn ImporterObject,
        node: Option<H::Node>,
    ) -> Result<bool, ImportError> {
        let Some(shape) = object.as_shape() else {
            return Ok(false);
        };
        let Some(node) = node else {
            return Ok(false);
        };
        let instance_path = object.instance_path();

        let materials = shape
            .materials(&self.context)
            .map_err(ImportError::importer("getMaterials", instance_path))?;

        let (material_name, color) = match materials.first() {
            Some(material) => {
                let color = self.material_color(material.as_ref())?;
                (material.name().to_string(), color)
            }
            None => {
                let color = shape
                    .color(&self.context)
                    .map_err(ImportError::importer("getColor", instance_path))?
                    .opaque();
                (flat_color_material_name(color), color)
            }
        };

        let signature = material_signature(&material_name);
        let group = match self.shading.get(&signature) {
            Some(&group) => group,
            None => {
                let group = match self.host.find_shading_group(&signature) {
                    Some(group) => {
                        log::debug!("Reusing existing shading group {signature}");
                        group
                    }
                    None => {
                        log::debug!("Creating shading group {signature}");
                        self.host
                            .create_shading_group(&signature, &material_name, color)?
                    }
                };
                self.shading.insert(signature, group);
                group
            }
        };

        self.host.add_shading_member(group, node)?;
        Ok(true)
    }

    /// Representative color of a referenced material.
    fn material_color(&mut self, material: &dyn ImporterObject) -> Result<RgbaColor, ImportError> {
        let mut color = self.options.default_color;
        let Some(properties) = material.as_material() else {
            return Ok(color);
        };

        for name in COLOR_PROPERTIES {
            match properties.property_kind(name) {
                Some(PropertyKind::Color) => {
                    properties
                        .update_property(name, &self.context)
                        .map_err(ImportError::importer("updateProperty", material.instance_path()))?;
                    color = properties
                        .color_property(name)
                        .map_err(ImportError::importer("getColorProperty", material.instance_path()))?;
                }
                Some(kind) => {
                    log::info!(
                        "Property {name} of material {} is a {kind}, not a Color.",
                        material.name()
                    );
                    self.warn(ImportWarning::new(
                        WarningKind::PropertyTypeMismatch,
                        material.instance_path(),
                        format!("Property {name} is a {kind}, not a Color"),
                    ));
                }
                None => {}
            }
        }
        Ok(color)
    }
}
