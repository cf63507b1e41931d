use crate::common::RgbaColor;

/// The ID of the default material created automatically by the Scene.
///
/// Geometry that has not joined a shading group renders with it (magenta).
/// Using `u32::MAX` ensures it never collides with material IDs assigned
/// sequentially from 0.
pub const DEFAULT_MATERIAL_ID: MaterialId = u32::MAX;

/// Unique identifier for materials.
pub type MaterialId = u32;

/// A flat-color surface shader.
///
/// ```
/// use pattern_import_scene::{Material, Scene};
/// use pattern_import_scene::common::RgbaColor;
///
/// let material = Material::new()
///     .with_name("Material_r255g255b255Color")
///     .with_base_color_factor(RgbaColor::WHITE);
///
/// let mut scene = Scene::new();
/// let mat_id = scene.add_material(material);
/// assert!(scene.get_material(mat_id).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Material {
    /// Unique identifier for this material
    pub id: MaterialId,
    name: Option<String>,
    base_color_factor: RgbaColor,
}

impl Material {
    /// Create a new unnamed white material.
    pub fn new() -> Self {
        Self {
            id: 0, // Assigned by Scene
            name: None,
            base_color_factor: RgbaColor::WHITE,
        }
    }

    // ========== Getter methods ==========

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the base color factor.
    pub fn base_color_factor(&self) -> RgbaColor {
        self.base_color_factor
    }

    // ========== Builder methods (chainable) ==========

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the base color factor.
    pub fn with_base_color_factor(mut self, color: RgbaColor) -> Self {
        self.base_color_factor = color;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
