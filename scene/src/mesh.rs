use crate::common::PolygonMesh;

/// Unique identifier for meshes.
pub type MeshId = u32;

/// Polygon mesh data owned by the scene.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub id: MeshId,
    polygons: PolygonMesh,
}

impl Mesh {
    /// Wraps polygon data. The id is assigned by the Scene.
    pub fn new(polygons: PolygonMesh) -> Self {
        Self { id: 0, polygons }
    }

    pub fn polygons(&self) -> &PolygonMesh {
        &self.polygons
    }

    pub fn vertex_count(&self) -> usize {
        self.polygons.vertex_count()
    }

    pub fn face_count(&self) -> usize {
        self.polygons.face_count()
    }
}

impl From<PolygonMesh> for Mesh {
    fn from(polygons: PolygonMesh) -> Self {
        Self::new(polygons)
    }
}
