use serde::{Deserialize, Serialize};

/// Polygonal geometry as handed over by an importer.
///
/// Faces are stored as a flat index list with one vertex count per face,
/// the same layout USD and most DCC tools use. No triangulation happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonMesh {
    pub positions: Vec<[f32; 3]>,
    pub face_counts: Vec<u32>,
    pub face_indices: Vec<u32>,
}

impl PolygonMesh {
    pub fn new(positions: Vec<[f32; 3]>, face_counts: Vec<u32>, face_indices: Vec<u32>) -> Self {
        Self {
            positions,
            face_counts,
            face_indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.face_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Checks that the face counts cover the index list exactly and that
    /// every index points at an existing vertex.
    pub fn is_consistent(&self) -> bool {
        let expected: u64 = self.face_counts.iter().map(|&c| u64::from(c)).sum();
        if expected != self.face_indices.len() as u64 {
            return false;
        }
        let vertex_count = self.positions.len() as u64;
        self.face_indices
            .iter()
            .all(|&idx| u64::from(idx) < vertex_count)
    }
}
