use crate::brush::Brush;
use crate::map::Map;

/// Flat geometry buffers built from reduced brushes: fan-triangulated faces for the
/// perspective view and edge index pairs for orthographic wireframes. Texture
/// coordinates and materials are a downstream concern and not produced here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Flat array of vertices [x, y, z, x, y, z, ...].
    pub positions: Vec<f64>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
    /// Line list index pairs into `positions`, one pair per boundary loop edge.
    pub edges: Vec<u32>,
}

impl MeshData {
    pub fn from_brush(brush: &Brush) -> MeshData {
        let mut mesh = MeshData::default();
        mesh.push_brush(brush);
        mesh
    }

    pub fn from_map(map: &Map) -> MeshData {
        let mut mesh = MeshData::default();
        for entity in &map.entities {
            for brush in &entity.brushes {
                mesh.push_brush(brush);
            }
        }
        mesh
    }

    /// Appends the reduced surfaces of `brush`. Surfaces without a valid boundary loop
    /// (not yet reduced, or fully clipped) are skipped.
    pub fn push_brush(&mut self, brush: &Brush) {
        for surface in &brush.surfaces {
            let points = surface.winding.points();
            if points.len() < 3 {
                continue;
            }

            let base = (self.positions.len() / 3) as u32;
            for point in points {
                self.positions.extend_from_slice(point);
            }

            // Fan triangulation around the first loop vertex
            for i in 2..points.len() as u32 {
                self.indices.push(base);
                self.indices.push(base + i - 1);
                self.indices.push(base + i);
            }

            let count = points.len() as u32;
            for i in 0..count {
                self.edges.push(base + i);
                self.edges.push(base + (i + 1) % count);
            }
        }
    }

    pub fn count_vertices(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn count_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::Plane;

    fn reduced_cube(half: f64) -> Brush {
        let mut brush = Brush::from_planes([
            Plane::new([1.0, 0.0, 0.0], half),
            Plane::new([-1.0, 0.0, 0.0], half),
            Plane::new([0.0, 1.0, 0.0], half),
            Plane::new([0.0, -1.0, 0.0], half),
            Plane::new([0.0, 0.0, 1.0], half),
            Plane::new([0.0, 0.0, -1.0], half),
        ]);
        brush.reduce();
        brush
    }

    #[test]
    fn test_mesh_cube() {
        let mesh = MeshData::from_brush(&reduced_cube(64.0));

        // 6 quads: 4 vertices, 2 triangles and 4 edges apiece.
        assert_eq!(mesh.count_vertices(), 24);
        assert_eq!(mesh.count_triangles(), 12);
        assert_eq!(mesh.edges.len(), 48);

        for &index in mesh.indices.iter().chain(mesh.edges.iter()) {
            assert!((index as usize) < mesh.count_vertices());
        }
    }

    #[test]
    fn test_mesh_triangles_face_outward() {
        let mesh = MeshData::from_brush(&reduced_cube(64.0));

        // The cube is centered on the origin, so every triangle normal points away
        // from it.
        for triangle in mesh.indices.chunks(3) {
            let vertex = |index: u32| -> [f64; 3] {
                let i = index as usize * 3;
                [mesh.positions[i], mesh.positions[i + 1], mesh.positions[i + 2]]
            };
            let p0 = vertex(triangle[0]);
            let p1 = vertex(triangle[1]);
            let p2 = vertex(triangle[2]);

            let normal = crate::math::cross(crate::math::sub(p1, p0), crate::math::sub(p2, p0));
            let centroid = crate::math::scale(crate::math::add(crate::math::add(p0, p1), p2), 1.0 / 3.0);
            assert!(
                crate::math::dot(normal, centroid) > 0.0,
                "triangle {triangle:?} faces into the solid"
            );
        }
    }

    #[test]
    fn test_mesh_skips_unreduced_brush() {
        let brush = Brush::from_planes([Plane::new([0.0, 0.0, 1.0], 0.0)]);
        let mesh = MeshData::from_brush(&brush);

        assert_eq!(mesh, MeshData::default());
    }
}
