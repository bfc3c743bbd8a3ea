use crate::math;
use crate::plane::Plane;

/// A boundary loop: an ordered, convex, planar sequence of vertices forming one face of
/// a brush. A winding with fewer than 3 vertices is degenerate and stands for a face
/// that was clipped away entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Winding {
    points: Vec<[f64; 3]>,
}

impl Winding {
    pub fn from_points(points: Vec<[f64; 3]>) -> Winding {
        Winding { points }
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A winding below 3 vertices bounds no area and its face does not exist.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Clips this winding against every plane in `planes` except the one at index
    /// `owner` (the plane the winding lies on; identified by index, never by value,
    /// since distinct faces can be numerically coincident).
    ///
    /// Each pass is a Sutherland-Hodgman sweep against one half-space: vertices with
    /// `distance <= epsilon` are retained, and edges that cross the plane beyond the
    /// tolerance on both sides insert the interpolated intersection point. If the loop
    /// ever falls below 3 vertices the face is fully occluded and an empty winding is
    /// returned without visiting the remaining planes.
    ///
    /// Clipping an already-clipped winding against the same planes returns it
    /// unchanged, vertex for vertex.
    pub fn clip(self, planes: &[Plane], owner: Option<usize>, epsilon: f64) -> Winding {
        let mut points = self.points;
        let mut clipped: Vec<[f64; 3]> = Vec::with_capacity(points.len() + 4);

        for (index, plane) in planes.iter().enumerate() {
            if Some(index) == owner {
                continue;
            }

            clipped.clear();

            let count = points.len();
            for i in 0..count {
                let v0 = points[i];
                let v1 = points[(i + 1) % count];

                let d0 = plane.distance_to(v0);
                let d1 = plane.distance_to(v1);

                if d0 <= epsilon {
                    clipped.push(v0);
                }

                if (d0 > epsilon && d1 < -epsilon) || (d0 < -epsilon && d1 > epsilon) {
                    let t = d0 / (d0 - d1);
                    clipped.push(math::lerp(v0, v1, t));
                }
            }

            std::mem::swap(&mut points, &mut clipped);

            if points.len() < 3 {
                points.clear();
                break;
            }
        }

        Winding { points }
    }

    /// Largest absolute distance of any vertex to `plane`. Zero for an empty winding.
    pub fn max_distance_to(&self, plane: &Plane) -> f64 {
        self.points
            .iter()
            .map(|&p| plane.distance_to(p).abs())
            .fold(0.0, f64::max)
    }
}
