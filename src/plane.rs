use crate::math;
use crate::winding::Winding;
use thiserror::Error;

/// Half-size of the seed quad generated for a plane, in world units. Large enough to
/// exceed any realistic brush extent before clipping whittles it down.
pub const PLANE_SIZE: f64 = 32768.0;

/// Tolerance below which a point is treated as lying exactly on a plane.
pub const CLIP_EPSILON: f64 = 0.01;

/// The three face points are collinear or coincident, so no plane normal exists.
#[derive(Debug, Clone, Error)]
#[error("degenerate plane: face points are collinear or coincident")]
pub struct DegeneratePlane;

/// A half-space descriptor: the set of points `p` where `dot(p, normal) == offset`.
///
/// The normal is kept at unit length and points out of the solid it bounds; points with
/// negative [`Plane::distance_to`] are inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: [f64; 3],
    pub offset: f64,
}

impl Plane {
    /// Creates a plane from a normal and offset. The normal is normalized; the offset is
    /// taken as-is and refers to the unit normal.
    pub fn new(normal: [f64; 3], offset: f64) -> Plane {
        Plane {
            normal: math::normalize(normal),
            offset,
        }
    }

    /// Derives a plane from three non-collinear points, as read from the `.map` face
    /// syntax. The winding of `a, b, c` determines which side the normal points to.
    pub fn from_points(
        a: [f64; 3],
        b: [f64; 3],
        c: [f64; 3],
    ) -> Result<Plane, DegeneratePlane> {
        let cross = math::cross(math::sub(b, a), math::sub(c, a));
        let len = math::length(cross);
        if len < 1e-9 {
            return Err(DegeneratePlane);
        }

        let normal = math::scale(cross, 1.0 / len);
        Ok(Plane {
            normal,
            offset: math::dot(normal, a),
        })
    }

    /// Signed distance from `point` to this plane: zero on the plane, positive on the
    /// side the normal points toward, negative inside the solid.
    #[inline]
    pub fn distance_to(&self, point: [f64; 3]) -> f64 {
        math::dot(point, self.normal) - self.offset
    }

    /// The up-vector for this plane: a deterministic unit vector perpendicular to the
    /// normal. World-Z is the candidate axis unless the normal is Z-dominant, in which
    /// case world-X is used instead.
    pub fn up(&self) -> [f64; 3] {
        let [nx, ny, nz] = self.normal;

        let up = if nz.abs() > nx.abs() && nz.abs() > ny.abs() {
            [1.0, 0.0, 0.0]
        } else {
            [0.0, 0.0, 1.0]
        };

        let dot = -math::dot(up, self.normal);
        math::normalize(math::add(up, math::scale(self.normal, dot)))
    }

    /// The right-vector for this plane, completing the (up, right, normal) frame.
    pub fn right(&self) -> [f64; 3] {
        math::cross(self.up(), self.normal)
    }

    /// Returns an oversized quad lying on this plane, the seed geometry for clipping.
    /// The four vertices sit at `offset * normal ± size * right ± size * up`, wound
    /// counter-clockwise as seen from the normal side so fan triangulation of the
    /// clipped loop produces outward-facing triangles.
    pub fn quad(&self, size: f64) -> Winding {
        let up = self.up();
        let right = self.right();
        let anchor = math::scale(self.normal, self.offset);

        Winding::from_points(vec![
            math::add(anchor, math::add(math::scale(right, -size), math::scale(up, size))),
            math::add(anchor, math::add(math::scale(right, -size), math::scale(up, -size))),
            math::add(anchor, math::add(math::scale(right, size), math::scale(up, -size))),
            math::add(anchor, math::add(math::scale(right, size), math::scale(up, size))),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let plane = Plane::from_points([1.0, 1.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0])
            .expect("non-collinear points");

        assert_eq!(plane.normal, [0.0, 0.0, 1.0]);
        assert_eq!(plane.offset, 1.0);
    }

    #[test]
    fn test_from_points_degenerate() {
        assert!(Plane::from_points([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]).is_err());
        assert!(Plane::from_points([3.0, 3.0, 3.0], [3.0, 3.0, 3.0], [3.0, 3.0, 3.0]).is_err());
    }

    #[test]
    fn test_distance_to() {
        let plane = Plane::from_points([1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0])
            .expect("non-collinear points");

        assert_eq!(plane.normal, [0.0, 0.0, 1.0]);
        assert_eq!(plane.distance_to([0.0, 0.0, 0.0]), 0.0);
        assert_eq!(plane.distance_to([5.0, 8.0, -4.0]), -4.0);
    }

    #[test]
    fn test_frame_z_dominant() {
        let plane = Plane::new([0.0, 0.0, 1.0], 1.0);

        assert_eq!(plane.up(), [1.0, 0.0, 0.0]);
        assert_eq!(plane.right(), [0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_frame_y_dominant() {
        let plane = Plane::from_points([1.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 0.0, 1.0])
            .expect("non-collinear points");

        assert_eq!(plane.normal, [0.0, 1.0, 0.0]);
        assert_eq!(plane.up(), [0.0, 0.0, 1.0]);
        assert_eq!(plane.right(), [-1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_up_is_stable() {
        let plane = Plane::new([0.3, -0.2, 0.93], -14.0);
        let up = plane.up();

        for _ in 0..8 {
            assert_eq!(plane.up(), up);
        }
        assert!(math::dot(up, plane.normal).abs() < 1e-12);
        assert!((math::length(up) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quad() {
        let s = PLANE_SIZE;
        let plane = Plane::new([0.0, 0.0, 1.0], 0.0);

        let quad = plane.quad(s);
        assert_eq!(
            quad.points(),
            &[[s, s, 0.0], [-s, s, 0.0], [-s, -s, 0.0], [s, -s, 0.0]]
        );
    }

    #[test]
    fn test_quad_y_plane() {
        let s = PLANE_SIZE;
        let plane = Plane::new([0.0, 1.0, 0.0], 0.0);

        let quad = plane.quad(s);
        assert_eq!(
            quad.points(),
            &[[s, 0.0, s], [s, 0.0, -s], [-s, 0.0, -s], [-s, 0.0, s]]
        );
    }

    #[test]
    fn test_quad_on_plane() {
        let plane = Plane::new([1.0, 2.0, -0.5], 96.0);

        let quad = plane.quad(PLANE_SIZE);
        assert_eq!(quad.len(), 4);
        for &point in quad.points() {
            assert!(plane.distance_to(point).abs() < 1e-6);
        }
    }

    #[test]
    fn test_quad_winds_counter_clockwise() {
        // Counter-clockwise seen from the normal side: the loop's cross product
        // points along the normal, so fan triangles face out of the solid.
        for normal in [
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.3, -0.2, 0.93],
        ] {
            let plane = Plane::new(normal, 16.0);
            let quad = plane.quad(PLANE_SIZE);

            let [p0, p1, p2, _] = quad.points() else {
                panic!("quad has 4 vertices");
            };
            let cross = math::cross(math::sub(*p1, *p0), math::sub(*p2, *p0));
            assert!(
                math::dot(cross, plane.normal) > 0.0,
                "quad winding opposes normal {:?}",
                plane.normal
            );
        }
    }
}
