use crate::plane::{Plane, CLIP_EPSILON, PLANE_SIZE};
use crate::winding::Winding;
use tracing::debug;

/// One face of a brush: its bounding plane, the boundary loop computed by reduction,
/// and the texturing attributes read from the `.map` face syntax. Materials are not
/// resolved here; the attribute fields are carried for downstream consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub plane: Plane,
    pub winding: Winding,

    pub texture: String,
    pub offset_s: f64,
    pub offset_t: f64,
    pub angle: f64,
    pub scale_s: f64,
    pub scale_t: f64,

    pub contents: i32,
    pub flags: i32,
    pub value: f64,
}

impl Surface {
    pub fn new(plane: Plane) -> Surface {
        Surface {
            plane,
            winding: Winding::default(),
            texture: String::from("common/caulk"),
            offset_s: 0.0,
            offset_t: 0.0,
            angle: 0.0,
            scale_s: 1.0,
            scale_t: 1.0,
            contents: 0,
            flags: 0,
            value: 0.0,
        }
    }
}

/// A convex solid bounded by the planes of its surfaces. Brushes carry 4 or more
/// surfaces when they describe a closed solid; the brush itself never enforces a
/// minimum count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Brush {
    pub surfaces: Vec<Surface>,
}

impl Brush {
    /// Builds a brush with default surface attributes from a set of bounding planes.
    pub fn from_planes(planes: impl IntoIterator<Item = Plane>) -> Brush {
        Brush {
            surfaces: planes.into_iter().map(Surface::new).collect(),
        }
    }

    /// The full plane set of this brush, in surface order.
    pub fn planes(&self) -> Vec<Plane> {
        self.surfaces.iter().map(|surface| surface.plane).collect()
    }

    /// Whether the brush has enough surfaces to bound a closed solid. Reduction is
    /// well-defined either way; callers flag open brushes as invalid input.
    pub fn is_closed(&self) -> bool {
        self.surfaces.len() >= 4
    }

    /// Recomputes the boundary loop of every surface from scratch and culls surfaces
    /// that clip away entirely.
    ///
    /// Each surface's loop is seeded from a fresh plane quad and clipped against the
    /// full, fixed plane set of the brush, so the result does not depend on surface
    /// order and repeated calls are safe after plane edits. A surface whose loop falls
    /// below 3 vertices is dominated by the other planes and removed from the brush.
    pub fn reduce(&mut self) {
        let planes = self.planes();

        for (index, surface) in self.surfaces.iter_mut().enumerate() {
            surface.winding = surface
                .plane
                .quad(PLANE_SIZE)
                .clip(&planes, Some(index), CLIP_EPSILON);
        }

        let before = self.surfaces.len();
        self.surfaces.retain(|surface| !surface.winding.is_degenerate());

        if self.surfaces.len() < before {
            debug!(
                culled = before - self.surfaces.len(),
                retained = self.surfaces.len(),
                "culled non-contributing brush surfaces"
            );
        }
    }
}
