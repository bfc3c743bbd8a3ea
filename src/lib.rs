//! # brushcut
//!
//! `brushcut` is a Rust library for turning id-Tech style `.map` brushes into renderable
//! geometry, designed to be used in Rust as well as compiled to WebAssembly (WASM). A brush
//! is a convex solid described only by its bounding planes; this crate computes the exact
//! boundary polygon of every face by clipping an oversized seed quad against the brush's
//! other planes.
//!
//! ## Features
//!
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript and TypeScript.
//! - **Plane geometry**: Planes from face points, with a deterministic (up, right, normal) frame.
//! - **Polygon clipping**: Sutherland-Hodgman clipping of a face against arbitrary plane sets,
//!   with early termination for fully occluded faces.
//! - **Map documents**: A `.map` parser and document model (entities, brushes, surfaces), with
//!   whole-map reduction parallelized across brushes.
//!
//! ## Main Interface
//!
//! The primary entry points are [`Map::parse`] for `.map` sources and [`Brush::reduce`] for
//! brushes built directly from planes. [`MeshData`] fan-triangulates the resulting boundary
//! loops into flat buffers for a render layer.

mod brush;
mod map;
mod math;
mod mesh;
mod plane;
pub mod wasm;
mod winding;

pub use brush::Brush;
pub use brush::Surface;
pub use map::Entity;
pub use map::Map;
pub use map::MapError;
pub use mesh::MeshData;
pub use plane::DegeneratePlane;
pub use plane::Plane;
pub use plane::CLIP_EPSILON;
pub use plane::PLANE_SIZE;
pub use winding::Winding;
