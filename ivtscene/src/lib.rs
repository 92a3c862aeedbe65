//! # ivtscene
//!
//! Projection geometry for IVTours.
//!
//! The playback core decides *what* plays; this crate decides *onto what*
//! it is projected. Flat entries land on a cylinder-section screen floating
//! in front of the viewer, panoramic entries on an inside-facing sphere
//! around the viewer. The actual mesh building belongs to whichever 3D
//! engine hosts the viewer; this crate computes the engine-agnostic
//! parameters and tracks which surface is active.

mod geometry;
mod presenter;

pub use geometry::{CurvedScreen, PanoSphere, ScreenGeometry};
pub use presenter::{ActiveSurface, GeometryPresenter};
