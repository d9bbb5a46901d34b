//! Prismatic: a 2D prism dispersion simulator
//!
//! Traces a fixed sampling of the visible spectrum from a light source through
//! convex glass prisms, refracting at every surface with a wavelength-dependent
//! index, and reports each wavelength's path as a polyline.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod prism;
pub mod ray;
pub mod scene;
pub mod segment;
pub mod spectrum;
pub mod tracer;
pub mod vector;

pub use prism::{vertices_of, Prism};
pub use scene::{LightSource, Scene};
pub use spectrum::BaseRay;
pub use tracer::{trace, Outcome, TracedRay, Tracer};
