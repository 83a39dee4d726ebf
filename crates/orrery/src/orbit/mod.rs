// orbit/mod.rs
//
// Orbit geometry: elements, the elliptical sampler, and sampled paths.
// Pure data and math — nothing here knows about the body hierarchy.

pub mod elements;
pub mod path;
pub mod sampler;

pub use elements::{OrbitDescriptor, OrbitalElements};
pub use path::OrbitPath;
pub use sampler::{orbit_resolution, sample_at, sample_ellipse, sample_relative};
