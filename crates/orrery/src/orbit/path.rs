use glam::DVec3;

use crate::error::SampleError;
use crate::orbit::elements::OrbitalElements;
use crate::orbit::sampler;

/// Sampled orbit, stored relative to its frame center.
///
/// Re-centering on a moving parent only swaps `center`; the samples are
/// generated once and never reallocated.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    relative: Vec<DVec3>,
    center: DVec3,
}

impl OrbitPath {
    /// Sample `sample_count` points for `elements` around the origin.
    pub fn new(elements: &OrbitalElements, sample_count: usize) -> Result<Self, SampleError> {
        Ok(Self {
            relative: sampler::sample_relative(elements, sample_count)?,
            center: DVec3::ZERO,
        })
    }

    /// Number of samples (the orbit resolution N). Never zero.
    pub fn len(&self) -> usize {
        self.relative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relative.is_empty()
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Move the frame center. Returns true if it actually moved.
    pub fn recenter(&mut self, center: DVec3) -> bool {
        let moved = self.center != center;
        self.center = center;
        moved
    }

    /// Sample `index` relative to the center. `index` wraps modulo N.
    pub fn relative(&self, index: usize) -> DVec3 {
        self.relative[index % self.relative.len()]
    }

    /// Sample `index` in world space. `index` wraps modulo N.
    pub fn world(&self, index: usize) -> DVec3 {
        self.center + self.relative(index)
    }

    pub fn relative_points(&self) -> &[DVec3] {
        &self.relative
    }

    /// Iterate world-space samples in path order.
    pub fn world_points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.relative.iter().map(move |&p| self.center + p)
    }

    /// Mean of the world-space samples.
    pub fn centroid(&self) -> DVec3 {
        let sum: DVec3 = self.world_points().sum();
        sum / self.relative.len() as f64
    }
}
