/// Elliptical path sampling — pure math, no engine state.
///
/// Sampling is uniform in the parametric (eccentric) angle θ, not in true
/// anomaly: bodies move at constant angular pace along the drawn ellipse.
/// θ runs from +X toward +Z, the same sense for every body.

use std::f64::consts::TAU;

use glam::{DQuat, DVec3};

use crate::error::SampleError;
use crate::orbit::elements::OrbitalElements;

/// Point on the ellipse at parametric angle `theta`, relative to its center.
///
/// The ellipse lies in the XZ plane with its major axis on X; inclination
/// tilts it about that axis. Periodic in `theta` with period 2π.
pub fn sample_at(elements: &OrbitalElements, theta: f64) -> DVec3 {
    let a = elements.semi_major_axis();
    let b = elements.semi_minor_axis();
    let flat = DVec3::new(a * theta.cos(), 0.0, b * theta.sin());
    incline(flat, elements.inclination_radians())
}

fn incline(offset: DVec3, inclination: f64) -> DVec3 {
    if inclination == 0.0 {
        offset
    } else {
        DQuat::from_rotation_x(inclination) * offset
    }
}

/// `sample_count` points around the ellipse, relative to its center.
pub fn sample_relative(
    elements: &OrbitalElements,
    sample_count: usize,
) -> Result<Vec<DVec3>, SampleError> {
    if sample_count == 0 {
        return Err(SampleError::InvalidResolution(sample_count));
    }

    let step = TAU / sample_count as f64;
    let points = (0..sample_count)
        .map(|i| sample_at(elements, i as f64 * step))
        .collect();
    Ok(points)
}

/// `sample_count` points tracing one revolution, centered at
/// `(center_x, 0, center_z)`. Index 0 sits at θ = 0; the last sample is one
/// step short of closing the loop.
pub fn sample_ellipse(
    elements: &OrbitalElements,
    center_x: f64,
    center_z: f64,
    sample_count: usize,
) -> Result<Vec<DVec3>, SampleError> {
    let center = DVec3::new(center_x, 0.0, center_z);
    let mut points = sample_relative(elements, sample_count)?;
    for p in &mut points {
        *p += center;
    }
    Ok(points)
}

/// Orbit resolution derived from size: `ceil(a × speed_scale)`, clamped to
/// `min_samples..=max_samples`. Larger orbits get proportionally more samples
/// so one cursor step covers a similar arc length everywhere.
pub fn orbit_resolution(
    elements: &OrbitalElements,
    speed_scale: f64,
    min_samples: usize,
    max_samples: usize,
) -> usize {
    let derived = (elements.semi_major_axis() * speed_scale).ceil();
    let samples = if derived > min_samples as f64 {
        derived.min(max_samples as f64) as usize
    } else {
        min_samples.max(1)
    };
    samples.min(max_samples)
}
