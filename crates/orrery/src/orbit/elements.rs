/// Per-body orbital elements — immutable once the orrery is built.
///
/// Units are whatever the catalog uses for distance (the built-in solar
/// system uses millions of km). Angles are stored in degrees, as catalogs
/// are written, and converted at the point of use.

use serde::{Deserialize, Serialize};

use crate::error::OrbitViolation;

/// Validated elements: `a > 0`, `0 <= e < 1`, finite inclination.
///
/// The only ways in are the constructors and `TryFrom<OrbitDescriptor>`,
/// so every value of this type describes a closed ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrbitDescriptor", into = "OrbitDescriptor")]
pub struct OrbitalElements {
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_degrees: f64,
    axial_tilt_degrees: f64,
    radius: f64,
}

/// Orbit as written in a catalog. Unchecked until converted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitDescriptor {
    /// Half the long diameter of the orbit ellipse.
    pub semi_major_axis: f64,
    /// 0 = circle, must stay below 1.
    pub eccentricity: f64,
    /// Tilt of the orbital plane relative to the parent's plane.
    #[serde(default)]
    pub inclination_degrees: f64,
    /// Tilt of the body's own spin axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axial_tilt_degrees: Option<f64>,
    /// Rendering scale; also feeds spin pacing. Not orbit-relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

pub(crate) const DEFAULT_RADIUS: f64 = 1.0;

fn check(a: f64, e: f64, inclination_degrees: f64) -> Result<(), OrbitViolation> {
    if !(a.is_finite() && a > 0.0) {
        return Err(OrbitViolation::SemiMajorAxis(a));
    }
    if !(e.is_finite() && (0.0..1.0).contains(&e)) {
        return Err(OrbitViolation::Eccentricity(e));
    }
    if !inclination_degrees.is_finite() {
        return Err(OrbitViolation::Inclination(inclination_degrees));
    }
    Ok(())
}

impl OrbitalElements {
    /// Orbit in the parent's plane.
    pub fn new(semi_major_axis: f64, eccentricity: f64) -> Result<Self, OrbitViolation> {
        Self::inclined(semi_major_axis, eccentricity, 0.0)
    }

    /// Orbit tilted by `inclination_degrees` about its major axis.
    pub fn inclined(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_degrees: f64,
    ) -> Result<Self, OrbitViolation> {
        check(semi_major_axis, eccentricity, inclination_degrees)?;
        Ok(Self {
            semi_major_axis,
            eccentricity,
            inclination_degrees,
            axial_tilt_degrees: 0.0,
            radius: DEFAULT_RADIUS,
        })
    }

    pub fn with_axial_tilt(mut self, degrees: f64) -> Self {
        self.axial_tilt_degrees = degrees;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination_degrees(&self) -> f64 {
        self.inclination_degrees
    }

    pub fn axial_tilt_degrees(&self) -> f64 {
        self.axial_tilt_degrees
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Semi-minor axis `b = a·√(1−e²)`.
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Distance from the ellipse center to either focus, `c = a·e`.
    pub fn focal_distance(&self) -> f64 {
        self.semi_major_axis * self.eccentricity
    }

    pub fn inclination_radians(&self) -> f64 {
        self.inclination_degrees.to_radians()
    }

    pub fn axial_tilt_radians(&self) -> f64 {
        self.axial_tilt_degrees.to_radians()
    }
}

impl OrbitDescriptor {
    pub fn new(semi_major_axis: f64, eccentricity: f64) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination_degrees: 0.0,
            axial_tilt_degrees: None,
            radius: None,
        }
    }

    pub fn with_inclination(mut self, degrees: f64) -> Self {
        self.inclination_degrees = degrees;
        self
    }
}

impl TryFrom<OrbitDescriptor> for OrbitalElements {
    type Error = OrbitViolation;

    fn try_from(orbit: OrbitDescriptor) -> Result<Self, Self::Error> {
        let elements = Self::inclined(orbit.semi_major_axis, orbit.eccentricity, orbit.inclination_degrees)?
            .with_axial_tilt(orbit.axial_tilt_degrees.unwrap_or(0.0))
            .with_radius(orbit.radius.unwrap_or(DEFAULT_RADIUS));
        Ok(elements)
    }
}

impl From<OrbitalElements> for OrbitDescriptor {
    fn from(elements: OrbitalElements) -> Self {
        Self {
            semi_major_axis: elements.semi_major_axis,
            eccentricity: elements.eccentricity,
            inclination_degrees: elements.inclination_degrees,
            axial_tilt_degrees: Some(elements.axial_tilt_degrees),
            radius: Some(elements.radius),
        }
    }
}
