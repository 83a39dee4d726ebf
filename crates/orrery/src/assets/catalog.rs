use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::OrbitViolation;
use crate::orbit::elements::{OrbitDescriptor, OrbitalElements, DEFAULT_RADIUS};

/// Static table of bodies, loaded once at startup.
/// Tree-shaped through `parent` names; order in the list does not matter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyCatalog {
    pub bodies: Vec<BodyDescriptor>,
}

/// Describes one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Unique display name, also the key in tick output.
    pub name: String,
    /// Name of the body this one orbits. `None` for roots.
    #[serde(default)]
    pub parent: Option<String>,
    /// Orbit around the parent (or around `position` for a root).
    /// Absent for stationary bodies such as the central star.
    #[serde(default)]
    pub orbit: Option<OrbitDescriptor>,
    /// Rendering radius; also paces spin. Falls back to `orbit.radius`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Falls back to `orbit.axial_tilt_degrees`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axial_tilt_degrees: Option<f64>,
    /// Explicit orbit resolution. Derived from the orbit size when absent.
    #[serde(default)]
    pub resolution: Option<usize>,
    /// Fixed samples per tick, decoupled from the global orbit speed.
    #[serde(default)]
    pub cursor_step: Option<u32>,
    /// Turn to face the parent every tick, then add this yaw (degrees).
    #[serde(default)]
    pub face_parent_yaw_degrees: Option<f64>,
    /// Fixed world position of a root body (default: origin).
    #[serde(default)]
    pub position: Option<DVec3>,
}

impl BodyDescriptor {
    /// A root body with no orbit.
    pub fn fixed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            orbit: None,
            radius: None,
            axial_tilt_degrees: None,
            resolution: None,
            cursor_step: None,
            face_parent_yaw_degrees: None,
            position: None,
        }
    }

    /// A body orbiting `parent`.
    pub fn orbiting(
        name: impl Into<String>,
        parent: impl Into<String>,
        orbit: impl Into<OrbitDescriptor>,
    ) -> Self {
        Self {
            parent: Some(parent.into()),
            orbit: Some(orbit.into()),
            ..Self::fixed(name)
        }
    }

    // -- Builder pattern --

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_axial_tilt(mut self, degrees: f64) -> Self {
        self.axial_tilt_degrees = Some(degrees);
        self
    }

    pub fn with_resolution(mut self, samples: usize) -> Self {
        self.resolution = Some(samples);
        self
    }

    pub fn with_cursor_step(mut self, step: u32) -> Self {
        self.cursor_step = Some(step);
        self
    }

    pub fn facing_parent(mut self, yaw_degrees: f64) -> Self {
        self.face_parent_yaw_degrees = Some(yaw_degrees);
        self
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = Some(position);
        self
    }

    /// Body-level radius, else the orbit's, else 1.
    pub fn radius(&self) -> f64 {
        self.radius
            .or_else(|| self.orbit.and_then(|o| o.radius))
            .unwrap_or(DEFAULT_RADIUS)
    }

    /// Body-level axial tilt, else the orbit's, else 0.
    pub fn axial_tilt_degrees(&self) -> f64 {
        self.axial_tilt_degrees
            .or_else(|| self.orbit.and_then(|o| o.axial_tilt_degrees))
            .unwrap_or(0.0)
    }

    /// True when body and orbit both set radius or tilt, to different values.
    pub fn has_conflicting_properties(&self) -> bool {
        let Some(orbit) = self.orbit else {
            return false;
        };
        let differs =
            |body: Option<f64>, orbit: Option<f64>| matches!((body, orbit), (Some(b), Some(o)) if b != o);
        differs(self.radius, orbit.radius)
            || differs(self.axial_tilt_degrees, orbit.axial_tilt_degrees)
    }

    /// Validated orbit with the resolved radius and axial tilt folded in.
    pub fn elements(&self) -> Result<Option<OrbitalElements>, OrbitViolation> {
        let Some(orbit) = self.orbit else {
            return Ok(None);
        };
        let elements = OrbitalElements::try_from(orbit)?
            .with_radius(self.radius())
            .with_axial_tilt(self.axial_tilt_degrees());
        Ok(Some(elements))
    }
}

impl BodyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: BodyDescriptor) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn push(&mut self, body: BodyDescriptor) {
        self.bodies.push(body);
    }

    pub fn get(&self, name: &str) -> Option<&BodyDescriptor> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
