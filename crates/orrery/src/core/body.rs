use std::sync::Arc;

use glam::{DQuat, DVec3};

use crate::api::types::{BodyId, BodyPose};
use crate::orbit::elements::OrbitalElements;
use crate::orbit::path::OrbitPath;

/// Lifecycle of a body in the stepper. There is no pause state: once the
/// first tick runs every body stays `Advancing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Advancing,
}

/// Mutable runtime state for one body.
#[derive(Debug, Clone)]
pub struct BodyState {
    pub id: BodyId,
    pub name: Arc<str>,
    /// Parent in the hierarchy; the parent always outlives the child.
    pub parent: Option<BodyId>,
    /// 0 for roots, 1 for bodies orbiting a root, 2 for moons, ...
    pub depth: usize,
    pub radius: f64,
    /// Radians.
    pub axial_tilt: f64,
    elements: Option<OrbitalElements>,
    path: Option<OrbitPath>,
    cursor: usize,
    /// Fixed per-tick advance, overriding the global speed.
    cursor_step: Option<u32>,
    /// Yaw offset (radians) added after turning to face the parent.
    face_parent_yaw: Option<f64>,
    /// Fixed frame center for roots; unused once a parent drives the center.
    anchor: DVec3,
    spin_angle: f64,
    world_position: DVec3,
    orientation: DQuat,
    phase: Phase,
}

impl BodyState {
    /// Stationary body sitting on its frame center.
    pub fn new(id: BodyId, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            depth: 0,
            radius: 1.0,
            axial_tilt: 0.0,
            elements: None,
            path: None,
            cursor: 0,
            cursor_step: None,
            face_parent_yaw: None,
            anchor: DVec3::ZERO,
            spin_angle: 0.0,
            world_position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            phase: Phase::Idle,
        }
    }

    // -- Builder pattern --

    pub fn with_parent(mut self, parent: BodyId, depth: usize) -> Self {
        self.parent = Some(parent);
        self.depth = depth;
        self
    }

    /// Attach an orbit. Radius and tilt come from the elements.
    pub fn with_orbit(mut self, elements: OrbitalElements, path: OrbitPath) -> Self {
        self.radius = elements.radius();
        self.axial_tilt = elements.axial_tilt_radians();
        self.elements = Some(elements);
        self.path = Some(path);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_axial_tilt(mut self, radians: f64) -> Self {
        self.axial_tilt = radians;
        self
    }

    pub fn with_cursor_step(mut self, step: Option<u32>) -> Self {
        self.cursor_step = step;
        self
    }

    pub fn with_face_parent_yaw(mut self, yaw: Option<f64>) -> Self {
        self.face_parent_yaw = yaw;
        self
    }

    pub fn with_anchor(mut self, anchor: DVec3) -> Self {
        self.anchor = anchor;
        self.world_position = anchor;
        if let Some(path) = &mut self.path {
            path.recenter(anchor);
        }
        self
    }

    // -- Queries --

    pub fn elements(&self) -> Option<&OrbitalElements> {
        self.elements.as_ref()
    }

    pub fn path(&self) -> Option<&OrbitPath> {
        self.path.as_ref()
    }

    /// Always a valid index into the current path (0 for pathless bodies).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_step_override(&self) -> Option<u32> {
        self.cursor_step
    }

    pub fn faces_parent(&self) -> bool {
        self.face_parent_yaw.is_some()
    }

    pub fn anchor(&self) -> DVec3 {
        self.anchor
    }

    pub fn spin_angle(&self) -> f64 {
        self.spin_angle
    }

    pub fn world_position(&self) -> DVec3 {
        self.world_position
    }

    pub fn orientation(&self) -> DQuat {
        self.orientation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Moons and deeper: anything whose parent itself orbits something.
    pub fn is_satellite(&self) -> bool {
        self.depth >= 2
    }

    pub fn pose(&self, show_orbit_paths: bool, show_satellites: bool) -> BodyPose {
        let visible = show_satellites || !self.is_satellite();
        BodyPose {
            id: self.id,
            position: self.world_position,
            orientation: self.orientation,
            visible,
            path_visible: visible && show_orbit_paths && self.path.is_some(),
        }
    }

    // -- Stepper hooks --

    pub(crate) fn set_anchor(&mut self, anchor: DVec3) {
        self.anchor = anchor;
    }

    /// Re-center on `center` and read the sample under the cursor.
    pub(crate) fn resolve(&mut self, center: DVec3) {
        self.phase = Phase::Advancing;
        self.world_position = match &mut self.path {
            Some(path) => {
                path.recenter(center);
                path.world(self.cursor)
            }
            None => center,
        };
    }

    /// Move the cursor `step` samples along the path, wrapping at N.
    pub(crate) fn advance(&mut self, step: usize) {
        if let Some(path) = &self.path {
            let n = path.len();
            self.cursor = (self.cursor + step % n) % n;
        }
    }

    /// Spin about the tilted local up axis.
    pub(crate) fn spin(&mut self, increment: f64) {
        self.spin_angle = (self.spin_angle + increment) % std::f64::consts::TAU;
        self.orientation =
            DQuat::from_rotation_z(self.axial_tilt) * DQuat::from_rotation_y(self.spin_angle);
    }

    /// Yaw towards `target`, then add the configured offset. No-op unless
    /// the body was configured to face its parent.
    pub(crate) fn face(&mut self, target: DVec3) {
        let Some(offset) = self.face_parent_yaw else {
            return;
        };
        let to_target = target - self.world_position;
        let yaw = if to_target.x == 0.0 && to_target.z == 0.0 {
            0.0
        } else {
            to_target.x.atan2(to_target.z)
        };
        self.orientation = DQuat::from_rotation_y(yaw + offset);
    }
}
