use std::ops::RangeInclusive;

use crate::api::types::BodyId;

/// Recommended range for the orbit speed slider.
pub const ORBIT_SPEED_RANGE: RangeInclusive<f64> = 0.0..=50.0;
/// Recommended range for the spin speed slider.
pub const SPIN_SPEED_RANGE: RangeInclusive<f64> = 0.0..=0.00003;

/// Knobs owned by the configuration UI and read by the engine every tick.
///
/// `Copy`, so the engine snapshots it at tick start; mutations made during a
/// tick land on the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    orbit_speed_multiplier: f64,
    spin_speed_multiplier: f64,
    pub show_orbit_paths: bool,
    pub show_satellites: bool,
    pub selected_target: Option<BodyId>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            orbit_speed_multiplier: 1.0,
            spin_speed_multiplier: 0.0,
            show_orbit_paths: true,
            show_satellites: true,
            selected_target: None,
        }
    }
}

/// A change requested by the configuration UI.
/// Delivered as data rather than through callbacks into the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMessage {
    SetOrbitSpeed(f64),
    SetSpinSpeed(f64),
    ShowOrbitPaths(bool),
    ShowSatellites(bool),
    /// Selection changed; `None` clears it.
    Select(Option<BodyId>),
}

/// Negative and NaN inputs become 0; the engine never runs orbits backwards.
fn sanitize(value: f64, what: &str) -> f64 {
    if value.is_nan() || value < 0.0 {
        log::warn!("{what} {value} clamped to 0");
        0.0
    } else {
        value
    }
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orbit_speed(mut self, multiplier: f64) -> Self {
        self.set_orbit_speed(multiplier);
        self
    }

    pub fn with_spin_speed(mut self, multiplier: f64) -> Self {
        self.set_spin_speed(multiplier);
        self
    }

    pub fn orbit_speed_multiplier(&self) -> f64 {
        self.orbit_speed_multiplier
    }

    pub fn spin_speed_multiplier(&self) -> f64 {
        self.spin_speed_multiplier
    }

    pub fn set_orbit_speed(&mut self, multiplier: f64) {
        let multiplier = sanitize(multiplier, "orbit speed");
        if !ORBIT_SPEED_RANGE.contains(&multiplier) {
            log::debug!("orbit speed {multiplier} above recommended range");
        }
        self.orbit_speed_multiplier = multiplier;
    }

    pub fn set_spin_speed(&mut self, multiplier: f64) {
        let multiplier = sanitize(multiplier, "spin speed");
        if !SPIN_SPEED_RANGE.contains(&multiplier) {
            log::debug!("spin speed {multiplier} above recommended range");
        }
        self.spin_speed_multiplier = multiplier;
    }

    /// Cursor samples advanced per tick for bodies following the global speed.
    /// Saturates for absurd multipliers.
    pub fn cursor_step(&self) -> usize {
        self.orbit_speed_multiplier.round() as usize
    }

    pub fn apply(&mut self, message: ControlMessage) {
        log::debug!("control: {message:?}");
        match message {
            ControlMessage::SetOrbitSpeed(v) => self.set_orbit_speed(v),
            ControlMessage::SetSpinSpeed(v) => self.set_spin_speed(v),
            ControlMessage::ShowOrbitPaths(show) => self.show_orbit_paths = show,
            ControlMessage::ShowSatellites(show) => self.show_satellites = show,
            ControlMessage::Select(target) => self.selected_target = target,
        }
    }
}
