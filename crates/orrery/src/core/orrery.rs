use std::collections::HashMap;
use std::sync::Arc;

use glam::DVec3;

use crate::api::config::OrreryConfig;
use crate::api::types::{BodyId, BodyPose, Frame};
use crate::assets::catalog::BodyCatalog;
use crate::control::state::ControlState;
use crate::core::body::BodyState;
use crate::core::stepper::HierarchicalStepper;
use crate::error::{OrreryError, Result};
use crate::orbit::path::OrbitPath;
use crate::orbit::sampler::orbit_resolution;

/// The orbital-geometry engine: every body's state plus the name → id table.
///
/// Built from a catalog in one shot; an invalid catalog produces an error
/// and no engine. After that, `advance_one_tick` cannot fail.
pub struct Orrery {
    bodies: Vec<BodyState>,
    by_name: HashMap<Arc<str>, BodyId>,
    stepper: HierarchicalStepper,
    config: OrreryConfig,
    tick: u64,
}

impl Orrery {
    /// Validate `catalog` and build runtime state for every body.
    pub fn from_catalog(catalog: &BodyCatalog, config: OrreryConfig) -> Result<Self> {
        let mut by_name: HashMap<Arc<str>, BodyId> = HashMap::with_capacity(catalog.len());
        let mut names: Vec<Arc<str>> = Vec::with_capacity(catalog.len());
        for (i, desc) in catalog.bodies.iter().enumerate() {
            let name: Arc<str> = Arc::from(desc.name.as_str());
            if by_name.insert(name.clone(), BodyId(i as u32)).is_some() {
                return Err(OrreryError::DuplicateBody(desc.name.clone()));
            }
            names.push(name);
        }

        let mut bodies = Vec::with_capacity(catalog.len());
        for (i, desc) in catalog.bodies.iter().enumerate() {
            let mut body = BodyState::new(BodyId(i as u32), names[i].clone())
                .with_radius(desc.radius())
                .with_axial_tilt(desc.axial_tilt_degrees().to_radians())
                .with_cursor_step(desc.cursor_step)
                .with_face_parent_yaw(desc.face_parent_yaw_degrees.map(f64::to_radians));

            if desc.has_conflicting_properties() {
                log::warn!("{}: radius/axial tilt set on both body and orbit, using the body's", desc.name);
            }

            let elements = desc
                .elements()
                .map_err(|reason| OrreryError::InvalidOrbit { body: desc.name.clone(), reason })?;
            if let Some(elements) = elements {
                let samples = match desc.resolution {
                    Some(explicit) if explicit > config.max_samples => {
                        return Err(OrreryError::InvalidResolution {
                            body: desc.name.clone(),
                            sample_count: explicit,
                        });
                    }
                    Some(explicit) => explicit,
                    None => orbit_resolution(
                        &elements,
                        config.orbit_speed_scale,
                        config.min_samples,
                        config.max_samples,
                    ),
                };
                let path = OrbitPath::new(&elements, samples)
                    .map_err(|err| OrreryError::for_body(&desc.name, err))?;
                body = body.with_orbit(elements, path);
            }

            match &desc.parent {
                Some(parent) => {
                    let parent_id = by_name.get(parent.as_str()).copied().ok_or_else(|| {
                        OrreryError::MissingParent { body: desc.name.clone(), parent: parent.clone() }
                    })?;
                    if desc.position.is_some() {
                        log::warn!("{}: position ignored, frame center follows '{}'", desc.name, parent);
                    }
                    body = body.with_parent(parent_id, 1);
                }
                None => body = body.with_anchor(desc.position.unwrap_or(DVec3::ZERO)),
            }
            bodies.push(body);
        }

        let stepper = HierarchicalStepper::new(&bodies, config.spin_scale)?;
        for &id in stepper.order() {
            if let Some(parent) = bodies[id.index()].parent {
                bodies[id.index()].depth = bodies[parent.index()].depth + 1;
            }
        }

        let samples: usize = bodies.iter().filter_map(|b| b.path()).map(|p| p.len()).sum();
        let roots = bodies.iter().filter(|b| b.is_root()).count();
        log::info!(
            "orrery: built {} bodies ({} roots, {} path samples)",
            bodies.len(),
            roots,
            samples
        );

        Ok(Self {
            bodies,
            by_name,
            stepper,
            config,
            tick: 0,
        })
    }

    /// Parse a JSON catalog and build from it.
    pub fn from_json(catalog_json: &str, config: OrreryConfig) -> Result<Self> {
        let catalog = BodyCatalog::from_json(catalog_json)?;
        Self::from_catalog(&catalog, config)
    }

    /// Advance every body by one tick and return the resulting poses.
    ///
    /// `control` is copied on entry; the caller may mutate its own copy freely
    /// between ticks.
    pub fn advance_one_tick(&mut self, control: &ControlState) -> Frame {
        let snapshot = *control;
        self.stepper.step(&mut self.bodies, &snapshot);
        self.tick += 1;
        self.frame(&snapshot)
    }

    /// Current poses without advancing.
    pub fn frame(&self, control: &ControlState) -> Frame {
        let poses = self
            .bodies
            .iter()
            .map(|b| (b.name.clone(), b.pose(control.show_orbit_paths, control.show_satellites)))
            .collect();
        Frame {
            tick: self.tick,
            poses,
            selected: control.selected_target.filter(|id| self.body(*id).is_some()),
        }
    }

    /// Poses in id order.
    pub fn poses<'a>(&'a self, control: &'a ControlState) -> impl Iterator<Item = BodyPose> + 'a {
        self.bodies
            .iter()
            .map(move |b| b.pose(control.show_orbit_paths, control.show_satellites))
    }

    /// World-space orbit line for `name`, centered where the last tick put it.
    /// Empty for bodies without an orbit.
    pub fn orbit_path(&self, name: &str) -> Result<Vec<DVec3>> {
        let body = self
            .body_by_name(name)
            .ok_or_else(|| OrreryError::UnknownBody(name.to_string()))?;
        Ok(body.path().map(|p| p.world_points().collect()).unwrap_or_default())
    }

    /// Move a root body's frame center. Returns false for non-root bodies,
    /// whose center is always their parent.
    pub fn set_root_position(&mut self, name: &str, position: DVec3) -> Result<bool> {
        let id = self.lookup(name).ok_or_else(|| OrreryError::UnknownBody(name.to_string()))?;
        let body = &mut self.bodies[id.index()];
        if !body.is_root() {
            log::warn!("{name}: not a root body, position not set");
            return Ok(false);
        }
        body.set_anchor(position);
        Ok(true)
    }

    pub fn lookup(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn body(&self, id: BodyId) -> Option<&BodyState> {
        self.bodies.get(id.index())
    }

    pub fn body_by_name(&self, name: &str) -> Option<&BodyState> {
        self.lookup(name).and_then(|id| self.body(id))
    }

    pub fn bodies(&self) -> &[BodyState] {
        &self.bodies
    }

    /// Root-to-leaf visiting order.
    pub fn order(&self) -> &[BodyId] {
        self.stepper.order()
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::BodyDescriptor;
    use crate::core::body::Phase;
    use crate::error::OrbitViolation;
    use crate::orbit::elements::OrbitDescriptor;

    fn close(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    fn sun_earth_moon() -> BodyCatalog {
        BodyCatalog::new()
            .with_body(BodyDescriptor::fixed("Sun").with_radius(20.0))
            .with_body(
                BodyDescriptor::orbiting("Earth", "Sun", OrbitDescriptor::new(149.598, 0.0167))
                    .with_resolution(1000)
                    .with_axial_tilt(23.44),
            )
            .with_body(
                BodyDescriptor::orbiting("Moon", "Earth", OrbitDescriptor::new(2.3, 0.0549))
                    .with_resolution(64)
                    .with_cursor_step(1)
                    .facing_parent(90.0),
            )
    }

    fn build(catalog: &BodyCatalog) -> Orrery {
        Orrery::from_catalog(catalog, OrreryConfig::default()).unwrap()
    }

    #[test]
    fn builds_hierarchy_with_depths() {
        let orrery = build(&sun_earth_moon());
        assert_eq!(orrery.len(), 3);
        let moon = orrery.body_by_name("Moon").unwrap();
        assert_eq!(moon.depth, 2);
        assert!(moon.is_satellite());
        assert_eq!(moon.parent, orrery.lookup("Earth"));
        assert_eq!(orrery.body_by_name("Earth").unwrap().path().unwrap().len(), 1000);
        assert_eq!(moon.phase(), Phase::Idle);
    }

    #[test]
    fn first_tick_reads_starting_sample() {
        let mut orrery = build(&sun_earth_moon());
        let frame = orrery.advance_one_tick(&ControlState::new());
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.len(), 3);
        assert!(close(frame.position("Sun").unwrap(), DVec3::ZERO));
        assert!(close(frame.position("Earth").unwrap(), DVec3::new(149.598, 0.0, 0.0)));
        assert!(close(frame.position("Moon").unwrap(), DVec3::new(151.898, 0.0, 0.0)));
    }

    #[test]
    fn open_orbit_fails_construction() {
        let catalog = BodyCatalog::new()
            .with_body(BodyDescriptor::fixed("Sun"))
            .with_body(BodyDescriptor::orbiting("Comet", "Sun", OrbitDescriptor::new(50.0, 1.2)));
        match Orrery::from_catalog(&catalog, OrreryConfig::default()) {
            Err(OrreryError::InvalidOrbit { body, reason }) => {
                assert_eq!(body, "Comet");
                assert_eq!(reason, OrbitViolation::Eccentricity(1.2));
            }
            Err(other) => panic!("Expected InvalidOrbit, got {other}"),
            Ok(_) => panic!("Expected InvalidOrbit, got an engine"),
        }
    }

    #[test]
    fn dangling_parent_fails_construction() {
        let catalog = BodyCatalog::new()
            .with_body(BodyDescriptor::orbiting("Io", "Jupiter", OrbitDescriptor::new(3.0, 0.004)));
        let err = Orrery::from_catalog(&catalog, OrreryConfig::default()).err().unwrap();
        assert!(matches!(err, OrreryError::MissingParent { ref body, ref parent } if body == "Io" && parent == "Jupiter"));
        assert_eq!(err.body(), Some("Io"));
    }

    #[test]
    fn duplicate_and_zero_resolution_fail() {
        let dup = BodyCatalog::new()
            .with_body(BodyDescriptor::fixed("Sun"))
            .with_body(BodyDescriptor::fixed("Sun"));
        assert!(matches!(
            Orrery::from_catalog(&dup, OrreryConfig::default()),
            Err(OrreryError::DuplicateBody(_))
        ));

        let zero = BodyCatalog::new()
            .with_body(BodyDescriptor::fixed("Sun"))
            .with_body(BodyDescriptor::orbiting("Mars", "Sun", OrbitDescriptor::new(227.9, 0.09)).with_resolution(0));
        assert!(matches!(
            Orrery::from_catalog(&zero, OrreryConfig::default()),
            Err(OrreryError::InvalidResolution { sample_count: 0, .. })
        ));
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let catalog = BodyCatalog::new()
            .with_body(BodyDescriptor::orbiting("Ouroboros", "Ouroboros", OrbitDescriptor::new(1.0, 0.0)));
        assert!(matches!(
            Orrery::from_catalog(&catalog, OrreryConfig::default()),
            Err(OrreryError::CyclicHierarchy(_))
        ));
    }

    #[test]
    fn zero_speed_freezes_everything() {
        let mut orrery = build(&sun_earth_moon());
        let control = ControlState::new().with_orbit_speed(0.0);
        let first = orrery.advance_one_tick(&control);
        for _ in 0..20 {
            let frame = orrery.advance_one_tick(&control);
            for (name, pose) in &frame.poses {
                assert_eq!(pose.position, first.poses[name].position, "{name} moved");
            }
        }
        assert!(orrery.bodies().iter().all(|b| b.cursor() == 0));
    }

    #[test]
    fn cursor_returns_after_full_revolution() {
        let mut orrery = build(&sun_earth_moon());
        let control = ControlState::new().with_orbit_speed(4.0);
        let earth = orrery.lookup("Earth").unwrap();

        let start = orrery.advance_one_tick(&control).position("Earth").unwrap();
        let mut previous = orrery.body(earth).unwrap().cursor();
        // 1000 samples / 4 per tick: back at the start 250 ticks after the first.
        for _ in 0..249 {
            orrery.advance_one_tick(&control);
            let cursor = orrery.body(earth).unwrap().cursor();
            assert_eq!(cursor, (previous + 4) % 1000);
            previous = cursor;
        }
        let again = orrery.advance_one_tick(&control).position("Earth").unwrap();
        assert!(close(start, again), "{start:?} vs {again:?}");
    }

    #[test]
    fn moving_parent_translates_child_path() {
        let catalog = BodyCatalog::new()
            .with_body(BodyDescriptor::fixed("Planet").with_position(DVec3::new(10.0, 0.0, 5.0)))
            .with_body(
                BodyDescriptor::orbiting("Moon", "Planet", OrbitDescriptor::new(2.3, 0.0).with_inclination(4.0))
                    .with_resolution(120),
            );
        let mut orrery = build(&catalog);
        let control = ControlState::new().with_orbit_speed(0.0);

        orrery.advance_one_tick(&control);
        let before = orrery.orbit_path("Moon").unwrap();

        assert!(orrery.set_root_position("Planet", DVec3::new(20.0, 0.0, 5.0)).unwrap());
        orrery.advance_one_tick(&control);
        let after = orrery.orbit_path("Moon").unwrap();

        let shift = DVec3::new(10.0, 0.0, 0.0);
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            assert!(close(*a, *b + shift));
        }
        let centroid = |pts: &[DVec3]| pts.iter().copied().sum::<DVec3>() / pts.len() as f64;
        assert!(close(centroid(&after) - centroid(&before), shift));
    }

    #[test]
    fn non_root_position_cannot_be_set() {
        let mut orrery = build(&sun_earth_moon());
        assert!(!orrery.set_root_position("Earth", DVec3::ONE).unwrap());
        assert!(orrery.set_root_position("Pluto", DVec3::ONE).is_err());
    }

    #[test]
    fn visibility_flags_do_not_stop_motion() {
        let mut orrery = build(&sun_earth_moon());
        let mut control = ControlState::new();
        control.show_orbit_paths = false;
        control.show_satellites = false;

        let first = orrery.advance_one_tick(&control);
        let second = orrery.advance_one_tick(&control);

        let moon = second.get("Moon").unwrap();
        assert!(!moon.visible && !moon.path_visible);
        let earth = second.get("Earth").unwrap();
        assert!(earth.visible && !earth.path_visible);
        assert_ne!(first.position("Earth"), second.position("Earth"));
        assert_ne!(first.position("Moon"), second.position("Moon"));
    }

    #[test]
    fn supports_deeper_hierarchies() {
        let catalog = sun_earth_moon()
            .with_body(BodyDescriptor::orbiting("Probe", "Moon", OrbitDescriptor::new(0.5, 0.0)).with_resolution(16));
        let mut orrery = build(&catalog);
        assert_eq!(orrery.body_by_name("Probe").unwrap().depth, 3);

        let frame = orrery.advance_one_tick(&ControlState::new());
        let moon = frame.position("Moon").unwrap();
        assert!(close(frame.position("Probe").unwrap(), moon + DVec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn selection_passes_through() {
        let mut orrery = build(&sun_earth_moon());
        let mut control = ControlState::new();
        control.selected_target = orrery.lookup("Earth");
        let frame = orrery.advance_one_tick(&control);
        assert_eq!(frame.selected_pose().map(|p| p.position), frame.position("Earth"));

        control.selected_target = Some(BodyId(99));
        assert_eq!(orrery.advance_one_tick(&control).selected, None);
    }

    #[test]
    fn moon_faces_its_planet() {
        let mut orrery = build(&sun_earth_moon());
        let frame = orrery.advance_one_tick(&ControlState::new());
        let moon = frame.get("Moon").unwrap();
        let earth = frame.position("Earth").unwrap();
        // Facing yaw plus the 90° offset turns forward perpendicular to the planet direction.
        let forward = moon.orientation * DVec3::Z;
        let to_earth = (earth - moon.position).normalize();
        assert!(forward.dot(to_earth).abs() < 1e-9, "forward {forward:?}");
    }

    #[test]
    fn derived_resolution_uses_config() {
        let catalog = BodyCatalog::new()
            .with_body(BodyDescriptor::fixed("Sun"))
            .with_body(BodyDescriptor::orbiting("Jupiter", "Sun", OrbitDescriptor::new(778.5, 0.049)));
        let config = OrreryConfig { orbit_speed_scale: 2.0, ..OrreryConfig::default() };
        let orrery = Orrery::from_catalog(&catalog, config).unwrap();
        assert_eq!(orrery.body_by_name("Jupiter").unwrap().path().unwrap().len(), 1557);
    }

    #[test]
    fn builds_from_json() {
        let json = r#"{ "bodies": [
            { "name": "Jupiter", "radius": 69.9 },
            { "name": "Io", "parent": "Jupiter",
              "orbit": { "semi_major_axis": 3.0, "eccentricity": 0.004 }, "resolution": 32 }
        ] }"#;
        let orrery = Orrery::from_json(json, OrreryConfig::default()).unwrap();
        assert_eq!(orrery.order(), &[BodyId(0), BodyId(1)]);
        assert!(matches!(Orrery::from_json("not json", OrreryConfig::default()), Err(OrreryError::Parse(_))));
    }

    #[test]
    fn huge_orbit_resolution_is_capped() {
        let catalog = BodyCatalog::new()
            .with_body(BodyDescriptor::fixed("Sun"))
            .with_body(BodyDescriptor::orbiting("Far", "Sun", OrbitDescriptor::new(1e18, 0.1)));
        let config = OrreryConfig { max_samples: 4096, ..OrreryConfig::default() };
        let orrery = Orrery::from_catalog(&catalog, config).unwrap();
        assert_eq!(orrery.body_by_name("Far").unwrap().path().unwrap().len(), 4096);
    }

    #[test]
    fn explicit_resolution_above_cap_fails() {
        let catalog = BodyCatalog::new()
            .with_body(BodyDescriptor::fixed("Sun"))
            .with_body(
                BodyDescriptor::orbiting("Neptune", "Sun", OrbitDescriptor::new(4515.0, 0.0113))
                    .with_resolution(usize::MAX),
            );
        match Orrery::from_catalog(&catalog, OrreryConfig::default()) {
            Err(OrreryError::InvalidResolution { body, sample_count }) => {
                assert_eq!(body, "Neptune");
                assert_eq!(sample_count, usize::MAX);
            }
            Err(other) => panic!("Expected InvalidResolution, got {other}"),
            Ok(_) => panic!("Expected InvalidResolution, got an engine"),
        }
    }

    #[test]
    fn orbit_level_radius_and_tilt_reach_the_body() {
        let json = r#"{ "bodies": [
            { "name": "Sun" },
            { "name": "Earth", "parent": "Sun", "resolution": 64,
              "orbit": { "semi_major_axis": 149.6, "eccentricity": 0.0167,
                         "radius": 7.5, "axial_tilt_degrees": 23.4 } }
        ] }"#;
        let orrery = Orrery::from_json(json, OrreryConfig::default()).unwrap();
        let earth = orrery.body_by_name("Earth").unwrap();
        assert_eq!(earth.radius, 7.5);
        assert!((earth.axial_tilt - 23.4_f64.to_radians()).abs() < 1e-12);
        assert_eq!(earth.elements().unwrap().radius(), 7.5);
    }
}
