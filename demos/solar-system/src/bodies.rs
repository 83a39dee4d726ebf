//! Built-in Sun → planets → moons catalog.
//!
//! Planet distances are semi-major axes in 10⁶ km. Radii are display scale,
//! and moon distances are exaggerated so they clear their planet's sphere.

use orrery::{BodyCatalog, BodyDescriptor, OrbitDescriptor};

/// Yaw added after a moon turns to face its parent.
pub const MOON_FACING_YAW_DEGREES: f64 = 90.0;

/// Samples a moon advances per tick, independent of the orbit speed slider.
pub const MOON_CURSOR_STEP: u32 = 1;

pub const SUN_RADIUS: f64 = 8.0;

/// name, a, e, inclination°, axial tilt°, radius
type Row = (&'static str, f64, f64, f64, f64, f64);

const PLANETS: [Row; 8] = [
    ("Mercury", 57.9, 0.2056, 7.00, 0.03, 0.25),
    ("Venus", 108.2, 0.0068, 3.39, 177.4, 0.55),
    ("Earth", 149.6, 0.0167, 0.00, 23.44, 0.6),
    ("Mars", 227.9, 0.0934, 1.85, 25.19, 0.4),
    ("Jupiter", 778.5, 0.0489, 1.30, 3.13, 2.0),
    ("Saturn", 1432.0, 0.0565, 2.49, 26.73, 1.7),
    ("Uranus", 2867.0, 0.0457, 0.77, 97.77, 1.1),
    ("Neptune", 4515.0, 0.0113, 1.77, 28.32, 1.05),
];

/// parent, name, a, e, inclination°, radius
type MoonRow = (&'static str, &'static str, f64, f64, f64, f64);

const MOONS: [MoonRow; 8] = [
    ("Earth", "Moon", 2.3, 0.0549, 5.145, 0.16),
    ("Mars", "Phobos", 1.2, 0.0151, 1.08, 0.05),
    ("Mars", "Deimos", 1.8, 0.0003, 1.79, 0.04),
    ("Jupiter", "Io", 3.0, 0.0041, 0.05, 0.18),
    ("Jupiter", "Europa", 3.8, 0.0090, 0.47, 0.16),
    ("Jupiter", "Ganymede", 4.8, 0.0013, 0.20, 0.26),
    ("Jupiter", "Callisto", 6.0, 0.0074, 0.20, 0.24),
    ("Saturn", "Titan", 4.5, 0.0288, 0.35, 0.25),
];

pub fn solar_system() -> BodyCatalog {
    let mut catalog = BodyCatalog::new().with_body(BodyDescriptor::fixed("Sun").with_radius(SUN_RADIUS));

    for (name, a, e, inclination, tilt, radius) in PLANETS {
        let orbit = OrbitDescriptor::new(a, e).with_inclination(inclination);
        catalog.push(
            BodyDescriptor::orbiting(name, "Sun", orbit)
                .with_radius(radius)
                .with_axial_tilt(tilt),
        );
    }

    for (parent, name, a, e, inclination, radius) in MOONS {
        let orbit = OrbitDescriptor::new(a, e).with_inclination(inclination);
        catalog.push(
            BodyDescriptor::orbiting(name, parent, orbit)
                .with_radius(radius)
                .with_cursor_step(MOON_CURSOR_STEP)
                .facing_parent(MOON_FACING_YAW_DEGREES),
        );
    }

    catalog
}
