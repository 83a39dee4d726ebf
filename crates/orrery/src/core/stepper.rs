use crate::api::types::BodyId;
use crate::control::state::ControlState;
use crate::core::body::BodyState;
use crate::error::{OrreryError, Result};

/// Advances the whole hierarchy one tick, parents strictly before children.
///
/// The visiting order is computed once at construction; the hierarchy is
/// fixed for the life of the orrery.
#[derive(Debug, Clone)]
pub struct HierarchicalStepper {
    order: Vec<BodyId>,
    spin_scale: f64,
}

impl HierarchicalStepper {
    /// Build the root-to-leaf visiting order. `bodies[i]` must carry id `i`.
    /// Fails if a parent id is out of range or any parent chain loops.
    pub fn new(bodies: &[BodyState], spin_scale: f64) -> Result<Self> {
        let mut children: Vec<Vec<BodyId>> = vec![Vec::new(); bodies.len()];
        let mut order = Vec::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            if body.id.index() != i {
                return Err(OrreryError::UnknownBody(body.name.to_string()));
            }
            match body.parent {
                Some(parent) if parent.index() < bodies.len() => children[parent.index()].push(body.id),
                Some(parent) => {
                    return Err(OrreryError::MissingParent {
                        body: body.name.to_string(),
                        parent: format!("#{}", parent.0),
                    });
                }
                None => order.push(body.id),
            }
        }

        // Breadth-first from the roots; anything unreached sits on a cycle.
        let mut next = 0;
        while next < order.len() {
            let id = order[next];
            order.extend_from_slice(&children[id.index()]);
            next += 1;
        }

        if order.len() != bodies.len() {
            let mut reached = vec![false; bodies.len()];
            for id in &order {
                reached[id.index()] = true;
            }
            if let Some(body) = bodies.iter().find(|b| !reached[b.id.index()]) {
                return Err(OrreryError::CyclicHierarchy(body.name.to_string()));
            }
        }

        Ok(Self { order, spin_scale })
    }

    /// Visiting order: every parent precedes its children.
    pub fn order(&self) -> &[BodyId] {
        &self.order
    }

    /// Run one tick over `bodies` with the control snapshot `control`.
    ///
    /// Per body: re-center on the parent's position for this tick, read the
    /// sample under the cursor, advance the cursor, then spin or face the parent.
    pub(crate) fn step(&self, bodies: &mut [BodyState], control: &ControlState) {
        let base_step = control.cursor_step();
        let spin_speed = control.spin_speed_multiplier();

        for &id in &self.order {
            let center = match bodies[id.index()].parent {
                Some(parent) => bodies[parent.index()].world_position(),
                None => bodies[id.index()].anchor(),
            };

            let body = &mut bodies[id.index()];
            body.resolve(center);

            // Fixed satellite steps still stop when the global speed is zero.
            let step = match body.cursor_step_override() {
                Some(fixed) if base_step > 0 => fixed as usize,
                Some(_) => 0,
                None => base_step,
            };
            body.advance(step);

            if body.faces_parent() && body.parent.is_some() {
                body.face(center);
            } else {
                body.spin(self.spin_increment(body.radius, spin_speed));
            }
        }
    }

    /// `radius / spin_scale × spin_speed`, zero when the scale is degenerate.
    pub fn spin_increment(&self, radius: f64, spin_speed: f64) -> f64 {
        if self.spin_scale == 0.0 {
            return 0.0;
        }
        radius / self.spin_scale * spin_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::elements::OrbitalElements;
    use crate::orbit::path::OrbitPath;
    use glam::DVec3;

    fn orbiting(id: u32, parent: u32, depth: usize, a: f64, n: usize) -> BodyState {
        let elements = OrbitalElements::new(a, 0.0).unwrap();
        let path = OrbitPath::new(&elements, n).unwrap();
        BodyState::new(BodyId(id), format!("body{id}"))
            .with_parent(BodyId(parent), depth)
            .with_orbit(elements, path)
    }

    #[test]
    fn order_puts_parents_first() {
        // Listed leaf-first on purpose.
        let bodies = vec![
            orbiting(0, 1, 2, 1.0, 8),
            orbiting(1, 2, 1, 10.0, 8),
            BodyState::new(BodyId(2), "root"),
        ];
        let stepper = HierarchicalStepper::new(&bodies, 1.0).unwrap();
        assert_eq!(stepper.order(), &[BodyId(2), BodyId(1), BodyId(0)]);
    }

    #[test]
    fn rejects_out_of_range_parent() {
        let bodies = vec![BodyState::new(BodyId(0), "root"), orbiting(1, 7, 1, 1.0, 8)];
        let err = HierarchicalStepper::new(&bodies, 1.0).unwrap_err();
        assert!(
            matches!(err, OrreryError::MissingParent { ref body, ref parent } if body == "body1" && parent == "#7"),
            "{err}"
        );
    }

    #[test]
    fn rejects_ids_out_of_position() {
        let bodies = vec![BodyState::new(BodyId(3), "stray")];
        assert!(matches!(
            HierarchicalStepper::new(&bodies, 1.0),
            Err(OrreryError::UnknownBody(ref name)) if name == "stray"
        ));
    }

    #[test]
    fn detects_cycles() {
        let bodies = vec![
            BodyState::new(BodyId(0), "root"),
            orbiting(1, 2, 1, 1.0, 8),
            orbiting(2, 1, 1, 1.0, 8),
        ];
        let err = HierarchicalStepper::new(&bodies, 1.0).unwrap_err();
        assert!(matches!(err, OrreryError::CyclicHierarchy(ref name) if name == "body1"), "{err}");
    }

    #[test]
    fn child_uses_parent_position_from_same_tick() {
        let mut bodies = vec![
            BodyState::new(BodyId(0), "root"),
            orbiting(1, 0, 1, 10.0, 4),
            orbiting(2, 1, 2, 1.0, 4),
        ];
        let stepper = HierarchicalStepper::new(&bodies, 1.0).unwrap();
        let control = ControlState::new();

        stepper.step(&mut bodies, &control);
        stepper.step(&mut bodies, &control);

        // Planet is at sample 1 (quarter turn) on the second tick.
        let planet = bodies[1].world_position();
        assert!((planet - DVec3::new(0.0, 0.0, 10.0)).length() < 1e-9, "planet {planet:?}");
        let moon = bodies[2].world_position();
        assert!((moon - (planet + DVec3::new(0.0, 0.0, 1.0))).length() < 1e-9, "moon {moon:?}");
    }

    #[test]
    fn fixed_step_ignores_speed_but_not_pause() {
        let mut bodies = vec![
            BodyState::new(BodyId(0), "root"),
            orbiting(1, 0, 1, 10.0, 100).with_cursor_step(Some(1)),
        ];
        let stepper = HierarchicalStepper::new(&bodies, 1.0).unwrap();

        stepper.step(&mut bodies, &ControlState::new().with_orbit_speed(20.0));
        assert_eq!(bodies[1].cursor(), 1);

        stepper.step(&mut bodies, &ControlState::new().with_orbit_speed(0.0));
        assert_eq!(bodies[1].cursor(), 1);
    }

    #[test]
    fn spin_scales_with_radius() {
        let stepper = HierarchicalStepper::new(&[], 2.0).unwrap();
        assert_eq!(stepper.spin_increment(10.0, 0.5), 2.5);
        let flat = HierarchicalStepper::new(&[], 0.0).unwrap();
        assert_eq!(flat.spin_increment(10.0, 0.5), 0.0);
    }
}
