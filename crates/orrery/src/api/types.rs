use std::collections::HashMap;
use std::sync::Arc;

use glam::{DQuat, DVec3};

/// Stable handle for a body: its index in the orrery's lookup table.
/// Selections hold one of these instead of a reference into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// World-space pose of one body after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub id: BodyId,
    pub position: DVec3,
    pub orientation: DQuat,
    /// False for satellites while satellites are hidden.
    pub visible: bool,
    /// Whether the renderer should draw this body's orbit line.
    pub path_visible: bool,
}

/// Output of one tick: body name → pose.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// 1-based number of the tick that produced this frame.
    pub tick: u64,
    pub poses: HashMap<Arc<str>, BodyPose>,
    /// Camera-follow target, passed through untouched.
    pub selected: Option<BodyId>,
}

impl Frame {
    pub fn get(&self, name: &str) -> Option<&BodyPose> {
        self.poses.get(name)
    }

    pub fn position(&self, name: &str) -> Option<DVec3> {
        self.poses.get(name).map(|p| p.position)
    }

    /// Pose of the selected body, for a camera-follow collaborator.
    pub fn selected_pose(&self) -> Option<&BodyPose> {
        let id = self.selected?;
        self.poses.values().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_pose_resolves_by_id() {
        let mut frame = Frame::default();
        let pose = BodyPose {
            id: BodyId(3),
            position: DVec3::new(1.0, 2.0, 3.0),
            orientation: DQuat::IDENTITY,
            visible: true,
            path_visible: false,
        };
        frame.poses.insert(Arc::from("Mars"), pose);
        assert!(frame.selected_pose().is_none());

        frame.selected = Some(BodyId(3));
        assert_eq!(frame.selected_pose().map(|p| p.position), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(frame.position("Mars"), Some(DVec3::new(1.0, 2.0, 3.0)));
    }
}
