use bytemuck::{Pod, Zeroable};

use crate::api::types::BodyPose;
use crate::bridge::protocol::{ProtocolLayout, POSE_FLOATS};
use crate::control::state::ControlState;
use crate::core::orrery::Orrery;

/// Pose flag bits.
pub const FLAG_VISIBLE: u32 = 1;
pub const FLAG_PATH_VISIBLE: u32 = 1 << 1;
pub const FLAG_SELECTED: u32 = 1 << 2;

/// Per-body pose written to SharedArrayBuffer for the TypeScript renderer.
/// 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct PoseInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    pub radius: f32,
    /// FLAG_* bits, stored as a float.
    pub flags: f32,
    /// First vertex of this body's orbit line in the path section.
    pub path_offset: f32,
    /// Vertex count of the orbit line; 0 when hidden or truncated.
    pub path_len: f32,
    pub _pad: f32,
}

impl PoseInstance {
    pub const FLOATS: usize = POSE_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_pose(pose: &BodyPose, radius: f64, selected: bool) -> Self {
        let mut flags = 0;
        if pose.visible {
            flags |= FLAG_VISIBLE;
        }
        if pose.path_visible {
            flags |= FLAG_PATH_VISIBLE;
        }
        if selected {
            flags |= FLAG_SELECTED;
        }
        let p = pose.position.as_vec3();
        let q = pose.orientation.as_quat();
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            qx: q.x,
            qy: q.y,
            qz: q.z,
            qw: q.w,
            radius: radius as f32,
            flags: flags as f32,
            ..Self::default()
        }
    }
}

/// Flat f32 buffers for one frame: poses in id order plus orbit-line vertices.
pub struct PoseBuffer {
    pub poses: Vec<PoseInstance>,
    /// x, y, z triples.
    pub path_vertices: Vec<f32>,
    layout: ProtocolLayout,
    truncated: bool,
}

impl PoseBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        Self {
            poses: Vec::with_capacity(layout.max_bodies),
            path_vertices: Vec::with_capacity(layout.path_data_floats),
            layout,
            truncated: false,
        }
    }

    pub fn clear(&mut self) {
        self.poses.clear();
        self.path_vertices.clear();
    }

    /// Pack the orrery's current state. Bodies beyond `max_bodies` and orbit
    /// lines that no longer fit are dropped.
    pub fn rebuild(&mut self, orrery: &Orrery, control: &ControlState) {
        self.clear();
        let mut truncated = false;

        for (body, pose) in orrery.bodies().iter().zip(orrery.poses(control)) {
            if self.poses.len() >= self.layout.max_bodies {
                truncated = true;
                break;
            }
            let selected = control.selected_target == Some(body.id);
            let mut instance = PoseInstance::from_pose(&pose, body.radius, selected);

            if let (true, Some(path)) = (pose.path_visible, body.path()) {
                let offset = self.path_vertex_count();
                if offset + path.len() <= self.layout.max_path_vertices {
                    for p in path.world_points() {
                        let p = p.as_vec3();
                        self.path_vertices.extend_from_slice(&[p.x, p.y, p.z]);
                    }
                    instance.path_offset = offset as f32;
                    instance.path_len = path.len() as f32;
                } else {
                    truncated = true;
                }
            }
            self.poses.push(instance);
        }

        if truncated && !self.truncated {
            log::warn!(
                "pose buffer full: {} bodies, {} path vertices max",
                self.layout.max_bodies,
                self.layout.max_path_vertices
            );
        }
        self.truncated = truncated;
    }

    pub fn pose_count(&self) -> u32 {
        self.poses.len() as u32
    }

    pub fn path_vertex_count(&self) -> usize {
        self.path_vertices.len() / 3
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    /// Raw pointer to pose data for SharedArrayBuffer reads.
    pub fn poses_ptr(&self) -> *const f32 {
        self.poses.as_ptr() as *const f32
    }

    pub fn path_vertices_ptr(&self) -> *const f32 {
        self.path_vertices.as_ptr()
    }

    /// Poses as one flat float slice.
    pub fn pose_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.poses)
    }
}
