/// SharedArrayBuffer layout for the renderer.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Poses: max_bodies × 12 floats]
/// [Path vertices: max_path_vertices × 3 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::config::OrreryConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_TICK: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_PATH_VERTICES: usize = 4;
pub const HEADER_PATH_VERTEX_COUNT: usize = 5;
pub const HEADER_PROTOCOL_VERSION: usize = 6;
pub const HEADER_SELECTED_INDEX: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per pose: x, y, z, qx, qy, qz, qw, radius, flags, path_offset, path_len, pad.
pub const POSE_FLOATS: usize = 12;

/// Floats per path vertex: x, y, z.
pub const PATH_VERTEX_FLOATS: usize = 3;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_path_vertices: usize,

    /// Size of pose data section in floats.
    pub pose_data_floats: usize,
    /// Size of path vertex section in floats.
    pub path_data_floats: usize,

    /// Offset (in floats) where pose data begins.
    pub pose_data_offset: usize,
    /// Offset (in floats) where path vertex data begins.
    pub path_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_bodies: usize, max_path_vertices: usize) -> Self {
        let pose_data_floats = max_bodies * POSE_FLOATS;
        let path_data_floats = max_path_vertices * PATH_VERTEX_FLOATS;

        let pose_data_offset = HEADER_FLOATS;
        let path_data_offset = pose_data_offset + pose_data_floats;

        let buffer_total_floats = path_data_offset + path_data_floats;

        Self {
            max_bodies,
            max_path_vertices,
            pose_data_floats,
            path_data_floats,
            pose_data_offset,
            path_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &OrreryConfig) -> Self {
        Self::new(config.max_bodies, config.max_path_vertices)
    }

    /// Header values for the current frame.
    pub fn header(&self, tick: u64, body_count: usize, path_vertex_count: usize, selected: Option<usize>) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_TICK] = tick as f32;
        header[HEADER_MAX_BODIES] = self.max_bodies as f32;
        header[HEADER_BODY_COUNT] = body_count as f32;
        header[HEADER_MAX_PATH_VERTICES] = self.max_path_vertices as f32;
        header[HEADER_PATH_VERTEX_COUNT] = path_vertex_count as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_SELECTED_INDEX] = selected.map(|i| i as f32).unwrap_or(-1.0);
        header
    }
}
