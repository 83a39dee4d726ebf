pub mod pose_buffer;
pub mod protocol;
