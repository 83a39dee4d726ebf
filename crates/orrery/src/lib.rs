pub mod api;
pub mod assets;
pub mod bridge;
pub mod control;
pub mod core;
pub mod error;
pub mod orbit;

// Re-export key types at crate root for convenience
pub use api::config::OrreryConfig;
pub use api::types::{BodyId, BodyPose, Frame};
pub use assets::catalog::{BodyCatalog, BodyDescriptor};
pub use bridge::pose_buffer::{PoseBuffer, PoseInstance};
pub use bridge::protocol::ProtocolLayout;
pub use control::{ControlMessage, ControlQueue, ControlState};
pub use core::body::{BodyState, Phase};
pub use core::orrery::Orrery;
pub use core::stepper::HierarchicalStepper;
pub use core::time::AnimationClock;
pub use error::{OrbitViolation, OrreryError, Result, SampleError};
pub use orbit::{sample_ellipse, OrbitDescriptor, OrbitPath, OrbitalElements};

pub use glam::{DQuat, DVec3};
