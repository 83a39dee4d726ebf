pub mod queue;
pub mod state;

pub use queue::ControlQueue;
pub use state::{ControlMessage, ControlState, ORBIT_SPEED_RANGE, SPIN_SPEED_RANGE};
