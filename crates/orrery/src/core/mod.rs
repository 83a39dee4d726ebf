pub mod body;
pub mod orrery;
pub mod stepper;
pub mod time;
