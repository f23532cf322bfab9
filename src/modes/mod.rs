pub mod autopilot;
pub mod simulate;

pub use autopilot::Autopilot;
pub use simulate::{SimulateConfig, SimulateMode};
