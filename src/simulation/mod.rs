pub mod engine;
pub mod result;
pub mod scenario;

pub use engine::SimulationEngine;
pub use result::{ExecutionReport, ScheduleRow};
pub use scenario::{Simulation, SimulationBuilder};
