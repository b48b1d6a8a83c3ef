// Example power-flow simulation
// One payload passes Generation -> Transmission -> Substation -> Distribution -> Consumer

pub mod runner;
pub mod state;

pub use runner::*;
pub use state::*;

use crate::config::Config;
use crate::models::Stage;

/// Whether the simulation may run in this session.
///
/// Decided once at startup and handed to the command layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationAvailability {
    Available,
    Unavailable { reason: String },
}

impl SimulationAvailability {
    pub fn check(config: &Config) -> Self {
        if !config.simulation_enabled {
            return SimulationAvailability::Unavailable {
                reason: "disabled by 'simulation.enabled=false' in the rc file".to_string(),
            };
        }

        let runner = SimulationRunner::example();
        let complete = runner.units().len() == Stage::ALL.len()
            && runner
                .units()
                .iter()
                .zip(Stage::ALL)
                .all(|(unit, stage)| unit.stage() == stage && !unit.name().trim().is_empty());
        if !complete {
            return SimulationAvailability::Unavailable {
                reason: "the stage model is incomplete".to_string(),
            };
        }

        SimulationAvailability::Available
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SimulationAvailability::Available)
    }
}
