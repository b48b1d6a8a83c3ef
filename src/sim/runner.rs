use crate::models::{Payload, Stage, StageError, StageUnit};
use crate::sim::SimulationState;
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("{stage} stage failed (run had reached '{reached}'): {source}")]
    Stage {
        stage: Stage,
        reached: SimulationState,
        ended: SimulationState,
        #[source]
        source: StageError,
    },
    #[error("could not report {stage} stage (run had reached '{reached}'): {source}")]
    Output {
        stage: Stage,
        reached: SimulationState,
        ended: SimulationState,
        #[source]
        source: io::Error,
    },
    #[error("{stage} stage ran out of order (run had reached '{reached}')")]
    OutOfOrder {
        stage: Stage,
        reached: SimulationState,
        ended: SimulationState,
    },
}

impl SimulationError {
    /// Stage that was running when the run failed
    pub fn stage(&self) -> Stage {
        match self {
            SimulationError::Stage { stage, .. }
            | SimulationError::Output { stage, .. }
            | SimulationError::OutOfOrder { stage, .. } => *stage,
        }
    }

    /// Last state completed before the failure
    pub fn reached(&self) -> SimulationState {
        match self {
            SimulationError::Stage { reached, .. }
            | SimulationError::Output { reached, .. }
            | SimulationError::OutOfOrder { reached, .. } => *reached,
        }
    }

    /// State the run was left in
    pub fn final_state(&self) -> SimulationState {
        match self {
            SimulationError::Stage { ended, .. }
            | SimulationError::Output { ended, .. }
            | SimulationError::OutOfOrder { ended, .. } => *ended,
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    /// One line per stage, in hierarchy order
    pub lines: Vec<String>,
    pub state: SimulationState,
    /// The payload as the consumer received it
    pub delivered: Payload,
}

/// Runs one payload through a full set of stage units
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    units: Vec<StageUnit>,
}

impl SimulationRunner {
    /// The canned example: one unit per stage with its example display name
    pub fn example() -> Self {
        let units = Stage::ALL
            .iter()
            .map(|stage| StageUnit::new(*stage, stage.example_unit_name()))
            .collect();
        Self { units }
    }

    pub fn units(&self) -> &[StageUnit] {
        &self.units
    }

    /// Thread a single payload through every unit in order, writing each
    /// unit's line to `out` as it is produced.
    ///
    /// A failure at any stage abandons the run: the error is returned and
    /// nothing collected so far is kept. Lines already written to `out`
    /// stay written.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<SimulationReport, SimulationError> {
        let mut state = SimulationState::NotStarted;
        let mut lines = Vec::with_capacity(self.units.len());
        let mut payload: Option<Payload> = None;
        let mut delivered: Option<Payload> = None;

        for unit in &self.units {
            let stage = unit.stage();
            let next = match state.advance(stage) {
                Some(next) => next,
                None => {
                    return Err(SimulationError::OutOfOrder { stage, reached: state, ended: state.fail() })
                }
            };

            let input = payload.take();
            if stage == Stage::Consumer {
                delivered = input.clone();
            }

            let output = unit.process(input).map_err(|source| SimulationError::Stage {
                stage,
                reached: state,
                ended: state.fail(),
                source,
            })?;

            writeln!(out, "{}", output.message).map_err(|source| SimulationError::Output {
                stage,
                reached: state,
                ended: state.fail(),
                source,
            })?;
            log::debug!("{} -> {}", output.message, next);

            lines.push(output.message);
            payload = output.payload;
            state = next;
        }

        out.flush().map_err(|source| SimulationError::Output {
            stage: Stage::Consumer,
            reached: state,
            ended: state.fail(),
            source,
        })?;

        match delivered {
            Some(delivered) if state == SimulationState::Consumed => {
                log::info!("Simulation complete after {} stage(s)", lines.len());
                Ok(SimulationReport { lines, state, delivered })
            }
            _ => Err(SimulationError::OutOfOrder {
                stage: state.next_stage().unwrap_or(Stage::Consumer),
                reached: state,
                ended: state.fail(),
            }),
        }
    }
}

/// Run the example simulation, writing its lines to `out`
pub fn run_example<W: Write>(out: &mut W) -> Result<SimulationReport, SimulationError> {
    SimulationRunner::example().run(out)
}
