use crate::models::Stage;
use serde::Serialize;
use std::fmt;

/// Progress of one simulation run.
///
/// Runs move strictly forward, one stage at a time, from `NotStarted` to
/// `Consumed`. Any state may drop to `Failed`. `Consumed` and `Failed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationState {
    NotStarted,
    Generated,
    Transmitted,
    SteppedDown,
    Distributed,
    Consumed,
    Failed,
}

impl SimulationState {
    /// State reached once `stage` has run
    pub fn after(stage: Stage) -> Self {
        match stage {
            Stage::Generation => SimulationState::Generated,
            Stage::Transmission => SimulationState::Transmitted,
            Stage::Substation => SimulationState::SteppedDown,
            Stage::Distribution => SimulationState::Distributed,
            Stage::Consumer => SimulationState::Consumed,
        }
    }

    /// The stage allowed to run next, if any
    pub fn next_stage(&self) -> Option<Stage> {
        match self {
            SimulationState::NotStarted => Some(Stage::Generation),
            SimulationState::Generated => Some(Stage::Transmission),
            SimulationState::Transmitted => Some(Stage::Substation),
            SimulationState::SteppedDown => Some(Stage::Distribution),
            SimulationState::Distributed => Some(Stage::Consumer),
            SimulationState::Consumed | SimulationState::Failed => None,
        }
    }

    /// Record that `stage` completed. `None` if it was not the stage due next.
    pub fn advance(self, stage: Stage) -> Option<Self> {
        (self.next_stage() == Some(stage)).then(|| Self::after(stage))
    }

    /// Abandon the run. Allowed from every state; a failed run stays failed.
    pub fn fail(self) -> Self {
        if self != SimulationState::Failed {
            log::debug!("Simulation failed after reaching '{}'", self);
        }
        SimulationState::Failed
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationState::NotStarted => "not started",
            SimulationState::Generated => "generated",
            SimulationState::Transmitted => "transmitted",
            SimulationState::SteppedDown => "stepped down",
            SimulationState::Distributed => "distributed",
            SimulationState::Consumed => "consumed",
            SimulationState::Failed => "failed",
        }
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_forward_through_every_stage() {
        let mut state = SimulationState::NotStarted;
        for stage in Stage::ALL {
            assert_eq!(state.next_stage(), Some(stage));
            state = state.advance(stage).unwrap();
        }
        assert_eq!(state, SimulationState::Consumed);
        assert_eq!(state.next_stage(), None);
    }

    #[test]
    fn test_any_state_can_fail() {
        let states = [
            SimulationState::NotStarted,
            SimulationState::Generated,
            SimulationState::Transmitted,
            SimulationState::SteppedDown,
            SimulationState::Distributed,
            SimulationState::Consumed,
            SimulationState::Failed,
        ];
        for state in states {
            let failed = state.fail();
            assert_eq!(failed, SimulationState::Failed);
            assert_eq!(failed.next_stage(), None);
        }
    }

    #[test]
    fn test_rejects_skips_and_repeats() {
        assert_eq!(SimulationState::NotStarted.advance(Stage::Transmission), None);
        assert_eq!(SimulationState::Generated.advance(Stage::Generation), None);
        assert_eq!(SimulationState::Distributed.advance(Stage::Substation), None);
        assert_eq!(SimulationState::Consumed.advance(Stage::Generation), None);
        assert_eq!(SimulationState::Failed.advance(Stage::Generation), None);
    }
}
