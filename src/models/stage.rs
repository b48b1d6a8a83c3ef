use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One level of the electricity distribution hierarchy.
///
/// The set is closed and ordered: power flows from `Generation` down to
/// `Consumer`, and every pass over the hierarchy walks `Stage::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Generation,
    Transmission,
    Substation,
    Distribution,
    Consumer,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Generation,
        Stage::Transmission,
        Stage::Substation,
        Stage::Distribution,
        Stage::Consumer,
    ];

    /// Lowercase key used for column matching and JSON output
    pub fn key(&self) -> &'static str {
        match self {
            Stage::Generation => "generation",
            Stage::Transmission => "transmission",
            Stage::Substation => "substation",
            Stage::Distribution => "distribution",
            Stage::Consumer => "consumer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Generation => "Generation",
            Stage::Transmission => "Transmission",
            Stage::Substation => "Substation",
            Stage::Distribution => "Distribution",
            Stage::Consumer => "Consumer",
        }
    }

    /// Display name of the unit built for this stage by the example simulation
    pub fn example_unit_name(&self) -> &'static str {
        match self {
            Stage::Generation => "Power Plant",
            Stage::Transmission => "High Voltage Line",
            Stage::Substation => "City Substation",
            Stage::Distribution => "Local Distribution Line",
            Stage::Consumer => "Residential Area",
        }
    }

    /// Position in the hierarchy (0 = generation)
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The electricity moving through a simulation run.
///
/// Opaque: every stage after generation hands it on untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Payload(String);

impl Payload {
    pub const TOKEN: &'static str = "electricity";

    pub fn electricity() -> Self {
        Payload(Self::TOKEN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a unit produced: the line it reports and the payload it hands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub message: String,
    pub payload: Option<Payload>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageError {
    #[error("{stage} unit '{name}' received no electricity")]
    MissingPayload { stage: Stage, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub name: String,
}

impl Generation {
    pub fn generate(&self) -> StageOutput {
        StageOutput {
            message: format!("{}: Generating electricity.", self.name),
            payload: Some(Payload::electricity()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub name: String,
}

impl Transmission {
    pub fn transmit(&self, payload: Payload) -> StageOutput {
        StageOutput {
            message: format!("{}: Transmitting {}.", self.name, payload),
            payload: Some(payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substation {
    pub name: String,
}

impl Substation {
    pub fn step_down(&self, payload: Payload) -> StageOutput {
        StageOutput {
            message: format!("{}: Stepping down voltage of {}.", self.name, payload),
            payload: Some(payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub name: String,
}

impl Distribution {
    pub fn distribute(&self, payload: Payload) -> StageOutput {
        StageOutput {
            message: format!("{}: Distributing {} to consumers.", self.name, payload),
            payload: Some(payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumer {
    pub name: String,
}

impl Consumer {
    pub fn consume(&self, payload: Payload) -> StageOutput {
        StageOutput {
            message: format!("{}: Consuming {}.", self.name, payload),
            payload: None,
        }
    }
}

/// A named unit at one stage of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageUnit {
    Generation(Generation),
    Transmission(Transmission),
    Substation(Substation),
    Distribution(Distribution),
    Consumer(Consumer),
}

impl StageUnit {
    pub fn new(stage: Stage, name: impl Into<String>) -> Self {
        let name = name.into();
        match stage {
            Stage::Generation => StageUnit::Generation(Generation { name }),
            Stage::Transmission => StageUnit::Transmission(Transmission { name }),
            Stage::Substation => StageUnit::Substation(Substation { name }),
            Stage::Distribution => StageUnit::Distribution(Distribution { name }),
            Stage::Consumer => StageUnit::Consumer(Consumer { name }),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            StageUnit::Generation(_) => Stage::Generation,
            StageUnit::Transmission(_) => Stage::Transmission,
            StageUnit::Substation(_) => Stage::Substation,
            StageUnit::Distribution(_) => Stage::Distribution,
            StageUnit::Consumer(_) => Stage::Consumer,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StageUnit::Generation(unit) => &unit.name,
            StageUnit::Transmission(unit) => &unit.name,
            StageUnit::Substation(unit) => &unit.name,
            StageUnit::Distribution(unit) => &unit.name,
            StageUnit::Consumer(unit) => &unit.name,
        }
    }

    /// Pass `input` through this unit.
    ///
    /// Generation ignores its input. Every other stage needs the payload
    /// handed on by the stage before it.
    pub fn process(&self, input: Option<Payload>) -> Result<StageOutput, StageError> {
        match self {
            StageUnit::Generation(unit) => Ok(unit.generate()),
            StageUnit::Transmission(unit) => Ok(unit.transmit(self.require(input)?)),
            StageUnit::Substation(unit) => Ok(unit.step_down(self.require(input)?)),
            StageUnit::Distribution(unit) => Ok(unit.distribute(self.require(input)?)),
            StageUnit::Consumer(unit) => Ok(unit.consume(self.require(input)?)),
        }
    }

    fn require(&self, input: Option<Payload>) -> Result<Payload, StageError> {
        input.ok_or_else(|| StageError::MissingPayload {
            stage: self.stage(),
            name: self.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_and_keys() {
        let keys: Vec<&str> = Stage::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys, vec!["generation", "transmission", "substation", "distribution", "consumer"]);
        for (idx, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), idx);
        }
    }

    #[test]
    fn test_unit_messages() {
        let p = Payload::electricity();
        assert_eq!(
            Generation { name: "Power Plant".into() }.generate().message,
            "Power Plant: Generating electricity."
        );
        assert_eq!(
            Transmission { name: "HV".into() }.transmit(p.clone()).message,
            "HV: Transmitting electricity."
        );
        assert_eq!(
            Substation { name: "Sub".into() }.step_down(p.clone()).message,
            "Sub: Stepping down voltage of electricity."
        );
        assert_eq!(
            Distribution { name: "Local".into() }.distribute(p.clone()).message,
            "Local: Distributing electricity to consumers."
        );
        let consumed = Consumer { name: "Home".into() }.consume(p);
        assert_eq!(consumed.message, "Home: Consuming electricity.");
        assert_eq!(consumed.payload, None);
    }

    #[test]
    fn test_process_passes_payload_through() {
        let unit = StageUnit::new(Stage::Substation, "City Substation");
        let out = unit.process(Some(Payload::electricity())).unwrap();
        assert_eq!(out.payload, Some(Payload::electricity()));
    }

    #[test]
    fn test_generation_ignores_input() {
        let unit = StageUnit::new(Stage::Generation, "Power Plant");
        assert_eq!(unit.process(None).unwrap().payload.unwrap().as_str(), "electricity");
    }

    #[test]
    fn test_process_without_payload_fails() {
        let unit = StageUnit::new(Stage::Consumer, "Residential Area");
        let err = unit.process(None).unwrap_err();
        assert_eq!(
            err,
            StageError::MissingPayload { stage: Stage::Consumer, name: "Residential Area".into() }
        );
    }
}
