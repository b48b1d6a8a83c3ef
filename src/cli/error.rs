// Error handling utilities for consistent error messages and exit codes

use crate::config::ConfigError;
use crate::loader::LoadError;
use crate::sim::SimulationError;
use thiserror::Error;

/// Errors caused by the user's input or settings (exit code 1)
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", load_message(.0))]
    Load(#[from] LoadError),
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),
    #[error("Simulation model not available: {reason}")]
    SimulationUnavailable { reason: String },
}

/// User-facing text for a failed load
pub fn load_message(err: &LoadError) -> String {
    match err {
        LoadError::Empty => err.to_string(),
        other => format!("Error reading file: {}", other),
    }
}

/// Exit code 1 for user errors, 2 for internal failures
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if is_user_error(err) {
        1
    } else {
        2
    }
}

/// User errors are bad input files, bad settings and simulation failures;
/// everything else is internal
pub fn is_user_error(err: &anyhow::Error) -> bool {
    if err.downcast_ref::<CliError>().is_some() {
        return true;
    }
    matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::InvalidValue { .. }))
}

/// Render an error for stderr: "Error: ..." for user errors, "Internal
/// error: ..." plus the cause chain otherwise
pub fn format_error(err: &anyhow::Error) -> String {
    if is_user_error(err) {
        return format!("Error: {}", err);
    }

    let mut output = format!("Internal error: {}", err);
    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        output.push_str("\n\nCaused by:");
        for (indent, cause) in causes.enumerate() {
            output.push_str(&format!("\n{:indent$}  {}", "", cause, indent = indent + 1));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Stage, StageError};
    use crate::sim::SimulationState;
    use std::path::PathBuf;

    #[test]
    fn test_load_messages() {
        assert_eq!(
            load_message(&LoadError::Empty),
            "The uploaded file is empty. Please check your file and try again."
        );
        assert_eq!(
            load_message(&LoadError::NotFound(PathBuf::from("grid.csv"))),
            "Error reading file: file not found: grid.csv"
        );
    }

    #[test]
    fn test_user_errors_exit_with_one() {
        let err = anyhow::Error::new(CliError::from(LoadError::Empty));
        assert_eq!(exit_code(&err), 1);
        assert!(format_error(&err).starts_with("Error: The uploaded file is empty."));

        let err = anyhow::Error::new(CliError::Simulation(SimulationError::Stage {
            stage: Stage::Transmission,
            reached: SimulationState::Generated,
            ended: SimulationState::Failed,
            source: StageError::MissingPayload { stage: Stage::Transmission, name: "HV".into() },
        }));
        assert_eq!(exit_code(&err), 1);
        assert!(format_error(&err).starts_with("Error: Simulation error: Transmission stage failed"));

        let err = anyhow::Error::new(ConfigError::InvalidValue {
            line: 3,
            key: "color".into(),
            value: "pink".into(),
            expected: "auto, always or never",
        });
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_internal_errors_show_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = anyhow::Error::new(ConfigError::Io { path: PathBuf::from("/home/u/.powertier/rc"), source: io })
            .context("Failed to load settings");
        assert_eq!(exit_code(&err), 2);
        let text = format_error(&err);
        assert!(text.starts_with("Internal error: Failed to load settings"));
        assert!(text.contains("Caused by:"));
        assert!(text.contains("permission denied"));
    }
}
