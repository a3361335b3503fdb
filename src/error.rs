use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-correctable input problems. Always surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    EmptyName,
    #[error("birthdate must be a real calendar date in YYYY-MM-DD form giving an age between 0 and 120")]
    InvalidBirthdate,
    #[error("both an activity and a time slot must be selected")]
    MissingSelection,
}

/// Failures against the key-value medium.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read `{key}`: {message}")]
    Read { key: String, message: String },

    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },

    #[error("failed to remove `{key}`: {message}")]
    Remove { key: String, message: String },

    #[error("failed to serialize value for `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed data under `{key}`: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum SaveProfileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("profile could not be saved: {0}")]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Error)]
pub enum ConfirmPlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("plan could not be saved: {0}")]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandErrorKind {
    Validation,
    Persistence,
    /// The layer itself failed, not the input or the medium.
    Internal,
}

/// Tagged failure handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub kind: CommandErrorKind,
    /// Present for validation failures so the screen can pick its own wording.
    pub code: Option<String>,
    pub message: String,
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::EmptyName => "empty_name",
            ValidationError::InvalidBirthdate => "invalid_birthdate",
            ValidationError::MissingSelection => "missing_selection",
        };
        Self {
            kind: CommandErrorKind::Validation,
            code: Some(code.to_string()),
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for CommandError {
    fn from(err: PersistenceError) -> Self {
        let kind = match err {
            PersistenceError::Task(_) => CommandErrorKind::Internal,
            _ => CommandErrorKind::Persistence,
        };
        Self {
            kind,
            code: None,
            message: err.to_string(),
        }
    }
}

impl From<SaveProfileError> for CommandError {
    fn from(err: SaveProfileError) -> Self {
        match err {
            SaveProfileError::Validation(e) => e.into(),
            SaveProfileError::Persistence(e) => e.into(),
        }
    }
}

impl From<ConfirmPlanError> for CommandError {
    fn from(err: ConfirmPlanError) -> Self {
        match err {
            ConfirmPlanError::Validation(e) => e.into(),
            ConfirmPlanError::Persistence(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_tagged_command_errors() {
        let err: CommandError = SaveProfileError::from(ValidationError::EmptyName).into();
        assert_eq!(err.kind, CommandErrorKind::Validation);
        assert_eq!(err.code.as_deref(), Some("empty_name"));

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "validation");
    }

    #[test]
    fn persistence_errors_carry_the_key() {
        let err = PersistenceError::Write {
            key: "user_profile".to_string(),
            message: "disk full".to_string(),
        };
        let cmd: CommandError = ConfirmPlanError::from(err).into();
        assert_eq!(cmd.kind, CommandErrorKind::Persistence);
        assert!(cmd.message.contains("user_profile"));
        assert!(cmd.code.is_none());
    }

    #[test]
    fn failed_storage_task_is_internal() {
        let err: CommandError = SaveProfileError::from(PersistenceError::Task("panicked".to_string())).into();
        assert_eq!(err.kind, CommandErrorKind::Internal);
        assert!(err.code.is_none());
        assert_eq!(serde_json::to_value(&err).unwrap()["kind"], "internal");
    }
}
