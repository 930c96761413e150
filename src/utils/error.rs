use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid ONT tag identifier '{value}'. Expected a value ending in -<digits>")]
    InvalidTagIdentifier { value: String },

    #[error("Command '{program}' failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SyncError {
    /// The process exit code this error should terminate with. A failed
    /// external command passes its own code through (so a test suite
    /// failing with 101 reports 101); everything else, including a
    /// signal-killed child, is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::CommandFailed { code: Some(code), .. } => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_passes_through_command_status() {
        let err = SyncError::CommandFailed {
            program: "sh".to_string(),
            status: "exit status: 101".to_string(),
            code: Some(101),
            stderr: String::new(),
        };
        assert_eq!(err.exit_code(), 101);
    }

    #[test]
    fn test_exit_code_defaults_to_one() {
        let killed = SyncError::CommandFailed {
            program: "sh".to_string(),
            status: "signal: 9 (SIGKILL)".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(killed.exit_code(), 1);

        let config = SyncError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(config.exit_code(), 1);
    }
}
