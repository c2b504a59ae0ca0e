//! CLI error handling

use std::fmt;

use vercheck_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Operations error
    Ops(vercheck_errors::Error),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<vercheck_errors::Error> for CliError {
    fn from(e: vercheck_errors::Error) -> Self {
        CliError::Ops(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vercheck_errors::{ConfigError, LedgerError};

    #[test]
    fn test_ops_error_carries_code_and_hint() {
        let err = CliError::from(vercheck_errors::Error::from(LedgerError::UnverifiedRecord {
            package_id: "app.one".to_string(),
            index: 2,
        }));
        let text = err.to_string();
        assert!(text.contains("app.one"));
        assert!(text.contains("\n  Code: ledger.unverified_record"));
    }

    #[test]
    fn test_config_error_renders_through_ops() {
        let err = CliError::from(vercheck_errors::Error::from(ConfigError::InvalidValue {
            field: "VERCHECK_MAX_AGE_HOURS".to_string(),
            value: "soon".to_string(),
        }));
        assert!(matches!(err, CliError::Ops(_)));
        let text = err.to_string();
        assert!(text.contains("VERCHECK_MAX_AGE_HOURS"));
        assert!(text.contains("\n  Code: config."));
    }
}
