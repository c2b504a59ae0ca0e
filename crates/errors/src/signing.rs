//! Signing inspection error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum SigningError {
    #[error("failed to run {tool}: {message}")]
    SpawnFailed { tool: String, message: String },

    #[error("{tool} exited with status {status}: {stderr}")]
    InspectionFailed {
        tool: String,
        status: String,
        stderr: String,
    },
}

impl UserFacingError for SigningError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SpawnFailed { .. } => {
                Some("Install apksigner or set signing.tool / VERCHECK_APKSIGNER.")
            }
            Self::InspectionFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::SpawnFailed { .. } => "signing.spawn_failed",
            Self::InspectionFailed { .. } => "signing.inspection_failed",
        };
        Some(code)
    }
}
