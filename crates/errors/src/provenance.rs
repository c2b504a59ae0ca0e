//! Provenance classification error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProvenanceError {
    #[error("provenance value {bits} is outside 0..=3")]
    OutOfRange { bits: u8 },
}

impl UserFacingError for ProvenanceError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::OutOfRange { .. } => Some("provenance.out_of_range"),
        }
    }
}
