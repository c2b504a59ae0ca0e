//! Verification ledger error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum LedgerError {
    #[error("invalid ledger document: {message}")]
    InvalidFormat { message: String },

    /// A record that claims it was not verified. The ledger only ever
    /// publishes successful runs, so this means upstream corruption.
    #[error("ledger record {index} for {package_id} is not marked verified")]
    UnverifiedRecord { package_id: String, index: usize },

    #[error("invalid version code in ledger record {index} for {package_id}: {value}")]
    InvalidVersionCode {
        package_id: String,
        index: usize,
        value: String,
    },
}

impl UserFacingError for LedgerError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnverifiedRecord { .. } => {
                Some("The verification ledger looks corrupted upstream; retry later with --refresh.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidFormat { .. } => "ledger.invalid_format",
            Self::UnverifiedRecord { .. } => "ledger.unverified_record",
            Self::InvalidVersionCode { .. } => "ledger.invalid_version_code",
        };
        Some(code)
    }
}
