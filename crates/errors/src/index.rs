//! Repository index error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum IndexError {
    #[error("invalid index document: {message}")]
    InvalidFormat { message: String },

    #[error("malformed index entry for {package_id}: {message}")]
    MalformedEntry { package_id: String, message: String },

    #[error("invalid version code for {package_id}: {value}")]
    InvalidVersionCode { package_id: String, value: String },

    #[error("archive member {member} not found")]
    MemberNotFound { member: String },

    #[error("unreadable archive: {message}")]
    ArchiveError { message: String },
}

impl UserFacingError for IndexError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MemberNotFound { .. } | Self::ArchiveError { .. } => {
                Some("Check feeds.index_url and feeds.index_member in your config.")
            }
            Self::InvalidFormat { .. } => {
                Some("Make sure feeds.index_format matches the document behind feeds.index_url.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidFormat { .. } => "index.invalid_format",
            Self::MalformedEntry { .. } => "index.malformed_entry",
            Self::InvalidVersionCode { .. } => "index.invalid_version_code",
            Self::MemberNotFound { .. } => "index.member_not_found",
            Self::ArchiveError { .. } => "index.archive_error",
        };
        Some(code)
    }
}
