//! Zip container access
//!
//! The index is published as a signed jar; only one JSON member inside it
//! is of interest.

use std::io::{Cursor, Read};
use vercheck_errors::{Error, IndexError};
use zip::result::ZipError;
use zip::ZipArchive;

/// Read one named entry out of a zip archive held in memory
///
/// # Errors
///
/// Returns `IndexError::MemberNotFound` if the archive has no such entry and
/// `IndexError::ArchiveError` if the archive or the entry cannot be read.
pub fn extract_single_member(archive: &[u8], member: &str) -> Result<Vec<u8>, Error> {
    let mut zip = ZipArchive::new(Cursor::new(archive)).map_err(|e| IndexError::ArchiveError {
        message: format!("failed to open zip archive: {e}"),
    })?;

    let mut file = zip.by_name(member).map_err(|e| match e {
        ZipError::FileNotFound => IndexError::MemberNotFound {
            member: member.to_string(),
        },
        other => IndexError::ArchiveError {
            message: format!("failed to locate {member}: {other}"),
        },
    })?;

    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .map_err(|e| IndexError::ArchiveError {
            message: format!("failed to read {member}: {e}"),
        })?;

    Ok(contents)
}
