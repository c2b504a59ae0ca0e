//! Build provenance of a published version

use serde::{Deserialize, Serialize};
use std::fmt;
use vercheck_errors::ProvenanceError;

/// Which kinds of build variants exist for one (package id, version code)
///
/// The discriminant is the bitmask folded over the variants: bit value
/// [`Provenance::SOURCE_BUILT`] for a variant built from source, bit value
/// [`Provenance::DIRECTLY_SIGNED`] for any other variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Provenance {
    /// No variant matched the current version code
    Missing = 0,
    /// Only source-built variants; developer signing can't be told from metadata
    Unknown = 1,
    /// Only directly signed variants
    SignedOnly = 2,
    /// Both a source-built and a directly signed variant
    Both = 3,
}

impl Provenance {
    pub const SOURCE_BUILT: u8 = 0b01;
    pub const DIRECTLY_SIGNED: u8 = 0b10;

    /// Convert a folded bitmask
    ///
    /// # Errors
    ///
    /// Returns `ProvenanceError::OutOfRange` for anything above 3.
    pub fn from_bits(bits: u8) -> Result<Self, ProvenanceError> {
        match bits {
            0 => Ok(Self::Missing),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::SignedOnly),
            3 => Ok(Self::Both),
            _ => Err(ProvenanceError::OutOfRange { bits }),
        }
    }

    #[must_use]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Unknown | Self::SignedOnly => "unknown",
            Self::Both => "both",
        }
    }

    /// True when the metadata alone can't settle who signed the artifact
    #[must_use]
    pub fn is_ambiguous(self) -> bool {
        matches!(self, Self::Unknown | Self::SignedOnly)
    }
}

impl TryFrom<u8> for Provenance {
    type Error = ProvenanceError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<Provenance> for u8 {
    fn from(p: Provenance) -> Self {
        p.bits()
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
