//! Provenance classification over the build variants of one release

use crate::models::PackageVariant;
use vercheck_errors::Error;
use vercheck_types::Provenance;

/// Fold the variants of one (package id, version code) into a classification
///
/// # Errors
///
/// Returns `ProvenanceError::OutOfRange` if the folded value is not a valid
/// classification.
pub fn classify<'a, I>(variants: I) -> Result<Provenance, Error>
where
    I: IntoIterator<Item = &'a PackageVariant>,
{
    let bits = variants.into_iter().fold(0u8, |bits, variant| {
        if variant.is_source_built() {
            bits | Provenance::SOURCE_BUILT
        } else {
            bits | Provenance::DIRECTLY_SIGNED
        }
    });

    Ok(Provenance::from_bits(bits)?)
}
