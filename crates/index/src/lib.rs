#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Repository index for vercheck
//!
//! This crate turns the published repository index into the package
//! metadata table the reconciler works on. It also owns the local snapshot
//! cache and the zip unwrapping the index is distributed in.

pub mod archive;
mod cache;
mod format;
pub mod models;
mod provenance;

pub use archive::extract_single_member;
pub use cache::SnapshotCache;
pub use format::{format_for, IndexV1Format, MetadataFormat, SnapshotFormat};
pub use models::{AppEntry, IndexV1Document, PackageVariant, RepoInfo, SnapshotEntry};
pub use provenance::classify;
