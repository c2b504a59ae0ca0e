#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for vercheck
//!
//! This crate sits between the CLI and the specialised crates: it moves
//! feeds through the snapshot cache, hands them to the loaders and the
//! reconciler, and applies the optional signing check.

mod check;
mod context;
mod sync;

pub use check::{check, CheckRequest};
pub use context::{OpsContextBuilder, OpsCtx};
pub use sync::{refresh, sync_index, sync_ledger};
