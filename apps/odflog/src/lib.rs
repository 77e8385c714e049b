//! odflog core library.
//!
//! Converts the log of an ODF/ODS validation run into CI annotations.
//!
//! High-level modules:
//! - `classify`: Per-line classification and best-effort header/path parsing.
//! - `accumulate`: Fold of classified lines into archive-grouped diagnostics.
//! - `emit`: Path cleaning, root-prefix handling and annotation rendering.
//! - `output`: GitHub/human/JSON printers.
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Diagnostic entries, archive reports and the grouped store.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Load errors.
//! - `utils`: Supporting helpers.
pub mod accumulate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod models;
pub mod output;
pub mod utils;
