//! # clearbill-engine
//!
//! The patient financial responsibility engine: classifies a patient's
//! insurance into a payer category, fuses verification-service output with
//! practice-management defaults, computes per-service-line dollar
//! responsibility over a payer-specific allowed-amount table, decides
//! whether the result is worth publishing, and renders it into a compact
//! memo — while suppressing duplicate publication via the audit log.
//!
//! External systems (practice management, verification vendor, audit store)
//! are consumed through the traits in [`traits`]; the engine itself
//! performs no I/O beyond those contracts.

pub mod calculator;
pub mod classifier;
pub mod config;
pub mod decision;
pub mod fuse;
pub mod memo;
pub mod pipeline;
pub mod tables;
pub mod traits;

pub use config::EngineConfig;
pub use pipeline::{Engine, RunSummary};
