//! genesis-surgeon - rewriting Cosmos-style genesis exports
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Transforms
//! - [`consolidate`] - Collapse a validator set onto one validator
//! - [`transplant`] - Graft a donor chain's staking state onto a main chain
//!
//! ## Genesis Model
//! - [`genesis`] - Document loading, sectioned access and atomic output
//! - [`state`] - Typed views of the staking, distribution and supply modules
//! - [`amount`] - Arbitrary-precision token, share and power amounts
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - CLI utilities

#![forbid(unsafe_code)]

// ============================================================================
// Transforms
// ============================================================================
pub mod consolidate;
pub mod transplant;

// ============================================================================
// Genesis Model
// ============================================================================
pub mod amount;
pub mod genesis;
pub mod state;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;

pub use consolidate::{consolidate, ConsolidationPlan, ConsolidationReport, ValidatorIdentity};
pub use error::{GenesisError, Result};
pub use genesis::{GenesisDocument, OutputOptions, OutputTarget};
pub use transplant::{transplant, TransplantPlan, TransplantReport};
