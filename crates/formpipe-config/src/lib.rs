// crates/formpipe-config/src/lib.rs
// ============================================================================
// Module: Formpipe Config Library
// Description: Canonical config model and validation for Formpipe.
// Purpose: Single source of truth for formpipe.toml semantics.
// Dependencies: formpipe-core, serde, toml
// ============================================================================

//! ## Overview
//! `formpipe-config` defines the configuration model for the submission
//! pipeline: input limits and verified-field signature settings. Loading is
//! strict and fail-closed: size, path, and encoding guards run before
//! parsing, and semantic validation runs before the config is handed out.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::FormpipeConfig;
pub use config::LimitsConfig;
pub use config::VerificationConfig;
