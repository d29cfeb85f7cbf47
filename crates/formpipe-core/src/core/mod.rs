// crates/formpipe-core/src/core/mod.rs
// ============================================================================
// Module: Core Model
// Description: Identifiers, field schemas, form definitions, and responses.
// Purpose: Define the data model the pipeline operates on.
// Dependencies: field-logic, serde
// ============================================================================

//! ## Overview
//! The core model mirrors the wire shapes shared between form authors and
//! the submission pipeline: opaque identifiers, typed field schemas with
//! per-type constraint bags, the form definition, and raw/processed
//! response shapes.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod field;
pub mod form;
pub mod identifiers;
pub mod response;
