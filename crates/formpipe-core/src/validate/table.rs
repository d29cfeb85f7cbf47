// crates/formpipe-core/src/validate/table.rs
// ============================================================================
// Module: Table Validator
// Description: Row-count, row-shape, and per-cell validation for table fields.
// Purpose: Enforce table constraints cell by cell against column schemas.
// Dependencies: crate::core::field, crate::pipeline::errors
// ============================================================================

//! ## Overview
//! A table answer is a rectangle: every row must carry exactly one cell per
//! declared column. Cells are validated with the column's own rules, so a
//! dropdown column rejects free text the same way a standalone dropdown
//! field would. Row counts are bounded by the schema before any cell is
//! inspected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::field::ColumnKind;
use crate::core::field::ColumnSchema;
use crate::pipeline::errors::ValidationReason;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates table rows against the column schemas and row-count bounds.
///
/// # Errors
///
/// Returns [`ValidationReason::RowCount`] for out-of-bounds row counts,
/// [`ValidationReason::RowShape`] for rows whose cell count differs from the
/// column count, [`ValidationReason::Required`] for blank cells in required
/// columns, and [`ValidationReason::NotAnOption`] for dropdown cells outside
/// the column's options.
pub fn validate_table(
    rows: &[Vec<String>],
    columns: &[ColumnSchema],
    min_rows: usize,
    max_rows: Option<usize>,
) -> Result<(), ValidationReason> {
    if rows.len() < min_rows || max_rows.is_some_and(|max| rows.len() > max) {
        return Err(ValidationReason::RowCount);
    }

    for row in rows {
        if row.len() != columns.len() {
            return Err(ValidationReason::RowShape);
        }
        for (cell, column) in row.iter().zip(columns) {
            validate_cell(cell, column)?;
        }
    }
    Ok(())
}

/// Validates a single cell against its column schema.
fn validate_cell(cell: &str, column: &ColumnSchema) -> Result<(), ValidationReason> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        if column.required {
            return Err(ValidationReason::Required);
        }
        return Ok(());
    }

    match &column.kind {
        ColumnKind::ShortText => Ok(()),
        ColumnKind::Dropdown {
            options,
        } => {
            if options.iter().any(|option| option == trimmed) {
                Ok(())
            } else {
                Err(ValidationReason::NotAnOption)
            }
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
