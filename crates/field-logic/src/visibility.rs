// crates/field-logic/src/visibility.rs
// ============================================================================
// Module: Visibility Solver
// Description: Fixpoint computation of visible field sets.
// Purpose: Resolve chained show logic and probe prevent-submit units.
// Dependencies: crate::condition, crate::unit
// ============================================================================

//! ## Overview
//! The solver computes the set of visible fields for a submission. Fields
//! that are the target of no show unit are visible by default. Satisfied
//! show units reveal their targets; because a revealed field can answer
//! another unit's condition, the solver iterates to a fixpoint. The set only
//! grows and the field universe is finite, so the loop terminates, and the
//! result is independent of unit ordering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::condition::ResponseReader;
use crate::unit::LogicUnit;

// ============================================================================
// SECTION: Visibility Fixpoint
// ============================================================================

/// Computes the set of visible field identifiers for a submission.
///
/// # Arguments
/// * `reader` - Access to submitted answers.
/// * `field_ids` - Every field declared by the form, in any order.
/// * `units` - The form's logic units; prevent units are ignored here.
#[must_use]
pub fn visible_field_ids<K, R>(reader: &R, field_ids: &[K], units: &[LogicUnit<K>]) -> BTreeSet<K>
where
    K: Ord + Clone,
    R: ResponseReader<K>,
{
    let show_targets: BTreeSet<&K> =
        units.iter().filter_map(LogicUnit::show_targets).flatten().collect();

    // Fields no show unit targets are visible unconditionally.
    let mut visible: BTreeSet<K> =
        field_ids.iter().filter(|id| !show_targets.contains(id)).cloned().collect();

    loop {
        let mut changed = false;
        for unit in units {
            let Some(targets) = unit.show_targets() else {
                continue;
            };
            if targets.iter().all(|target| visible.contains(target)) {
                continue;
            }
            if unit.is_satisfied(reader, |field| visible.contains(field)) {
                for target in targets {
                    changed |= visible.insert(target.clone());
                }
            }
        }
        if !changed {
            return visible;
        }
    }
}

// ============================================================================
// SECTION: Prevent-Submit Probe
// ============================================================================

/// Returns the first prevent-submit unit satisfied by the submission.
///
/// Visibility must already be resolved via [`visible_field_ids`]; conditions
/// over hidden fields never hold.
#[must_use]
pub fn preventing_unit<'units, K, R>(
    reader: &R,
    visible: &BTreeSet<K>,
    units: &'units [LogicUnit<K>],
) -> Option<&'units LogicUnit<K>>
where
    K: Ord,
    R: ResponseReader<K>,
{
    units
        .iter()
        .filter(|unit| unit.prevent_message().is_some())
        .find(|unit| unit.is_satisfied(reader, |field| visible.contains(field)))
}
