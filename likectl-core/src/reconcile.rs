//! Membership reconciliation
//!
//! Pure set difference between candidate ids and the ids already in a
//! collection. Order of the candidates is preserved so progress reporting and
//! tests stay deterministic.

use std::collections::HashSet;

use crate::model::CompanyId;

/// Both halves of a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Candidates that are not yet members, in input order
    pub to_insert: Vec<CompanyId>,
    /// Candidates that were already members, in input order
    pub already_members: Vec<CompanyId>,
}

/// Return the candidates not present in `existing`, in input order.
///
/// A candidate repeated within one call is emitted once (first occurrence);
/// later repeats are dropped so a single batch never yields two rows for the
/// same company.
pub fn reconcile(candidates: &[CompanyId], existing: &HashSet<CompanyId>) -> Vec<CompanyId> {
    partition(candidates, existing).to_insert
}

/// Split candidates into ids to insert and ids that are already members.
pub fn partition(candidates: &[CompanyId], existing: &HashSet<CompanyId>) -> Reconciliation {
    let mut seen = HashSet::with_capacity(candidates.len());
    let mut result = Reconciliation::default();

    for &id in candidates {
        if existing.contains(&id) {
            result.already_members.push(id);
        } else if seen.insert(id) {
            result.to_insert.push(id);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i32]) -> Vec<CompanyId> {
        raw.iter().copied().map(CompanyId).collect()
    }

    fn set(raw: &[i32]) -> HashSet<CompanyId> {
        raw.iter().copied().map(CompanyId).collect()
    }

    #[test]
    fn skips_existing_members() {
        let result = reconcile(&ids(&[1, 2, 3]), &set(&[2]));
        assert_eq!(result, ids(&[1, 3]));
    }

    #[test]
    fn empty_candidates() {
        assert!(reconcile(&[], &set(&[1, 2])).is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let result = reconcile(&ids(&[9, 4, 7, 1]), &set(&[7]));
        assert_eq!(result, ids(&[9, 4, 1]));
    }

    #[test]
    fn repeated_candidate_emitted_once() {
        let result = reconcile(&ids(&[5, 5, 6, 5]), &HashSet::new());
        assert_eq!(result, ids(&[5, 6]));
    }

    #[test]
    fn unknown_ids_are_not_filtered() {
        let result = reconcile(&ids(&[-1, 0, 999_999]), &HashSet::new());
        assert_eq!(result, ids(&[-1, 0, 999_999]));
    }

    #[test]
    fn partition_reports_both_halves() {
        let result = partition(&ids(&[1, 2, 3, 2]), &set(&[2]));
        assert_eq!(result.to_insert, ids(&[1, 3]));
        assert_eq!(result.already_members, ids(&[2, 2]));
    }
}
