//! Dense ordering of projects within one sibling group.
//!
//! `order_index` values within a sibling group are kept dense and
//! contiguous (`0..n-1`). Every operation here is a full rewrite of the
//! group's indices rather than a delta patch: sibling groups hold tens
//! of items at most, so the rewrite stays cheap and the invariant stays
//! obvious.

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::types::ProjectId;

use super::model::Project;

/// A single `order_index` assignment produced by an ordering operation.
pub type OrderAssignment = (ProjectId, i32);

/// Move the item at `from` to position `to` within one sibling group and
/// reassign `order_index = position` for the whole resulting sequence.
///
/// The group must already be sorted the way it is displayed. Both
/// indices are validated against the group bounds.
pub fn reorder(group: &[Project], from: usize, to: usize) -> AppResult<Vec<OrderAssignment>> {
    if from >= group.len() {
        return Err(AppError::validation(format!(
            "Source position {from} is out of bounds for a group of {}",
            group.len()
        )));
    }
    if to >= group.len() {
        return Err(AppError::validation(format!(
            "Target position {to} is out of bounds for a group of {}",
            group.len()
        )));
    }

    let mut ids: Vec<ProjectId> = group.iter().map(|p| p.id).collect();
    let moved = ids.remove(from);
    ids.insert(to, moved);

    Ok(ids
        .into_iter()
        .enumerate()
        .map(|(position, id)| (id, position as i32))
        .collect())
}

/// Reassign `order_index = position` for the group in its current order.
///
/// Used after a project leaves or joins a sibling group so that neither
/// the source nor the destination group is left with gaps.
pub fn renumber(group: &[Project]) -> Vec<OrderAssignment> {
    group
        .iter()
        .enumerate()
        .map(|(position, p)| (p.id, position as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::model::TitleStyle;
    use chrono::Utc;

    fn group_of(n: usize) -> Vec<Project> {
        (0..n)
            .map(|i| Project {
                id: ProjectId::new(),
                name: format!("Project {i}"),
                slug: format!("project-{i}"),
                is_published: false,
                order_index: i as i32,
                is_collection: false,
                parent_id: None,
                description_cs: None,
                description_en: None,
                main_image_url: None,
                title_style: TitleStyle::default(),
                created_at: Utc::now(),
            })
            .collect()
    }

    fn assert_dense(assignments: &[OrderAssignment]) {
        let mut indices: Vec<i32> = assignments.iter().map(|(_, idx)| *idx).collect();
        indices.sort_unstable();
        let expected: Vec<i32> = (0..assignments.len() as i32).collect();
        assert_eq!(indices, expected, "order_index values must be 0..n-1");
    }

    #[test]
    fn test_reorder_moves_forward() {
        let group = group_of(4);
        let assignments = reorder(&group, 0, 2).expect("in bounds");

        assert_dense(&assignments);
        let position_of = |id: ProjectId| assignments.iter().find(|(a, _)| *a == id).unwrap().1;
        assert_eq!(position_of(group[0].id), 2);
        assert_eq!(position_of(group[1].id), 0);
        assert_eq!(position_of(group[2].id), 1);
        assert_eq!(position_of(group[3].id), 3);
    }

    #[test]
    fn test_reorder_moves_backward() {
        let group = group_of(3);
        let assignments = reorder(&group, 2, 0).expect("in bounds");

        assert_dense(&assignments);
        assert_eq!(assignments[0], (group[2].id, 0));
        assert_eq!(assignments[1], (group[0].id, 1));
        assert_eq!(assignments[2], (group[1].id, 2));
    }

    #[test]
    fn test_reorder_to_same_position_is_identity() {
        let group = group_of(3);
        let assignments = reorder(&group, 1, 1).expect("in bounds");
        for (i, p) in group.iter().enumerate() {
            assert_eq!(assignments[i], (p.id, i as i32));
        }
    }

    #[test]
    fn test_reorder_rejects_out_of_bounds() {
        let group = group_of(2);
        assert!(reorder(&group, 5, 0).is_err());
        assert!(reorder(&group, 0, 5).is_err());
    }

    #[test]
    fn test_renumber_closes_gaps() {
        let mut group = group_of(3);
        group[0].order_index = 2;
        group[1].order_index = 5;
        group[2].order_index = 9;

        let assignments = renumber(&group);
        assert_dense(&assignments);
        assert_eq!(assignments[0].1, 0);
        assert_eq!(assignments[2].1, 2);
    }

    #[test]
    fn test_renumber_empty_group() {
        assert!(renumber(&[]).is_empty());
    }
}
