//! Row order synchronization between the store and the host document.

use std::collections::HashMap;

use super::ElementRef;
use super::RowHost;

/// One element move: place `element` right before `anchor` (or last).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub element: ElementRef,
    pub anchor: Option<ElementRef>,
}

/// Moves turning one document order into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Moves in application order.
    pub moves: Vec<Move>,
    /// The visible order of the target elements differs.
    pub changed: bool,
}

impl SyncPlan {
    /// Applies the moves to a host.
    pub fn apply(&self, host: &mut dyn RowHost) {
        for m in &self.moves {
            host.move_before(m.element, m.anchor);
        }
    }
}

/// Plans the fewest moves that bring `current` into the order of `target`.
///
/// Elements sitting on a longest increasing run of current positions stay
/// put; every other target element is moved once. Moves are listed from the
/// last target element to the first, each anchored on its successor, so
/// applying them in order yields `target`. Elements of `current` that are not
/// in `target` are left alone.
pub fn plan_moves(current: &[ElementRef], target: &[ElementRef]) -> SyncPlan {
    let positions: HashMap<ElementRef, usize> =
        current.iter().enumerate().map(|(i, e)| (*e, i)).collect();
    let sequence: Vec<Option<usize>> = target.iter().map(|e| positions.get(e).copied()).collect();

    let keep = longest_increasing(&sequence);
    let changed = keep.iter().any(|k| !k);

    let mut moves = Vec::new();
    let mut anchor = None;
    for (i, element) in target.iter().enumerate().rev() {
        if !keep[i] {
            moves.push(Move {
                element: *element,
                anchor,
            });
        }
        anchor = Some(*element);
    }

    SyncPlan { moves, changed }
}

/// Brings the host body into `target` order.
///
/// Returns `true` if any visible reorder happened.
pub fn sync_order(host: &mut dyn RowHost, target: &[ElementRef]) -> bool {
    let plan = plan_moves(&host.body_children(), target);
    if plan.changed {
        log::debug!("Reordering {} of {} rows", plan.moves.len(), target.len());
        plan.apply(host);
    }
    plan.changed
}

/// Marks the members of one longest strictly increasing subsequence.
///
/// `None` entries never take part.
fn longest_increasing(sequence: &[Option<usize>]) -> Vec<bool> {
    // tails[k]: index into `sequence` of the smallest tail of a run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; sequence.len()];

    for (i, value) in sequence.iter().enumerate() {
        let Some(value) = *value else { continue };
        let slot = tails.partition_point(|&t| sequence[t].is_some_and(|v| v < value));
        if slot > 0 {
            previous[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut keep = vec![false; sequence.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        keep[i] = true;
        cursor = previous[i];
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn els(raw: &[u64]) -> Vec<ElementRef> {
        raw.iter().copied().map(ElementRef::new).collect()
    }

    fn apply(current: &[ElementRef], plan: &SyncPlan) -> Vec<ElementRef> {
        let mut out = current.to_vec();
        for m in &plan.moves {
            out.retain(|e| *e != m.element);
            let at = m
                .anchor
                .and_then(|a| out.iter().position(|e| *e == a))
                .unwrap_or(out.len());
            out.insert(at, m.element);
        }
        out
    }

    #[test]
    fn test_same_order_is_unchanged() {
        let order = els(&[1, 2, 3]);
        let plan = plan_moves(&order, &order);
        assert!(!plan.changed);
        assert!(plan.moves.is_empty());
    }

    #[test]
    fn test_single_move() {
        let current = els(&[1, 2, 3, 4]);
        let target = els(&[2, 3, 4, 1]);
        let plan = plan_moves(&current, &target);
        assert!(plan.changed);
        assert_eq!(plan.moves.len(), 1);
        assert_eq!(apply(&current, &plan), target);
    }

    #[test]
    fn test_reverse_moves_all_but_one() {
        let current = els(&[1, 2, 3, 4, 5]);
        let target = els(&[5, 4, 3, 2, 1]);
        let plan = plan_moves(&current, &target);
        assert_eq!(plan.moves.len(), 4);
        assert_eq!(apply(&current, &plan), target);
    }

    #[test]
    fn test_interleaved_order() {
        let current = els(&[1, 2, 3, 4, 5, 6]);
        let target = els(&[3, 1, 6, 2, 5, 4]);
        let plan = plan_moves(&current, &target);
        assert_eq!(apply(&current, &plan), target);
        // 1, 2, 4 (or 1, 2, 5) stay
        assert_eq!(plan.moves.len(), 3);
    }

    #[test]
    fn test_new_element_is_inserted() {
        let current = els(&[1, 2]);
        let target = els(&[1, 9, 2]);
        let plan = plan_moves(&current, &target);
        assert!(plan.changed);
        assert_eq!(apply(&current, &plan), target);
    }

    #[test]
    fn test_untracked_elements_do_not_count_as_change() {
        let current = els(&[1, 7, 2]);
        let target = els(&[1, 2]);
        let plan = plan_moves(&current, &target);
        assert!(!plan.changed);
    }
}
