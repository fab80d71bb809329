// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roving focus over the live option list.
//!
//! The option list itself comes from [`OptionSource`](crate::OptionSource) and is re-read on
//! every step. These helpers only do the index arithmetic.

use crate::types::NavStep;

/// Index focused after one `step` from `current` in a list of `len` options.
///
/// `None` as `current` means nothing is focused yet. The result is always in `0..len`,
/// or `None` when the list is empty. Stepping is clamped, never wrapping: the first
/// `Next` lands on the first option, `Prev` before the first option stays on it, and a
/// stale index past the end (options were removed) is pulled back to the last one.
///
/// ```
/// use understory_disclosure::{NavStep, step_index};
///
/// assert_eq!(step_index(None, NavStep::Next, 3), Some(0));
/// assert_eq!(step_index(Some(2), NavStep::Next, 3), Some(2));
/// assert_eq!(step_index(Some(0), NavStep::Prev, 3), Some(0));
/// assert_eq!(step_index(Some(1), NavStep::Next, 0), None);
/// ```
pub fn step_index(current: Option<usize>, step: NavStep, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    let next = match (step, current) {
        (NavStep::Next, Some(i)) => i.saturating_add(1),
        (NavStep::Prev, Some(i)) => i.saturating_sub(1),
        (_, None) => 0,
    };
    Some(next.min(last))
}

/// Option that receives focus after one `step`, with its index.
pub fn focus_target<K: Copy>(
    options: &[K],
    current: Option<usize>,
    step: NavStep,
) -> Option<(usize, K)> {
    let index = step_index(current, step, options.len())?;
    options.get(index).map(|&k| (index, k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_and_clamps() {
        let mut idx = None;
        let mut seen = [0_usize; 4];
        for slot in &mut seen {
            idx = step_index(idx, NavStep::Next, 3);
            *slot = idx.unwrap();
        }
        assert_eq!(seen, [0, 1, 2, 2]);
    }

    #[test]
    fn prev_from_nothing_lands_on_first() {
        assert_eq!(step_index(None, NavStep::Prev, 3), Some(0));
        assert_eq!(step_index(Some(2), NavStep::Prev, 3), Some(1));
    }

    #[test]
    fn stale_index_is_pulled_back_in_range() {
        // Five options became two while index 4 was focused.
        assert_eq!(step_index(Some(4), NavStep::Prev, 2), Some(1));
        assert_eq!(step_index(Some(4), NavStep::Next, 2), Some(1));
    }

    #[test]
    fn empty_list_has_no_target() {
        assert_eq!(step_index(None, NavStep::Next, 0), None);
        assert_eq!(step_index(Some(0), NavStep::Prev, 0), None);
        assert_eq!(focus_target::<u32>(&[], None, NavStep::Next), None);
    }

    #[test]
    fn single_option_is_sticky() {
        assert_eq!(step_index(None, NavStep::Next, 1), Some(0));
        assert_eq!(step_index(Some(0), NavStep::Next, 1), Some(0));
        assert_eq!(step_index(Some(0), NavStep::Prev, 1), Some(0));
    }

    #[test]
    fn focus_target_pairs_index_and_option() {
        let options = [10_u32, 20, 30];
        assert_eq!(focus_target(&options, None, NavStep::Next), Some((0, 10)));
        assert_eq!(focus_target(&options, Some(0), NavStep::Next), Some((1, 20)));
        assert_eq!(focus_target(&options, Some(1), NavStep::Prev), Some((0, 10)));
    }
}
