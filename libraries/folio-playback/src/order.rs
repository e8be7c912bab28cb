//! Play order resolution
//!
//! Pure functions that decide which catalog index plays next or previous
//! given the current index, catalog size, optional shuffle order and repeat
//! mode. Nothing here holds state; the shuffle order is owned by the caller.

use crate::types::RepeatMode;
use rand::seq::SliceRandom;
use rand::Rng;

/// Outcome of asking for the next track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextDecision {
    /// Play the track at this catalog index
    AdvanceTo(usize),

    /// Restart the current track (repeat one)
    RestartCurrent,

    /// End of order reached with repeat off
    StopAtEnd,
}

/// Build a shuffled play order over `0..len`
///
/// Fisher-Yates over every index except `current`, then `current` is placed
/// first so enabling shuffle never moves the playing track. A `current` that
/// is `None` or out of range is ignored and the whole range is shuffled.
pub fn shuffle_order<R: Rng + ?Sized>(len: usize, current: Option<usize>, rng: &mut R) -> Vec<usize> {
    let current = current.filter(|&c| c < len);

    let mut indices: Vec<usize> = (0..len).filter(|&i| Some(i) != current).collect();
    indices.shuffle(rng);

    if let Some(current) = current {
        indices.insert(0, current);
    }

    indices
}

/// Decide what follows `current`
///
/// Returns `None` for an empty catalog. `current` past the end is clamped to
/// the last index. A shuffle order that is not a permutation of `0..len` is
/// ignored in favour of linear order.
pub fn next(
    current: usize,
    len: usize,
    shuffle_order: Option<&[usize]>,
    repeat: RepeatMode,
) -> Option<NextDecision> {
    if len == 0 {
        return None;
    }

    if repeat == RepeatMode::One {
        return Some(NextDecision::RestartCurrent);
    }

    let current = current.min(len - 1);
    let order = usable_order(shuffle_order, len);
    let slot = slot_of(current, order);

    let decision = if slot + 1 < len {
        NextDecision::AdvanceTo(index_at(slot + 1, order))
    } else if repeat == RepeatMode::All {
        NextDecision::AdvanceTo(index_at(0, order))
    } else {
        NextDecision::StopAtEnd
    };

    Some(decision)
}

/// Decide what precedes `current`
///
/// Wraps to the end of the order under repeat all, otherwise clamps to the
/// start. Never reports a stop. Returns `None` for an empty catalog.
pub fn previous(
    current: usize,
    len: usize,
    shuffle_order: Option<&[usize]>,
    repeat: RepeatMode,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let current = current.min(len - 1);
    let order = usable_order(shuffle_order, len);
    let slot = slot_of(current, order);

    let target = if slot > 0 {
        slot - 1
    } else if repeat == RepeatMode::All {
        len - 1
    } else {
        0
    };

    Some(index_at(target, order))
}

fn usable_order(order: Option<&[usize]>, len: usize) -> Option<&[usize]> {
    order.filter(|o| o.len() == len && !o.is_empty())
}

fn slot_of(index: usize, order: Option<&[usize]>) -> usize {
    match order {
        Some(order) => order.iter().position(|&i| i == index).unwrap_or(0),
        None => index,
    }
}

fn index_at(slot: usize, order: Option<&[usize]>) -> usize {
    match order {
        Some(order) => order[slot],
        None => slot,
    }
}
