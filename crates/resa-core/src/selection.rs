//! Seat selection state and toggle policy.
//!
//! Owned by the calling UI layer; the seat coordinate engine never
//! mutates it. Selection holds linear seat numbers in the order they
//! were picked, which is what makes eviction of the oldest pick
//! well defined.

use serde::{Deserialize, Serialize};

/// What to do when toggling a new seat would exceed `max_selectable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Refuse the new seat; the selection is unchanged.
    Reject,
    /// Drop the oldest selected seat and add the new one.
    EvictOldest,
}

/// Result of a toggle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Rejected by [`OverflowPolicy::Reject`] at the cap.
    Rejected,
    /// Added after evicting the oldest pick under
    /// [`OverflowPolicy::EvictOldest`].
    Evicted { evicted: u32 },
    /// The seat is occupied or held by someone else; not selectable.
    Unavailable,
}

/// An ordered set of selected linear seat numbers, capped at
/// `max_selectable`.
#[derive(Debug, Clone)]
pub struct SeatSelection {
    seats: Vec<u32>,
    max_selectable: usize,
    policy: OverflowPolicy,
}

impl SeatSelection {
    /// Empty selection with the default policy (evict the oldest pick).
    pub fn new(max_selectable: usize) -> Self {
        Self::with_policy(max_selectable, OverflowPolicy::EvictOldest)
    }

    pub fn with_policy(max_selectable: usize, policy: OverflowPolicy) -> Self {
        Self {
            seats: Vec::new(),
            max_selectable,
            policy,
        }
    }

    /// Toggle a seat. `unavailable` reports seats occupied or reserved
    /// by others; those are refused before the overflow policy applies.
    pub fn toggle(&mut self, num: u32, unavailable: impl Fn(u32) -> bool) -> ToggleOutcome {
        if let Some(pos) = self.seats.iter().position(|&n| n == num) {
            self.seats.remove(pos);
            return ToggleOutcome::Removed;
        }
        if unavailable(num) {
            return ToggleOutcome::Unavailable;
        }
        if self.seats.len() >= self.max_selectable {
            return match self.policy {
                OverflowPolicy::Reject => ToggleOutcome::Rejected,
                OverflowPolicy::EvictOldest => {
                    let evicted = self.seats.remove(0);
                    self.seats.push(num);
                    ToggleOutcome::Evicted { evicted }
                }
            };
        }
        self.seats.push(num);
        ToggleOutcome::Added
    }

    pub fn contains(&self, num: u32) -> bool {
        self.seats.contains(&num)
    }

    /// Selected seats in pick order.
    pub fn seats(&self) -> &[u32] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }
}
