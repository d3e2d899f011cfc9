//! Turns an index change into the ordered list of one-slot hops.

use serde::Serialize;

/// Travel direction of a hopping small marker.
///
/// Small markers move opposite to the main marker: moving to a higher index
/// makes the crossed markers hop `Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Direction of a transition, `None` when nothing moves
    pub fn between(from: usize, to: usize) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Left),
            std::cmp::Ordering::Less => Some(Direction::Right),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn is_left(self) -> bool {
        matches!(self, Direction::Left)
    }

    /// Sign of the horizontal displacement
    #[inline]
    pub fn sign(self) -> f64 {
        if self.is_left() {
            -1.0
        } else {
            1.0
        }
    }
}

/// One marker hop inside a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MotionStep {
    /// Index of the small marker that hops
    pub marker: usize,
    pub direction: Direction,
    /// Position of this step in the plan
    pub ordinal: usize,
}

/// Plan the hops for moving the active page from `from` to `to`.
///
/// Every slot boundary crossed produces exactly one hop. Moving forward,
/// boundary `i` in `from+1..=to` hops marker `i-1`; moving backward,
/// boundary `i` in `to..=from-1` hops marker `i`. Both indices must already
/// be clamped to the page range; `from == to` yields an empty plan.
pub fn plan(from: usize, to: usize, marker_count: usize) -> Vec<MotionStep> {
    let Some(direction) = Direction::between(from, to) else {
        return Vec::new();
    };

    let boundaries = if direction.is_left() {
        (from + 1)..=to
    } else {
        to..=(from - 1)
    };

    boundaries
        .map(|boundary| if direction.is_left() { boundary - 1 } else { boundary })
        .filter(|&marker| marker < marker_count)
        .enumerate()
        .map(|(ordinal, marker)| MotionStep {
            marker,
            direction,
            ordinal,
        })
        .collect()
}
