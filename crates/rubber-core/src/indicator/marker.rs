//! Small marker: logical slot, hop arc, squash pulse and settle shake.

use std::f64::consts::PI;
use std::time::Duration;

use tracing::trace;

use super::geometry::{Point, StripGeometry};
use super::planner::Direction;
use crate::config::EasingType;
use crate::motion::{progress, Keyframes, Timing};

/// Vertical scale over a hop, flattest at the middle
const SQUASH: Keyframes<'static> = Keyframes::evenly(&[1.0, 0.5, 1.0]);

/// Gap between the end of a hop and the start of its settle shake
const SHAKE_DELAY: Duration = Duration::from_millis(50);
/// Length of one shake oscillation
const SHAKE_CYCLE: Duration = Duration::from_millis(20);
const SHAKE_REPEATS: u32 = 6;
/// One oscillation at full amplitude; later repeats are scaled down
const SHAKE: Keyframes<'static> =
    Keyframes::evenly(&[0.0, 3.0, -3.0, 0.0]).with_segment_easing(EasingType::EaseInOut);

/// What a renderer needs to draw one disc at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPose {
    pub center: Point,
    pub diameter: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub opacity: f64,
}

/// Capability interface the transition controller drives.
///
/// The controller only starts hops and reads positions; how a marker moves
/// between those two points belongs to the implementation.
pub trait MarkerLayer {
    /// Create a marker resting in visual slot `slot`
    fn build(slot: usize, geometry: &StripGeometry) -> Self
    where
        Self: Sized;

    /// Start a one-slot hop. The logical slot changes immediately.
    fn begin_hop(&mut self, direction: Direction, issued_at: Duration, timing: Timing);

    /// Visual slot the marker rests in once every issued hop has settled
    fn slot(&self) -> usize;

    /// Resting position matching [`MarkerLayer::slot`]
    fn rest_position(&self) -> Point;

    /// Run completion handlers for everything that finished by `now`
    fn advance(&mut self, now: Duration);

    fn is_animating(&self, now: Duration) -> bool;

    fn pose(&self, now: Duration) -> MarkerPose;
}

/// A hop in flight. The direction and origin belong to this hop alone, so
/// overlapping hops on the same marker settle independently.
#[derive(Debug, Clone, Copy)]
struct Hop {
    direction: Direction,
    /// Logical resting position when the hop was issued
    origin: Point,
    issued_at: Duration,
    timing: Timing,
}

impl Hop {
    fn end(&self) -> Duration {
        self.timing.end(self.issued_at)
    }

    /// Displacement along the half circle, relative to `origin`
    fn arc_offset(&self, radius: f64, now: Duration) -> Point {
        let t = progress(self.timing.start(self.issued_at), now, self.timing.duration);
        // Paced: the angle advances linearly, the marker dips below the strip
        let (cx, angle) = match self.direction {
            Direction::Left => (-radius, PI * t),
            Direction::Right => (radius, PI * (1.0 - t)),
        };
        Point::new(cx + radius * angle.cos(), radius * angle.sin())
    }

    fn squash(&self, now: Duration) -> f64 {
        let t = progress(self.timing.start(self.issued_at), now, self.timing.duration);
        SQUASH.sample(t)
    }
}

/// Settle shake queued by a finished hop
#[derive(Debug, Clone, Copy)]
struct Shake {
    issued_at: Duration,
    timing: Timing,
}

impl Shake {
    fn after(hop_end: Duration) -> Self {
        Self {
            issued_at: hop_end,
            timing: Timing::new(SHAKE_CYCLE * SHAKE_REPEATS).with_delay(SHAKE_DELAY),
        }
    }

    fn end(&self) -> Duration {
        self.timing.end(self.issued_at)
    }

    fn offset(&self, now: Duration) -> f64 {
        let start = self.timing.start(self.issued_at);
        if now < start || now >= self.end() {
            return 0.0;
        }
        let elapsed = (now - start).as_secs_f64();
        let cycle = SHAKE_CYCLE.as_secs_f64();
        let repeat = (elapsed / cycle).floor();
        let local = (elapsed - repeat * cycle) / cycle;
        let decay = 1.0 - repeat / SHAKE_REPEATS as f64;

        SHAKE.sample(local) * decay
    }
}

#[derive(Debug, Clone)]
pub struct Marker {
    slot: usize,
    /// Logical resting position, follows `slot`
    target: Point,
    /// Presented resting position, snapped when a hop completes
    rest: Point,
    diameter: f64,
    move_radius: f64,
    opacity: f64,
    hops: Vec<Hop>,
    shakes: Vec<Shake>,
}

impl Marker {
    pub fn new(slot: usize, geometry: &StripGeometry) -> Self {
        let position = geometry.marker_center(slot);
        Self {
            slot,
            target: position,
            rest: position,
            diameter: geometry.small_diameter(),
            move_radius: geometry.move_radius(),
            opacity: 1.0,
            hops: Vec::new(),
            shakes: Vec::new(),
        }
    }

    /// Completion handler for one hop, applied with no animation
    fn settle(&mut self, hop: Hop) {
        self.rest = hop.origin.offset(hop.direction.sign() * self.move_radius, 0.0);
        self.opacity = 1.0;
        if !hop.timing.instant {
            self.shakes.push(Shake::after(hop.end()));
        }
        trace!(slot = self.slot, direction = ?hop.direction, x = self.rest.x, "hop settled");
    }
}

impl MarkerLayer for Marker {
    fn build(slot: usize, geometry: &StripGeometry) -> Self {
        Self::new(slot, geometry)
    }

    fn begin_hop(&mut self, direction: Direction, issued_at: Duration, timing: Timing) {
        let hop = Hop {
            direction,
            origin: self.target,
            issued_at,
            timing,
        };

        self.slot = match direction {
            Direction::Left => self.slot.saturating_sub(1),
            Direction::Right => self.slot + 1,
        };
        self.target = hop.origin.offset(direction.sign() * self.move_radius, 0.0);

        if timing.instant {
            self.settle(hop);
        } else {
            trace!(slot = self.slot, ?direction, "hop started");
            self.hops.push(hop);
        }
    }

    fn slot(&self) -> usize {
        self.slot
    }

    fn rest_position(&self) -> Point {
        self.target
    }

    fn advance(&mut self, now: Duration) {
        let mut finished: Vec<Hop> = Vec::new();
        self.hops.retain(|hop| {
            if hop.end() <= now {
                finished.push(*hop);
                false
            } else {
                true
            }
        });
        finished.sort_by_key(Hop::end);
        for hop in finished {
            self.settle(hop);
        }

        self.shakes.retain(|shake| shake.end() > now);
    }

    fn is_animating(&self, now: Duration) -> bool {
        !self.hops.is_empty() || self.shakes.iter().any(|shake| shake.end() > now)
    }

    fn pose(&self, now: Duration) -> MarkerPose {
        let radius = self.move_radius / 2.0;
        let mut center = self.rest;
        let mut scale_y = 1.0;

        for hop in &self.hops {
            let offset = hop.arc_offset(radius, now);
            center = center.offset(offset.x, offset.y);
            scale_y *= hop.squash(now);
        }
        for shake in &self.shakes {
            center = center.offset(0.0, shake.offset(now));
        }

        MarkerPose {
            center,
            diameter: self.diameter,
            scale_x: 1.0,
            scale_y,
            opacity: self.opacity,
        }
    }
}
