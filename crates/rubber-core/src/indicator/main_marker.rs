//! The large marker standing on the active page.

use std::time::Duration;

use super::geometry::Point;
use crate::config::EasingType;
use crate::motion::{lerp, progress, EasingTypeExt, Keyframes, Timing};

/// Uniform scale over a relocation, smallest at the middle of the move
const PULSE: Keyframes<'static> = Keyframes::evenly(&[1.0, 1.0 / 3.0, 1.0]);

#[derive(Debug, Clone, Copy)]
struct Relocation {
    from_x: f64,
    to_x: f64,
    issued_at: Duration,
    timing: Timing,
}

impl Relocation {
    fn progress(&self, now: Duration) -> f64 {
        progress(self.timing.start(self.issued_at), now, self.timing.duration)
    }
}

#[derive(Debug, Clone)]
pub struct MainMarker {
    /// Settled center for the current index
    center: Point,
    easing: EasingType,
    relocation: Option<Relocation>,
}

impl MainMarker {
    pub fn new(center: Point, easing: EasingType) -> Self {
        Self {
            center,
            easing,
            relocation: None,
        }
    }

    /// Center once the relocation in flight has finished
    pub fn center(&self) -> Point {
        self.center
    }

    /// Move to `target`, starting from wherever the marker is drawn at `now`.
    ///
    /// The scale pulse shares the relocation's timing, so its smallest
    /// point coincides with the middle of the move.
    pub fn relocate(&mut self, target: Point, now: Duration, timing: Timing) {
        let from_x = self.presented_x(now);
        self.center = target;

        self.relocation = if timing.instant {
            None
        } else {
            Some(Relocation {
                from_x,
                to_x: target.x,
                issued_at: now,
                timing,
            })
        };
    }

    /// Drop the relocation once it has finished
    pub fn advance(&mut self, now: Duration) {
        if let Some(relocation) = self.relocation {
            if relocation.timing.end(relocation.issued_at) <= now {
                self.relocation = None;
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.relocation.is_some()
    }

    pub fn presented_x(&self, now: Duration) -> f64 {
        match self.relocation {
            Some(relocation) => {
                let t = self.easing.apply(relocation.progress(now));
                lerp(relocation.from_x, relocation.to_x, t)
            }
            None => self.center.x,
        }
    }

    /// Presented center at `now`
    pub fn presented_center(&self, now: Duration) -> Point {
        Point::new(self.presented_x(now), self.center.y)
    }

    /// Uniform scale of the pulse at `now`
    pub fn scale(&self, now: Duration) -> f64 {
        match self.relocation {
            Some(relocation) => PULSE.sample(relocation.progress(now)),
            None => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_relocation_and_pulse() {
        let mut main = MainMarker::new(Point::new(10.0, 5.0), EasingType::Linear);
        main.relocate(Point::new(94.0, 5.0), Duration::ZERO, Timing::new(ms(200)));

        assert_eq!(main.center(), Point::new(94.0, 5.0));
        assert!((main.presented_x(ms(100)) - 52.0).abs() < 1e-9);
        assert!((main.scale(ms(100)) - 1.0 / 3.0).abs() < 1e-9);
        assert!((main.scale(ms(0)) - 1.0).abs() < 1e-9);

        main.advance(ms(200));
        assert!(!main.is_animating());
        assert_eq!(main.presented_center(ms(200)), Point::new(94.0, 5.0));
        assert_eq!(main.scale(ms(200)), 1.0);
    }

    #[test]
    fn test_retarget_starts_from_presented_position() {
        let mut main = MainMarker::new(Point::new(0.0, 0.0), EasingType::Linear);
        main.relocate(Point::new(100.0, 0.0), Duration::ZERO, Timing::new(ms(200)));
        main.relocate(Point::new(0.0, 0.0), ms(100), Timing::new(ms(200)));

        // Reversal begins at x = 50, not at the old target
        assert!((main.presented_x(ms(100)) - 50.0).abs() < 1e-9);
        assert!((main.presented_x(ms(200)) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_instant_relocation() {
        let mut main = MainMarker::new(Point::new(0.0, 0.0), EasingType::Cubic);
        main.relocate(Point::new(56.0, 0.0), ms(10), Timing::instant());
        assert!(!main.is_animating());
        assert_eq!(main.presented_x(ms(10)), 56.0);
    }
}
