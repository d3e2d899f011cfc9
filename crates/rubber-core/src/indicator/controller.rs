//! Transition controller: owns the current index and the markers, turns
//! index requests into hops, the main marker relocation and a notification.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use super::geometry::{Point, Rect, Size, StripGeometry};
use super::main_marker::MainMarker;
use super::marker::{Marker, MarkerLayer, MarkerPose};
use super::notify::{IndexChanged, Notifier};
use super::planner::{self, Direction};
use crate::config::{EasingType, StyleConfig};
use crate::motion::Timing;
use crate::{Error, Result};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    pub strip: Rect,
    pub page_count: usize,
    pub current_index: usize,
    /// Disc in the background color behind the main marker
    pub backdrop: MarkerPose,
    pub main: MarkerPose,
    pub markers: Vec<MarkerPose>,
}

/// Animated page indicator.
///
/// Logical state (the current index and each marker's slot) changes the
/// moment a request is accepted. Animations only lag visually and are
/// advanced with [`RubberIndicator::advance`].
#[derive(Debug)]
pub struct RubberIndicator<M: MarkerLayer = Marker> {
    page_count: usize,
    style: StyleConfig,
    easing: EasingType,
    bounds: Size,
    geometry: StripGeometry,
    current_index: usize,
    markers: Vec<M>,
    main: MainMarker,
    /// Timeline position, only moves forward
    now: Duration,
    notifier: Notifier,
}

impl RubberIndicator<Marker> {
    /// Create an indicator with `page_count` slots laid out inside `bounds`
    pub fn new(page_count: usize, style: StyleConfig, bounds: Size) -> Result<Self> {
        Self::with_markers(page_count, style, bounds)
    }
}

impl<M: MarkerLayer> RubberIndicator<M> {
    /// Like [`RubberIndicator::new`] for any marker implementation
    pub fn with_markers(page_count: usize, style: StyleConfig, bounds: Size) -> Result<Self> {
        validate_page_count(page_count)?;
        style.validate()?;

        let geometry = StripGeometry::new(bounds, page_count, &style);
        let easing = EasingType::default();
        let mut indicator = Self {
            page_count,
            main: MainMarker::new(geometry.main_center(0), easing),
            markers: Vec::new(),
            style,
            easing,
            bounds,
            geometry,
            current_index: 0,
            now: Duration::ZERO,
            notifier: Notifier::new(),
        };
        indicator.rebuild();
        Ok(indicator)
    }

    /// Easing used by the main marker relocation
    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self.main = MainMarker::new(self.main.center(), easing);
        self
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn geometry(&self) -> &StripGeometry {
        &self.geometry
    }

    /// Register the direct change callback
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.notifier.on_change(callback);
    }

    /// Subscribe to change events
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<IndexChanged> {
        self.notifier.subscribe()
    }

    /// Clamp any requested index into the page range
    pub fn clamp_index(&self, target: i64) -> usize {
        let last = self.page_count.saturating_sub(1) as i64;
        target.clamp(0, last) as usize
    }

    /// Move the active page to `target`, clamped into range.
    ///
    /// Returns `false` when the clamped target is already active; nothing
    /// is animated or emitted in that case.
    pub fn request_index(&mut self, target: i64) -> bool {
        let to = self.clamp_index(target);
        let from = self.current_index;
        let Some(direction) = Direction::between(from, to) else {
            return false;
        };

        let timing = self.motion_timing();
        let steps = planner::plan(from, to, self.markers.len());
        debug!(from, to, ?direction, hops = steps.len(), "index transition");

        for step in &steps {
            if let Some(marker) = self.markers.get_mut(step.marker) {
                marker.begin_hop(step.direction, self.now, timing);
            }
        }

        self.current_index = to;
        self.main
            .relocate(self.geometry.main_center(to), self.now, timing);

        self.notifier.emit(IndexChanged {
            previous: from,
            index: to,
        });
        true
    }

    /// Property-style setter, routed through [`RubberIndicator::request_index`]
    pub fn set_current_index(&mut self, index: i64) {
        self.request_index(index);
    }

    /// Request the page under a pointer hit; hits outside the strip are ignored
    pub fn hit(&mut self, point: Point) -> bool {
        match self.geometry.hit_index(point) {
            Some(index) => self.request_index(index),
            None => false,
        }
    }

    /// Change the number of pages. Resets to the first page and rebuilds
    /// every marker; an invalid count leaves the indicator untouched.
    pub fn set_page_count(&mut self, page_count: usize) -> Result<()> {
        validate_page_count(page_count)?;
        if page_count == self.page_count {
            return Ok(());
        }

        self.request_index(0);
        self.page_count = page_count;
        self.geometry = StripGeometry::new(self.bounds, page_count, &self.style);
        self.rebuild();
        Ok(())
    }

    /// Replace the style and rebuild every marker at the current index
    pub fn set_style(&mut self, style: StyleConfig) -> Result<()> {
        style.validate()?;
        self.geometry = StripGeometry::new(self.bounds, self.page_count, &style);
        self.style = style;
        self.rebuild();
        Ok(())
    }

    /// Move the timeline to `now` and run completion handlers that are due
    pub fn advance(&mut self, now: Duration) {
        self.now = self.now.max(now);
        for marker in &mut self.markers {
            marker.advance(self.now);
        }
        self.main.advance(self.now);
    }

    pub fn is_animating(&self) -> bool {
        self.main.is_animating() || self.markers.iter().any(|m| m.is_animating(self.now))
    }

    /// Snapshot of every disc at the current timeline position
    pub fn frame(&self) -> IndicatorFrame {
        let center = self.main.presented_center(self.now);
        let scale = self.main.scale(self.now);

        IndicatorFrame {
            strip: self.geometry.strip(),
            page_count: self.page_count,
            current_index: self.current_index,
            backdrop: MarkerPose {
                center,
                diameter: self.geometry.backdrop_diameter(),
                scale_x: 1.0,
                scale_y: 1.0,
                opacity: 1.0,
            },
            main: MarkerPose {
                center,
                diameter: self.geometry.main_diameter(),
                scale_x: scale,
                scale_y: scale,
                opacity: 1.0,
            },
            markers: self.markers.iter().map(|m| m.pose(self.now)).collect(),
        }
    }

    /// Timing for motions issued now; a zero duration applies changes instantly
    fn motion_timing(&self) -> Timing {
        let duration = self.style.animation_duration();
        if duration.is_zero() {
            Timing::instant()
        } else {
            Timing::new(duration)
        }
    }

    /// Throw away all markers and lay them out again for the current index
    fn rebuild(&mut self) {
        let index = self.current_index;
        self.markers = (0..self.page_count.saturating_sub(1))
            .map(|i| {
                let slot = if i < index { i } else { i + 1 };
                M::build(slot, &self.geometry)
            })
            .collect();
        self.main = MainMarker::new(self.geometry.main_center(index), self.easing);
        debug!(
            pages = self.page_count,
            markers = self.markers.len(),
            index,
            "markers rebuilt"
        );
    }
}

fn validate_page_count(page_count: usize) -> Result<()> {
    if page_count == 0 {
        return Err(Error::InvalidPageCount(page_count));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const BOUNDS: Size = Size::new(300.0, 100.0);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    /// Records every hop it is asked to perform
    #[derive(Debug)]
    struct RecordingMarker {
        slot: usize,
        rest: Point,
        hops: Vec<(Direction, Duration)>,
        timings: Vec<Timing>,
    }

    impl MarkerLayer for RecordingMarker {
        fn build(slot: usize, geometry: &StripGeometry) -> Self {
            Self {
                slot,
                rest: geometry.marker_center(slot),
                hops: Vec::new(),
                timings: Vec::new(),
            }
        }

        fn begin_hop(&mut self, direction: Direction, issued_at: Duration, timing: Timing) {
            self.hops.push((direction, issued_at));
            self.timings.push(timing);
            self.slot = match direction {
                Direction::Left => self.slot - 1,
                Direction::Right => self.slot + 1,
            };
        }

        fn slot(&self) -> usize {
            self.slot
        }

        fn rest_position(&self) -> Point {
            self.rest
        }

        fn advance(&mut self, _now: Duration) {}

        fn is_animating(&self, _now: Duration) -> bool {
            false
        }

        fn pose(&self, _now: Duration) -> MarkerPose {
            MarkerPose {
                center: self.rest,
                diameter: 0.0,
                scale_x: 1.0,
                scale_y: 1.0,
                opacity: 1.0,
            }
        }
    }

    fn recording(pages: usize) -> RubberIndicator<RecordingMarker> {
        RubberIndicator::with_markers(pages, StyleConfig::default(), BOUNDS).unwrap()
    }

    fn hopped(indicator: &RubberIndicator<RecordingMarker>) -> Vec<(usize, Direction)> {
        indicator
            .markers
            .iter()
            .enumerate()
            .flat_map(|(i, m)| m.hops.iter().map(move |(d, _)| (i, *d)))
            .collect()
    }

    fn collect_callbacks<M: MarkerLayer>(indicator: &mut RubberIndicator<M>) -> Arc<Mutex<Vec<usize>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        indicator.on_change(move |index| sink.lock().unwrap().push(index));
        seen
    }

    #[test]
    fn test_zero_pages_rejected() {
        let err = RubberIndicator::new(0, StyleConfig::default(), BOUNDS).unwrap_err();
        assert!(matches!(err, Error::InvalidPageCount(0)));
    }

    #[test]
    fn test_single_page_has_no_markers() {
        let mut indicator = RubberIndicator::new(1, StyleConfig::default(), BOUNDS).unwrap();
        assert!(indicator.markers.is_empty());
        assert!(!indicator.request_index(5));
        assert_eq!(indicator.current_index(), 0);
    }

    #[test]
    fn test_initial_layout() {
        let indicator = recording(5);
        let slots: Vec<usize> = indicator.markers.iter().map(|m| m.slot()).collect();
        assert_eq!(slots, vec![1, 2, 3, 4]);
        assert_eq!(indicator.main.center(), indicator.geometry().main_center(0));
    }

    #[test]
    fn test_forward_transition_scenario() {
        let mut indicator = recording(5);
        let seen = collect_callbacks(&mut indicator);
        let mut rx = indicator.subscribe();

        assert!(indicator.request_index(3));

        assert_eq!(indicator.current_index(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![3]);
        assert_eq!(rx.try_recv().unwrap(), IndexChanged { previous: 0, index: 3 });
        assert_eq!(
            hopped(&indicator),
            vec![(0, Direction::Left), (1, Direction::Left), (2, Direction::Left)]
        );
        // Main marker: strip start + 3 slots + half its own size
        let expected = indicator.geometry().strip().x + 28.0 * 3.0 + 20.0;
        assert_eq!(indicator.main.center().x, expected);
    }

    #[test]
    fn test_same_index_is_a_no_op() {
        let mut indicator = recording(5);
        indicator.request_index(2);
        let seen = collect_callbacks(&mut indicator);
        let before = hopped(&indicator).len();

        assert!(!indicator.request_index(2));
        indicator.set_current_index(2);

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(hopped(&indicator).len(), before);
    }

    #[test]
    fn test_one_to_four_and_back() {
        let mut indicator = recording(5);
        indicator.request_index(1);
        for marker in &mut indicator.markers {
            marker.hops.clear();
        }

        indicator.request_index(4);
        assert_eq!(
            hopped(&indicator),
            vec![(1, Direction::Left), (2, Direction::Left), (3, Direction::Left)]
        );
        for marker in &mut indicator.markers {
            marker.hops.clear();
        }

        indicator.request_index(1);
        assert_eq!(
            hopped(&indicator),
            vec![(1, Direction::Right), (2, Direction::Right), (3, Direction::Right)]
        );
    }

    #[test]
    fn test_clamping() {
        let mut indicator = recording(5);
        let seen = collect_callbacks(&mut indicator);

        indicator.request_index(99);
        assert_eq!(indicator.current_index(), 4);
        indicator.request_index(-7);
        assert_eq!(indicator.current_index(), 0);

        assert_eq!(*seen.lock().unwrap(), vec![4, 0]);
    }

    #[test]
    fn test_reentrant_requests_compose() {
        let mut indicator = RubberIndicator::new(5, StyleConfig::default(), BOUNDS).unwrap();
        let seen = collect_callbacks(&mut indicator);

        indicator.request_index(3);
        indicator.advance(indicator.now + ms(20));
        indicator.request_index(1);

        assert_eq!(indicator.current_index(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![3, 1]);

        let slots: Vec<usize> = indicator.markers.iter().map(|m| m.slot()).collect();
        assert_eq!(slots, vec![0, 2, 3, 4]);

        // After everything settles the drawn positions match the logical slots
        indicator.advance(ms(2000));
        assert!(!indicator.is_animating());
        let frame = indicator.frame();
        for (marker, pose) in indicator.markers.iter().zip(&frame.markers) {
            let expected = indicator.geometry().marker_center(marker.slot());
            assert!((pose.center.x - expected.x).abs() < 1e-9);
            assert!((pose.center.y - expected.y).abs() < 1e-9);
        }
        assert!((frame.main.center.x - indicator.geometry().main_center(1).x).abs() < 1e-9);
        assert_eq!(frame.main.scale_x, 1.0);
    }

    #[test]
    fn test_slots_follow_current_index() {
        let mut indicator = RubberIndicator::new(7, StyleConfig::default(), BOUNDS).unwrap();
        for target in [5, 2, 6, 0, 3, 3, -1, 10, 1] {
            indicator.request_index(target);
            let index = indicator.current_index();
            assert_eq!(index, indicator.clamp_index(target));
            for (i, marker) in indicator.markers.iter().enumerate() {
                let expected = if i < index { i } else { i + 1 };
                assert_eq!(marker.slot(), expected, "marker {} at index {}", i, index);
            }
        }
    }

    #[test]
    fn test_main_marker_pulse_mid_transition() {
        let mut indicator = RubberIndicator::new(5, StyleConfig::default(), BOUNDS).unwrap();
        indicator.request_index(2);
        indicator.advance(ms(100));

        let frame = indicator.frame();
        assert!((frame.main.scale_x - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(frame.backdrop.scale_x, 1.0);
        let halfway = indicator.geometry().main_center(0).x + 28.0;
        assert!((frame.main.center.x - halfway).abs() < 1e-9);
    }

    #[test]
    fn test_instant_style_skips_animation() {
        let style = StyleConfig {
            animation_duration_ms: 0,
            ..Default::default()
        };
        let mut indicator = RubberIndicator::new(5, style, BOUNDS).unwrap();
        indicator.request_index(3);

        assert!(!indicator.is_animating());
        let frame = indicator.frame();
        assert_eq!(frame.main.center, indicator.geometry().main_center(3));
        assert_eq!(frame.markers[0].center, indicator.geometry().marker_center(0));
    }

    #[test]
    fn test_zero_duration_issues_instant_hops() {
        let style = StyleConfig {
            animation_duration_ms: 0,
            ..Default::default()
        };
        let mut indicator: RubberIndicator<RecordingMarker> =
            RubberIndicator::with_markers(5, style, BOUNDS).unwrap();
        indicator.request_index(2);

        let timings: Vec<Timing> = indicator
            .markers
            .iter()
            .flat_map(|m| m.timings.iter().copied())
            .collect();
        assert_eq!(timings, vec![Timing::instant(), Timing::instant()]);

        let mut animated = recording(5);
        animated.request_index(1);
        assert_eq!(animated.markers[0].timings, vec![Timing::new(ms(200))]);
        assert!(!animated.markers[0].timings[0].instant);
    }

    #[test]
    fn test_hit_requests_index() {
        let mut indicator = recording(5);
        let strip = indicator.geometry().strip();

        assert!(indicator.hit(Point::new(strip.x + 28.0 * 2.0 + 5.0, strip.y + 10.0)));
        assert_eq!(indicator.current_index(), 2);

        // Past the last slot clamps to the last page
        assert!(indicator.hit(Point::new(strip.max_x() - 1.0, strip.y + 10.0)));
        assert_eq!(indicator.current_index(), 4);

        assert!(!indicator.hit(Point::new(strip.x - 5.0, strip.y + 10.0)));
    }

    #[test]
    fn test_page_count_change_resets_and_rebuilds() {
        let mut indicator = recording(5);
        indicator.request_index(3);
        let seen = collect_callbacks(&mut indicator);

        indicator.set_page_count(8).unwrap();
        assert_eq!(indicator.page_count(), 8);
        assert_eq!(indicator.current_index(), 0);
        assert_eq!(indicator.markers.len(), 7);
        assert!(indicator.markers.iter().all(|m| m.hops.is_empty()));
        assert_eq!(*seen.lock().unwrap(), vec![0]);

        // Unchanged count is a no-op, zero is rejected without side effects
        indicator.set_page_count(8).unwrap();
        assert!(indicator.set_page_count(0).is_err());
        assert_eq!(indicator.page_count(), 8);
        assert_eq!(*seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn test_style_change_keeps_index() {
        let mut indicator = recording(5);
        indicator.request_index(2);

        let style = StyleConfig {
            small_marker_size: 10.0,
            ..Default::default()
        };
        indicator.set_style(style).unwrap();

        assert_eq!(indicator.current_index(), 2);
        assert_eq!(indicator.style.small_marker_size, 10.0);
        let slots: Vec<usize> = indicator.markers.iter().map(|m| m.slot()).collect();
        assert_eq!(slots, vec![0, 1, 3, 4]);
        assert_eq!(indicator.main.center(), indicator.geometry().main_center(2));

        let bad = StyleConfig {
            main_marker_size: 0.0,
            ..Default::default()
        };
        assert!(indicator.set_style(bad).is_err());
        assert_eq!(indicator.style.small_marker_size, 10.0);
    }

    #[test]
    fn test_timeline_never_goes_back() {
        let mut indicator = recording(3);
        indicator.advance(ms(500));
        indicator.advance(ms(100));
        assert_eq!(indicator.now, ms(500));
    }
}
