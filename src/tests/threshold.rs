use super::ThresholdTracker;
use crate::geometry::ScrollMetrics;

fn metrics(scroll_top: f64, viewport_height: f64, document_height: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top,
        viewport_height,
        document_height,
    }
}

#[test]
fn test_starts_at_forward_resting_line() {
    let tracker = ThresholdTracker::new(150.0, 300.0);
    assert!((tracker.value() - 150.0).abs() < f64::EPSILON);
    assert!(tracker.last_scroll().abs() < f64::EPSILON);
}

#[test]
fn test_scrolling_down_never_increases_far_from_bottom() {
    let mut tracker = ThresholdTracker::new(150.0, 300.0);
    // Get the line up to its reverse resting point first.
    tracker.update(metrics(5000.0, 800.0, 10_000.0));
    tracker.update(metrics(4800.0, 800.0, 10_000.0));
    assert!((tracker.value() - 300.0).abs() < f64::EPSILON);

    let mut previous = tracker.value();
    for step in 1..=10 {
        let snapshot = tracker.update(metrics(4800.0 + f64::from(step) * 30.0, 800.0, 10_000.0));
        assert!(snapshot.scrolling_down);
        assert!(
            snapshot.threshold <= previous,
            "threshold rose from {previous} to {}",
            snapshot.threshold
        );
        assert!(snapshot.threshold >= 150.0, "fell below resting line");
        previous = snapshot.threshold;
    }
    assert!((previous - 150.0).abs() < f64::EPSILON);
}

#[test]
fn test_scrolling_up_never_decreases_toward_reverse_resting_line() {
    let mut tracker = ThresholdTracker::new(150.0, 300.0);
    tracker.update(metrics(6000.0, 800.0, 10_000.0));

    let mut previous = tracker.value();
    for step in 1..=10 {
        let snapshot = tracker.update(metrics(6000.0 - f64::from(step) * 40.0, 800.0, 10_000.0));
        assert!(!snapshot.scrolling_down);
        assert!(snapshot.threshold >= previous);
        assert!(snapshot.threshold <= 300.0);
        previous = snapshot.threshold;
    }
    assert!((previous - 300.0).abs() < f64::EPSILON);
}

#[test]
fn test_line_eases_by_scrolled_distance() {
    let mut tracker = ThresholdTracker::new(150.0, 300.0);
    tracker.update(metrics(5000.0, 800.0, 10_000.0));
    tracker.update(metrics(4900.0, 800.0, 10_000.0));
    assert!((tracker.value() - 250.0).abs() < f64::EPSILON);
    tracker.update(metrics(4950.0, 800.0, 10_000.0));
    assert!((tracker.value() - 200.0).abs() < f64::EPSILON);
}

#[test]
fn test_reverse_resting_line_rises_near_top() {
    let mut tracker = ThresholdTracker::new(150.0, 300.0);
    tracker.update(metrics(100.0, 800.0, 10_000.0));
    let snapshot = tracker.update(metrics(50.0, 800.0, 10_000.0));
    assert!((snapshot.pixels_above - 100.0).abs() < f64::EPSILON);
    assert!((snapshot.threshold - 200.0).abs() < f64::EPSILON);

    let snapshot = tracker.update(metrics(0.0, 800.0, 10_000.0));
    assert!((snapshot.threshold - 150.0).abs() < f64::EPSILON);
}

#[test]
fn test_line_reaches_viewport_bottom_at_page_end() {
    let mut tracker = ThresholdTracker::new(150.0, 300.0);
    let snapshot = tracker.update(metrics(1200.0, 800.0, 2000.0));
    assert!(snapshot.pixels_below.abs() < f64::EPSILON);
    assert!((snapshot.bottom_adjust - 650.0).abs() < f64::EPSILON);
    assert!((snapshot.threshold - 800.0).abs() < f64::EPSILON);
}

#[test]
fn test_bottom_pull_scaled_for_short_documents() {
    let mut tracker = ThresholdTracker::new(150.0, 300.0);
    let snapshot = tracker.update(metrics(200.0, 800.0, 1200.0));
    assert!((snapshot.bottom_adjust - 450.0).abs() < f64::EPSILON);
    assert!((snapshot.adjusted_bottom_adjust - 225.0).abs() < f64::EPSILON);
    assert!((snapshot.threshold - 375.0).abs() < f64::EPSILON);
}

#[test]
fn test_document_that_fits_pins_line_to_zero() {
    let mut tracker = ThresholdTracker::new(150.0, 300.0);
    for scroll in [0.0, 0.0, 10.0, 0.0] {
        let snapshot = tracker.update(metrics(scroll, 800.0, 600.0));
        assert!(snapshot.threshold.abs() < f64::EPSILON);
    }
    let snapshot = tracker.update(metrics(0.0, 800.0, 800.0));
    assert!(snapshot.threshold.abs() < f64::EPSILON);
}

#[test]
fn test_place_keeps_last_scroll_position() {
    let mut tracker = ThresholdTracker::new(150.0, 300.0);
    tracker.update(metrics(3000.0, 800.0, 10_000.0));
    tracker.place(420.0);
    assert!((tracker.value() - 420.0).abs() < f64::EPSILON);
    assert!((tracker.last_scroll() - 3000.0).abs() < f64::EPSILON);

    // A following downward tick eases from the placed line.
    tracker.update(metrics(3100.0, 800.0, 10_000.0));
    assert!((tracker.value() - 320.0).abs() < f64::EPSILON);
}

#[test]
fn test_snapshot_rows_for_overlay() {
    let mut tracker = ThresholdTracker::new(150.0, 300.0);
    let rows = tracker.update(metrics(1200.0, 800.0, 2000.0)).rows();
    let labels: Vec<&str> = rows.iter().map(|(label, _)| *label).collect();
    assert_eq!(
        labels,
        [
            "documentHeight",
            "windowHeight",
            "scrollTop",
            "pixelsAbove",
            "pixelsBelow",
            "bottomAdd",
            "adjustedBottomAdd",
            "scrollingDown",
            "threshold"
        ]
    );
    assert_eq!(rows[0].1, "2000.0");
    assert_eq!(rows[7].1, "true");
    assert_eq!(rows[8].1, "800.0");
}
