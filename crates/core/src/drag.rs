//! Drag gesture recognizer for the button grid.
//!
//! Converts a raw press/move/release pointer sequence into either a click
//! on the pressed slot or a swap request between the pressed slot and the
//! slot under the release position. The recognizer is toolkit-agnostic:
//! the UI feeds it coordinates and a [`SlotMap`] of the slot rectangles it
//! rendered this frame, and applies the returned [`Gesture`].

/// Movement (in either axis) beyond which a press becomes a drag instead
/// of a click.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Axis-aligned bounding region of one rendered slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl SlotRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Hit-test table mapping logical slot indices to their current bounding
/// regions. Rebuilt by the controller on every render, so lookups never
/// depend on toolkit widget identity.
#[derive(Debug, Default)]
pub struct SlotMap {
    regions: Vec<(usize, SlotRect)>,
}

impl SlotMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn insert(&mut self, slot: usize, rect: SlotRect) {
        self.regions.push((slot, rect));
    }

    /// Slot under the given position, topmost (latest inserted) first.
    /// `None` means the position is outside the grid.
    pub fn slot_at(&self, x: f32, y: f32) -> Option<usize> {
        self.regions
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(slot, _)| *slot)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Outcome of a completed press/release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Release without crossing the drag threshold: act on the slot that
    /// was under the pointer at press time.
    Click { tab: usize, slot: usize },
    /// Drag released over a different slot of the same tab.
    Swap {
        tab: usize,
        source: usize,
        target: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Tracking {
    start_x: f32,
    start_y: f32,
    tab: usize,
    slot: usize,
    dragging: bool,
}

/// Press/move/release state machine. One instance lives on the
/// application controller; state is reinitialized on every press and
/// consumed on release.
#[derive(Debug, Default)]
pub struct DragTracker {
    tracking: Option<Tracking>,
}

impl DragTracker {
    /// Starts a gesture on the given slot. Any in-flight gesture is
    /// discarded.
    pub fn on_press(&mut self, x: f32, y: f32, tab: usize, slot: usize) {
        self.tracking = Some(Tracking {
            start_x: x,
            start_y: y,
            tab,
            slot,
            dragging: false,
        });
    }

    /// Feeds a pointer move. Returns `true` on the move that first crosses
    /// the threshold, so the UI can switch to a drag cursor; motion has no
    /// other observable effect.
    pub fn on_move(&mut self, x: f32, y: f32) -> bool {
        let Some(tracking) = &mut self.tracking else {
            return false;
        };
        if tracking.dragging {
            return false;
        }
        let dx = (x - tracking.start_x).abs();
        let dy = (y - tracking.start_y).abs();
        if dx > DRAG_THRESHOLD || dy > DRAG_THRESHOLD {
            tracking.dragging = true;
            return true;
        }
        false
    }

    pub fn is_dragging(&self) -> bool {
        self.tracking.map(|t| t.dragging).unwrap_or(false)
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Ends the gesture. A non-drag release yields a click on the
    /// press-time slot (never re-resolved from the pointer position). A
    /// drag release hit-tests `slots`; a missing target or a self-drop is
    /// a no-op, not an error.
    pub fn on_release(&mut self, x: f32, y: f32, slots: &SlotMap) -> Option<Gesture> {
        let tracking = self.tracking.take()?;
        if !tracking.dragging {
            return Some(Gesture::Click {
                tab: tracking.tab,
                slot: tracking.slot,
            });
        }
        match slots.slot_at(x, y) {
            Some(target) if target != tracking.slot => Some(Gesture::Swap {
                tab: tracking.tab,
                source: tracking.slot,
                target,
            }),
            _ => None,
        }
    }

    /// Abandons any in-flight gesture (e.g. a dialog opened mid-press).
    pub fn cancel(&mut self) {
        self.tracking = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2 columns x 5 rows of 100x50 cells at the origin.
    fn grid() -> SlotMap {
        let mut map = SlotMap::default();
        for slot in 0..10 {
            let col = (slot % 2) as f32;
            let row = (slot / 2) as f32;
            map.insert(
                slot,
                SlotRect {
                    min_x: col * 100.0,
                    min_y: row * 50.0,
                    max_x: col * 100.0 + 100.0,
                    max_y: row * 50.0 + 50.0,
                },
            );
        }
        map
    }

    #[test]
    fn release_without_motion_is_a_click() {
        let mut tracker = DragTracker::default();
        tracker.on_press(10.0, 10.0, 0, 3);
        let gesture = tracker.on_release(10.0, 10.0, &grid());
        assert_eq!(gesture, Some(Gesture::Click { tab: 0, slot: 3 }));
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn motion_within_threshold_still_clicks() {
        let mut tracker = DragTracker::default();
        tracker.on_press(98.0, 10.0, 1, 0);
        assert!(!tracker.on_move(102.0, 13.0));
        assert!(!tracker.is_dragging());
        // Click binds to the press-time slot even though the pointer
        // drifted across the boundary into slot 1.
        let gesture = tracker.on_release(102.0, 13.0, &grid());
        assert_eq!(gesture, Some(Gesture::Click { tab: 1, slot: 0 }));
    }

    #[test]
    fn crossing_threshold_engages_drag_once() {
        let mut tracker = DragTracker::default();
        tracker.on_press(10.0, 10.0, 0, 0);
        assert!(tracker.on_move(20.0, 10.0));
        assert!(tracker.is_dragging());
        // Only the engaging move reports the flip.
        assert!(!tracker.on_move(30.0, 10.0));
    }

    #[test]
    fn vertical_motion_alone_engages_drag() {
        let mut tracker = DragTracker::default();
        tracker.on_press(10.0, 10.0, 0, 0);
        assert!(tracker.on_move(10.0, 17.0));
    }

    #[test]
    fn drag_release_over_other_slot_swaps() {
        let mut tracker = DragTracker::default();
        tracker.on_press(10.0, 10.0, 2, 0);
        tracker.on_move(150.0, 120.0);
        let gesture = tracker.on_release(150.0, 120.0, &grid());
        assert_eq!(
            gesture,
            Some(Gesture::Swap {
                tab: 2,
                source: 0,
                target: 5
            })
        );
    }

    #[test]
    fn drag_release_outside_grid_is_noop() {
        let mut tracker = DragTracker::default();
        tracker.on_press(10.0, 10.0, 0, 0);
        tracker.on_move(400.0, 400.0);
        assert_eq!(tracker.on_release(400.0, 400.0, &grid()), None);
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn self_drop_is_noop() {
        let mut tracker = DragTracker::default();
        tracker.on_press(10.0, 10.0, 0, 0);
        tracker.on_move(30.0, 10.0);
        // Back over the source slot.
        assert_eq!(tracker.on_release(20.0, 12.0, &grid()), None);
    }

    #[test]
    fn press_reinitializes_state() {
        let mut tracker = DragTracker::default();
        tracker.on_press(10.0, 10.0, 0, 0);
        tracker.on_move(100.0, 100.0);
        assert!(tracker.is_dragging());
        // New press resets the dragging flag and the source slot.
        tracker.on_press(110.0, 10.0, 0, 1);
        assert!(!tracker.is_dragging());
        let gesture = tracker.on_release(110.0, 10.0, &grid());
        assert_eq!(gesture, Some(Gesture::Click { tab: 0, slot: 1 }));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.on_release(10.0, 10.0, &grid()), None);
    }

    #[test]
    fn cancel_discards_gesture() {
        let mut tracker = DragTracker::default();
        tracker.on_press(10.0, 10.0, 0, 0);
        tracker.cancel();
        assert_eq!(tracker.on_release(10.0, 10.0, &grid()), None);
    }

    #[test]
    fn topmost_region_wins_hit_test() {
        let mut map = SlotMap::default();
        let rect = SlotRect {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 100.0,
            max_y: 100.0,
        };
        map.insert(0, rect);
        map.insert(1, rect);
        assert_eq!(map.slot_at(50.0, 50.0), Some(1));
    }
}
