//! Bottom panel detents.
//!
//! The panel rests at one of two detents. Drag gestures only change the
//! detent when they end; while a drag is in flight the rendered height
//! follows the finger but the detent itself stays put.

use serde::{Deserialize, Serialize};

/// Distance a drag must exceed to move between detents
pub const DRAG_THRESHOLD: f64 = 80.0;

/// Smallest height of the collapsed panel
pub const MIN_COLLAPSED_HEIGHT: f64 = 70.0;

const COLLAPSED_FRACTION: f64 = 0.12;
const EXPANDED_FRACTION: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Detent {
    #[default]
    Collapsed,
    Expanded,
}

fn sanitize(available_height: f64) -> f64 {
    if available_height.is_finite() {
        available_height.max(0.0)
    } else {
        0.0
    }
}

impl Detent {
    /// Detent after a drag that ended at `translation` (negative is upward)
    pub fn next(self, translation: f64) -> Detent {
        match self {
            Detent::Collapsed if translation < -DRAG_THRESHOLD => Detent::Expanded,
            Detent::Expanded if translation > DRAG_THRESHOLD => Detent::Collapsed,
            current => current,
        }
    }

    /// Panel height for a container of `available_height`.
    ///
    /// The expanded height never drops below the collapsed height, which only
    /// matters for containers shorter than about 94 units.
    pub fn height(self, available_height: f64) -> f64 {
        let available = sanitize(available_height);
        let collapsed = MIN_COLLAPSED_HEIGHT.max(available * COLLAPSED_FRACTION);
        match self {
            Detent::Collapsed => collapsed,
            Detent::Expanded => (available * EXPANDED_FRACTION).max(collapsed),
        }
    }

    /// Whether the map underneath the panel accepts touches
    pub fn map_accepts_touches(self) -> bool {
        self != Detent::Expanded
    }

    pub fn is_collapsed(self) -> bool {
        self == Detent::Collapsed
    }
}

/// The last-trip row is hidden only while expanded with the search field focused
pub fn show_last_trip_row(detent: Detent, search_focused: bool) -> bool {
    !(detent == Detent::Expanded && search_focused)
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetentEvent {
    /// Intermediate drag frame with the translation so far
    DragChanged(f64),
    /// Drag released at the given translation
    DragEnded(f64),
    /// Drag abandoned without a release
    DragCancelled,
}

#[derive(Debug, Clone, Default)]
pub struct DetentMachine {
    detent: Detent,
    live_translation: Option<f64>,
}

impl DetentMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detent(detent: Detent) -> Self {
        Self {
            detent,
            live_translation: None,
        }
    }

    /// Handle an event and return whether the detent changed
    pub fn handle_event(&mut self, event: DetentEvent) -> bool {
        match event {
            DetentEvent::DragChanged(translation) => {
                self.live_translation = translation.is_finite().then_some(translation);
                false
            }
            DetentEvent::DragEnded(translation) => {
                self.live_translation = None;
                let before = self.detent;
                self.detent = before.next(translation);
                if self.detent != before {
                    log::debug!(
                        "Detent: {:?} -> {:?} (translation {})",
                        before,
                        self.detent,
                        translation
                    );
                }
                self.detent != before
            }
            DetentEvent::DragCancelled => {
                self.live_translation = None;
                false
            }
        }
    }

    pub fn detent(&self) -> Detent {
        self.detent
    }

    pub fn is_dragging(&self) -> bool {
        self.live_translation.is_some()
    }

    pub fn height(&self, available_height: f64) -> f64 {
        self.detent.height(available_height)
    }

    /// Height to draw, following an in-flight drag between the two detents
    pub fn rendered_height(&self, available_height: f64) -> f64 {
        let resting = self.height(available_height);
        match self.live_translation {
            Some(translation) => {
                let lower = Detent::Collapsed.height(available_height);
                let upper = Detent::Expanded.height(available_height);
                (resting - translation).clamp(lower, upper)
            }
            None => resting,
        }
    }

    pub fn map_accepts_touches(&self) -> bool {
        self.detent.map_accepts_touches()
    }
}
