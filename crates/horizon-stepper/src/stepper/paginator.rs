//! Windowing of step markers.
//!
//! Long step collections are not rendered in full. The header shows a
//! leading block of markers, one [`NavMarker::Gap`] standing for the elided
//! range, and a trailing block that always ends with the last step. When the
//! current step moves past the leading block, the leading block slides along
//! so it ends on the current step.
//!
//! The window size is derived from the pixel width available to the strip:
//! see [`window_size_for_width`].

use serde::{Deserialize, Serialize};

use horizon_stepper_core::logging::targets;

/// Smallest window size ever used.
pub const MIN_WINDOW_SIZE: usize = 3;

/// Default rendered width of one step marker, in pixels.
pub const DEFAULT_ITEM_WIDTH: f32 = 40.0;

/// One entry of the rendered step strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavMarker {
    /// A navigable step, by 0-based index.
    Step { index: usize },
    /// Placeholder for an elided range of steps.
    Gap,
}

impl NavMarker {
    /// The step index, or `None` for a gap.
    pub fn step_index(&self) -> Option<usize> {
        match self {
            Self::Step { index } => Some(*index),
            Self::Gap => None,
        }
    }

    /// Returns true for gap placeholders.
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }
}

/// Compute the markers to render for `total` steps with `current` active.
///
/// Pure function of its inputs. `window_size` is expected to be at least
/// [`MIN_WINDOW_SIZE`]; callers clamp it.
pub fn visible_markers(total: usize, current: usize, window_size: usize) -> Vec<NavMarker> {
    if total <= window_size.saturating_mul(2) {
        return (0..total).map(|index| NavMarker::Step { index }).collect();
    }

    let trailing_start = total - window_size;
    let leading = if current < window_size || current >= trailing_start {
        0..window_size
    } else {
        (current + 1 - window_size)..(current + 1)
    };

    let mut markers = Vec::with_capacity(window_size * 2 + 1);
    markers.extend(leading.map(|index| NavMarker::Step { index }));
    markers.push(NavMarker::Gap);
    markers.extend((trailing_start..total).map(|index| NavMarker::Step { index }));
    markers
}

/// Derive a window size from the available strip width.
///
/// Half of the markers that fit go to each side of the gap. Widths that are
/// negative, zero or not finite fall back to `min`, as does a non-positive
/// `item_width`.
pub fn window_size_for_width(width: f32, item_width: f32, min: usize) -> usize {
    let min = min.max(MIN_WINDOW_SIZE);
    if !width.is_finite() || width <= 0.0 || !item_width.is_finite() || item_width <= 0.0 {
        return min;
    }
    let fitted = (width / item_width / 2.0).floor() as usize;
    fitted.max(min)
}

/// Stateful wrapper that keeps the window size for the last measured width.
#[derive(Debug, Clone)]
pub struct WindowPaginator {
    item_width: f32,
    min_window_size: usize,
    window_size: usize,
}

impl Default for WindowPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_WIDTH, MIN_WINDOW_SIZE)
    }
}

impl WindowPaginator {
    /// Create a paginator; the window starts at its minimum size.
    pub fn new(item_width: f32, min_window_size: usize) -> Self {
        let min_window_size = min_window_size.max(MIN_WINDOW_SIZE);
        Self {
            item_width,
            min_window_size,
            window_size: min_window_size,
        }
    }

    /// Current window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Store a newly measured width.
    ///
    /// Returns the new window size if it changed.
    pub fn set_available_width(&mut self, width: f32) -> Option<usize> {
        let size = window_size_for_width(width, self.item_width, self.min_window_size);
        if size == self.window_size {
            return None;
        }
        tracing::debug!(
            target: targets::PAGINATOR,
            width,
            old = self.window_size,
            new = size,
            "window size changed"
        );
        self.window_size = size;
        Some(size)
    }

    /// Markers for the current window size.
    pub fn markers(&self, total: usize, current: usize) -> Vec<NavMarker> {
        visible_markers(total, current, self.window_size)
    }
}
