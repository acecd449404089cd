//! Swipe classification for stepper navigation.
//!
//! A [`SwipeClassifier`] turns one touch-start/touch-end pair into a
//! [`SwipeIntent`]. Only a short, mostly horizontal stroke that travels
//! further than the threshold counts as a swipe; everything else classifies
//! as [`SwipeIntent::None`].
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use horizon_stepper::stepper::gesture::{SwipeClassifier, SwipeIntent, TouchPoint, TouchTarget};
//!
//! let mut classifier = SwipeClassifier::default();
//!
//! classifier.on_start(TouchPoint::new(100.0, 50.0), Duration::ZERO, TouchTarget::Content);
//! let intent = classifier.on_end(TouchPoint::new(30.0, 55.0), Duration::from_millis(100));
//!
//! assert_eq!(intent, SwipeIntent::Next);
//! ```

use std::time::Duration;

use horizon_stepper_core::logging::targets;

/// Default minimum horizontal travel for a swipe in pixels.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Default maximum swipe duration in milliseconds.
pub const DEFAULT_SWIPE_MAX_TIME_MS: u64 = 300;

/// A touch position in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    /// Create a touch point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Form controls and links over which swipes are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractiveKind {
    Input,
    TextArea,
    Button,
    Select,
    Link,
}

impl InteractiveKind {
    /// Map an HTML tag name (any case) to an interactive kind.
    ///
    /// Returns `None` for tags that do not take their own touch input.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "input" => Some(Self::Input),
            "textarea" => Some(Self::TextArea),
            "button" => Some(Self::Button),
            "select" => Some(Self::Select),
            "a" => Some(Self::Link),
            _ => None,
        }
    }
}

/// The surface a touch started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchTarget {
    /// Plain step content.
    #[default]
    Content,
    /// A control that handles touches itself.
    Interactive(InteractiveKind),
}

impl TouchTarget {
    /// Classify a touch target from the tag of the element it landed on.
    pub fn from_tag(tag: &str) -> Self {
        InteractiveKind::from_tag(tag).map_or(Self::Content, Self::Interactive)
    }

    /// Returns true for form controls and links.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }
}

/// The navigation a completed gesture asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipeIntent {
    /// Right-to-left stroke; advance.
    Next,
    /// Left-to-right stroke; go back.
    Previous,
    /// Not a swipe.
    #[default]
    None,
}

/// Classifier settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// When false, starts are ignored and every end classifies as `None`.
    pub enabled: bool,
    /// Horizontal travel must exceed this many pixels.
    pub threshold: f32,
    /// Strokes slower than this are not swipes.
    pub max_time: Duration,
    /// Ignore strokes that start on an interactive surface.
    pub exclude_interactive: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_SWIPE_THRESHOLD,
            max_time: Duration::from_millis(DEFAULT_SWIPE_MAX_TIME_MS),
            exclude_interactive: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTouch {
    position: TouchPoint,
    timestamp: Duration,
}

/// Classifies touch-start/touch-end pairs into swipe intents.
///
/// Timestamps are host-supplied offsets from any fixed origin; only their
/// difference matters.
#[derive(Debug, Clone, Default)]
pub struct SwipeClassifier {
    config: GestureConfig,
    pending: Option<PendingTouch>,
}

impl SwipeClassifier {
    /// Create a classifier with the given settings.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    /// Current settings.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the settings. A pending gesture is kept.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Whether a touch-start is waiting for its end.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending gesture.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Record a touch-start, replacing any unfinished gesture.
    ///
    /// Starts on interactive surfaces (when excluded) or while disabled leave
    /// nothing pending, so their matching end classifies as `None`.
    pub fn on_start(&mut self, position: TouchPoint, timestamp: Duration, target: TouchTarget) {
        if !self.config.enabled {
            self.pending = None;
            return;
        }
        if self.config.exclude_interactive && target.is_interactive() {
            tracing::trace!(
                target: targets::GESTURE,
                touch_target = ?target,
                "touch started on interactive surface, ignored"
            );
            self.pending = None;
            return;
        }
        self.pending = Some(PendingTouch {
            position,
            timestamp,
        });
    }

    /// Consume the pending gesture and classify it.
    pub fn on_end(&mut self, position: TouchPoint, timestamp: Duration) -> SwipeIntent {
        let Some(start) = self.pending.take() else {
            return SwipeIntent::None;
        };
        if !self.config.enabled {
            return SwipeIntent::None;
        }

        let dx = start.position.x - position.x;
        let dy = start.position.y - position.y;
        let dt = timestamp.saturating_sub(start.timestamp);

        let horizontal = dx.abs() > dy.abs();
        let quick = dt <= self.config.max_time;
        let far = dx.abs() > self.config.threshold;

        let intent = if horizontal && quick && far {
            if dx > 0.0 {
                SwipeIntent::Next
            } else {
                SwipeIntent::Previous
            }
        } else {
            SwipeIntent::None
        };

        tracing::trace!(
            target: targets::GESTURE,
            dx,
            dy,
            dt_ms = dt.as_millis() as u64,
            ?intent,
            "classified touch"
        );
        intent
    }
}
