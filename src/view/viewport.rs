//! Terminal viewport tracking.
//!
//! The last seen width and orientation live in a [`ResizeTracker`] value that
//! callers thread through [`handle_resize`]; nothing here is global.

use serde::Serialize;

/// Fallback when the terminal size cannot be queried (pipes, CI).
pub const FALLBACK: Viewport = Viewport {
    width: 80,
    height: 24,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Chart/table layout chosen for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    /// Legend beside the bars.
    Wide,
    /// Legend under each bar, shorter bars.
    Compact,
}

impl Viewport {
    /// Query the attached terminal.
    pub fn current() -> Self {
        match crossterm::terminal::size() {
            Ok((width, height)) if width > 0 && height > 0 => Self { width, height },
            _ => FALLBACK,
        }
    }

    /// Terminal cells are roughly twice as tall as they are wide, so a
    /// square-looking window is `width == 2 * height`.
    pub fn orientation(&self) -> Orientation {
        if u32::from(self.width) >= 2 * u32::from(self.height) {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn layout(&self, compact_width: u16) -> Layout {
        if self.width < compact_width {
            Layout::Compact
        } else {
            Layout::Wide
        }
    }
}

/// What the caller should do after a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAction {
    /// Width unchanged.
    None,
    /// Width changed within the same orientation; pick the layout again on
    /// the next render.
    Relayout,
    /// Orientation flipped; redraw the current view now.
    Redraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTracker {
    pub last_width: u16,
    pub last_orientation: Orientation,
}

impl ResizeTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            last_width: viewport.width,
            last_orientation: viewport.orientation(),
        }
    }
}

/// Compare `viewport` against the tracked state and return the updated
/// tracker together with the action to take.
pub fn handle_resize(tracker: ResizeTracker, viewport: Viewport) -> (ResizeTracker, ResizeAction) {
    if viewport.width == tracker.last_width {
        return (tracker, ResizeAction::None);
    }

    let orientation = viewport.orientation();
    let action = if orientation != tracker.last_orientation {
        ResizeAction::Redraw
    } else {
        ResizeAction::Relayout
    };

    let next = ResizeTracker {
        last_width: viewport.width,
        last_orientation: orientation,
    };
    (next, action)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
