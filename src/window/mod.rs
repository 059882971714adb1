pub mod chrome;
mod drag;
mod registry;

pub use chrome::HeaderAction;
pub use drag::DragController;
pub use registry::{BACKGROUND_Z, WindowRegistry};

use ratatui::layout::Rect;

/// Requested size and position of a window, in terminal cells.
///
/// A freshly opened window has no absolute origin; the renderer centers it
/// within the desktop area each frame, so it stays centered across terminal
/// resizes. The first header drag assigns an absolute origin and the window
/// keeps it from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub origin: Option<(u16, u16)>,
    pub width: u16,
    pub height: u16,
}

impl Geometry {
    pub fn centered(width: u16, height: u16) -> Self {
        Self {
            origin: None,
            width,
            height,
        }
    }

    pub fn at(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            origin: Some((x, y)),
            width,
            height,
        }
    }

    /// Resolve to a concrete rectangle within `bounds`.
    ///
    /// Centered windows are placed in the middle of `bounds`; positioned
    /// windows keep their absolute origin. Either way the size is clamped so
    /// the rectangle never exceeds `bounds` in extent.
    pub fn resolve(&self, bounds: Rect) -> Rect {
        let width = self.width.min(bounds.width);
        let height = self.height.min(bounds.height);
        let (x, y) = match self.origin {
            Some((x, y)) => (x, y),
            None => (
                bounds.x + bounds.width.saturating_sub(width) / 2,
                bounds.y + bounds.height.saturating_sub(height) / 2,
            ),
        };
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Per-window bookkeeping tracked by the registry.
#[derive(Debug, Clone)]
pub struct WindowState {
    /// The window has been opened and not closed since. Drives taskbar
    /// button visibility; a minimized window stays active.
    pub active: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub geometry: Geometry,
    /// Geometry snapshot taken when entering the maximized state, restored
    /// verbatim on the way back out.
    pub(crate) saved_geometry: Option<Geometry>,
    pub(crate) z: u64,
}

impl WindowState {
    pub(crate) fn new(geometry: Geometry) -> Self {
        Self {
            active: false,
            minimized: false,
            maximized: false,
            geometry,
            saved_geometry: None,
            z: BACKGROUND_Z,
        }
    }

    /// Drawn on the desktop this frame.
    pub fn is_visible(&self) -> bool {
        self.active && !self.minimized
    }
}
