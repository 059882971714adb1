//! Window registry: open/close, minimize/restore, maximize, and stacking
//! order for the fixed set of desktop windows.
//!
//! Stacking is deliberately two-layered. Exactly one window (the most
//! recently fronted one) carries a unique z value above [`BACKGROUND_Z`];
//! every other window shares the background value and is drawn in key
//! order. A monotone counter hands out front values so a stale front can
//! never outrank a fresh one.

use std::collections::BTreeMap;

use ratatui::layout::Rect;

use super::{Geometry, WindowState};

/// Shared z value for every window that is not front-most.
pub const BACKGROUND_Z: u64 = 0;

#[derive(Debug)]
pub struct WindowRegistry<R> {
    windows: BTreeMap<R, WindowState>,
    z_counter: u64,
}

impl<R: Copy + Ord> WindowRegistry<R> {
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            z_counter: BACKGROUND_Z,
        }
    }

    /// Register a window with its default geometry. Windows start closed.
    pub fn insert(&mut self, id: R, geometry: Geometry) {
        self.windows.insert(id, WindowState::new(geometry));
    }

    pub fn state(&self, id: R) -> Option<&WindowState> {
        self.windows.get(&id)
    }

    /// Open `id` (or restore it if minimized) and bring it to the front.
    /// Re-opening an already visible window only re-fronts it.
    pub fn open(&mut self, id: R) {
        if let Some(win) = self.windows.get_mut(&id) {
            win.active = true;
            win.minimized = false;
            self.bring_to_front(id);
        }
    }

    /// Close `id`: its taskbar button disappears and its z drops back to
    /// the background layer, so focus may become undefined.
    pub fn close(&mut self, id: R) {
        if let Some(win) = self.windows.get_mut(&id) {
            win.active = false;
            win.minimized = false;
            win.z = BACKGROUND_Z;
        }
    }

    /// Hide `id` from the desktop. The window stays active, so its taskbar
    /// button remains, unhighlighted.
    pub fn minimize(&mut self, id: R) {
        if let Some(win) = self.windows.get_mut(&id) {
            win.minimized = true;
        }
    }

    /// Toggle between maximized and floating. Entering snapshots the
    /// current geometry; leaving restores that snapshot verbatim, including
    /// a still-centered origin.
    pub fn toggle_maximize(&mut self, id: R) {
        if let Some(win) = self.windows.get_mut(&id) {
            if win.maximized {
                win.maximized = false;
                if let Some(saved) = win.saved_geometry.take() {
                    win.geometry = saved;
                }
            } else {
                win.saved_geometry = Some(win.geometry);
                win.maximized = true;
            }
        }
    }

    /// Give `id` the next z value and push every other window back to the
    /// shared background layer.
    pub fn bring_to_front(&mut self, id: R) {
        if !self.windows.contains_key(&id) {
            return;
        }
        for win in self.windows.values_mut() {
            win.z = BACKGROUND_Z;
        }
        self.z_counter += 1;
        if let Some(win) = self.windows.get_mut(&id) {
            win.z = self.z_counter;
        }
    }

    /// The window holding the unique front z value, if any. Closing the
    /// front window leaves no front at all.
    pub fn front(&self) -> Option<R> {
        self.windows
            .iter()
            .find(|(_, win)| win.z > BACKGROUND_Z)
            .map(|(id, _)| *id)
    }

    /// Keyboard focus target: the front window, provided it is visible.
    pub fn focused(&self) -> Option<R> {
        self.front()
            .filter(|id| self.windows.get(id).is_some_and(WindowState::is_visible))
    }

    pub fn is_open(&self, id: R) -> bool {
        self.windows.get(&id).is_some_and(|win| win.active)
    }

    pub fn is_minimized(&self, id: R) -> bool {
        self.windows.get(&id).is_some_and(|win| win.minimized)
    }

    pub fn is_maximized(&self, id: R) -> bool {
        self.windows.get(&id).is_some_and(|win| win.maximized)
    }

    pub fn is_visible(&self, id: R) -> bool {
        self.windows.get(&id).is_some_and(WindowState::is_visible)
    }

    /// Whether the taskbar shows a button for `id` at all.
    pub fn button_visible(&self, id: R) -> bool {
        self.is_open(id)
    }

    /// Whether that button renders highlighted. Minimizing clears the
    /// highlight without removing the button.
    pub fn button_highlighted(&self, id: R) -> bool {
        self.windows
            .get(&id)
            .is_some_and(|win| win.active && !win.minimized)
    }

    pub fn geometry(&self, id: R) -> Option<Geometry> {
        self.windows.get(&id).map(|win| win.geometry)
    }

    /// Assign an absolute origin, cancelling centered placement. Used by
    /// the drag controller.
    pub fn set_origin(&mut self, id: R, x: u16, y: u16) {
        if let Some(win) = self.windows.get_mut(&id) {
            win.geometry.origin = Some((x, y));
        }
    }

    /// The rectangle `id` occupies this frame within the desktop `area`.
    /// Maximized windows fill the whole area regardless of geometry.
    pub fn frame_rect(&self, id: R, area: Rect) -> Option<Rect> {
        let win = self.windows.get(&id)?;
        if win.maximized {
            Some(area)
        } else {
            Some(win.geometry.resolve(area))
        }
    }

    /// Visible windows in paint order: background layer first (key order),
    /// front window last.
    pub fn draw_order(&self) -> Vec<R> {
        let mut ids: Vec<R> = self
            .windows
            .iter()
            .filter(|(_, win)| win.is_visible())
            .map(|(id, _)| *id)
            .collect();
        ids.sort_by_key(|id| self.windows[id].z);
        ids
    }
}

impl<R: Copy + Ord> Default for WindowRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
