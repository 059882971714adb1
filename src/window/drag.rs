//! Header drag controller.
//!
//! One drag at a time: pointer-down on a window header starts a session,
//! pointer-move proposes a new origin, pointer-up ends it. The grab offset
//! is captured at pointer-down so the window never jumps under the cursor,
//! and every proposed origin is clamped to keep the full window inside the
//! desktop area above the taskbar.

use ratatui::layout::Rect;

use crate::constants::TASKBAR_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragSession<R> {
    id: R,
    offset_x: u16,
    offset_y: u16,
}

#[derive(Debug)]
pub struct DragController<R> {
    session: Option<DragSession<R>>,
}

impl<R: Copy + Eq> DragController<R> {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged_id(&self) -> Option<R> {
        self.session.map(|session| session.id)
    }

    /// Start dragging `id`. `pointer` is the pointer-down cell and
    /// `frame_rect` the window rectangle it landed on; the difference is
    /// the grab offset held for the rest of the session.
    pub fn begin(&mut self, id: R, pointer: (u16, u16), frame_rect: Rect) {
        self.session = Some(DragSession {
            id,
            offset_x: pointer.0.saturating_sub(frame_rect.x),
            offset_y: pointer.1.saturating_sub(frame_rect.y),
        });
    }

    /// Propose the window origin for the current pointer position, clamped
    /// so a window of `size` stays within `viewport` minus the taskbar
    /// band. Returns `None` when no drag is in flight.
    pub fn update(
        &self,
        pointer: (u16, u16),
        size: (u16, u16),
        viewport: Rect,
    ) -> Option<(R, (u16, u16))> {
        let session = self.session?;
        let max_x = viewport.width.saturating_sub(size.0);
        let max_y = viewport
            .height
            .saturating_sub(size.1.saturating_add(TASKBAR_HEIGHT));
        let x = pointer.0.saturating_sub(session.offset_x).min(max_x);
        let y = pointer.1.saturating_sub(session.offset_y).min(max_y);
        Some((session.id, (x, y)))
    }

    /// Pointer released: return to idle. Reports which window was dragged.
    pub fn end(&mut self) -> Option<R> {
        self.session.take().map(|session| session.id)
    }
}

impl<R: Copy + Eq> Default for DragController<R> {
    fn default() -> Self {
        Self::new()
    }
}
