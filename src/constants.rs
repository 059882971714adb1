//! Shared crate-wide constants.

/// Height of the taskbar band docked to the bottom of the viewport, in rows.
///
/// Window drags clamp against the top edge of this band so a window can
/// never be dropped where the taskbar would cover its header.
pub const TASKBAR_HEIGHT: u16 = 1;

/// Directory name under the platform data dir that holds the notepad file
/// and the log file.
pub const DATA_DIR_NAME: &str = "term-desk";

/// Default base URL for the hosted todo backend.
pub const DEFAULT_API_URL: &str = "https://todo-backend-0dru.onrender.com/api/todos";
