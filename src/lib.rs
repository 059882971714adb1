pub mod apps;
pub mod components;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod event_loop;
pub mod keybindings;
pub mod taskbar;
pub mod theme;
pub mod todo;
pub mod tracing_sub;
pub mod ui;
pub mod window;
