use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::Event;

use term_desk::apps::{NotepadApp, NotepadStore, TodoApp};
use term_desk::constants::{DATA_DIR_NAME, DEFAULT_API_URL};
use term_desk::desktop::Desktop;
use term_desk::drivers::{ConsoleInputDriver, ConsoleOutputDriver, InputDriver, OutputDriver};
use term_desk::event_loop::{ControlFlow, EventLoop};
use term_desk::keybindings::{Action, KeyBindings};
use term_desk::todo::{HttpTodoApi, TodoClient};
use term_desk::tracing_sub;

/// A desktop-metaphor shell for the terminal.
#[derive(Debug, Parser)]
#[command(name = "term-desk", version, about)]
struct Cli {
    /// Base URL of the todo backend.
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Directory holding the notepad file and logs. Defaults to the
    /// platform data dir.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log file path. Defaults to `<data-dir>/term-desk.log`.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let log_file = cli
        .log_file
        .unwrap_or_else(|| data_dir.join("term-desk.log"));
    tracing_sub::init_to_file(&log_file)?;
    tracing::info!(api_url = %cli.api_url, "starting desktop shell");

    let api = Arc::new(HttpTodoApi::new(cli.api_url));
    let todo = TodoApp::new(TodoClient::new(api));
    let notepad = NotepadApp::new(NotepadStore::new(&data_dir));
    let mut desktop = Desktop::new(todo, notepad);

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), Duration::from_millis(16));
    event_loop.driver().set_mouse_capture(true)?;

    let bindings = KeyBindings::default();
    let result = event_loop.run(|_, event| {
        match event {
            Some(event) => {
                if let Event::Key(key) = &event
                    && bindings.matches(Action::Quit, key)
                {
                    return Ok(ControlFlow::Quit);
                }
                desktop.handle_event(&event);
            }
            None => {
                desktop.tick();
                output.draw(|mut frame| desktop.render(&mut frame))?;
            }
        }
        Ok(ControlFlow::Continue)
    });

    output.exit()?;
    result
}
