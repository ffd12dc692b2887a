//! planview CLI - binary entry point and terminal session management.
//!
//! # Event Loop
//!
//! The dashboard is redrawn on a fixed 16ms cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain pending terminal input and apply decoded actions
//! 3. Drain plan stream events from the script producer
//! 4. Render frame
//!
//! All state changes happen on this loop, one event at a time, so rendering
//! always sees a settled dashboard.

mod script;

use anyhow::{Context, Result, anyhow};
use crossterm::{
    event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{self, Stdout, stdout},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use planview_engine::{Dashboard, Geometry, Outcome, PlanviewConfig};
use planview_tui::{KeyCommand, Panels, ReplyViewport, Spinner, draw, map_event};

use script::{Playback, ScriptItem};

const FRAME_DURATION: Duration = Duration::from_millis(16);
const FRAMES_PER_SPINNER_STEP: u32 = 5;

/// Send logs to the first log file that can be opened. Stdout belongs to the
/// dashboard, so with no writable location logs are dropped.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let opened = log_file_candidates()
        .into_iter()
        .find_map(|path| open_log_file(&path).ok().map(|file| (path, file)));

    match opened {
        Some((path, file)) => {
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
            tracing::info!(path = %path.display(), "Logging initialized");
        }
        None => registry.init(),
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `logs/planview.log` beside the config file, then under the working directory.
fn log_file_candidates() -> Vec<PathBuf> {
    let local = PathBuf::from(".planview").join("logs").join("planview.log");
    PlanviewConfig::path()
        .and_then(|config| config.parent().map(|dir| dir.join("logs").join("planview.log")))
        .into_iter()
        .chain([local])
        .collect()
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Raw mode and the alternate screen are restored even after panics or
/// early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                Err(err.into())
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let script_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: planview <plan-events.jsonl>"))?;

    let config = match PlanviewConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "{err}");
            PlanviewConfig::default()
        }
    };

    let items = script::load(&script_path)?;
    tracing::info!(events = items.len(), path = %script_path.display(), "Loaded plan script");

    let mut session = TerminalSession::new()?;
    run(&mut session.terminal, &config, items).await
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &PlanviewConfig,
    items: Vec<ScriptItem>,
) -> Result<()> {
    let options = config.ui_options();
    let size = terminal.size()?;
    let mut dashboard = Dashboard::new(
        Geometry::new(size.width, size.height).context("terminal reported an empty size")?,
    );
    let mut reply = ReplyViewport::new();
    let mut spinner = Spinner::new(options);

    let mut playback = Playback::start(items, config.event_interval());
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut frame_count: u32 = 0;

    loop {
        frames.tick().await;

        while event::poll(Duration::ZERO)? {
            let prompting = dashboard.phase().prompt().is_some();
            let Some(command) = map_event(&event::read()?, prompting) else {
                continue;
            };
            match command {
                KeyCommand::Quit => {
                    playback.stop();
                    return Ok(());
                }
                KeyCommand::Dashboard(action) => {
                    if let Some(outcome) = dashboard.apply_input(action) {
                        handle_outcome(outcome, &mut reply, &mut playback);
                    }
                }
                KeyCommand::ScrollUp(rows) => reply.scroll_up(rows),
                KeyCommand::ScrollDown(rows) => reply.scroll_down(rows),
                KeyCommand::Resize { width, height } => {
                    // Rejected sizes are logged by the dashboard.
                    let _ = dashboard.resize(width, height);
                }
            }
        }

        playback.drain(&mut dashboard, &mut reply);

        frame_count = frame_count.wrapping_add(1);
        if frame_count.is_multiple_of(FRAMES_PER_SPINNER_STEP) {
            spinner.advance();
        }

        terminal.draw(|frame| {
            let panels = Panels {
                main: &reply,
                processing: &spinner,
                help_text: config.help_text(),
            };
            draw(frame, &dashboard, &panels, options);
        })?;
    }
}

/// Act on a dashboard outcome. Applying the chosen file action belongs to the
/// plan producer; here the choice is recorded in the reply view.
fn handle_outcome(outcome: Outcome, reply: &mut ReplyViewport, playback: &mut Playback) {
    match outcome {
        Outcome::SelectionCommitted(selection) => {
            reply.push_line(&format!(
                "{}: {}",
                selection.path,
                selection.choice.label()
            ));
        }
        Outcome::StopRequested => {
            playback.stop();
            reply.push_line("Stopped.");
        }
    }
}
