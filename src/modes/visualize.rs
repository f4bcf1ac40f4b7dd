//! Watch the agent learn in the terminal
//!
//! Runs the same [`Trainer`] loop as the headless mode, with a TUI frame drawn
//! after every step. Pressing Q, Esc or Ctrl+C stops training cleanly; the
//! terminal is always restored before the per-episode lines are printed.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io::{Stderr, stderr};
use std::thread;
use std::time::Duration;

use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

use super::train::{
    CancellationSignal, CollectingObserver, FrameRenderer, TrainConfig, Trainer, TrainingFrame,
    TrainingOutcome,
};

/// Pause between rendered steps unless configured otherwise
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// Draws each step into a ratatui terminal
pub struct TerminalView {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    metrics: GameMetrics,
    frame_delay: Duration,
}

impl TerminalView {
    fn new(terminal: Terminal<CrosstermBackend<Stderr>>, frame_delay: Duration) -> Self {
        Self {
            terminal,
            renderer: Renderer::new(),
            metrics: GameMetrics::new(),
            frame_delay,
        }
    }
}

impl FrameRenderer for TerminalView {
    fn render(&mut self, frame: &TrainingFrame<'_>) -> Result<()> {
        self.metrics.update();
        self.terminal
            .draw(|f| self.renderer.render(f, frame, &self.metrics))
            .context("Failed to draw frame")?;

        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
        Ok(())
    }
}

/// Polls the keyboard without blocking; fires on a quit key
pub struct KeyboardCancel {
    input_handler: InputHandler,
}

impl KeyboardCancel {
    pub fn new() -> Self {
        Self {
            input_handler: InputHandler::new(),
        }
    }
}

impl Default for KeyboardCancel {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationSignal for KeyboardCancel {
    fn is_cancelled(&mut self) -> bool {
        // A terminal read error is treated like no input
        while let Ok(true) = event::poll(Duration::ZERO) {
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            if self.input_handler.handle_key_event(key) == KeyAction::Quit {
                return true;
            }
        }
        false
    }
}

/// Training with a live terminal view
pub struct VisualizeMode {
    trainer: Trainer,
    frame_delay: Duration,
}

impl VisualizeMode {
    pub fn new(config: TrainConfig, frame_delay: Duration) -> Result<Self> {
        let trainer = Trainer::new(config).context("Invalid training configuration")?;
        Ok(Self {
            trainer,
            frame_delay,
        })
    }

    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }

    pub fn run(&mut self) -> Result<TrainingOutcome> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = restore_terminal_state();
                return Err(err).context("Failed to create terminal");
            }
        };
        if let Err(err) = Self::prepare_terminal(&mut terminal) {
            let _ = Self::cleanup_terminal(&mut terminal);
            return Err(err);
        }

        let mut view = TerminalView::new(terminal, self.frame_delay);
        let mut observer = CollectingObserver::default();
        let mut cancel = KeyboardCancel::new();

        let outcome = self
            .trainer
            .run(&mut observer, &mut cancel, Some(&mut view));

        // Cleanup terminal
        Self::cleanup_terminal(&mut view.terminal)?;

        for line in report_lines(&observer, &outcome, self.trainer.render_failures()) {
            println!("{line}");
        }

        Ok(outcome)
    }

    fn prepare_terminal<B: Backend>(terminal: &mut Terminal<B>) -> Result<()> {
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(())
    }

    fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Lines printed once the terminal is back to normal
fn report_lines(
    observer: &CollectingObserver,
    outcome: &TrainingOutcome,
    render_failures: usize,
) -> Vec<String> {
    let mut lines: Vec<String> = observer.episodes.iter().map(ToString::to_string).collect();

    match outcome {
        TrainingOutcome::Completed(summary) => {
            lines.push(summary.to_string());
            lines.push("Training complete.".to_string());
        }
        TrainingOutcome::Cancelled { episode, summary } => {
            lines.push(summary.to_string());
            lines.push(format!("Training stopped during episode {episode}."));
        }
    }

    if render_failures > 0 {
        lines.push(format!(
            "Warning: {render_failures} frame(s) failed to render; training was unaffected."
        ));
    }
    lines
}

fn restore_terminal_state() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(stderr(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    Ok(())
}
