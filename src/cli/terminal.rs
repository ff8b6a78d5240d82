//! Terminal Host Module
//!
//! crossterm-backed implementation of the prompt host: redraws frames in
//! place, owns raw mode and cursor visibility for the life of a session,
//! and feeds decoded key presses into the session's input channel.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event,
    execute, queue,
    style::Print,
    terminal::{self, disable_raw_mode, enable_raw_mode, ClearType},
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};

use super::keys::{decode_event, InputEvent};
use super::prompter::PromptHost;
use super::protocol::Outcome;
use super::utils::visible_width;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Exclusive claim on raw mode and a hidden cursor.
///
/// Released explicitly on session end and again (harmlessly) on drop, so
/// every exit path restores the terminal.
#[derive(Debug)]
pub struct CursorGuard {
    active: bool,
}

impl CursorGuard {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self { active: true })
    }

    pub fn release(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(io::stdout(), cursor::Show)?;
        disable_raw_mode()
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// Where the host learns how wide a screen row is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowWidth {
    /// Ask the terminal on every render, so resizes are picked up
    Terminal,
    Fixed(u16),
    /// Lines never wrap
    Unbounded,
}

/// Screen rows a line occupies once the terminal wraps it
fn wrapped_rows(line: &str, width: Option<u16>) -> usize {
    match width {
        Some(width) if width > 0 => visible_width(line).div_ceil(usize::from(width)).max(1),
        _ => 1,
    }
}

/// Screen writer that replaces the previous frame on every render
pub struct TerminalHost<W: Write> {
    out: W,
    rendered_lines: u16,
    row_width: RowWidth,
    guard: Option<CursorGuard>,
}

impl TerminalHost<Stdout> {
    /// Take over stdout for a prompt session
    pub fn acquire() -> io::Result<Self> {
        let guard = CursorGuard::acquire()?;
        Ok(Self {
            out: io::stdout(),
            rendered_lines: 0,
            row_width: RowWidth::Terminal,
            guard: Some(guard),
        })
    }
}

impl<W: Write> TerminalHost<W> {
    /// Host writing to an arbitrary sink, without touching terminal modes
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            rendered_lines: 0,
            row_width: RowWidth::Unbounded,
            guard: None,
        }
    }

    /// Treat the sink as a screen `width` columns wide
    pub fn with_width(mut self, width: u16) -> Self {
        self.row_width = RowWidth::Fixed(width);
        self
    }

    fn screen_width(&self) -> Option<u16> {
        match self.row_width {
            RowWidth::Terminal => terminal::size().ok().map(|(width, _)| width),
            RowWidth::Fixed(width) => Some(width),
            RowWidth::Unbounded => None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear_previous(&mut self) -> io::Result<()> {
        if self.rendered_lines > 0 {
            queue!(self.out, cursor::MoveToPreviousLine(self.rendered_lines))?;
        } else {
            queue!(self.out, cursor::MoveToColumn(0))?;
        }
        queue!(self.out, terminal::Clear(ClearType::FromCursorDown))?;
        Ok(())
    }
}

impl<W: Write> PromptHost for TerminalHost<W> {
    fn render(&mut self, content: &str, bottom: &str) -> io::Result<()> {
        self.clear_previous()?;

        let mut text = content.to_string();
        if !bottom.is_empty() {
            text.push('\n');
            text.push_str(bottom);
        }

        // Raw mode: every line break needs an explicit carriage return.
        let lines = text.split('\n').collect::<Vec<_>>();
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                queue!(self.out, Print("\r\n"))?;
            }
            queue!(self.out, Print(line))?;
        }
        // Rows above the last one, counting wrapped continuations.
        let width = self.screen_width();
        let rows = lines
            .iter()
            .map(|line| wrapped_rows(line, width))
            .sum::<usize>();
        self.rendered_lines = u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX);

        self.out.flush()
    }

    fn done(&mut self, outcome: &Outcome) -> io::Result<()> {
        debug!(submitted = outcome.is_submitted(), "releasing terminal");
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()?;
        self.rendered_lines = 0;
        if let Some(mut guard) = self.guard.take() {
            guard.release()?;
        }
        Ok(())
    }
}

/// Start reading terminal events on a blocking task.
///
/// The task stops once the returned receiver is dropped or the terminal
/// reports an error; in both cases the channel closes.
pub fn spawn_input_reader() -> UnboundedReceiver<InputEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input) = decode_event(event) {
                            if tx.send(input).is_err() {
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!("terminal read failed: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("terminal poll failed: {}", e);
                    break;
                }
            }
        }
        debug!("input reader stopped");
    });

    rx
}
