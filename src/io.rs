use std::io;
use std::io::Write;
use std::thread;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use crossterm::queue;
use crossterm::style;

use crate::Age;
use crate::events::ControlEvent;
use crate::sim::Clock;
use crate::sim::EventSource;
use crate::sim::RenderSink;

/// Age shading, newly born (dark) through aged (light gray).
const SHADES: &[u8] = b"@%#*+=~-:.";

/// Renders each cell as a shade character at its terminal position.
///
/// Cells are queued and the frame is flushed once, when the bottom-right
/// cell arrives.
pub struct TermDisplay {
    rows: usize,
    cols: usize,
    max_age: Age,
}

impl TermDisplay {
    pub fn new(rows: usize, cols: usize, max_age: Age) -> Self {
        Self {
            rows,
            cols,
            max_age,
        }
    }

    fn shade(&self, age: Age) -> char {
        if age == 0 {
            return ' ';
        }

        let span = (self.max_age as usize).saturating_sub(1).max(1);
        let capped = age.min(self.max_age) as usize;
        let i = (capped - 1) * (SHADES.len() - 1) / span;

        SHADES[i.min(SHADES.len() - 1)] as char
    }
}

impl RenderSink for TermDisplay {
    fn draw_cell_at(&mut self, row: usize, col: usize, age: Age) -> io::Result<()> {
        let mut stdout = io::stdout();

        queue!(
            stdout,
            cursor::MoveTo(col as u16, row as u16),
            style::Print(self.shade(age))
        )?;

        if row + 1 == self.rows && col + 1 == self.cols {
            stdout.flush()?;
        }

        Ok(())
    }
}

/// Polls the terminal for cancellation and manual-advance input.
pub struct TermEvents;

impl EventSource for TermEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<ControlEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let event = event::read()?;

        Ok(convert_event(event))
    }
}

/// Converts a crossterm event into a simulation control event.
fn convert_event(event: CrossTermEvent) -> Option<ControlEvent> {
    match event {
        CrossTermEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(ControlEvent::Cancel),
            KeyEvent {
                code: KeyCode::Enter | KeyCode::Char(' '),
                ..
            } => Some(ControlEvent::Step),
            _ => None,
        },
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(_),
            ..
        }) => Some(ControlEvent::Cancel),
        _ => None,
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
