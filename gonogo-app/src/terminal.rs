//! Crossterm screen and keyboard feed for the channel host.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use gonogo_core::{HostError, Key, PhaseContent};
use gonogo_experiment::Screen;
use std::io::{Stdout, Write, stdout};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

/// Raw mode and alternate screen for the lifetime of the guard.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub struct TerminalScreen {
    out: Stdout,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self { out: stdout() }
    }

    fn draw(&mut self, content: &PhaseContent) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        queue!(self.out, Clear(ClearType::All))?;
        match content {
            PhaseContent::Fixation => self.centered(cols, rows, &["+"], None)?,
            PhaseContent::Word(word) => {
                self.centered(cols, rows, &[word.label()], Some(rgb(word.color())))?
            }
            PhaseContent::Feedback(feedback) => {
                self.centered(cols, rows, &[feedback.message()], Some(rgb(feedback.color())))?
            }
            PhaseContent::Text(text) => {
                let lines: Vec<&str> = text.lines().collect();
                self.centered(cols, rows, &lines, None)?
            }
        }
        self.out.flush()
    }

    fn centered(
        &mut self,
        cols: u16,
        rows: u16,
        lines: &[&str],
        color: Option<Color>,
    ) -> std::io::Result<()> {
        let top = (rows / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let width = line.chars().count() as u16;
            let x = (cols / 2).saturating_sub(width / 2);
            queue!(self.out, cursor::MoveTo(x, top + i as u16))?;
            if let Some(color) = color {
                queue!(
                    self.out,
                    SetForegroundColor(color),
                    SetAttribute(Attribute::Bold),
                    Print(line),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?;
            } else {
                queue!(self.out, Print(line))?;
            }
        }
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn show(&mut self, content: &PhaseContent) -> Result<(), HostError> {
        self.draw(content)
            .map_err(|e| HostError::Display(e.to_string()))
    }
}

fn rgb([r, g, b, _]: [u8; 4]) -> Color {
    Color::Rgb { r, g, b }
}

pub fn map_key(event: &KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Polls the terminal on a background thread until the receiver is gone.
pub fn spawn_key_reader(tx: UnboundedSender<Key>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            match event::poll(Duration::from_millis(5)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key_event)) => {
                        if let Some(key) = map_key(&key_event) {
                            if tx.send(key).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(error) => {
                        warn!(%error, "keyboard read failed");
                        break;
                    }
                },
                Ok(false) => {
                    if tx.is_closed() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "keyboard poll failed");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn maps_keys_used_by_the_task() {
        assert_eq!(
            map_key(&press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Key::Space)
        );
        assert_eq!(
            map_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Escape)
        );
        assert_eq!(
            map_key(&press(KeyCode::Char('P'), KeyModifiers::SHIFT)),
            Some(Key::Char('P'))
        );
        assert_eq!(map_key(&press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut event = press(KeyCode::Char(' '), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(&event), None);
    }
}
