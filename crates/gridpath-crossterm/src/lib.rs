//! Crossterm terminal driver for gridpath.
//!
//! [`CrosstermDriver`] implements [`gridpath_core::Driver`]: it puts the
//! terminal in raw mode on the alternate screen, translates key, mouse and
//! resize events into [`Msg`]s, and paints [`Frame`] diffs with 24-bit
//! colours.

use std::error::Error;
use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::{AttrMask, Color, Driver, Frame, Key, ModMask, MouseAction, Msg, Point};

fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate one crossterm event. Events with no counterpart yield `None`.
fn to_msg(ev: Event) -> Option<Msg> {
    let time = Instant::now();
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            to_key(code).map(|key| Msg::KeyDown {
                key,
                modifiers: to_mod_mask(modifiers),
                time,
            })
        }
        Event::Mouse(me) => {
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Drag(MouseButton::Left) => MouseAction::DragMain,
                MouseEventKind::Drag(MouseButton::Right) => MouseAction::DragSecondary,
                MouseEventKind::Up(_) => MouseAction::Release,
                _ => return None,
            };
            Some(Msg::Mouse {
                action,
                pos: Point::new(me.column as i32, me.row as i32),
                modifiers: to_mod_mask(me.modifiers),
                time,
            })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
            time,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
    size: Point,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
            size: Point::ZERO,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Current terminal size in characters.
    pub fn terminal_size() -> io::Result<Point> {
        let (w, h) = terminal::size()?;
        Ok(Point::new(w as i32, h as i32))
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            queue!(stdout, event::EnableMouseCapture)?;
        }
        stdout.flush()?;
        log::debug!("terminal initialised (mouse: {})", self.mouse_enabled);
        Ok(())
    }

    fn poll_msgs(&mut self, timeout: Duration, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout().lock();

        let size = Point::new(frame.width, frame.height);
        if size != self.size {
            // Resized: whatever was on screen no longer lines up.
            queue!(stdout, terminal::Clear(ClearType::All))?;
            self.size = size;
        }

        for fc in &frame.cells {
            let (p, glyph) = (fc.pos, fc.glyph);
            queue!(
                stdout,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(glyph.style.fg)),
                SetBackgroundColor(to_ct_color(glyph.style.bg))
            )?;
            let attrs = glyph.style.attrs;
            if attrs.contains(AttrMask::BOLD) {
                queue!(stdout, SetAttribute(Attribute::Bold))?;
            }
            if attrs.contains(AttrMask::REVERSE) {
                queue!(stdout, SetAttribute(Attribute::Reverse))?;
            }
            if attrs.contains(AttrMask::DIM) {
                queue!(stdout, SetAttribute(Attribute::Dim))?;
            }
            queue!(stdout, Print(glyph.ch))?;
            if !attrs.is_empty() {
                queue!(stdout, SetAttribute(Attribute::Reset))?;
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = queue!(stdout, event::DisableMouseCapture);
        }
        let _ = queue!(
            stdout,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}
