//! Terminal setup, teardown and diff-based drawing.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use crate::view::{Buffer, Cell, Rgb, char_width};

/// Owns the terminal while the screen is shown and restores it on drop or
/// panic.
pub struct Terminal {
    stdout: Stdout,
    current: Buffer,
    previous: Buffer,
    /// The next flush repaints every cell.
    full_redraw: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: Buffer::new(width, height),
            full_redraw: true,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Queries the terminal size and resizes the back buffers if it changed.
    pub fn refresh_size(&mut self) -> io::Result<(u16, u16)> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size() {
            self.current = Buffer::new(width, height);
            self.previous = Buffer::new(width, height);
            self.full_redraw = true;
        }
        Ok((width, height))
    }

    /// Draws a frame. `paint` fills a cleared buffer, and only cells that
    /// changed since the previous frame are written.
    pub fn draw<T>(&mut self, paint: impl FnOnce(&mut Buffer) -> T) -> io::Result<T> {
        self.current.clear();
        let out = paint(&mut self.current);

        if self.full_redraw {
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
            // Guarantees every cell differs from the previous frame.
            self.previous.fill(Cell {
                char: '\0',
                ..Cell::default()
            });
            self.full_redraw = false;
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(out)
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_pos: Option<(u16, u16)> = None;
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;
        let mut last_bold = false;
        let mut last_dim = false;

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current.diff(&self.previous) {
            if cell.wide_continuation {
                continue;
            }

            if last_pos != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if cell.bold != last_bold || cell.dim != last_dim {
                // NormalIntensity clears both bold and dim.
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
                if cell.bold {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
                if cell.dim {
                    queue!(self.stdout, SetAttribute(Attribute::Dim))?;
                }
                last_bold = cell.bold;
                last_dim = cell.dim;
            }

            if last_fg != Some(cell.fg) {
                queue!(self.stdout, SetForegroundColor(to_color(cell.fg)))?;
                last_fg = Some(cell.fg);
            }
            if last_bg != Some(cell.bg) {
                queue!(self.stdout, SetBackgroundColor(to_color(cell.bg)))?;
                last_bg = Some(cell.bg);
            }

            write!(self.stdout, "{}", cell.char)?;
            let width = char_width(cell.char).max(1) as u16;
            last_pos = Some((x.saturating_add(width), y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, cursor::Show, LeaveAlternateScreen)?;
    Ok(())
}
