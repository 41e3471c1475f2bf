//! Indeterminate loading indicator.
//!
//! A bouncing bar ("snake") that runs across a dotted track and back, with a
//! brighter head and a dimmer tail.

use super::element::Element;
use super::style::{Style, colors};

#[derive(Clone, Debug)]
pub struct Spinner {
    /// Width of the track in characters.
    track_width: u16,
    /// Length of the snake.
    snake_len: u16,
    /// Pause frames at the right end.
    right_pause: usize,
    /// Pause frames at the left end.
    left_pause: usize,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            track_width: 8,
            snake_len: 6,
            right_pause: 1,
            left_pause: 20,
        }
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    fn pass_len(&self) -> usize {
        (self.track_width + self.snake_len - 1) as usize
    }

    /// Frames in one full cycle.
    pub fn frame_count(&self) -> usize {
        2 * self.pass_len() + self.right_pause + self.left_pause
    }

    /// The frame for animation tick `tick`. Ticks wrap around.
    pub fn frame(&self, tick: usize) -> Element {
        let pass = self.pass_len();
        let mut i = tick % self.frame_count();

        if i < pass {
            return self.snake_frame(i as i32, true);
        }
        i -= pass;
        if i < self.right_pause {
            return self.empty_frame();
        }
        i -= self.right_pause;
        if i < pass {
            return self.snake_frame((pass - 1 - i) as i32, false);
        }
        self.empty_frame()
    }

    fn empty_frame(&self) -> Element {
        let track = Style::new().foreground(colors::ACCENT.darken(0.5));
        Element::row().children((0..self.track_width).map(|_| Element::text("⬝").style(track)))
    }

    fn snake_frame(&self, head_pos: i32, moving_right: bool) -> Element {
        let track = Style::new().foreground(colors::ACCENT.darken(0.5));
        let snake_len = self.snake_len as i32;
        let snake_start = head_pos - snake_len + 1;

        Element::row().children((0..self.track_width as i32).map(|i| {
            if i < snake_start || i > head_pos {
                return Element::text("⬝").style(track);
            }

            let along = (i - snake_start) as f32 / (snake_len - 1) as f32;
            let t = if moving_right { along } else { 1.0 - along };
            // Tail is darkened by 0.4, head not at all.
            let color = colors::ACCENT.darken(0.4 * (1.0 - t));
            Element::text("■").style(Style::new().foreground(color))
        }))
    }
}
