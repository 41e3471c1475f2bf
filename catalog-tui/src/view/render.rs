//! Layout and rendering of an [`Element`] tree into a [`Buffer`].

use super::buffer::{Buffer, Cell};
use super::element::{Content, Direction, Element, Size, Target};
use super::style::colors;
use super::text::{char_width, display_width, truncate_to_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Clickable regions recorded during the last render.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, rect: Rect, target: Target) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, target));
        }
    }

    /// Deepest target containing the point.
    pub fn hit(&self, x: u16, y: u16) -> Option<Target> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, target)| *target)
    }

    /// Rectangle recorded for `target`, if it was rendered.
    pub fn rect_of(&self, target: Target) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, t)| *t == target)
            .map(|(rect, _)| *rect)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Renders `root` over the whole buffer and returns its clickable regions.
pub fn render_to_buffer(root: &Element, buf: &mut Buffer) -> HitMap {
    let mut hits = HitMap::new();
    let area = Rect::new(0, 0, buf.width(), buf.height());
    render_element(root, area, buf, &mut hits);
    hits
}

fn render_element(element: &Element, rect: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    if let Some(bg) = element.style.background {
        for y in rect.y..rect.bottom().min(buf.height()) {
            for x in rect.x..rect.right().min(buf.width()) {
                if let Some(cell) = buf.get_mut(x, y) {
                    cell.bg = bg;
                }
            }
        }
    }

    if let Some(target) = element.target {
        hits.push(rect, target);
    }

    match &element.content {
        Content::Text(text) => render_text(text, element, rect, buf),
        Content::Children(children) => {
            let main_axis = match element.direction {
                Direction::Column => rect.height,
                Direction::Row => rect.width,
            };
            let sizes = distribute(children, element.direction, element.gap, main_axis);

            let mut offset = 0u16;
            for (child, size) in children.iter().zip(sizes) {
                if offset >= main_axis {
                    break;
                }
                let size = size.min(main_axis - offset);
                let child_rect = match element.direction {
                    Direction::Column => Rect::new(rect.x, rect.y + offset, rect.width, size),
                    Direction::Row => Rect::new(rect.x + offset, rect.y, size, rect.height),
                };
                render_element(child, child_rect, buf, hits);
                offset = offset.saturating_add(size).saturating_add(element.gap);
            }
        }
    }
}

/// Main-axis size of each child. `Fill` children split what is left evenly.
fn distribute(children: &[Element], direction: Direction, gap: u16, available: u16) -> Vec<u16> {
    let main_size = |child: &Element| match direction {
        Direction::Column => child.height,
        Direction::Row => child.width,
    };

    let gaps = gap.saturating_mul(children.len().saturating_sub(1) as u16);
    let mut used = gaps;
    let mut fill_count = 0u16;
    let mut sizes: Vec<u16> = children
        .iter()
        .map(|child| match main_size(child) {
            Size::Fixed(n) => {
                used = used.saturating_add(n);
                n
            }
            Size::Auto => {
                let n = match direction {
                    Direction::Column => measure_height(child),
                    Direction::Row => measure_width(child),
                };
                used = used.saturating_add(n);
                n
            }
            Size::Fill => {
                fill_count += 1;
                0
            }
        })
        .collect();

    if fill_count > 0 {
        let remaining = available.saturating_sub(used);
        let share = remaining / fill_count;
        let mut extra = remaining % fill_count;
        for (size, child) in sizes.iter_mut().zip(children) {
            if main_size(child) == Size::Fill {
                *size = share + u16::from(extra > 0);
                extra = extra.saturating_sub(1);
            }
        }
    }

    sizes
}

pub fn measure_width(element: &Element) -> u16 {
    match element.width {
        Size::Fixed(n) => return n,
        Size::Fill => return 0,
        Size::Auto => {}
    }
    match &element.content {
        Content::Text(text) => display_width(text).min(u16::MAX as usize) as u16,
        Content::Children(children) => {
            let widths = children.iter().map(measure_width);
            match element.direction {
                Direction::Row => {
                    let gaps = element.gap.saturating_mul(children.len().saturating_sub(1) as u16);
                    widths.fold(gaps, u16::saturating_add)
                }
                Direction::Column => widths.max().unwrap_or(0),
            }
        }
    }
}

pub fn measure_height(element: &Element) -> u16 {
    match element.height {
        Size::Fixed(n) => return n,
        Size::Fill => return 0,
        Size::Auto => {}
    }
    match &element.content {
        Content::Text(_) => 1,
        Content::Children(children) => {
            let heights = children.iter().map(measure_height);
            match element.direction {
                Direction::Column => {
                    let gaps = element.gap.saturating_mul(children.len().saturating_sub(1) as u16);
                    heights.fold(gaps, u16::saturating_add)
                }
                Direction::Row => heights.max().unwrap_or(0),
            }
        }
    }
}

fn render_text(text: &str, element: &Element, rect: Rect, buf: &mut Buffer) {
    let fg = element.style.foreground.unwrap_or(colors::FOREGROUND);
    let visible = truncate_to_width(text, rect.width as usize);

    let mut x = rect.x;
    let y = rect.y;
    for ch in visible.chars() {
        let width = char_width(ch) as u16;
        if width == 0 {
            continue;
        }
        if x.saturating_add(width) > rect.right() {
            break;
        }

        // Keep whatever background a parent painted.
        let bg = element
            .style
            .background
            .or_else(|| buf.get(x, y).map(|c| c.bg))
            .unwrap_or(colors::BACKGROUND);

        let cell = Cell {
            char: ch,
            fg,
            bg,
            bold: element.style.bold,
            dim: element.style.dim,
            wide_continuation: false,
        };
        buf.set(x, y, cell);
        for offset in 1..width {
            buf.set(x + offset, y, Cell {
                char: ' ',
                wide_continuation: true,
                ..cell
            });
        }
        x += width;
    }
}
