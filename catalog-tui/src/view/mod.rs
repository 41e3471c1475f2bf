//! Renders the catalog screen.
//!
//! [`build`] is a pure function from screen state and viewport size to an
//! element tree. Only the rows inside the scroll window are built.

mod buffer;
mod element;
mod render;
mod spinner;
mod style;
mod text;

pub use buffer::{Buffer, Cell};
pub use element::{Content, Direction, Element, Size, Target};
pub use render::{HitMap, Rect, render_to_buffer};
pub use spinner::Spinner;
pub use style::{Rgb, Style, colors};
pub use text::{char_width, display_width, truncate_to_width};

use catalog_lib::Product;

use crate::screen::CatalogScreen;

/// Toolbar, status line and separator.
pub const HEADER_HEIGHT: u16 = 3;

/// Lines per product row, separator included.
pub const ROW_HEIGHT: u16 = 5;

const THUMBNAIL_WIDTH: u16 = 8;

/// How many product rows fit in a terminal of `height` lines.
pub fn rows_per_page(height: u16) -> usize {
    (height.saturating_sub(HEADER_HEIGHT) / ROW_HEIGHT).max(1) as usize
}

/// Fits the scroll window to `buf`, then builds and renders the screen.
pub fn draw(screen: &mut CatalogScreen, buf: &mut Buffer) -> HitMap {
    screen.set_viewport_rows(rows_per_page(buf.height()));
    let root = build(screen, buf.width(), buf.height());
    render_to_buffer(&root, buf)
}

/// Rows come from [`CatalogScreen::visible_range`], so the viewport must
/// already match `height` (see [`draw`]).
pub fn build(screen: &CatalogScreen, width: u16, height: u16) -> Element {
    let root = Element::column()
        .width(Size::Fixed(width))
        .height(Size::Fixed(height))
        .style(Style::new().background(colors::BACKGROUND));

    if screen.is_loading() {
        return root.child(loading(screen.tick()));
    }

    let visible = screen.visible_range();
    let start = visible.start;

    root.child(toolbar(screen))
        .child(status_line(screen))
        .child(separator(width))
        .child(
            Element::column().height(Size::Fill).children(
                screen.products()[visible]
                    .iter()
                    .enumerate()
                    .map(|(offset, product)| product_row(screen, product, start + offset, width)),
            ),
        )
}

/// The whole screen while loading: a centered spinner and nothing else.
fn loading(tick: usize) -> Element {
    let spinner = Element::row()
        .child(fill())
        .child(Spinner::new().frame(tick))
        .child(fill());

    Element::column()
        .height(Size::Fill)
        .child(Element::column().height(Size::Fill))
        .child(spinner)
        .child(Element::column().height(Size::Fill))
}

fn toolbar(screen: &CatalogScreen) -> Element {
    let label = if screen.selection().is_engaged() {
        "[ Deselect All ]"
    } else {
        "[ Select All ]"
    };
    let button = Style::new()
        .foreground(colors::FOREGROUND)
        .background(colors::BUTTON)
        .bold();

    Element::row()
        .height(Size::Fixed(1))
        .child(fill())
        .child(Element::text(label).style(button).target(Target::SelectAllButton))
        .child(fill())
        .child(Element::text("[ Clear ]").style(button).target(Target::ClearButton))
        .child(fill())
}

fn status_line(screen: &CatalogScreen) -> Element {
    let hint = if screen.selection().is_engaged() {
        "a deselect all · c clear · space toggle · ↑↓ move · q quit"
    } else {
        "a select all · c clear · ↑↓ move · q quit"
    };
    let count = format!("{} selected", screen.selection().len());

    Element::row()
        .height(Size::Fixed(1))
        .gap(1)
        .child(Element::text(""))
        .child(
            Element::text(hint)
                .width(Size::Fill)
                .style(Style::new().foreground(colors::MUTED).dim()),
        )
        .child(Element::text(count).style(Style::new().foreground(colors::ACCENT)))
        .child(Element::text(""))
}

fn separator(width: u16) -> Element {
    Element::text("─".repeat(width as usize))
        .height(Size::Fixed(1))
        .style(Style::new().foreground(colors::SEPARATOR))
}

fn product_row(screen: &CatalogScreen, product: &Product, index: usize, width: u16) -> Element {
    let mut line = Element::row().height(Size::Fixed(ROW_HEIGHT - 1)).gap(1).child(Element::text(""));

    if let Some(checked) = screen.selection().checkbox(product.id) {
        let (mark, color) = if checked {
            ("[x]", colors::ACCENT)
        } else {
            ("[ ]", colors::MUTED)
        };
        line = line.child(
            Element::column()
                .width(Size::Fixed(3))
                .child(Element::text(mark).style(Style::new().foreground(color).bold())),
        );
    }

    let thumbnail = Style::new().foreground(colors::THUMBNAIL);
    line = line
        .child(
            Element::column()
                .width(Size::Fixed(THUMBNAIL_WIDTH))
                .children((0..ROW_HEIGHT - 2).map(|_| {
                    Element::text("▒".repeat(THUMBNAIL_WIDTH as usize)).style(thumbnail)
                })),
        )
        .child(
            Element::column()
                .width(Size::Fill)
                .child(Element::text(product.title.as_str()).style(Style::new().bold()))
                .child(
                    Element::text(format!("${}", product.formatted_price()))
                        .style(Style::new().foreground(colors::PRICE)),
                )
                .child(
                    Element::text(product.category.as_str())
                        .style(Style::new().foreground(colors::MUTED)),
                )
                .child(
                    Element::text(product.image.as_str())
                        .style(Style::new().foreground(colors::MUTED).dim()),
                ),
        );

    let mut row = Element::column()
        .height(Size::Fixed(ROW_HEIGHT))
        .target(Target::Row(product.id))
        .child(line)
        .child(separator(width));

    if index == screen.cursor() {
        row = row.style(Style::new().background(colors::HIGHLIGHT));
    }
    row
}

fn fill() -> Element {
    Element::row().width(Size::Fill)
}
