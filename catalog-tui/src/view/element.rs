//! Element tree produced by the view and consumed by the renderer.

use catalog_lib::ProductId;

use super::style::Style;

/// What a mouse click on an element means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The "Select All"/"Deselect All" toolbar button.
    SelectAllButton,
    /// The "Clear" toolbar button.
    ClearButton,
    /// A product row.
    Row(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    /// Size of the content.
    #[default]
    Auto,
    Fixed(u16),
    /// Share of the space left after `Auto` and `Fixed` siblings.
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Column,
    Row,
}

#[derive(Debug, Clone)]
pub enum Content {
    Text(String),
    Children(Vec<Element>),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub content: Content,
    pub direction: Direction,
    pub style: Style,
    pub width: Size,
    pub height: Size,
    pub gap: u16,
    pub target: Option<Target>,
}

impl Element {
    fn container(direction: Direction) -> Self {
        Self {
            content: Content::Children(Vec::new()),
            direction,
            style: Style::default(),
            width: Size::Auto,
            height: Size::Auto,
            gap: 0,
            target: None,
        }
    }

    /// Children stacked top to bottom.
    pub fn column() -> Self {
        Self::container(Direction::Column)
    }

    /// Children laid out left to right.
    pub fn row() -> Self {
        Self::container(Direction::Row)
    }

    /// A single line of text, truncated to the space it gets.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Content::Text(text.into()),
            ..Self::container(Direction::Row)
        }
    }

    pub fn child(mut self, child: Element) -> Self {
        if let Content::Children(children) = &mut self.content {
            children.push(child);
        }
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = Element>) -> Self {
        if let Content::Children(children) = &mut self.content {
            children.extend(iter);
        }
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }
}
