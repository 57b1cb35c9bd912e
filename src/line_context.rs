//! Drawing state for a polyline request.
//!
//! Only the line width and line style decide whether a request can take the
//! rectangle path; the fill is carried through to the target untouched.

/// How a line's pixels are painted along its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// Every pixel painted with the fill.
    #[default]
    Solid,
    /// Alternating painted and skipped dashes.
    OnOffDash,
    /// Dashes in the fill, gaps in a background.
    DoubleDash,
}

/// Line width, line style and fill of a drawing request.
#[derive(Debug, Clone, PartialEq)]
pub struct LineContext<C> {
    line_width: u32,
    line_style: LineStyle,
    fill: C,
}

impl<C> LineContext<C> {
    /// A thin, solid context painting with `fill`.
    pub fn new(fill: C) -> Self {
        Self {
            line_width: 0,
            line_style: LineStyle::Solid,
            fill,
        }
    }

    pub fn with_line_width(mut self, width: u32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    /// Zero means a thin (one pixel, per-pixel rasterized) line.
    pub fn line_width(&self) -> u32 {
        self.line_width
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn fill(&self) -> &C {
        &self.fill
    }

    pub fn set_fill(&mut self, fill: C) {
        self.fill = fill;
    }

    /// True if lines drawn with this context can become rectangle fills.
    pub fn is_thin_solid(&self) -> bool {
        self.line_width == 0 && self.line_style == LineStyle::Solid
    }
}
