//! Document layout: places the proposal's lines on fixed-geometry pages.
//!
//! # Layout rules
//! - Title (bold 16pt, centered), gap
//! - "Generated on: <Month DD, YYYY>" (oblique 12pt), gap
//! - "Client Information:" label + wrapped body (always present, may be blank), gap
//! - "Proposal:" label + wrapped body
//!
//! Every line occupies one `line_height_pt` cell. A line that would cross the
//! bottom margin starts a new page, a label is never the last line on a page,
//! and gaps are dropped at the top of a page.
//!
//! The result is a pure function of its inputs; PDF serialization lives in `render`.

use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::layout::font_metrics::{get_metrics, BuiltinFont};
use crate::layout::wrap::wrap_text;

pub const DOCUMENT_TITLE: &str = "Professional Upwork Proposal";
pub const CLIENT_INFO_LABEL: &str = "Client Information:";
pub const PROPOSAL_LABEL: &str = "Proposal:";

/// Byte length of the longest timestamp line; the writer pads shorter ones to it.
pub const TIMESTAMP_FIELD_LEN: usize = "Generated on: September 30, 2024".len();

const MM: f32 = 72.0 / 25.4;
const EPSILON: f32 = 0.01;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Page dimensions in PDF points (1/72 inch), origin at the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_left_pt: f32,
    pub margin_right_pt: f32,
    pub margin_top_pt: f32,
    /// Content never extends below `height_pt - margin_bottom_pt`.
    pub margin_bottom_pt: f32,
    /// Horizontal inset of text inside its cell, on both sides.
    pub cell_padding_pt: f32,
    pub line_height_pt: f32,
}

/// A4 portrait, 10mm side/top margins, 20mm bottom margin, 10mm lines.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry {
        width_pt: 595.28,
        height_pt: 841.89,
        margin_left_pt: 10.0 * MM,
        margin_right_pt: 10.0 * MM,
        margin_top_pt: 10.0 * MM,
        margin_bottom_pt: 20.0 * MM,
        cell_padding_pt: 1.0 * MM,
        line_height_pt: 10.0 * MM,
    }
}

impl PageGeometry {
    /// Full width of a cell between the margins.
    pub fn cell_width(&self) -> f32 {
        self.width_pt - self.margin_left_pt - self.margin_right_pt
    }

    /// Width available for wrapped text: the cell minus its padding.
    pub fn writable_width(&self) -> f32 {
        self.cell_width() - 2.0 * self.cell_padding_pt
    }

    pub fn content_bottom(&self) -> f32 {
        self.height_pt - self.margin_bottom_pt
    }

    /// Number of full lines that fit between the top and bottom margins.
    #[cfg(test)]
    pub fn lines_per_page(&self) -> usize {
        ((self.content_bottom() - self.margin_top_pt + EPSILON) / self.line_height_pt) as usize
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Laid-out content
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Timestamp,
    Label,
    Body,
}

impl TextStyle {
    pub fn font(self) -> BuiltinFont {
        match self {
            TextStyle::Title | TextStyle::Label => BuiltinFont::HelveticaBold,
            TextStyle::Timestamp => BuiltinFont::HelveticaOblique,
            TextStyle::Body => BuiltinFont::Helvetica,
        }
    }

    pub fn size_pt(self) -> f32 {
        match self {
            TextStyle::Title => 16.0,
            _ => 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// One printed line. `x` is the left edge of the text, `baseline` is measured from the page top.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: TextStyle,
    pub x: f32,
    pub baseline: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub geometry: PageGeometry,
    pub pages: Vec<LaidOutPage>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    #[cfg(test)]
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }
}

/// `Generated on: March 05, 2024`, using the calendar date in `generated_at`'s own zone.
pub fn format_generated_on<Tz: TimeZone>(generated_at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("Generated on: {}", generated_at.format("%B %d, %Y"))
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the full proposal document.
pub fn layout_document<Tz: TimeZone>(
    proposal_text: &str,
    client_info: &str,
    generated_at: DateTime<Tz>,
    geometry: &PageGeometry,
) -> DocumentLayout
where
    Tz::Offset: fmt::Display,
{
    let mut cursor = PageCursor::new(geometry);

    cursor.place(DOCUMENT_TITLE, TextStyle::Title, Align::Center);
    cursor.gap();

    cursor.place(
        &format_generated_on(&generated_at),
        TextStyle::Timestamp,
        Align::Left,
    );
    cursor.gap();

    cursor.labelled_block(CLIENT_INFO_LABEL, client_info);
    cursor.gap();

    cursor.labelled_block(PROPOSAL_LABEL, proposal_text);

    cursor.finish()
}

/// Tracks the vertical position and opens pages as content flows down.
struct PageCursor<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<LaidOutPage>,
    y: f32,
}

impl<'g> PageCursor<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![LaidOutPage::default()],
            y: geometry.margin_top_pt,
        }
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, |p| p.lines.is_empty())
    }

    fn fits(&self, line_count: usize) -> bool {
        self.y + line_count as f32 * self.geometry.line_height_pt
            <= self.geometry.content_bottom() + EPSILON
    }

    /// Opens a new page unless `line_count` lines fit here. An empty page always accepts.
    fn ensure_room(&mut self, line_count: usize) {
        if !self.fits(line_count) && !self.page_is_empty() {
            self.pages.push(LaidOutPage::default());
            self.y = self.geometry.margin_top_pt;
        }
    }

    fn place(&mut self, text: &str, style: TextStyle, align: Align) {
        self.ensure_room(1);
        self.push_line(text, style, align);
    }

    fn push_line(&mut self, text: &str, style: TextStyle, align: Align) {
        let g = self.geometry;
        let x = match align {
            Align::Left => g.margin_left_pt + g.cell_padding_pt,
            Align::Center => {
                let width = get_metrics(style.font()).measure_str(text, style.size_pt());
                g.margin_left_pt + (g.cell_width() - width) / 2.0
            }
        };
        // Vertically centred in the cell, the way core-font cells are drawn.
        let baseline = self.y + 0.5 * g.line_height_pt + 0.3 * style.size_pt();

        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedLine {
                text: text.to_string(),
                style,
                x,
                baseline,
            });
        }
        self.y += g.line_height_pt;
    }

    fn gap(&mut self) {
        if !self.page_is_empty() {
            self.y += self.geometry.line_height_pt;
        }
    }

    /// Bold label followed by wrapped body text; the label keeps its first body line.
    fn labelled_block(&mut self, label: &str, body: &str) {
        let style = TextStyle::Body;
        let lines = wrap_text(
            body,
            get_metrics(style.font()),
            style.size_pt(),
            self.geometry.writable_width(),
        );

        self.ensure_room(2);
        self.push_line(label, TextStyle::Label, Align::Left);
        for line in &lines {
            self.place(line, style, Align::Left);
        }
    }

    fn finish(self) -> DocumentLayout {
        DocumentLayout {
            geometry: self.geometry.clone(),
            pages: self.pages,
        }
    }
}
