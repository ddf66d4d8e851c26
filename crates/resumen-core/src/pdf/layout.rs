//! Text reconstruction on a character grid.
//!
//! `pdf-extract` reports every glyph with its text rendering matrix. Glyphs
//! sharing a baseline become one line, and each glyph lands in the column
//! given by its x offset from the page edge divided by the page's character
//! cell, so fixed-column statements keep their offsets.

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use tracing::trace;

/// A glyph with its origin in page space.
#[derive(Debug, Clone)]
struct Glyph {
    x: f64,
    y: f64,
    size: f64,
    advance: f64,
    text: String,
}

/// `OutputDev` laying the glyphs of each page out as text lines.
#[derive(Debug, Default)]
pub struct GridText {
    left: f64,
    glyphs: Vec<Glyph>,
    lines: Vec<String>,
}

impl GridText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines of every page, in page order.
    pub fn into_lines(mut self) -> Vec<String> {
        self.flush_page();
        self.lines
    }

    fn flush_page(&mut self) {
        if self.glyphs.is_empty() {
            return;
        }
        let glyphs = std::mem::take(&mut self.glyphs);
        self.lines.extend(layout_page(glyphs, self.left));
    }
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    Some(values[values.len() / 2])
}

/// Width of one column: the typical advance of a printed glyph.
fn cell_width(glyphs: &[Glyph]) -> Option<f64> {
    let mut advances: Vec<f64> = glyphs
        .iter()
        .filter(|g| g.advance > 0.0 && !g.text.trim().is_empty())
        .map(|g| g.advance)
        .collect();
    let mut half_sizes: Vec<f64> = glyphs
        .iter()
        .filter(|g| g.size > 0.0)
        .map(|g| g.size / 2.0)
        .collect();
    median(&mut advances).or_else(|| median(&mut half_sizes))
}

/// Lay glyphs out top to bottom, one line per baseline.
fn layout_page(mut glyphs: Vec<Glyph>, left: f64) -> Vec<String> {
    let Some(cell) = cell_width(&glyphs) else {
        return Vec::new();
    };
    trace!("Page of {} glyphs, cell width {:.2}", glyphs.len(), cell);

    // Gaps are rebuilt from positions.
    glyphs.retain(|g| !g.text.trim().is_empty());
    glyphs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut rows: Vec<Vec<Glyph>> = Vec::new();
    let mut baseline = 0.0;
    for glyph in glyphs {
        if rows.is_empty() || (baseline - glyph.y).abs() > glyph.size * 0.5 {
            baseline = glyph.y;
            rows.push(Vec::new());
        }
        if let Some(row) = rows.last_mut() {
            row.push(glyph);
        }
    }

    rows.into_iter().map(|row| render_row(row, left, cell)).collect()
}

fn render_row(mut row: Vec<Glyph>, left: f64, cell: f64) -> String {
    row.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut line = String::new();
    let mut len = 0;
    for glyph in row {
        let column = ((glyph.x - left) / cell).round().max(0.0) as usize;
        if column > len {
            line.push_str(&" ".repeat(column - len));
            len = column;
        }
        line.push_str(&glyph.text);
        len += glyph.text.chars().count();
    }
    line
}

impl OutputDev for GridText {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.flush_page();
        self.left = media_box.llx;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush_page();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        text: &str,
    ) -> Result<(), OutputError> {
        let scale = (trm.m11 * trm.m22 - trm.m12 * trm.m21).abs().sqrt();
        self.glyphs.push(Glyph {
            x: trm.m31,
            y: trm.m32,
            size: font_size * scale,
            advance: width * font_size * trm.m11.hypot(trm.m12),
            text: text.to_string(),
        });
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}
