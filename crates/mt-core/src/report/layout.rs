//! Low-level page writer shared by the datasheet renderers.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::{CoreError, CoreResult};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 14.0;
const BOTTOM: f32 = 20.0;

fn mm(v: f32) -> Mm {
    Mm(v as _)
}

/// Cursor-based writer over an A4 document. Text only; the datasheets are
/// label/value grids and tables, no vector artwork.
pub(crate) struct SheetWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl SheetWriter {
    pub fn new(title: &str) -> CoreResult<Self> {
        let (doc, page, layer) = PdfDocument::new(title, mm(PAGE_W), mm(PAGE_H), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CoreError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CoreError::Render(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(SheetWriter {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_H - MARGIN,
        })
    }

    fn text(&mut self, s: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(s, size as _, mm(x), mm(self.y), font);
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < BOTTOM {
            let (page, layer) = self.doc.add_page(mm(PAGE_W), mm(PAGE_H), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_H - MARGIN;
        }
    }

    /// Company banner, report title, and the identifying header rows.
    pub fn header(&mut self, company: &str, title: &str, rows: &[(&str, String)]) {
        self.advance(4.0);
        self.text(company, 16.0, MARGIN, true);
        self.advance(8.0);
        self.text(title, 13.0, MARGIN, true);
        self.advance(7.0);
        for (label, value) in rows {
            self.text(&format!("{label}:"), 10.0, MARGIN, true);
            let value = truncate(value, 70);
            self.text(&value, 10.0, MARGIN + 32.0, false);
            self.advance(5.5);
        }
        self.advance(4.0);
    }

    pub fn section(&mut self, title: &str) {
        self.ensure_space(14.0);
        self.advance(4.0);
        self.text(title, 11.0, MARGIN, true);
        self.advance(6.5);
    }

    /// Two-column label/value grid.
    pub fn field_grid(&mut self, fields: &[(&str, String)]) {
        let col_w = (PAGE_W - 2.0 * MARGIN) / 2.0;
        for pair in fields.chunks(2) {
            self.ensure_space(6.0);
            for (i, (label, value)) in pair.iter().enumerate() {
                let x = MARGIN + col_w * i as f32;
                self.text(&format!("{label}:"), 9.0, x, true);
                let value = truncate(value, 24);
                self.text(&value, 9.0, x + 42.0, false);
            }
            self.advance(6.0);
        }
    }

    /// Evenly spaced column table with a bold header row.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        let col_w = (PAGE_W - 2.0 * MARGIN) / headers.len() as f32;
        let max_chars = (col_w / 1.8) as usize;

        self.ensure_space(6.0);
        for (i, h) in headers.iter().enumerate() {
            self.text(&truncate(h, max_chars), 8.0, MARGIN + col_w * i as f32, true);
        }
        self.advance(5.5);

        if rows.is_empty() {
            self.text("(none)", 8.0, MARGIN, false);
            self.advance(5.5);
            return;
        }
        for row in rows {
            self.ensure_space(5.5);
            for (i, cell) in row.iter().take(headers.len()).enumerate() {
                let cell = truncate(cell, max_chars);
                self.text(&cell, 8.0, MARGIN + col_w * i as f32, false);
            }
            self.advance(5.5);
        }
    }

    /// Footer note at the bottom of the current page.
    pub fn footer(&mut self, note: &str) {
        self.y = 12.0;
        self.text(note, 8.0, MARGIN, false);
    }

    pub fn finish(self) -> CoreResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| CoreError::Render(e.to_string()))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
