use std::io::BufWriter;

use printpdf::*;

use crate::error::{LaporError, Result};
use crate::export::{DocumentSection, ReportDocument};

// A4 portrait (mm)
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_TOP: f32 = 12.0;
const MARGIN_BOTTOM: f32 = 20.0;
const BOX_LEFT: f32 = 10.0;
const BOX_RIGHT: f32 = 200.0;
const TEXT_LEFT: f32 = 15.0;
const BORDER_INSET: f32 = 5.0;
const ROW_H: f32 = 5.5;
const FONT_SIZE: f32 = 10.0;
const SECTION_TITLE_SIZE: f32 = 12.0;
const HEADING_SIZE: f32 = 15.0;
const HEADER_BAND_H: f32 = 18.0;
const FOOTER_Y: f32 = 285.0;
/// Characters per wrapped line at FONT_SIZE inside a section box.
const WRAP_COLUMNS: usize = 92;

const PT_PER_MM: f32 = 2.834_646;

fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.18
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    current_page: PdfPageIndex,
    current_layer: PdfLayerIndex,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| LaporError::Pdf(format!("{e:?}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| LaporError::Pdf(format!("{e:?}")))?;
        let writer = Self {
            doc,
            font,
            font_bold,
            current_page: page,
            current_layer: layer,
            pages: vec![(page, layer)],
            y: MARGIN_TOP,
        };
        writer.page_border();
        Ok(writer)
    }

    fn layer(&self) -> PdfLayerReference {
        self.doc
            .get_page(self.current_page)
            .get_layer(self.current_layer)
    }

    fn pdf_y(y: f32) -> f32 {
        PAGE_H - y
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer");
        self.current_page = page;
        self.current_layer = layer;
        self.pages.push((page, layer));
        self.y = MARGIN_TOP + 8.0;
        self.page_border();
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y + needed > FOOTER_Y - MARGIN_BOTTOM / 2.0 {
            self.new_page();
        }
    }

    fn text_at(&self, s: &str, x: f32, y: f32, size: f32, bold: bool) {
        let font = if bold { &self.font_bold } else { &self.font };
        self.layer().use_text(s, size, Mm(x), Mm(Self::pdf_y(y)), font);
    }

    fn text_centered(&self, s: &str, center_x: f32, y: f32, size: f32, bold: bool) {
        let x = center_x - approx_text_width(s, size) / 2.0;
        self.text_at(s, x, y, size, bold);
    }

    fn set_text_color(&self, color: Color) {
        self.layer().set_fill_color(color);
    }

    fn line(&self, points: &[(f32, f32)], closed: bool, thickness_pt: f32, color: Color) {
        let layer = self.layer();
        layer.set_outline_color(color);
        layer.set_outline_thickness(thickness_pt);
        layer.add_line(Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(Self::pdf_y(y))), false))
                .collect(),
            is_closed: closed,
        });
    }

    fn rect_outline(&self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.line(&[(x1, y1), (x2, y1), (x2, y2), (x1, y2)], true, 0.5, color);
    }

    fn page_border(&self) {
        self.rect_outline(
            BORDER_INSET,
            BORDER_INSET,
            PAGE_W - BORDER_INSET,
            PAGE_H - BORDER_INSET,
            rgb(100, 100, 100),
        );
    }

    /// Dark band across the top carrying the heading and company line.
    fn header(&mut self, heading: &str, company_line: &str) {
        let band_mid = self.y + HEADER_BAND_H / 2.0;
        // A stroke as thick as the band is the band.
        self.line(
            &[(BOX_LEFT, band_mid), (BOX_RIGHT, band_mid)],
            false,
            HEADER_BAND_H * PT_PER_MM,
            rgb(33, 37, 41),
        );
        self.set_text_color(rgb(255, 255, 255));
        self.text_centered(heading, PAGE_W / 2.0, self.y + 7.5, HEADING_SIZE, true);
        self.text_centered(company_line, PAGE_W / 2.0, self.y + 14.5, SECTION_TITLE_SIZE, true);
        self.set_text_color(rgb(33, 37, 41));
        self.y += HEADER_BAND_H + 8.0;
    }

    fn section(&mut self, section: &DocumentSection) {
        let lines = wrap_section(section);
        let height = 10.0 + lines.len() as f32 * ROW_H + 3.0;
        self.ensure_space(height + 6.0);

        let top = self.y - 4.0;
        self.rect_outline(BOX_LEFT, top, BOX_RIGHT, top + height, rgb(33, 37, 41));

        self.set_text_color(rgb(33, 37, 41));
        self.text_at(&section.title, TEXT_LEFT, self.y + 2.0, SECTION_TITLE_SIZE, true);
        let underline_y = self.y + 3.0;
        self.line(
            &[(TEXT_LEFT, underline_y), (TEXT_LEFT + 35.0, underline_y)],
            false,
            1.4,
            rgb(250, 128, 12),
        );

        let mut y = self.y + 9.0;
        for line in &lines {
            self.text_at(line, TEXT_LEFT, y, FONT_SIZE, false);
            y += ROW_H;
        }
        self.y = top + height + 10.0;
    }

    fn signatures(&mut self, doc: &ReportDocument) {
        self.ensure_space(35.0);
        let columns = [55.0, 145.0];
        let line_y = self.y + 19.0;
        for (signature, center) in doc.signatures.iter().zip(columns) {
            self.line(
                &[(center - 25.0, line_y), (center + 25.0, line_y)],
                false,
                1.4,
                rgb(33, 37, 41),
            );
            self.set_text_color(rgb(100, 100, 100));
            self.text_centered(&signature.role, center, line_y + 6.0, FONT_SIZE, false);
            self.set_text_color(rgb(0, 0, 0));
            self.text_centered(&signature.name, center, line_y - 2.0, SECTION_TITLE_SIZE, false);
        }
        self.y = line_y + 10.0;
    }

    /// Footer text on every page.
    fn footer(&self, text: &str) {
        for &(page, layer) in &self.pages {
            let layer = self.doc.get_page(page).get_layer(layer);
            layer.set_fill_color(rgb(100, 100, 100));
            let x = PAGE_W / 2.0 - approx_text_width(text, FONT_SIZE) / 2.0;
            layer.use_text(text, FONT_SIZE, Mm(x), Mm(Self::pdf_y(FOOTER_Y)), &self.font);
        }
    }

    fn to_bytes(self) -> Result<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| LaporError::Pdf(format!("{e:?}")))?;
        buf.into_inner().map_err(|e| LaporError::Pdf(e.to_string()))
    }
}

/// Section rows wrapped to the box width; continuation lines are indented
/// to sit under the value column.
fn wrap_section(section: &DocumentSection) -> Vec<String> {
    let mut out = Vec::new();
    for line in section.lines() {
        let indent_width = line.find(" : ").map(|i| i + 3).unwrap_or(0);
        let indent = " ".repeat(indent_width);
        let options = textwrap::Options::new(WRAP_COLUMNS).subsequent_indent(&indent);
        out.extend(textwrap::wrap(&line, options).into_iter().map(|l| l.into_owned()));
    }
    out
}

/// Render one report document as a PDF. Sections titled like the responsible
/// parties block are drawn as signature lines instead of a text box.
pub fn render_report(doc: &ReportDocument) -> Result<Vec<u8>> {
    let mut pdf = PdfWriter::new(&doc.title)?;
    pdf.header(&doc.heading, &doc.company_line);

    let (signature_section, boxed) = doc
        .sections
        .split_last()
        .ok_or_else(|| LaporError::Pdf("document has no sections".to_string()))?;
    for section in boxed {
        pdf.section(section);
    }
    if doc.signatures.is_empty() {
        pdf.section(signature_section);
    } else {
        pdf.signatures(doc);
    }

    pdf.footer(&doc.footer);
    pdf.to_bytes()
}
