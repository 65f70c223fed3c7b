//! Fixed-layout PDF table export.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use mak_model::{Field, LabelMap, Row};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

/// Column widths in millimetres, in [`Field::ALL`] order.
pub const COLUMN_WIDTHS_MM: [f32; 6] = [45.0, 45.0, 90.0, 30.0, 25.0, 40.0];

const PT_PER_MM: f32 = 72.0 / 25.4;

// A4 landscape.
const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 15.0;

const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 9.0;
const HEADER_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 8.0;
const HEADER_HEIGHT_MM: f32 = 10.0;
const ROW_HEIGHT_MM: f32 = 8.0;
const CELL_PADDING_MM: f32 = 1.5;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

fn mm(value: f32) -> f32 {
    value * PT_PER_MM
}

/// Re-encode text for the standard Type 1 fonts.
///
/// Characters outside Latin-1, and the C1 control range, become `?`.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u32::from(ch) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Rough Helvetica advance; good enough to keep text inside its cell.
fn approx_width_pt(text: &str, size: f32) -> f32 {
    text.chars()
        .map(|ch| {
            if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
                0.64
            } else if matches!(ch, 'i' | 'l' | 'j' | 'I' | '.' | ',' | ' ' | '\'') {
                0.28
            } else {
                0.52
            }
        })
        .sum::<f32>()
        * size
}

fn fit_text(text: &str, width_pt: f32, size: f32) -> String {
    if approx_width_pt(text, size) <= width_pt {
        return text.to_string();
    }
    let mut fitted: String = text.to_string();
    while !fitted.is_empty() && approx_width_pt(&format!("{fitted}..."), size) > width_pt {
        fitted.pop();
    }
    format!("{}...", fitted.trim_end())
}

fn rows_per_page(first: bool) -> usize {
    let top = if first { title_block_height_mm() } else { 0.0 };
    let usable = PAGE_HEIGHT_MM - MARGIN_MM - BOTTOM_MARGIN_MM - top - HEADER_HEIGHT_MM;
    ((usable / ROW_HEIGHT_MM).floor() as usize).max(1)
}

fn title_block_height_mm() -> f32 {
    18.0
}

/// Split rows into page-sized chunks. Always yields at least one page.
fn paginate(rows: &[Row]) -> Vec<&[Row]> {
    let mut pages = Vec::new();
    let first = rows_per_page(true).min(rows.len());
    pages.push(&rows[..first]);
    let mut rest = &rows[first..];
    let per_page = rows_per_page(false);
    while !rest.is_empty() {
        let take = per_page.min(rest.len());
        pages.push(&rest[..take]);
        rest = &rest[take..];
    }
    pages
}

struct PageWriter {
    content: Content,
    /// Current top edge, in millimetres from the page bottom.
    cursor_mm: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            content: Content::new(),
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn text(&mut self, font: Name<'_>, size: f32, x_mm: f32, baseline_mm: f32, text: &str) {
        self.content.begin_text();
        self.content.set_font(font, size);
        self.content.next_line(mm(x_mm), mm(baseline_mm));
        self.content.show(Str(&encode_latin1(text)));
        self.content.end_text();
    }

    fn title_block(&mut self, title: &str, generated: NaiveDateTime, count: usize) {
        let baseline = self.cursor_mm - 7.0;
        self.text(BOLD, TITLE_SIZE, MARGIN_MM, baseline, title);
        let subtitle = format!(
            "Generated {} | Results: {count}",
            generated.format("%Y-%m-%d %H:%M")
        );
        self.text(REGULAR, SUBTITLE_SIZE, MARGIN_MM, baseline - 6.0, &subtitle);
        self.cursor_mm -= title_block_height_mm();
    }

    fn table_row(&mut self, font: Name<'_>, size: f32, height_mm: f32, cells: &[String], shaded: bool) {
        let bottom = self.cursor_mm - height_mm;
        let mut x = MARGIN_MM;
        for (cell, width) in cells.iter().zip(COLUMN_WIDTHS_MM) {
            if shaded {
                self.content.set_fill_gray(0.85);
                self.content
                    .rect(mm(x), mm(bottom), mm(width), mm(height_mm));
                self.content.fill_nonzero_and_stroke();
                self.content.set_fill_gray(0.0);
            } else {
                self.content
                    .rect(mm(x), mm(bottom), mm(width), mm(height_mm));
                self.content.stroke();
            }
            let inner = mm(width - 2.0 * CELL_PADDING_MM);
            let text = fit_text(cell, inner, size);
            let baseline = bottom + (height_mm - size / PT_PER_MM) / 2.0 + 0.6;
            self.text(font, size, x + CELL_PADDING_MM, baseline, &text);
            x += width;
        }
        self.cursor_mm = bottom;
    }

    fn footer(&mut self, page: usize, pages: usize) {
        let text = format!("Page {page} / {pages}");
        let x = PAGE_WIDTH_MM - MARGIN_MM - 25.0;
        self.text(REGULAR, BODY_SIZE, x, BOTTOM_MARGIN_MM / 2.0, &text);
    }

    fn finish(self) -> Vec<u8> {
        self.content.finish()
    }
}

/// Render rows as a landscape table, stamped with the current local time.
pub fn write_pdf(rows: &[Row], labels: &LabelMap, title: &str) -> Vec<u8> {
    write_pdf_at(rows, labels, title, Local::now().naive_local())
}

/// Render rows as a landscape table with an explicit generation time.
///
/// The title block sits on the first page; the header row repeats on every
/// page.
pub fn write_pdf_at(rows: &[Row], labels: &LabelMap, title: &str, generated: NaiveDateTime) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    let info_id = Ref::new(5);

    let headers: Vec<String> = Field::ALL
        .iter()
        .map(|field| labels.label(*field).to_string())
        .collect();
    let pages = paginate(rows);
    let page_ids: Vec<(Ref, Ref)> = (0..pages.len())
        .map(|index| {
            let base = 6 + 2 * index as i32;
            (Ref::new(base), Ref::new(base + 1))
        })
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(pages.len() as i32);

    let media_box = Rect::new(0.0, 0.0, mm(PAGE_WIDTH_MM), mm(PAGE_HEIGHT_MM));
    for (index, (chunk, (page_id, content_id))) in pages.iter().zip(&page_ids).enumerate() {
        let mut page = pdf.page(*page_id);
        page.media_box(media_box);
        page.parent(page_tree_id);
        page.contents(*content_id);
        page.resources()
            .fonts()
            .pair(REGULAR, regular_id)
            .pair(BOLD, bold_id);
        page.finish();

        let mut writer = PageWriter::new();
        writer.content.set_line_width(0.5);
        if index == 0 {
            writer.title_block(title, generated, rows.len());
        }
        writer.table_row(BOLD, HEADER_SIZE, HEADER_HEIGHT_MM, &headers, true);
        for row in *chunk {
            let cells: Vec<String> = row.values().iter().map(|value| (*value).to_string()).collect();
            writer.table_row(REGULAR, BODY_SIZE, ROW_HEIGHT_MM, &cells, false);
        }
        writer.footer(index + 1, pages.len());
        pdf.stream(*content_id, &writer.finish());
    }

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let created = Date::new(generated.year().clamp(0, 9999) as u16)
        .month(generated.month() as u8)
        .day(generated.day() as u8)
        .hour(generated.hour() as u8)
        .minute(generated.minute() as u8)
        .second(generated.second() as u8);
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr("mak-catalog"))
        .creation_date(created);

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_keeps_accents_and_replaces_the_rest() {
        assert_eq!(encode_latin1("Dobladillo"), b"Dobladillo".to_vec());
        assert_eq!(encode_latin1("Posición"), vec![b'P', b'o', b's', b'i', b'c', 0xED, b'o', b'n']);
        assert_eq!(encode_latin1("€ 5"), b"? 5".to_vec());
        assert_eq!(encode_latin1("縫う"), b"??".to_vec());
    }

    #[test]
    fn fit_text_truncates_long_values() {
        let long = "Attach sleeve to body with overlock and topstitch twice";
        let fitted = fit_text(long, mm(30.0 - 2.0 * CELL_PADDING_MM), BODY_SIZE);
        assert!(fitted.ends_with("..."));
        assert!(fitted.len() < long.len());
        assert_eq!(fit_text("Sew", mm(30.0), BODY_SIZE), "Sew");
    }

    #[test]
    fn paginate_always_yields_a_page() {
        assert_eq!(paginate(&[]).len(), 1);
        let rows = vec![Row::default(); rows_per_page(true) + 1];
        let pages = paginate(&rows);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 1);
    }

    #[test]
    fn column_widths_fit_the_printable_area() {
        let total: f32 = COLUMN_WIDTHS_MM.iter().sum();
        assert!(total <= PAGE_WIDTH_MM - 2.0 * MARGIN_MM);
    }
}
