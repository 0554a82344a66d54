//! Page layout for the PDF report.
//!
//! Produces a list of pages with positioned drawing operations; coordinates
//! are millimetres measured from the top-left corner of an A4 page. Text
//! widths use approximate Times metrics, which is enough for centring and
//! truncation.

use super::{AttendanceReport, ReportRow, Signatories};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

const MARGIN_X: f32 = 14.0;
const TABLE_START_Y: f32 = 45.0;
/// 续页表格起点
const CONTINUED_START_Y: f32 = 20.0;
const BOTTOM_LIMIT: f32 = PAGE_HEIGHT - 14.0;
const ROW_HEIGHT: f32 = 7.0;
const CELL_PADDING: f32 = 1.5;
const BODY_SIZE: f32 = 9.0;
const SIGNATURE_GAP: f32 = 30.0;
/// 签名块总高度（含姓名与 NIP）
const SIGNATURE_HEIGHT: f32 = 48.0;
const PT_TO_MM: f32 = 0.3528;

pub const HEADER_FILL: Rgb = Rgb(14, 165, 233);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
const GRID: Rgb = Rgb(120, 120, 120);

pub const COLUMNS: [&str; 7] = [
    "No",
    "NIS",
    "Nama Siswa",
    "Kelas",
    "Status",
    "Tanggal",
    "Keterangan",
];
const COLUMN_WIDTHS: [f32; 7] = [10.0, 22.0, 48.0, 24.0, 18.0, 22.0, 38.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `y` is the text baseline
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
        color: Rgb,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, weight: FontWeight) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            size,
            weight,
            color: BLACK,
        });
    }

    fn centered(&mut self, text: &str, y: f32, size: f32, weight: FontWeight) {
        let x = (PAGE_WIDTH - text_width(text, size, weight)) / 2.0;
        self.text(text, x, y, size, weight);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) {
        self.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            thickness,
            color: BLACK,
        });
    }

    /// Text items in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Approximate advance width of a Times glyph, in em
fn glyph_em(c: char) -> f32 {
    match c {
        ' ' => 0.25,
        'i' | 'j' | 'l' | 't' | 'f' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.28,
        'm' | 'w' => 0.75,
        'M' | 'W' => 0.9,
        '0'..='9' => 0.5,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii_lowercase() => 0.46,
        '-' | '(' | ')' | '/' => 0.33,
        _ => 0.5,
    }
}

/// Estimated rendered width in millimetres
pub fn text_width(text: &str, size: f32, weight: FontWeight) -> f32 {
    let em: f32 = text.chars().map(glyph_em).sum();
    let bold = match weight {
        FontWeight::Regular => 1.0,
        FontWeight::Bold => 1.05,
    };
    em * size * PT_TO_MM * bold
}

/// Cut `text` so it fits `max_width`, appending `...` when shortened
pub fn fit_text(text: &str, max_width: f32, size: f32, weight: FontWeight) -> String {
    if text_width(text, size, weight) <= max_width {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if text_width(&candidate, size, weight) <= max_width {
            return candidate;
        }
    }
    String::new()
}

fn row_cells(row: &ReportRow) -> [String; 7] {
    [
        row.no.to_string(),
        row.nis.clone(),
        row.name.clone(),
        row.class_name.clone(),
        row.status.to_string(),
        row.date.format("%Y-%m-%d").to_string(),
        row.note.clone(),
    ]
}

struct TableCursor {
    pages: Vec<Page>,
    y: f32,
}

impl TableCursor {
    fn page(&mut self) -> &mut Page {
        // pages 至少有一页
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self, y: f32) {
        self.pages.push(Page::default());
        self.y = y;
    }

    /// One table row; header rows are filled and centred.
    fn row(&mut self, cells: &[String; 7], header: bool) {
        let top = self.y;
        let baseline = top + ROW_HEIGHT / 2.0 + BODY_SIZE * PT_TO_MM * 0.35;
        let page = self.page();

        if header {
            page.ops.push(DrawOp::FillRect {
                x: MARGIN_X,
                y: top,
                width: COLUMN_WIDTHS.iter().sum(),
                height: ROW_HEIGHT,
                color: HEADER_FILL,
            });
        }

        let mut x = MARGIN_X;
        for (i, (cell, width)) in cells.iter().zip(COLUMN_WIDTHS).enumerate() {
            let weight = if header || i == 4 {
                FontWeight::Bold
            } else {
                FontWeight::Regular
            };
            let align = if header || i == 0 {
                Align::Center
            } else {
                Align::Left
            };

            let text = fit_text(cell, width - 2.0 * CELL_PADDING, BODY_SIZE, weight);
            let text_x = match align {
                Align::Left => x + CELL_PADDING,
                Align::Center => x + (width - text_width(&text, BODY_SIZE, weight)) / 2.0,
            };
            page.ops.push(DrawOp::Text {
                text,
                x: text_x,
                y: baseline,
                size: BODY_SIZE,
                weight,
                color: if header { WHITE } else { BLACK },
            });
            x += width;
        }

        // 网格线
        let right = MARGIN_X + COLUMN_WIDTHS.iter().sum::<f32>();
        for y in [top, top + ROW_HEIGHT] {
            page.ops.push(DrawOp::Line {
                x1: MARGIN_X,
                y1: y,
                x2: right,
                y2: y,
                thickness: 0.1,
                color: GRID,
            });
        }
        let mut x = MARGIN_X;
        for width in std::iter::once(0.0).chain(COLUMN_WIDTHS) {
            x += width;
            page.ops.push(DrawOp::Line {
                x1: x,
                y1: top,
                x2: x,
                y2: top + ROW_HEIGHT,
                thickness: 0.1,
                color: GRID,
            });
        }

        self.y += ROW_HEIGHT;
    }
}

fn signature_column(page: &mut Page, x: f32, y: f32, titles: &[&str], name: Option<(&str, &str)>) {
    for (i, title) in titles.iter().enumerate() {
        page.text(*title, x, y + 7.0 * i as f32, 10.0, FontWeight::Regular);
    }

    match name.filter(|(n, _)| !n.trim().is_empty()) {
        Some((name, nip)) => {
            page.text(name, x, y + 35.0, 10.0, FontWeight::Bold);
            let width = text_width(name, 10.0, FontWeight::Bold).max(40.0);
            page.line(x, y + 36.0, x + width, y + 36.0, 0.2);
            if !nip.trim().is_empty() {
                page.text(format!("NIP. {}", nip), x, y + 41.0, 10.0, FontWeight::Regular);
            }
        }
        None => page.text("____________________", x, y + 35.0, 10.0, FontWeight::Regular),
    }
}

fn signature_block(page: &mut Page, y: f32, signatories: Option<&Signatories>) {
    signature_column(
        page,
        40.0,
        y,
        &["Mengetahui,", "Kepala Sekolah"],
        signatories.map(|s| (s.headmaster_name.as_str(), s.headmaster_nip.as_str())),
    );
    signature_column(
        page,
        PAGE_WIDTH - 80.0,
        y,
        &["Guru Wali Kelas,"],
        signatories.map(|s| (s.teacher_name.as_str(), s.teacher_nip.as_str())),
    );
}

/// Lay out the full report
pub fn layout_report(report: &AttendanceReport) -> Vec<Page> {
    let mut first = Page::default();
    first.centered(&report.school_name.to_uppercase(), 20.0, 16.0, FontWeight::Bold);
    first.centered("LAPORAN KEHADIRAN SISWA", 28.0, 12.0, FontWeight::Bold);
    first.centered(
        &format!("Periode: {}", report.period_label),
        34.0,
        10.0,
        FontWeight::Regular,
    );
    first.line(20.0, 38.0, PAGE_WIDTH - 20.0, 38.0, 0.3);

    let header = COLUMNS.map(str::to_string);
    let mut cursor = TableCursor {
        pages: vec![first],
        y: TABLE_START_Y,
    };
    cursor.row(&header, true);

    for row in &report.rows {
        if cursor.y + ROW_HEIGHT > BOTTOM_LIMIT {
            cursor.new_page(CONTINUED_START_Y);
            cursor.row(&header, true);
        }
        cursor.row(&row_cells(row), false);
    }

    let mut signature_y = cursor.y + SIGNATURE_GAP;
    if signature_y + SIGNATURE_HEIGHT > BOTTOM_LIMIT {
        cursor.new_page(CONTINUED_START_Y);
        signature_y = cursor.y + 10.0;
    }
    signature_block(cursor.page(), signature_y, report.signatories.as_ref());

    cursor.pages
}
