//! Render a laid-out report with printpdf (Times built-in fonts).

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
    Rgb as PdfRgb,
};

use super::AttendanceReport;
use super::layout::{DrawOp, FontWeight, PAGE_HEIGHT, PAGE_WIDTH, Page, Rgb, layout_report};
use crate::errors::Result;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(
        f32::from(rgb.0) / 255.0,
        f32::from(rgb.1) / 255.0,
        f32::from(rgb.2) / 255.0,
        None,
    ))
}

/// 版面坐标从顶部量起，PDF 坐标从底部量起
fn point(x: f32, y_from_top: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(PAGE_HEIGHT - y_from_top)), false)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts) {
    for op in &page.ops {
        match op {
            DrawOp::Text {
                text,
                x,
                y,
                size,
                weight,
                color: c,
            } => {
                let font = match weight {
                    FontWeight::Regular => &fonts.regular,
                    FontWeight::Bold => &fonts.bold,
                };
                layer.set_fill_color(color(*c));
                layer.use_text(text.as_str(), *size, Mm(*x), Mm(PAGE_HEIGHT - *y), font);
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                thickness,
                color: c,
            } => {
                layer.set_outline_color(color(*c));
                // 线宽单位为 pt
                layer.set_outline_thickness(*thickness / 0.3528);
                layer.add_line(Line {
                    points: vec![point(*x1, *y1), point(*x2, *y2)],
                    is_closed: false,
                });
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color: c,
            } => {
                layer.set_fill_color(color(*c));
                layer.add_polygon(Polygon {
                    rings: vec![vec![
                        point(*x, *y),
                        point(*x + *width, *y),
                        point(*x + *width, *y + *height),
                        point(*x, *y + *height),
                    ]],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                });
            }
        }
    }
}

/// Render the report to PDF bytes.
///
/// printpdf documents are not `Send`; call this from a blocking task.
pub fn render_pdf(report: &AttendanceReport) -> Result<Vec<u8>> {
    let pages = layout_report(report);
    let title = format!("Laporan Kehadiran {}", report.period_label);

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::TimesRoman)?,
        bold: doc.add_builtin_font(BuiltinFont::TimesBold)?,
    };

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(p).get_layer(l)
        };
        draw_page(&layer, page, &fonts);
    }

    let bytes = doc.save_to_bytes()?;
    Ok(bytes)
}
