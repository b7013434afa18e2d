//! PDF table export.
//!
//! Draws one auto-sized page: a light-gray header band, white body cells,
//! thin black borders, and 14 pt text in the embedded typeface. Column
//! widths come from a script-aware estimate — Arabic glyphs in the
//! embedded font render narrower than Latin glyphs at the same size.

use std::fs::File;

use printpdf::*;
use printpdf::path::{PaintMode, WindingOrder};
use tracing::debug;

use crate::error::ExportError;
use crate::fonts;
use crate::record::{Record, Target, flatten};
use crate::reshape::reshape;

/// Estimated per-character width for Latin and other LTR text, in points.
const LATIN_CHAR_WIDTH: usize = 7;
/// Estimated per-character width for Arabic-script text, in points.
const RTL_CHAR_WIDTH: usize = 5;
/// Narrowest a column may get, in points.
const MIN_COLUMN_WIDTH: usize = 40;
/// Height of every table row, in points.
const ROW_HEIGHT: f32 = 20.0;
/// Clearance between the table and the page edge, in points.
const PAGE_MARGIN: f32 = 10.0;
/// Text size for headers and cells, in points.
const TEXT_SIZE: f32 = 14.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

fn mm(pt: f32) -> Mm {
    Mm(pt * MM_PER_PT)
}

fn is_rtl_char(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
            | '\u{10E60}'..='\u{10E7F}')
}

/// True when every non-whitespace character is Arabic-script.
fn is_rtl_only(text: &str) -> bool {
    text.chars().all(|c| is_rtl_char(c) || c.is_whitespace())
}

/// Estimated display width of a string, in points.
fn estimated_width(text: &str) -> usize {
    let chars = text.chars().count();
    if is_rtl_only(text) {
        chars * RTL_CHAR_WIDTH + 10
    } else {
        chars * LATIN_CHAR_WIDTH + 10
    }
}

/// Per-column widths: the widest of the header and every cell, floored at
/// [`MIN_COLUMN_WIDTH`].
fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| estimated_width(h)).collect();
    for row in rows {
        for (col, value) in row.iter().enumerate() {
            widths[col] = widths[col].max(estimated_width(value));
        }
    }
    for width in &mut widths {
        *width = (*width).max(MIN_COLUMN_WIDTH);
    }
    widths
}

/// Export a slice of records as a single-page PDF table.
///
/// The page is sized to fit the table exactly — one header row plus one
/// row per record. Headers and cell values are reshaped for right-to-left
/// display before drawing; labels come from each field's pdf label,
/// falling back to the field identifier.
pub fn export_pdf<T: Record>(items: &[T]) -> Result<Vec<u8>, ExportError> {
    let (headers, rows) = flatten(items, Target::Pdf)?;
    if headers.is_empty() {
        return Err(ExportError::NoExportableFields);
    }

    let widths = column_widths(&headers, &rows);
    let table_width = widths.iter().sum::<usize>() as f32;
    let page_width = table_width + 2.0 * PAGE_MARGIN;
    let page_height = ROW_HEIGHT * (rows.len() + 1) as f32 + 2.0 * PAGE_MARGIN;
    debug!(columns = headers.len(), rows = rows.len(), "exporting table");

    let (doc, page, layer) = PdfDocument::new("tableout", mm(page_width), mm(page_height), "table");

    let font_path = fonts::staged_font_path()?;
    let font_file = File::open(font_path)
        .map_err(|e| ExportError::FontLoad(format!("cannot open {}: {e}", font_path.display())))?;
    let font = doc
        .add_external_font(font_file)
        .map_err(|e| ExportError::FontLoad(e.to_string()))?;

    let layer = doc.get_page(page).get_layer(layer);

    // Column x offsets, left to right.
    let mut offsets = Vec::with_capacity(widths.len());
    let mut x = PAGE_MARGIN;
    for width in &widths {
        offsets.push(x);
        x += *width as f32;
    }

    let header_bottom = page_height - PAGE_MARGIN - ROW_HEIGHT;
    let body_bottom = header_bottom - ROW_HEIGHT * rows.len() as f32;

    // Bands: light gray behind the header row, white behind the body.
    layer.set_fill_color(Color::Rgb(Rgb::new(
        240.0 / 255.0,
        240.0 / 255.0,
        240.0 / 255.0,
        None,
    )));
    fill_rect(&layer, PAGE_MARGIN, header_bottom, table_width, ROW_HEIGHT);
    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    fill_rect(
        &layer,
        PAGE_MARGIN,
        body_bottom,
        table_width,
        ROW_HEIGHT * rows.len() as f32,
    );

    // Cell borders: 0.5 pt around header cells, 0.4 pt around body cells.
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.5);
    for (col, width) in widths.iter().enumerate() {
        stroke_rect(
            &layer,
            offsets[col],
            header_bottom,
            *width as f32,
            ROW_HEIGHT,
        );
    }
    layer.set_outline_thickness(0.4);
    for row in 0..rows.len() {
        let bottom = header_bottom - ROW_HEIGHT * (row + 1) as f32;
        for (col, width) in widths.iter().enumerate() {
            stroke_rect(&layer, offsets[col], bottom, *width as f32, ROW_HEIGHT);
        }
    }

    // Text: black, 4 pt left pad, baseline 5 pt above the row bottom.
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    for (col, header) in headers.iter().enumerate() {
        layer.use_text(
            reshape(header),
            TEXT_SIZE,
            mm(offsets[col] + 4.0),
            mm(header_bottom + 5.0),
            &font,
        );
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let baseline = header_bottom - ROW_HEIGHT * (row_idx + 1) as f32 + 5.0;
        for (col, value) in row.iter().enumerate() {
            layer.use_text(
                reshape(value),
                TEXT_SIZE,
                mm(offsets[col] + 4.0),
                mm(baseline),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Layout(e.to_string()))
}

fn rect_points(x: f32, y: f32, w: f32, h: f32) -> Vec<(Point, bool)> {
    vec![
        (Point::new(mm(x), mm(y)), false),
        (Point::new(mm(x + w), mm(y)), false),
        (Point::new(mm(x + w), mm(y + h)), false),
        (Point::new(mm(x), mm(y + h)), false),
    ]
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32) {
    layer.add_polygon(Polygon {
        rings: vec![rect_points(x, y, w, h)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn stroke_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32) {
    layer.add_line(Line {
        points: rect_points(x, y, w, h),
        is_closed: true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldSpec;

    struct Person {
        first_name: String,
        last_name: String,
        age: u32,
    }

    impl Record for Person {
        fn fields() -> Vec<FieldSpec<Self>> {
            vec![
                FieldSpec::leaf("first_name", |p: &Person| p.first_name.clone())
                    .pdf_label("نام"),
                FieldSpec::leaf("last_name", |p: &Person| p.last_name.clone())
                    .pdf_label("نام خانوادگی"),
                FieldSpec::leaf("age", |p: &Person| p.age).pdf_label("سن"),
            ]
        }
    }

    fn people() -> Vec<Person> {
        vec![
            Person {
                first_name: "John".into(),
                last_name: "Doe".into(),
                age: 30,
            },
            Person {
                first_name: "Jane".into(),
                last_name: "Smith".into(),
                age: 39,
            },
        ]
    }

    #[test]
    fn test_export_pdf_is_a_pdf() {
        let bytes = export_pdf(&people()).unwrap();
        assert!(bytes.len() > 200);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_pdf_empty_input() {
        let people: Vec<Person> = Vec::new();
        let err = export_pdf(&people).unwrap_err();
        assert!(matches!(err, ExportError::EmptyInput));
    }

    #[test]
    fn test_rtl_strings_use_the_narrow_factor() {
        let name = "نام خانوادگی";
        assert_eq!(estimated_width(name), name.chars().count() * 5 + 10);
    }

    #[test]
    fn test_mixed_strings_use_the_latin_factor() {
        let mixed = "abc سلام";
        assert_eq!(estimated_width(mixed), mixed.chars().count() * 7 + 10);
        assert_eq!(estimated_width("John"), 4 * 7 + 10);
    }

    #[test]
    fn test_column_width_stress_case() {
        let long = "A123456789B123456789C123456789XYZ";
        assert_eq!(long.chars().count(), 33);
        let widths = column_widths(&["A".into()], &[vec![long.into()]]);
        assert_eq!(widths, vec![241]);
    }

    #[test]
    fn test_column_width_floor() {
        let widths = column_widths(&["A".into()], &[vec!["B".into()]]);
        assert_eq!(widths, vec![40]);
    }

    #[test]
    fn test_column_width_considers_header_and_all_cells() {
        let headers = vec!["Full Name".into(), "X".into()];
        let rows = vec![
            vec!["Jo".into(), "a long latin value".into()],
            vec!["Jane".into(), "b".into()],
        ];
        let widths = column_widths(&headers, &rows);
        assert_eq!(widths[0], 9 * 7 + 10);
        assert_eq!(widths[1], 18 * 7 + 10);
    }
}
