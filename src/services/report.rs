use std::{fs::File, io::BufWriter, path::Path};

use anyhow::Context;
use comfy_table::{presets, Table};
use printpdf::{
    path::PaintMode, BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Pt, Rect, Rgb,
};

use crate::domain::{ExtractedStats, REPORT_HEADERS};

pub fn render_markdown(rows: &[ExtractedStats]) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::ASCII_MARKDOWN)
        .set_header(REPORT_HEADERS);

    for row in rows {
        table.add_row(row.cells().map(escape_markdown_cell));
    }

    table.to_string()
}

fn escape_markdown_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

pub fn write_markdown(rows: &[ExtractedStats], path: &Path) -> anyhow::Result<String> {
    let table = render_markdown(rows);
    std::fs::write(path, &table)
        .with_context(|| format!("Failed to write markdown to {}", path.display()))?;
    Ok(table)
}

const PDF_TITLE: &str = "Financial Company Security Comparison";
const PAGE_WIDTH: f32 = 841.89;
const PAGE_HEIGHT: f32 = 595.28;
const MARGIN: f32 = 36.0;
const COLUMN_WIDTHS: [f32; 5] = [100.0, 110.0, 110.0, 80.0, 250.0];
const FONT_SIZE: f32 = 8.0;
const TITLE_SIZE: f32 = 18.0;
const LINE_HEIGHT: f32 = 10.0;
const CELL_PADDING: f32 = 4.0;

/// Falls back to built-in Helvetica (no Hangul) when the font fails to load.
pub fn write_pdf(rows: &[ExtractedStats], path: &Path, font_path: &Path) -> anyhow::Result<()> {
    let (doc, page, layer) = PdfDocument::new(
        PDF_TITLE,
        Mm::from(Pt(PAGE_WIDTH)),
        Mm::from(Pt(PAGE_HEIGHT)),
        "Table",
    );

    let font = match load_font(&doc, font_path) {
        Ok(font) => font,
        Err(e) => {
            log::error!("Failed to register font {}: {:?}", font_path.display(), e);
            doc.add_builtin_font(BuiltinFont::Helvetica)?
        }
    };

    let table_width: f32 = COLUMN_WIDTHS.iter().sum();
    let left = (PAGE_WIDTH - table_width) / 2.0;

    let mut layer = doc.get_page(page).get_layer(layer);
    layer.use_text(PDF_TITLE, TITLE_SIZE, pt(left), pt(PAGE_HEIGHT - MARGIN - TITLE_SIZE), &font);
    let mut top = PAGE_HEIGHT - MARGIN - TITLE_SIZE * 2.0;

    let header = REPORT_HEADERS.map(String::from);
    let body = rows.iter().map(|row| row.cells().map(String::from));

    for (index, cells) in std::iter::once(header).chain(body).enumerate() {
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(COLUMN_WIDTHS)
            .map(|(cell, width)| wrap_cell(cell, width - CELL_PADDING * 2.0, FONT_SIZE))
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let height = lines as f32 * LINE_HEIGHT + CELL_PADDING * 2.0;

        if top - height < MARGIN {
            let (next_page, next_layer) = doc.add_page(
                Mm::from(Pt(PAGE_WIDTH)),
                Mm::from(Pt(PAGE_HEIGHT)),
                "Table",
            );
            layer = doc.get_page(next_page).get_layer(next_layer);
            top = PAGE_HEIGHT - MARGIN;
        }

        draw_row(&layer, &font, left, top, height, &wrapped, index == 0);
        top -= height;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))?;
    Ok(())
}

fn load_font(
    doc: &printpdf::PdfDocumentReference,
    font_path: &Path,
) -> anyhow::Result<IndirectFontRef> {
    let file = File::open(font_path)?;
    Ok(doc.add_external_font(file)?)
}

fn pt(value: f32) -> Mm {
    Mm::from(Pt(value))
}

fn draw_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    left: f32,
    top: f32,
    height: f32,
    cells: &[Vec<String>],
    is_header: bool,
) {
    let bottom = top - height;
    let right = left + COLUMN_WIDTHS.iter().sum::<f32>();

    if is_header {
        layer.set_fill_color(Color::Rgb(Rgb::new(0.83, 0.83, 0.83, None)));
        let background =
            Rect::new(pt(left), pt(bottom), pt(right), pt(top)).with_mode(PaintMode::Fill);
        layer.add_rect(background);
    }

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.5);

    let mut x = left;
    for (lines, width) in cells.iter().zip(COLUMN_WIDTHS) {
        layer.add_line(Line {
            points: vec![
                (Point::new(pt(x), pt(top)), false),
                (Point::new(pt(x + width), pt(top)), false),
                (Point::new(pt(x + width), pt(bottom)), false),
                (Point::new(pt(x), pt(bottom)), false),
            ],
            is_closed: true,
        });

        // Vertically centred block of lines.
        let block = lines.len() as f32 * LINE_HEIGHT;
        let mut baseline = bottom + (height + block) / 2.0 - FONT_SIZE;
        for text in lines {
            layer.use_text(text.as_str(), FONT_SIZE, pt(x + CELL_PADDING), pt(baseline), font);
            baseline -= LINE_HEIGHT;
        }

        x += width;
    }
}

fn glyph_width(c: char, size: f32) -> f32 {
    if c.is_ascii() {
        size * 0.55
    } else {
        size
    }
}

/// Greedy word wrap; words wider than the cell are broken by character.
fn wrap_cell(text: &str, width: f32, size: f32) -> Vec<String> {
    let mut lines = vec![];
    let mut current = String::new();
    let mut current_width = 0.0;
    let space = glyph_width(' ', size);

    for word in text.split_whitespace() {
        let word_width: f32 = word.chars().map(|c| glyph_width(c, size)).sum();
        let needed = match current.is_empty() {
            true => word_width,
            false => current_width + space + word_width,
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        for c in word.chars() {
            let w = glyph_width(c, size);
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push(c);
            current_width += w;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ExtractedStats> {
        vec![
            ExtractedStats {
                company: "(주)우리은행".to_string(),
                it_investment: "1,000원".to_string(),
                security_investment: "80원".to_string(),
                it_personnel: "10명".to_string(),
                security_personnel: "2명 외주 1명".to_string(),
            },
            ExtractedStats::not_found("대신|증권"),
        ]
    }

    #[test]
    fn markdown_has_header_separator_and_rows() {
        let table = render_markdown(&rows());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| Company "));
        assert!(lines[0].contains("| Security Personnel |"));
        assert!(lines[1].starts_with("|-"));
        assert!(lines[2].contains("| 2명 외주 1명 "));
        assert!(lines[3].contains("대신\\|증권"));
        assert!(lines[3].contains("Not Found"));
    }

    #[test]
    fn markdown_lines_are_pipe_delimited() {
        let table = render_markdown(&rows());

        for line in table.lines() {
            assert!(line.starts_with('|') && line.ends_with('|'), "{line:?}");
        }
        assert_eq!(table.lines().next().unwrap().matches('|').count(), 6);
        // Escaped pipes stay inside their cell.
        assert_eq!(table.lines().nth(3).unwrap().matches(" | ").count(), 4);
    }

    #[test]
    fn empty_report_starts_with_header() {
        let table = render_markdown(&[]);

        assert!(table.starts_with("| Company "));
        assert!(!table.contains("Not Found"));
    }

    #[test]
    fn wrap_keeps_words_together() {
        let lines = wrap_cell("aaaa bbbb cccc", 4.0 * 5.5 + 0.1, 10.0);

        assert_eq!(lines, vec!["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn wrap_breaks_long_words() {
        let lines = wrap_cell("가나다라마", 20.0, 10.0);

        assert_eq!(lines, vec!["가나", "다라", "마"]);
    }

    #[test]
    fn wrap_empty_cell_is_one_blank_line() {
        assert_eq!(wrap_cell("", 50.0, 8.0), vec![String::new()]);
    }
}
