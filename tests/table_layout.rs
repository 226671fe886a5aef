mod common;

use common::{Command, record, table, text};
use pageflow::PageGeometry;
use pageflow::model::{RenderConfig, Segment};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.05
}

const LINE_H: f32 = 12.0 * 1.15;

fn vertical_lines(backend: &common::RecordingBackend) -> Vec<(f32, f32, f32)> {
    backend
        .commands
        .iter()
        .filter_map(|c| match c {
            Command::Line { x1, y1, x2, y2, .. } if approx(*x1, *x2) => Some((*x1, *y1, *y2)),
            _ => None,
        })
        .collect()
}

#[test]
fn single_row_geometry() {
    let cfg = RenderConfig::default();
    let backend = record(&[table(&[&["alpha", "beta"]], 2)], &cfg);
    let geom = PageGeometry::resolve(&cfg);

    let cell_w = geom.column_width / 2.0;
    let row_h = LINE_H + 8.0;

    let texts = backend.body_texts();
    assert_eq!(texts.len(), 2);
    let (x0, y0, t0) = texts[0];
    let (x1, y1, t1) = texts[1];
    assert_eq!((t0, t1), ("alpha", "beta"));
    assert!(approx(x0, geom.margin_left + 4.0), "cell padding");
    assert!(approx(x1, geom.margin_left + cell_w + 4.0));
    assert!(approx(y0, y1));

    // Vertical borders run the full row height at 0.5pt.
    let verts = vertical_lines(&backend);
    assert_eq!(verts.len(), 4, "two cells, two vertical edges each");
    for (_, top, bottom) in &verts {
        assert!(approx(bottom - top, row_h));
    }
    assert!(backend.commands.iter().any(
        |c| matches!(c, Command::Line { width, .. } if approx(*width, 0.5))
    ));
}

#[test]
fn wrapped_cell_grows_the_whole_row() {
    let cfg = RenderConfig::default();
    let long = "a considerably longer cell value that has to wrap onto several lines \
                before it fits inside one narrow table cell";
    let backend = record(&[table(&[&[long, "x"]], 4)], &cfg);

    let n_lines = backend
        .body_texts()
        .iter()
        .filter(|&&(_, _, t)| t != "x")
        .count();
    assert!(n_lines > 1, "long cell must wrap");
    let expected_h = n_lines as f32 * LINE_H + 8.0;
    for (_, top, bottom) in vertical_lines(&backend) {
        assert!(approx(bottom - top, expected_h), "short cell shares the row height");
    }
}

#[test]
fn rows_stack_and_heights_sum() {
    let cfg = RenderConfig::default();
    let backend = record(&[table(&[&["r1c1", "r1c2"], &["r2c1", "r2c2"]], 2)], &cfg);

    let row_h = LINE_H + 8.0;
    let verts = vertical_lines(&backend);
    assert_eq!(verts.len(), 8);
    let (_, r1_top, r1_bottom) = verts[0];
    let (_, r2_top, r2_bottom) = verts[4];
    assert!(approx(r1_bottom, r1_top + row_h));
    assert!(approx(r2_top, r1_bottom), "second row starts where the first ends");
    assert!(approx(r2_bottom, r2_top + row_h));
}

#[test]
fn empty_cell_rows_keep_one_line_height() {
    let cfg = RenderConfig::default();
    let backend = record(&[table(&[&["", ""]], 2)], &cfg);
    for (_, top, bottom) in vertical_lines(&backend) {
        assert!(approx(bottom - top, LINE_H + 8.0));
    }
}

#[test]
fn cramped_leading_still_floors_row_height() {
    // With leading tighter than the glyphs, the row floor kicks in.
    let cfg = RenderConfig {
        line_height: 0.5,
        ..RenderConfig::default()
    };
    let backend = record(&[table(&[&["x"]], 1)], &cfg);
    for (_, top, bottom) in vertical_lines(&backend) {
        assert!(approx(bottom - top, 12.0 + 8.0), "floor is font size plus padding");
    }
}

#[test]
fn rows_never_split_across_pages() {
    let cfg = RenderConfig::default();
    let geom = PageGeometry::resolve(&cfg);
    let rows: Vec<Vec<String>> = (0..60)
        .map(|i| vec![format!("row {i}"), "some wrapping cell content here".into()])
        .collect();
    let row_refs: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| r.iter().map(String::as_str).collect())
        .collect();
    let row_slices: Vec<&[&str]> = row_refs.iter().map(Vec::as_slice).collect();
    let backend = record(&[table(&row_slices, 2)], &cfg);

    assert!(backend.page_count() > 1, "60 rows must overflow");
    for (_, top, bottom) in vertical_lines(&backend) {
        assert!(top >= geom.margin_top - 0.05, "row starts inside the page");
        assert!(
            bottom <= geom.page_height - geom.margin_bottom + 0.05,
            "row ends inside the page"
        );
    }

    // All sixty first-column labels survive pagination.
    let labels = backend
        .body_texts()
        .iter()
        .filter(|&&(_, _, t)| t.starts_with("row "))
        .count();
    assert_eq!(labels, 60);
}

#[test]
fn extra_cells_beyond_declared_columns_are_dropped() {
    let cfg = RenderConfig::default();
    let backend = record(&[table(&[&["keep", "keep too", "dropped"]], 2)], &cfg);
    let texts: Vec<&str> = backend.body_texts().iter().map(|&(_, _, t)| t).collect();
    assert_eq!(texts, vec!["keep", "keep too"]);
}

#[test]
fn zero_column_table_is_skipped_entirely() {
    let cfg = RenderConfig::default();
    let backend = record(&[table(&[&["orphan"]], 0), text("after")], &cfg);

    assert!(
        !backend.commands.iter().any(|c| matches!(c, Command::Line { .. })),
        "no borders from the skipped table"
    );
    let texts = backend.body_texts();
    assert_eq!(texts.len(), 1);
    let (_, y, t) = texts[0];
    assert_eq!(t, "after");
    let geom = PageGeometry::resolve(&cfg);
    assert!(approx(y, geom.margin_top + 12.0), "cursor untouched");
}

#[test]
fn table_after_text_breaks_the_line_first() {
    let cfg = RenderConfig::default();
    let segments: Vec<Segment> = vec![text("intro"), table(&[&["cell"]], 1)];
    let backend = record(&segments, &cfg);

    let texts = backend.body_texts();
    let (_, intro_y, _) = texts[0];
    let (_, cell_y, t) = texts[1];
    assert_eq!(t, "cell");
    // One line break, 5pt leading gap, then padding + font size from row top.
    let expected = intro_y + LINE_H + 5.0 - 12.0 + 4.0 + 12.0;
    assert!(approx(cell_y, expected));
}
