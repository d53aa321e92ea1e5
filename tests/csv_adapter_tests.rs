use chart_embed::core::{Row, rows_to_csv, rows_to_input};
use serde_json::{Value, json};

fn row(cells: &[(&str, Value)]) -> Row {
    cells
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect()
}

#[test]
fn empty_rows_yield_empty_text() {
    assert_eq!(rows_to_csv(&[]), "");
    assert!(rows_to_input(&[]).is_blank());
}

#[test]
fn header_follows_first_row_order_and_drops_index() {
    let rows = vec![
        row(&[
            ("index", json!(0)),
            ("year", json!("2019")),
            ("sales", json!(12.5)),
            ("cost", json!(4)),
        ]),
        row(&[
            ("index", json!(1)),
            ("year", json!("2020")),
            ("sales", json!(14)),
            ("cost", json!(5)),
        ]),
    ];

    let text = rows_to_csv(&rows);
    assert_eq!(text, "year,sales,cost\n2019,12.5,4\n2020,14,5\n");
}

#[test]
fn later_rows_are_read_in_first_row_column_order() {
    let rows = vec![
        row(&[("a", json!(1)), ("b", json!(2))]),
        row(&[("b", json!(4)), ("a", json!(3))]),
    ];

    assert_eq!(rows_to_csv(&rows), "a,b\n1,2\n3,4\n");
}

#[test]
fn missing_and_null_cells_render_empty() {
    let rows = vec![
        row(&[("a", json!(1)), ("b", json!(2))]),
        row(&[("a", json!(null))]),
    ];

    assert_eq!(rows_to_csv(&rows), "a,b\n1,2\n,\n");
}

#[test]
fn embedded_delimiters_are_not_escaped() {
    let rows = vec![row(&[("label", json!("a,b")), ("v", json!(1))])];

    // Values must already be delimiter-safe; the adapter writes them verbatim.
    assert_eq!(rows_to_csv(&rows), "label,v\na,b,1\n");
}

#[test]
fn booleans_and_integral_floats_use_plain_text() {
    let rows = vec![row(&[("flag", json!(true)), ("v", json!(2.0))])];

    assert_eq!(rows_to_csv(&rows), "flag,v\ntrue,2\n");
}

#[test]
fn input_wraps_csv_text() {
    let rows = vec![row(&[("x", json!(1)), ("y", json!(2))])];
    let input = rows_to_input(&rows);

    assert_eq!(input.raw, "x,y\n1,2\n");
    assert!(!input.is_blank());
}
