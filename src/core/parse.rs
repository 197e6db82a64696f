//! CSV parsing and normalization for inventory exports.
//!
//! The input format is deliberately lenient: the delimiter is auto-detected
//! from the header (`;` vs `,`), columns are matched by lowercase name
//! against a fixed schema, and a header absent from the file silently
//! degrades every cell of that field to its default. The baseline split is
//! plain (no quote handling); [`Quoting::Rfc4180`] is the opt-in strict mode
//! that understands the quoting our own exporter emits.

use tracing::debug;

use crate::core::model::InventoryRecord;

/// Field-splitting behavior for data lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Plain split on the delimiter; quotes are ordinary characters.
    #[default]
    Lenient,
    /// RFC 4180 quoted fields with doubled inner quotes.
    Rfc4180,
}

/// Column positions resolved from the header row. `None` means the column
/// is absent and every row gets the field default.
#[derive(Debug, Default, Clone, Copy)]
struct ColumnMap {
    code: Option<usize>,
    key: Option<usize>,
    description: Option<usize>,
    inventory: Option<usize>,
    classification: Option<usize>,
    avg_sales: Option<usize>,
    coverage_months: Option<usize>,
    coverage_days: Option<usize>,
}

impl ColumnMap {
    /// Match lowercased, trimmed header cells against the fixed schema.
    /// `descripcion` is accepted as an alias of `desc_prod` so that a file
    /// produced by our own exporter parses back to the same records.
    fn resolve(header_cells: &[String]) -> Self {
        let find = |names: &[&str]| {
            header_cells
                .iter()
                .position(|cell| names.contains(&cell.as_str()))
        };

        Self {
            code: find(&["codigo"]),
            key: find(&["clave"]),
            description: find(&["desc_prod", "descripcion"]),
            inventory: find(&["inv"]),
            classification: find(&["clasificacion"]),
            avg_sales: find(&["promedio vta mes"]),
            coverage_months: find(&["cobertura (mes)"]),
            coverage_days: find(&["cobertura dias (30)"]),
        }
    }
}

/// Parse CSV text with the lenient baseline split.
pub fn parse(text: &str) -> Vec<InventoryRecord> {
    parse_with(text, Quoting::Lenient)
}

/// Parse CSV text into records, preserving input line order.
///
/// Returns an empty vec (not an error) when the input has fewer than two
/// non-blank lines; blank lines are skipped throughout.
pub fn parse_with(text: &str, quoting: Quoting) -> Vec<InventoryRecord> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    // Need a header plus at least one data row
    if lines.len() < 2 {
        return Vec::new();
    }

    let delimiter = detect_delimiter(lines[0]);
    let header_cells: Vec<String> = split_line(lines[0], delimiter, quoting)
        .into_iter()
        .map(|cell| cell.trim().to_lowercase())
        .collect();
    let columns = ColumnMap::resolve(&header_cells);
    debug!(?delimiter, ?columns, "resolved csv schema");

    lines[1..]
        .iter()
        .map(|line| {
            let cells = split_line(line, delimiter, quoting);
            let text_at = |idx: Option<usize>| {
                idx.and_then(|i| cells.get(i))
                    .map(|c| c.trim().to_string())
                    .unwrap_or_default()
            };
            let number_at = |idx: Option<usize>| {
                idx.and_then(|i| cells.get(i))
                    .map(|c| parse_number(c))
                    .unwrap_or(0.0)
            };

            InventoryRecord::new(
                text_at(columns.code),
                text_at(columns.key),
                text_at(columns.description),
                number_at(columns.inventory),
                text_at(columns.classification),
                number_at(columns.avg_sales),
                number_at(columns.coverage_months),
                number_at(columns.coverage_days),
            )
        })
        .collect()
}

/// Pick `;` or `,` by counting occurrences in the header line; ties go to
/// comma. A heuristic, not configurable.
fn detect_delimiter(header: &str) -> char {
    let semis = header.matches(';').count();
    let commas = header.matches(',').count();
    if semis > commas { ';' } else { ',' }
}

/// Numeric cell coercion: strip thousands-separator commas, parse as f64.
/// Blank, non-numeric, or non-finite input yields 0 — never an error,
/// never NaN.
pub fn parse_number(cell: &str) -> f64 {
    cell.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn split_line(line: &str, delimiter: char, quoting: Quoting) -> Vec<String> {
    match quoting {
        Quoting::Lenient => line.split(delimiter).map(str::to_string).collect(),
        Quoting::Rfc4180 => split_quoted(line, delimiter),
    }
}

/// RFC 4180 field split: fields may be wrapped in double quotes, with a
/// doubled quote standing for a literal quote inside a quoted field.
fn split_quoted(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' && field.is_empty() {
            in_quotes = true;
        } else if ch == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "codigo,clave,desc_prod,inv,clasificacion,promedio vta mes,cobertura (mes),cobertura dias (30)";

    #[test]
    fn parses_two_rows_in_input_order() {
        let text = format!("{HEADER}\nA1,K1,Widget,100,A,50,2,60\nA2,K2,Gadget,0,B,0,0,10");
        let records = parse(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, "A1");
        assert_eq!(records[0].inventory_qty, 100.0);
        assert_eq!(records[1].description, "Gadget");
        assert_eq!(records[1].coverage_days30, 10.0);
    }

    #[test]
    fn header_without_data_rows_is_empty_not_an_error() {
        assert!(parse(HEADER).is_empty());
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }

    #[test]
    fn semicolon_delimiter_is_auto_detected() {
        let text = "codigo;clave;desc_prod;inv\nA1;K1;Widget;7";
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "A1");
        assert_eq!(records[0].inventory_qty, 7.0);
    }

    #[test]
    fn missing_columns_default_silently() {
        // No inv / clasificacion columns: fields default, parse still succeeds
        let text = "codigo,clave\nA1,K1";
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].inventory_qty, 0.0);
        assert_eq!(records[0].classification, "");
        assert_eq!(records[0].description, "");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = format!("{HEADER}\n\nA1,K1,Widget,1,A,1,1,1\n   \nA2,K2,Gadget,2,B,2,2,2\n");
        assert_eq!(parse(&text).len(), 2);
    }

    #[test]
    fn crlf_line_endings_parse_like_lf() {
        let text = format!("{HEADER}\r\nA1,K1,Widget,3,A,1,1,1\r\n");
        let records = parse(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].inventory_qty, 3.0);
    }

    #[test]
    fn numeric_coercion_never_fails() {
        assert_eq!(parse_number("1,234"), 1234.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number(" 2.5 "), 2.5);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
    }

    #[test]
    fn lenient_split_treats_quotes_as_ordinary_text() {
        let text = format!("{HEADER}\nA1,K1,\"Widget\",1,A,1,1,1");
        let records = parse(&text);
        assert_eq!(records[0].description, "\"Widget\"");
    }

    #[test]
    fn rfc4180_split_unescapes_quoted_fields() {
        let text = format!("{HEADER}\nA1,K1,\"Widget, \"\"large\"\"\",1,A,1,1,1");
        let records = parse_with(&text, Quoting::Rfc4180);
        assert_eq!(records[0].description, "Widget, \"large\"");
    }

    #[test]
    fn descripcion_header_is_accepted_as_description() {
        let text = "Codigo,Clave,Descripcion,Inv\nA1,K1,Widget,4";
        let records = parse(text);
        assert_eq!(records[0].description, "Widget");
        assert_eq!(records[0].inventory_qty, 4.0);
    }
}
