//! Text-table and JSON rendering for query results.

use serde::Serialize;

/// Render rows as an aligned text table. Empty result sets render an
/// explicit `(no data)` marker instead of a bare header.
pub fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = format!("{title}\n");
    if rows.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    out.push_str("  ");
    out.push_str(&header_line.join("  "));
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        out.push_str("  ");
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

pub fn print_table(title: &str, headers: &[&str], rows: &[Vec<String>]) {
    print!("\n{}", render_table(title, headers, rows));
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Two-decimal display for percentages and rates.
pub fn pct(value: f64) -> String {
    format!("{value:.2}")
}
