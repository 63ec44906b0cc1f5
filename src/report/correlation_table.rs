//! Correlation matrix rendering

use comfy_table::{Attribute, Cell, CellAlignment};
use console::style;

use crate::pipeline::CorrelationMatrix;
use crate::report::summary::plain_table;

/// Strongest pairs listed under the matrix
pub const TOP_PAIRS: usize = 5;

/// Render the matrix with numbered headers and a legend, plus the strongest pairs.
pub fn render_correlation(matrix: &CorrelationMatrix) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Complete observations: {}\n",
        matrix.complete_rows
    ));

    let mut table = plain_table();

    let mut header = vec![Cell::new("").add_attribute(Attribute::Bold)];
    header.extend(
        (1..=matrix.columns.len()).map(|i| Cell::new(format!("[{}]", i)).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for (i, name) in matrix.columns.iter().enumerate() {
        let mut row = vec![Cell::new(format!("[{}] {}", i + 1, name))];
        row.extend(matrix.values[i].iter().map(|v| {
            let text = if v.is_nan() {
                "NA".to_string()
            } else {
                format!("{:+.2}", v)
            };
            Cell::new(text).set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }
    out.push_str(&table.to_string());
    out.push('\n');

    let pairs = matrix.strongest_pairs(TOP_PAIRS);
    if !pairs.is_empty() {
        out.push_str("\nStrongest relationships:\n");
        for pair in pairs {
            out.push_str(&format!(
                "  • {} ~ {}: {:+.3}\n",
                pair.feature1, pair.feature2, pair.correlation
            ));
        }
    }

    out
}

pub fn display_correlation(matrix: &CorrelationMatrix) {
    println!();
    println!(
        "    {} {}",
        style("🔗").cyan(),
        style("CORRELATION MATRIX").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();
    for line in render_correlation(matrix).lines() {
        println!("    {}", line);
    }
}
