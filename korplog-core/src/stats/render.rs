use crate::stats::{CellValues, Report, Table};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show `home/other` instead of the combined value.
    pub split_geo: bool,
}

pub fn render_text(report: &Report, options: RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Korp usage statistics\n\
         =====================\n\
         requests: {} | skipped: not query={} excluded network={} crawler={} no date={}\n",
        report.records,
        report.skipped.not_query,
        report.skipped.excluded_network,
        report.skipped.crawler,
        report.skipped.no_date,
    ));

    for table in &report.tables {
        out.push('\n');
        render_table(&mut out, table, options);
    }

    out
}

fn render_table(out: &mut String, table: &Table, options: RenderOptions) {
    let title = table.title();
    out.push_str(&title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len()));
    out.push('\n');

    if table.rows.is_empty() {
        out.push_str("  <no data>\n");
        return;
    }

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|c| cell_text(c, options)).collect())
        .collect();

    let label_width = table
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(heading.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut line = format!("{:<label_width$}", "");
    for (heading, &width) in table.columns.iter().zip(&widths) {
        line.push_str(&format!("  {heading:>width$}"));
    }
    out.push_str(line.trim_end());
    out.push('\n');

    for (row, texts) in table.rows.iter().zip(&cells) {
        let mut line = format!("{:<label_width$}", row.label);
        for (text, &width) in texts.iter().zip(&widths) {
            line.push_str(&format!("  {text:>width$}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

fn cell_text(values: &CellValues, options: RenderOptions) -> String {
    if options.split_geo {
        format!("{}/{}", values.home, values.other)
    } else {
        values.all.to_string()
    }
}

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
