//! Text and JSON output of view reports

use crate::report::{CategoryReport, TemporalReport, UsersReport, ViewReport};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use spinemotion_analytics::CategoryCount;
use spinemotion_common::{format_percent, truncate_label, Result};
use spinemotion_i18n::Messages;
use std::fmt::Write as _;

/// Output format of a view run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text tables followed by metric captions.
    #[default]
    Text,
    /// The report as pretty-printed JSON.
    Json,
}

/// A plain text table with a title and left-aligned first column.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Table with a title and column headers.
    pub fn new(title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Render with `empty` in place of the body when there are no rows.
    pub fn render(&self, empty: &str) -> String {
        let widths = self.widths();
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);

        if self.rows.is_empty() {
            let _ = writeln!(out, "  {empty}");
            return out;
        }

        let line = |cells: &[String]| {
            let mut line = String::new();
            for (index, (cell, &width)) in cells.iter().zip(&widths).enumerate() {
                if index == 0 {
                    let _ = write!(line, "  {cell:<width$}");
                } else {
                    let _ = write!(line, "  {cell:>width$}");
                }
            }
            line.trim_end().to_string()
        };

        let _ = writeln!(out, "{}", line(&self.headers));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", line(&rule));
        for row in &self.rows {
            let _ = writeln!(out, "{}", line(row));
        }
        out
    }
}

/// Renders reports in the configured locale.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    messages: &'a Messages,
    label_width: usize,
}

impl<'a> Renderer<'a> {
    /// Renderer cutting movement names to `label_width` characters.
    pub const fn new(messages: &'a Messages, label_width: usize) -> Self {
        Self {
            messages,
            label_width,
        }
    }

    /// Render `report` in `format`.
    pub fn render(&self, report: &ViewReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(report)?;
                json.push('\n');
                Ok(json)
            }
            OutputFormat::Text => self.render_text(report),
        }
    }

    fn render_text(&self, report: &ViewReport) -> Result<String> {
        let mut out = format!("== {} ==\n\n", report.title());

        let sections = match report {
            ViewReport::Category(category) => self.category(category)?,
            ViewReport::Temporal(temporal) => self.temporal(temporal)?,
            ViewReport::Users(users) => self.users(users)?,
        };
        out.push_str(&sections.join("\n"));

        if report.skipped() > 0 {
            let _ = writeln!(
                out,
                "\n{}",
                self.messages.get_count("metric-skipped-rows", report.skipped())?
            );
        }
        Ok(out)
    }

    fn header(&self, keys: &[&str]) -> Result<Vec<String>> {
        keys.iter().map(|key| self.messages.get(key)).collect()
    }

    fn category_table(&self, title_key: &str, counts: &[CategoryCount]) -> Result<String> {
        let mut table = TextTable::new(
            self.messages.get(title_key)?,
            self.header(&["column-category", "column-count", "column-share"])?,
        );
        for count in counts {
            table.push(vec![
                truncate_label(&count.category, self.label_width),
                count.count.to_string(),
                format_percent(count.share),
            ]);
        }
        Ok(table.render(&self.messages.get("empty-table")?))
    }

    fn category(&self, report: &CategoryReport) -> Result<Vec<String>> {
        Ok(vec![
            self.category_table("table-category-counts", &report.counts)?,
            self.category_table("table-category-male", &report.by_gender.male)?,
            self.category_table("table-category-female", &report.by_gender.female)?,
        ])
    }

    fn temporal(&self, report: &TemporalReport) -> Result<Vec<String>> {
        let empty = self.messages.get("empty-table")?;

        let mut days = TextTable::new(
            self.messages.get("table-day-of-week")?,
            self.header(&["column-day", "column-count"])?,
        );
        for day in &report.day_of_week {
            days.push(vec![day.label.clone(), day.count.to_string()]);
        }

        let mut hours = TextTable::new(
            self.messages.get("table-hour-of-day")?,
            self.header(&["column-hour", "column-count"])?,
        );
        for hour in &report.hour_of_day {
            hours.push(vec![format!("{:02}", hour.hour), hour.count.to_string()]);
        }

        let mut classes = TextTable::new(
            self.messages.get("table-day-class")?,
            self.header(&["column-day-class", "column-count"])?,
        );
        for class in &report.day_class {
            classes.push(vec![class.label.clone(), class.count.to_string()]);
        }

        Ok(vec![
            days.render(&empty),
            hours.render(&empty),
            classes.render(&empty),
        ])
    }

    fn users(&self, report: &UsersReport) -> Result<Vec<String>> {
        let with_unknown = report.totals.total_unknown > 0;

        let mut columns = vec![
            "column-month",
            "column-total-users",
            "column-total-male",
            "column-total-female",
        ];
        if with_unknown {
            columns.push("column-total-unknown");
        }

        let mut months = TextTable::new(
            self.messages.get("table-monthly-users")?,
            self.header(&columns)?,
        );
        for month in &report.months {
            let mut row = vec![
                month.label.clone(),
                month.counts.total_users.to_string(),
                month.counts.total_male.to_string(),
                month.counts.total_female.to_string(),
            ];
            if with_unknown {
                row.push(month.counts.total_unknown.to_string());
            }
            months.push(row);
        }

        let totals = report.totals;
        let mut metrics = vec![
            self.metric("metric-total-users", totals.total_users)?,
            self.metric("metric-total-male", totals.total_male)?,
            self.metric("metric-total-female", totals.total_female)?,
        ];
        if with_unknown {
            metrics.push(self.metric("metric-total-unknown", totals.total_unknown)?);
        }

        Ok(vec![
            metrics.join("\n") + "\n",
            months.render(&self.messages.get("empty-table")?),
        ])
    }

    fn metric(&self, key: &str, value: u64) -> Result<String> {
        let count = usize::try_from(value).unwrap_or(usize::MAX);
        self.messages.get_count(key, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_table_alignment() {
        let mut table = TextTable::new("Counts", vec!["Day".to_string(), "Count".to_string()]);
        table.push(vec!["Mon".to_string(), "12".to_string()]);
        table.push(vec!["Wednesday".to_string(), "3".to_string()]);

        let rendered = table.render("(no data)");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Counts");
        assert_eq!(lines[1], "  Day        Count");
        assert_eq!(lines[2], "  ---------  -----");
        assert_eq!(lines[3], "  Mon           12");
        assert_eq!(lines[4], "  Wednesday      3");
    }

    #[test]
    fn test_empty_table() {
        let table = TextTable::new("Counts", vec!["Day".to_string()]);
        assert_eq!(table.render("(no data)"), "Counts\n  (no data)\n");
    }

    #[test]
    fn test_output_format_values() {
        assert_eq!(OutputFormat::from_str("json", false).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
