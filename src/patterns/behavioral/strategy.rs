use crate::utils::error::{LabError, Result};
use serde_json::{json, Map, Value};
use std::io::Write;

/// One report row. Field order is preserved.
pub type Row = Map<String, Value>;

pub trait ExportStrategy {
    fn name(&self) -> &'static str;
    fn export(&self, rows: &[Row]) -> Result<String>;
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn header(rows: &[Row]) -> Vec<&str> {
    rows.first()
        .map(|row| row.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

#[derive(Debug, Default)]
pub struct JsonExportStrategy;

impl ExportStrategy for JsonExportStrategy {
    fn name(&self) -> &'static str {
        "JsonExportStrategy"
    }

    fn export(&self, rows: &[Row]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }
}

#[derive(Debug, Default)]
pub struct CsvExportStrategy;

impl ExportStrategy for CsvExportStrategy {
    fn name(&self) -> &'static str {
        "CsvExportStrategy"
    }

    fn export(&self, rows: &[Row]) -> Result<String> {
        if rows.is_empty() {
            return Ok(String::new());
        }

        let columns = header(rows);
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&columns)?;
        for row in rows {
            if let Some(extra) = row.keys().find(|key| !columns.contains(&key.as_str())) {
                return Err(LabError::validation(format!(
                    "row contains field '{}' that is not in the header",
                    extra
                )));
            }
            let record: Vec<String> = columns
                .iter()
                .map(|column| row.get(*column).map(cell_text).unwrap_or_default())
                .collect();
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| LabError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| LabError::invalid_state(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct HtmlExportStrategy;

impl ExportStrategy for HtmlExportStrategy {
    fn name(&self) -> &'static str {
        "HtmlExportStrategy"
    }

    fn export(&self, rows: &[Row]) -> Result<String> {
        if rows.is_empty() {
            return Ok("<table></table>".to_string());
        }

        let headers: String = header(rows)
            .into_iter()
            .map(|key| format!("<th>{}</th>", html_escape::encode_text(key)))
            .collect();

        let body: String = rows
            .iter()
            .map(|row| {
                let cells: String = row
                    .values()
                    .map(|v| format!("<td>{}</td>", html_escape::encode_text(&cell_text(v))))
                    .collect();
                format!("<tr>{}</tr>", cells)
            })
            .collect();

        Ok(format!(
            "<table border=\"1\">\n  <thead>\n    <tr>{}</tr>\n  </thead>\n  <tbody>\n    {}\n  </tbody>\n</table>",
            headers, body
        ))
    }
}

/// The context. Knows nothing about the formats, only the strategy interface.
#[derive(Default)]
pub struct ReportGenerator {
    strategy: Option<Box<dyn ExportStrategy>>,
}

impl ReportGenerator {
    pub fn new(strategy: Box<dyn ExportStrategy>) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn strategy_name(&self) -> Option<&'static str> {
        self.strategy.as_ref().map(|s| s.name())
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn ExportStrategy>) {
        tracing::info!(
            "ReportGenerator: switching strategy from '{}' to '{}'",
            self.strategy_name().unwrap_or("none"),
            strategy.name()
        );
        self.strategy = Some(strategy);
    }

    pub fn generate_report(&self, rows: &[Row]) -> Result<String> {
        let strategy = self
            .strategy
            .as_ref()
            .ok_or_else(|| LabError::invalid_state("the export strategy has not been set"))?;
        tracing::debug!("generating report with {}", strategy.name());
        strategy.export(rows)
    }
}

pub fn sample_rows() -> Vec<Row> {
    let data = json!([
        {"id": 1, "name": "Mechanical Keyboard", "price": 120},
        {"id": 2, "name": "RGB Mouse", "price": 45},
        {"id": 3, "name": "27-inch Monitor", "price": 350},
    ]);
    match data {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let rows = sample_rows();
    writeln!(out, "Data to export: {}", serde_json::to_string(&rows)?)?;

    let mut generator = ReportGenerator::new(Box::new(JsonExportStrategy));
    let strategies: [Box<dyn ExportStrategy>; 2] =
        [Box::new(CsvExportStrategy), Box::new(HtmlExportStrategy)];

    writeln!(out, "\n--- Report with {} ---", generator.strategy_name().unwrap_or("none"))?;
    writeln!(out, "{}", generator.generate_report(&rows)?)?;

    for strategy in strategies {
        generator.set_strategy(strategy);
        writeln!(out, "\n--- Report with {} ---", generator.strategy_name().unwrap_or("none"))?;
        writeln!(out, "{}", generator.generate_report(&rows)?)?;
    }
    Ok(())
}
