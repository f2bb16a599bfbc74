use crate::utils::error::Result;
use std::io::Write;

pub trait DataProcessor {
    fn read_data(&self) -> String;

    fn transform_data(&self) -> String;

    fn save_data(&self) -> String {
        "Saving the processed data to the database.".to_string()
    }

    /// Optional step. Does nothing unless overridden.
    fn hook_after_transform(&self) -> Option<String> {
        None
    }

    /// Runs read → transform → hook → save and returns the log of every
    /// step that produced output.
    fn process(&self) -> Vec<String> {
        let mut steps = vec![self.read_data(), self.transform_data()];
        if let Some(hook) = self.hook_after_transform() {
            steps.push(hook);
        }
        steps.push(self.save_data());
        steps
    }
}

#[derive(Debug, Default)]
pub struct CsvDataProcessor;

impl DataProcessor for CsvDataProcessor {
    fn read_data(&self) -> String {
        "Reading data from a CSV file.".to_string()
    }

    fn transform_data(&self) -> String {
        "Transforming the CSV data (e.g. converting it to JSON).".to_string()
    }
}

#[derive(Debug, Default)]
pub struct ApiDataProcessor;

impl DataProcessor for ApiDataProcessor {
    fn read_data(&self) -> String {
        "Fetching data from an API endpoint.".to_string()
    }

    fn transform_data(&self) -> String {
        "Transforming the API data (e.g. filtering fields).".to_string()
    }

    fn hook_after_transform(&self) -> Option<String> {
        Some("Hook: running an extra validation of the API data.".to_string())
    }

    fn save_data(&self) -> String {
        "Saving the processed data to an S3 bucket.".to_string()
    }
}

fn client_code(processor: &dyn DataProcessor, out: &mut dyn Write) -> Result<()> {
    for step in processor.process() {
        writeln!(out, "{}", step)?;
    }
    Ok(())
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Processing data from a CSV:")?;
    client_code(&CsvDataProcessor, out)?;

    writeln!(out, "\n{}\n", "=".repeat(30))?;

    writeln!(out, "Processing data from an API:")?;
    client_code(&ApiDataProcessor, out)?;
    Ok(())
}
