use crate::config::toml_config::LabConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pattern-lab")]
#[command(about = "Runnable design-pattern and SOLID walkthroughs")]
pub struct CliConfig {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List the available demos
    List,
    /// Run one demo by name
    Run {
        /// Demo name, e.g. `chain-of-responsibility`
        demo: String,
    },
    /// Run every demo in order
    RunAll,
    /// Walk through the payment service with the configured processors
    Pay,
    /// Download, transcribe and save the audio behind a URL
    Transcribe {
        url: String,

        /// Where to write the transcript
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl CliConfig {
    /// Loads the TOML settings named by `--config` (defaults without it) and validates them.
    pub fn load_settings(&self) -> Result<LabConfig> {
        let settings = LabConfig::load(self.config.as_deref())?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_run_with_global_flags_after_subcommand() {
        let cli = CliConfig::try_parse_from(["pattern-lab", "run", "observer", "--verbose"]).unwrap();

        assert!(cli.verbose);
        assert!(!cli.json_logs);
        assert_eq!(
            cli.command,
            Command::Run {
                demo: "observer".to_string()
            }
        );
    }

    #[test]
    fn test_parse_transcribe_with_output() {
        let cli = CliConfig::try_parse_from([
            "pattern-lab",
            "--json-logs",
            "transcribe",
            "https://example.com/v",
            "-o",
            "out.txt",
        ])
        .unwrap();

        assert!(cli.json_logs);
        assert_eq!(
            cli.command,
            Command::Transcribe {
                url: "https://example.com/v".to_string(),
                output: Some(PathBuf::from("out.txt")),
            }
        );
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(CliConfig::try_parse_from(["pattern-lab"]).is_err());
        assert!(CliConfig::try_parse_from(["pattern-lab", "run"]).is_err());
    }

    #[test]
    fn test_load_settings_without_file_uses_defaults() {
        let cli = CliConfig::try_parse_from(["pattern-lab", "list"]).unwrap();
        let settings = cli.load_settings().unwrap();
        assert_eq!(settings.singleton.connect_delay_ms, 1000);
    }

    #[test]
    fn test_load_settings_rejects_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[payment]\ngateway_url = \"not a url\"").unwrap();

        let cli = CliConfig::try_parse_from([
            "pattern-lab",
            "pay",
            "--config",
            file.path().to_str().unwrap(),
        ])
        .unwrap();
        assert!(cli.load_settings().is_err());
    }
}
