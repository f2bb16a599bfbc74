use anyhow::Context;
use clap::Parser;
use pattern_lab::catalog::{self, Demo};
use pattern_lab::patterns::creational::singleton::DatabaseConnection;
use pattern_lab::utils::logger;
use pattern_lab::{payment, transcribe, CliConfig, Command, LabConfig, LabError, TranscriptionOutcome};
use std::io::{self, Write};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("configuration rejected: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("settings: {:?}", settings);
    DatabaseConnection::set_connect_delay(Duration::from_millis(settings.singleton.connect_delay_ms));

    if let Err(e) = dispatch(&cli.command, &settings).await {
        match e.downcast_ref::<LabError>() {
            Some(lab_error) => {
                tracing::error!("{}", lab_error);
                eprintln!("❌ {}", lab_error.user_friendly_message());
            }
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn dispatch(command: &Command, settings: &LabConfig) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::List => {
            for demo in Demo::all() {
                writeln!(out, "{:<24} {:<11} {}", demo.name(), demo.category(), demo.summary())?;
            }
        }
        Command::Run { demo } => {
            let demo: Demo = demo.parse()?;
            demo.run(&mut out)?;
        }
        Command::RunAll => catalog::run_all(&mut out)?,
        Command::Pay => payment::run_walkthrough(&settings.payment, &mut out).await?,
        Command::Transcribe { url, output } => {
            let service = transcribe::service_from_settings(&settings.transcribe)
                .context("could not prepare the transcription pipeline")?;
            match service.transcribe_video(url, output.as_deref()).await {
                TranscriptionOutcome::Saved(path) => {
                    writeln!(out, "✅ Transcript saved to {}", path.display())?
                }
                failure => anyhow::bail!("transcription did not complete: {:?}", failure),
            }
        }
    }
    out.flush()?;
    Ok(())
}
