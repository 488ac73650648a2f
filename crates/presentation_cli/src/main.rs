//! Charla CLI
//!
//! Interactive Spanish learning assistant with text, voice, and
//! conversation modes.

#![allow(clippy::print_stdout)]

mod prompts;
mod session;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::ports::{AudioPort, InferencePort, SpeechPort, TranslationPort};
use infrastructure::{
    AppConfig, CpalAudioAdapter, DeepLTranslationAdapter, OpenAiInferenceAdapter, SpeechAdapter,
    sweep_leaked_artifacts,
};
use session::SessionLoop;

/// Charla CLI
#[derive(Parser)]
#[command(name = "charla")]
#[command(author, version, about = "Charla Spanish Learning Assistant", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn print_banner() {
    println!("\n* * *  Charla - Spanish Learning Assistant  * * *\n");
    println!("This application supports text, voice input, and conversation modes.");
    println!("You can speak Spanish and get explanations in English.");
    println!("In voice mode, press ENTER to start recording, then ENTER again to stop.");
    println!("In conversation mode, you can have a dialog with an AI assistant.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Credentials are read once here; a missing one is fatal.
    let config =
        AppConfig::from_env().context("Charla needs its API credentials to start")?;

    let inference: Arc<dyn InferencePort> = Arc::new(
        OpenAiInferenceAdapter::new(config.inference.clone())
            .context("Failed to initialize the inference client")?,
    );
    let translation: Arc<dyn TranslationPort> = Arc::new(
        DeepLTranslationAdapter::new(config.translation.clone())
            .context("Failed to initialize the translation client")?,
    );
    let speech: Arc<dyn SpeechPort> = Arc::new(
        SpeechAdapter::new(config.speech.clone())
            .context("Failed to initialize the speech clients")?,
    );
    let audio: Arc<dyn AudioPort> = Arc::new(CpalAudioAdapter::new(config.recording.clone()));

    print_banner();

    // Availability is a startup warning only; failures stay per-turn.
    if !inference.is_healthy().await {
        println!("\n⚠️  The explanation service is not reachable right now.");
    }
    if !translation.is_healthy().await {
        println!("\n⚠️  The translation service is not reachable right now.");
    }

    let session_loop = SessionLoop::new(inference, translation, speech, audio);

    let outcome = tokio::select! {
        result = session_loop.run() => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\n\nExiting the program. ¡Adiós!");
            Ok(())
        }
    };

    finish(outcome)?;
    println!("\nProgram ended.");
    Ok(())
}

/// Sweep leaked audio artifacts, then propagate the session outcome.
///
/// Runs on every exit path, including a failed session loop.
fn finish(outcome: anyhow::Result<()>) -> anyhow::Result<()> {
    let removed = sweep_leaked_artifacts();
    if removed > 0 {
        tracing::debug!(removed, "Swept leftover audio artifacts");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_sweeps_even_when_the_session_failed() {
        let leak = std::env::temp_dir().join("charla-main-test-leak.wav");
        std::fs::write(&leak, b"x").expect("write");

        let result = finish(Err(anyhow::anyhow!("session loop failed")));

        assert!(result.is_err());
        assert!(!leak.exists());
    }

    #[test]
    fn verbosity_maps_to_filter_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(9), "trace");
    }
}
