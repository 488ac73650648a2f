//! Interactive session loop
//!
//! Mode selection, utterance acquisition, and turn display. All
//! conversation state lives in a `SessionService`; a fresh one is
//! created each time the user enters a mode, so history never leaks
//! between sessions.

use std::io::{self, Write};
use std::sync::Arc;

use application::SessionService;
use application::ports::{AudioEncoding, AudioPort, InferencePort, SpeechPort, TranslationPort};
use infrastructure::TempAudioArtifact;
use tracing::warn;

use crate::prompts::{CONVO_PROMPT, TEXT_PROMPT};

const EXIT_KEYWORDS: &[&str] = &["quit", "exit", "back"];

/// Available input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Voice,
    Conversation,
}

/// Outcome of parsing a menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    Selected(InputMode),
    Quit,
    Invalid,
}

/// Parse a main-menu selection.
pub fn parse_mode_choice(input: &str) -> ModeChoice {
    match input.trim().to_lowercase().as_str() {
        "q" | "quit" => ModeChoice::Quit,
        "1" | "t" | "text" => ModeChoice::Selected(InputMode::Text),
        "2" | "v" | "voice" => ModeChoice::Selected(InputMode::Voice),
        "3" | "c" | "conversation" => ModeChoice::Selected(InputMode::Conversation),
        _ => ModeChoice::Invalid,
    }
}

/// Parse the voice-or-text sub-mode prompt in conversation mode.
pub fn parse_sub_mode(input: &str) -> Option<InputMode> {
    let input = input.trim().to_lowercase();
    if input.starts_with('v') {
        Some(InputMode::Voice)
    } else if input.starts_with('t') {
        Some(InputMode::Text)
    } else {
        None
    }
}

/// Whether an utterance is an inline exit keyword.
pub fn is_exit_keyword(input: &str) -> bool {
    EXIT_KEYWORDS.contains(&input.trim().to_lowercase().as_str())
}

/// Whether a confirmation answer means yes.
pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí")
}

fn print_separator() {
    println!("*\n* * * * * * * * * * * * * * * * * * * * * * * * * * *\n*");
}

/// Read one trimmed line from stdin.
///
/// The blocking read runs on the blocking pool so the caller's future
/// stays pollable and Ctrl-C can interrupt a session mid-prompt.
async fn prompt(text: &'static str) -> anyhow::Result<String> {
    let line = tokio::task::spawn_blocking(move || -> io::Result<String> {
        print!("{text}");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line)
    })
    .await??;
    Ok(line.trim().to_string())
}

/// The interactive top-level loop
pub struct SessionLoop {
    inference: Arc<dyn InferencePort>,
    translation: Arc<dyn TranslationPort>,
    speech: Arc<dyn SpeechPort>,
    audio: Arc<dyn AudioPort>,
}

impl std::fmt::Debug for SessionLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLoop").finish_non_exhaustive()
    }
}

impl SessionLoop {
    pub fn new(
        inference: Arc<dyn InferencePort>,
        translation: Arc<dyn TranslationPort>,
        speech: Arc<dyn SpeechPort>,
        audio: Arc<dyn AudioPort>,
    ) -> Self {
        Self {
            inference,
            translation,
            speech,
            audio,
        }
    }

    fn new_session(&self, system_prompt: &str) -> SessionService {
        SessionService::new(
            system_prompt,
            Arc::clone(&self.inference),
            Arc::clone(&self.translation),
            Arc::clone(&self.speech),
            Arc::clone(&self.audio),
        )
    }

    /// Run the mode-selection loop until the user quits.
    pub async fn run(&self) -> anyhow::Result<()> {
        print_separator();

        loop {
            println!("***   Input modes: [1] Text | [2] Voice | [3] Conversation | [q] Quit");
            let choice = prompt("***   Select input mode: ").await?;

            match parse_mode_choice(&choice) {
                ModeChoice::Quit => break,
                ModeChoice::Invalid => {
                    println!("***   Invalid choice. Please try again.");
                }
                ModeChoice::Selected(InputMode::Conversation) => {
                    println!("***   Using CONVERSATION input mode");
                    self.conversation_mode().await?;
                }
                ModeChoice::Selected(mode) => {
                    println!(
                        "***   Using {} input mode",
                        if mode == InputMode::Text { "TEXT" } else { "VOICE" }
                    );
                    self.translation_mode(mode).await?;
                }
            }
        }

        Ok(())
    }

    /// One sentence-breakdown turn, then back to the menu.
    async fn translation_mode(&self, mode: InputMode) -> anyhow::Result<()> {
        let mut session = self.new_session(TEXT_PROMPT);

        let utterance = if mode == InputMode::Voice {
            self.acquire_voice_utterance(true).await?
        } else {
            let line = prompt("***   Enter Spanish text: ").await?;
            if line.is_empty() {
                println!("***   Nothing entered.");
                return Ok(());
            }
            Some(line)
        };

        let Some(utterance) = utterance else {
            return Ok(());
        };
        if is_exit_keyword(&utterance) {
            return Ok(());
        }

        let report = session.run_turn(&utterance).await?;

        print_separator();
        match &report.translation {
            Some(translation) => println!("***   Translation: {translation}\n*"),
            None => println!("***   No translation available.\n*"),
        }
        println!("***   Explanation: {}\n*", report.reply.content);
        print_separator();

        Ok(())
    }

    /// Free-form dialog with spoken replies until an exit keyword.
    async fn conversation_mode(&self) -> anyhow::Result<()> {
        print_separator();
        println!("***   Starting conversation mode");
        println!("***   You can speak in Spanish, and the AI will respond.");
        println!("***   Type 'exit' or 'back' at any time to return to the main menu");

        let mode = loop {
            let answer = prompt("***   Choose input mode: [v]oice or [t]ext: ").await?;
            match parse_sub_mode(&answer) {
                Some(mode) => break mode,
                None => println!("***   Invalid option. Please enter 'v' or 't'."),
            }
        };

        let mut session = self.new_session(CONVO_PROMPT).with_spoken_replies(true);

        loop {
            let utterance = match mode {
                InputMode::Voice => self.acquire_voice_utterance(false).await?,
                _ => {
                    let line = prompt("***   Your message: ").await?;
                    if line.is_empty() { None } else { Some(line) }
                }
            };

            let Some(utterance) = utterance else {
                break;
            };
            if is_exit_keyword(&utterance) {
                break;
            }

            let report = session.run_turn(&utterance).await?;

            if let Some(translation) = &report.translation {
                println!("***   Translation: {translation}");
            }
            println!("***   AI: {}", report.reply.content);
            print_separator();
        }

        Ok(())
    }

    /// Record, transcribe, and optionally confirm one spoken utterance.
    ///
    /// Returns `None` on recording or transcription failure, or when
    /// the user rejects the transcription. Never retries on its own.
    async fn acquire_voice_utterance(&self, confirm: bool) -> anyhow::Result<Option<String>> {
        prompt("***   Press ENTER to start recording...").await?;
        println!("***   Recording... Press ENTER to stop");
        println!("***   (Recording will automatically stop after 60 seconds)");

        let recorded = match self.audio.record().await {
            Ok(recorded) => recorded,
            Err(e) => {
                println!("\n***   Recording failed: {e}");
                return Ok(None);
            }
        };

        #[allow(clippy::cast_precision_loss)]
        let secs = recorded.duration_ms as f64 / 1000.0;
        println!("\n***   Recording finished! Duration: {secs:.1} seconds");

        // The capture is staged as an on-disk artifact and transcribed from
        // there, so a crash mid-turn leaves a file the teardown sweep can
        // reclaim. Deleted when acquisition ends. If staging fails we fall
        // back to the in-memory capture.
        let artifact = TempAudioArtifact::create(&recorded.data, "wav")
            .map_err(|e| warn!(error = %e, "Could not persist recording artifact"))
            .ok();
        let audio_bytes = match &artifact {
            Some(artifact) => tokio::fs::read(artifact.path())
                .await
                .unwrap_or(recorded.data),
            None => recorded.data,
        };

        let transcription = match self
            .speech
            .transcribe(audio_bytes, AudioEncoding::Wav, Some("es".to_string()))
            .await
        {
            Ok(result) if !result.text.trim().is_empty() => result.text,
            Ok(_) => {
                println!("***   Nothing was transcribed. Please try again.");
                return Ok(None);
            }
            Err(e) => {
                warn!(error = %e, "Transcription failed");
                println!("***   Failed to transcribe audio. Please try again.");
                return Ok(None);
            }
        };

        if confirm {
            println!("***   Transcribed: {transcription}");
            let answer = prompt("***   Is this correct? (y/n): ").await?;
            if !is_affirmative(&answer) {
                println!("***   Let's try again.");
                return Ok(None);
            }
        } else {
            println!("***   You said: {transcription}");
        }

        Ok(Some(transcription))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_choice_accepts_numbers_letters_and_words() {
        assert_eq!(parse_mode_choice("1"), ModeChoice::Selected(InputMode::Text));
        assert_eq!(parse_mode_choice("t"), ModeChoice::Selected(InputMode::Text));
        assert_eq!(parse_mode_choice("TEXT"), ModeChoice::Selected(InputMode::Text));
        assert_eq!(parse_mode_choice("2"), ModeChoice::Selected(InputMode::Voice));
        assert_eq!(parse_mode_choice("voice"), ModeChoice::Selected(InputMode::Voice));
        assert_eq!(
            parse_mode_choice("3"),
            ModeChoice::Selected(InputMode::Conversation)
        );
        assert_eq!(
            parse_mode_choice(" c "),
            ModeChoice::Selected(InputMode::Conversation)
        );
    }

    #[test]
    fn mode_choice_quit_and_invalid() {
        assert_eq!(parse_mode_choice("q"), ModeChoice::Quit);
        assert_eq!(parse_mode_choice("Quit"), ModeChoice::Quit);
        assert_eq!(parse_mode_choice("x"), ModeChoice::Invalid);
        assert_eq!(parse_mode_choice(""), ModeChoice::Invalid);
    }

    #[test]
    fn sub_mode_matches_prefix() {
        assert_eq!(parse_sub_mode("v"), Some(InputMode::Voice));
        assert_eq!(parse_sub_mode("Voice"), Some(InputMode::Voice));
        assert_eq!(parse_sub_mode("t"), Some(InputMode::Text));
        assert_eq!(parse_sub_mode("texto"), Some(InputMode::Text));
        assert_eq!(parse_sub_mode("x"), None);
        assert_eq!(parse_sub_mode(""), None);
    }

    #[test]
    fn exit_keywords_are_case_insensitive() {
        assert!(is_exit_keyword("quit"));
        assert!(is_exit_keyword("EXIT"));
        assert!(is_exit_keyword(" back "));
        assert!(!is_exit_keyword("hola"));
        assert!(!is_exit_keyword(""));
    }

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Yes"));
        assert!(is_affirmative("sí"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
    }
}
