//! Session service - One tutoring session over an append-only conversation

use std::{fmt, sync::Arc, time::Instant};

use domain::{ChatMessage, Conversation, DomainError, MessageMetadata};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{AudioPort, InferencePort, SpeechPort, TranslationPort},
};

/// Reply shown when inference fails mid-turn. Keeps the user/assistant
/// alternation of the history intact so later turns stay well-formed.
const FALLBACK_REPLY: &str =
    "Lo siento, no pude generar una respuesta esta vez. Inténtalo de nuevo.";

/// What happened during a single turn
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// Advisory English translation of the utterance, if available
    pub translation: Option<String>,
    /// The assistant reply appended to the conversation
    pub reply: ChatMessage,
    /// Whether the reply is the fallback text after an inference failure
    pub degraded: bool,
    /// Whether the reply was spoken aloud
    pub spoken: bool,
}

/// Startup availability snapshot of the collaborators
#[derive(Debug, Clone, Copy)]
pub struct CollaboratorStatus {
    pub inference: bool,
    pub translation: bool,
    pub speech: bool,
}

impl CollaboratorStatus {
    #[must_use]
    pub const fn all_available(&self) -> bool {
        self.inference && self.translation && self.speech
    }
}

/// Orchestrates one tutoring session.
///
/// Owns the conversation exclusively. A turn runs translation
/// (advisory), inference over the full history, and optional spoken
/// playback; no collaborator failure ends the session.
pub struct SessionService {
    conversation: Conversation,
    inference: Arc<dyn InferencePort>,
    translation: Arc<dyn TranslationPort>,
    speech: Arc<dyn SpeechPort>,
    audio: Arc<dyn AudioPort>,
    speak_replies: bool,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("conversation_id", &self.conversation.id)
            .field("message_count", &self.conversation.message_count())
            .field("speak_replies", &self.speak_replies)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    /// Create a session seeded with a system prompt.
    pub fn new(
        system_prompt: impl Into<String>,
        inference: Arc<dyn InferencePort>,
        translation: Arc<dyn TranslationPort>,
        speech: Arc<dyn SpeechPort>,
        audio: Arc<dyn AudioPort>,
    ) -> Self {
        Self {
            conversation: Conversation::with_system_prompt(system_prompt),
            inference,
            translation,
            speech,
            audio,
            speak_replies: false,
        }
    }

    /// Speak assistant replies aloud after each turn.
    #[must_use]
    pub const fn with_spoken_replies(mut self, enabled: bool) -> Self {
        self.speak_replies = enabled;
        self
    }

    /// Read-only view of the conversation so far.
    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run one turn of the session.
    ///
    /// The utterance is appended verbatim (the Spanish text, never its
    /// translation). Translation failure drops the advisory gloss;
    /// inference failure appends a fallback reply; synthesis or playback
    /// failure skips the spoken reply. Only an empty utterance is an
    /// error, and the conversation is untouched in that case.
    #[instrument(skip(self, utterance), fields(conv_id = %self.conversation.id, turn = self.conversation.message_count()))]
    pub async fn run_turn(&mut self, utterance: &str) -> Result<TurnReport, ApplicationError> {
        if utterance.trim().is_empty() {
            return Err(DomainError::EmptyUtterance.into());
        }

        let translation = match self.translation.translate_to_english(utterance).await {
            Ok(result) => {
                debug!(detected = ?result.detected_source_language, "Translation received");
                Some(result.text)
            }
            Err(e) => {
                warn!(error = %e, "Translation unavailable, continuing without it");
                None
            }
        };

        self.conversation.add_user_message(utterance);

        let start = Instant::now();
        let (reply, degraded) = match self
            .inference
            .generate_with_history(self.conversation.snapshot())
            .await
        {
            Ok(result) => {
                #[allow(clippy::cast_possible_truncation)]
                let latency = start.elapsed().as_millis() as u64;
                debug!(
                    model = %result.model,
                    tokens = ?result.tokens_used,
                    latency_ms = latency,
                    "Reply generated"
                );
                let reply = ChatMessage::assistant(&result.content).with_metadata(MessageMetadata {
                    model: Some(result.model),
                    tokens: result.tokens_used,
                    latency_ms: Some(latency),
                });
                (reply, false)
            }
            Err(e) => {
                warn!(error = %e, "Inference failed, appending fallback reply");
                (ChatMessage::assistant(FALLBACK_REPLY), true)
            }
        };

        self.conversation.add_message(reply.clone());

        let spoken = if self.speak_replies && !degraded {
            self.speak(&reply.content).await
        } else {
            false
        };

        Ok(TurnReport {
            translation,
            reply,
            degraded,
            spoken,
        })
    }

    /// Synthesize and play a reply; failures skip playback.
    async fn speak(&self, text: &str) -> bool {
        let synthesis = match self.speech.synthesize(text).await {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Synthesis failed, skipping playback");
                return false;
            }
        };

        let encoding = synthesis.encoding;
        match self.audio.play(synthesis.audio_data, encoding).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Playback failed");
                false
            }
        }
    }

    /// Probe collaborator availability, for a startup warning only.
    pub async fn check_collaborators(&self) -> CollaboratorStatus {
        CollaboratorStatus {
            inference: self.inference.is_healthy().await,
            translation: self.translation.is_healthy().await,
            speech: self.speech.is_available().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::MessageRole;

    use super::*;
    use crate::ports::{
        AudioEncoding, InferenceResult, MockAudioPort, MockInferencePort, MockSpeechPort,
        MockTranslationPort, SynthesisResult, TranslationResult,
    };

    const SYSTEM_PROMPT: &str = "Eres un tutor de español.";

    fn inference_ok() -> MockInferencePort {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_with_history().returning(|_| {
            Ok(InferenceResult {
                content: "¡Muy bien dicho!".to_string(),
                model: "gpt-4o-mini".to_string(),
                tokens_used: Some(42),
            })
        });
        mock
    }

    fn translation_ok() -> MockTranslationPort {
        let mut mock = MockTranslationPort::new();
        mock.expect_translate_to_english().returning(|_| {
            Ok(TranslationResult {
                text: "Where is the library?".to_string(),
                detected_source_language: Some("ES".to_string()),
            })
        });
        mock
    }

    fn service(
        inference: MockInferencePort,
        translation: MockTranslationPort,
        speech: MockSpeechPort,
        audio: MockAudioPort,
    ) -> SessionService {
        SessionService::new(
            SYSTEM_PROMPT,
            Arc::new(inference),
            Arc::new(translation),
            Arc::new(speech),
            Arc::new(audio),
        )
    }

    #[tokio::test]
    async fn turn_appends_original_utterance_not_translation() {
        let mut svc = service(
            inference_ok(),
            translation_ok(),
            MockSpeechPort::new(),
            MockAudioPort::new(),
        );

        let report = svc
            .run_turn("¿Dónde está la biblioteca?")
            .await
            .expect("turn should succeed");

        assert_eq!(report.translation.as_deref(), Some("Where is the library?"));
        let messages = svc.conversation().snapshot();
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "¿Dónde está la biblioteca?");
    }

    #[tokio::test]
    async fn system_prompt_stays_first_across_turns() {
        let mut svc = service(
            inference_ok(),
            translation_ok(),
            MockSpeechPort::new(),
            MockAudioPort::new(),
        );

        for utterance in ["hola", "¿cómo estás?", "adiós"] {
            svc.run_turn(utterance).await.expect("turn should succeed");
        }

        let messages = svc.conversation().snapshot();
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages.len(), 7); // system + 3 × (user, assistant)
    }

    #[tokio::test]
    async fn inference_failure_appends_fallback_reply() {
        let mut inference = MockInferencePort::new();
        inference
            .expect_generate_with_history()
            .returning(|_| Err(ApplicationError::Inference("connection refused".to_string())));

        let mut svc = service(
            inference,
            translation_ok(),
            MockSpeechPort::new(),
            MockAudioPort::new(),
        );

        let report = svc.run_turn("hola").await.expect("turn should not fail");

        assert!(report.degraded);
        assert_eq!(report.reply.content, FALLBACK_REPLY);
        let messages = svc.conversation().snapshot();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn role_alternation_survives_inference_failures() {
        let mut inference = MockInferencePort::new();
        let mut fail = true;
        inference.expect_generate_with_history().returning(move |_| {
            fail = !fail;
            if fail {
                Err(ApplicationError::Inference("flaky".to_string()))
            } else {
                Ok(InferenceResult {
                    content: "bien".to_string(),
                    model: "gpt-4o-mini".to_string(),
                    tokens_used: None,
                })
            }
        });

        let mut svc = service(
            inference,
            translation_ok(),
            MockSpeechPort::new(),
            MockAudioPort::new(),
        );

        for utterance in ["uno", "dos", "tres", "cuatro"] {
            svc.run_turn(utterance).await.expect("turn should succeed");
        }

        let messages = svc.conversation().snapshot();
        for (i, message) in messages.iter().enumerate().skip(1) {
            let expected = if i % 2 == 1 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            assert_eq!(message.role, expected, "message {i}");
        }
    }

    #[tokio::test]
    async fn translation_failure_is_advisory() {
        let mut translation = MockTranslationPort::new();
        translation
            .expect_translate_to_english()
            .returning(|_| Err(ApplicationError::Translation("quota".to_string())));

        let mut svc = service(
            inference_ok(),
            translation,
            MockSpeechPort::new(),
            MockAudioPort::new(),
        );

        let report = svc.run_turn("hola").await.expect("turn should succeed");
        assert!(report.translation.is_none());
        assert!(!report.degraded);
        assert_eq!(svc.conversation().message_count(), 3);
    }

    #[tokio::test]
    async fn spoken_reply_plays_synthesized_audio() {
        let mut speech = MockSpeechPort::new();
        speech.expect_synthesize().returning(|_| {
            Ok(SynthesisResult {
                audio_data: vec![1, 2, 3],
                encoding: AudioEncoding::Mp3,
            })
        });
        let mut audio = MockAudioPort::new();
        audio
            .expect_play()
            .withf(|data, encoding| data == &[1, 2, 3] && *encoding == AudioEncoding::Mp3)
            .returning(|_, _| Ok(()));

        let mut svc =
            service(inference_ok(), translation_ok(), speech, audio).with_spoken_replies(true);

        let report = svc.run_turn("hola").await.expect("turn should succeed");
        assert!(report.spoken);
    }

    #[tokio::test]
    async fn synthesis_failure_skips_playback() {
        let mut speech = MockSpeechPort::new();
        speech
            .expect_synthesize()
            .returning(|_| Err(ApplicationError::Speech("tts down".to_string())));
        let mut audio = MockAudioPort::new();
        audio.expect_play().never();

        let mut svc =
            service(inference_ok(), translation_ok(), speech, audio).with_spoken_replies(true);

        let report = svc.run_turn("hola").await.expect("turn should succeed");
        assert!(!report.spoken);
        assert!(!report.degraded);
    }

    #[tokio::test]
    async fn playback_failure_is_not_fatal() {
        let mut speech = MockSpeechPort::new();
        speech.expect_synthesize().returning(|_| {
            Ok(SynthesisResult {
                audio_data: vec![0],
                encoding: AudioEncoding::Mp3,
            })
        });
        let mut audio = MockAudioPort::new();
        audio
            .expect_play()
            .returning(|_, _| Err(ApplicationError::Audio("no output device".to_string())));

        let mut svc =
            service(inference_ok(), translation_ok(), speech, audio).with_spoken_replies(true);

        let report = svc.run_turn("hola").await.expect("turn should succeed");
        assert!(!report.spoken);
    }

    #[tokio::test]
    async fn fallback_reply_is_never_spoken() {
        let mut inference = MockInferencePort::new();
        inference
            .expect_generate_with_history()
            .returning(|_| Err(ApplicationError::Inference("down".to_string())));
        let mut speech = MockSpeechPort::new();
        speech.expect_synthesize().never();

        let mut svc = service(inference, translation_ok(), speech, MockAudioPort::new())
            .with_spoken_replies(true);

        let report = svc.run_turn("hola").await.expect("turn should succeed");
        assert!(report.degraded);
        assert!(!report.spoken);
    }

    #[tokio::test]
    async fn empty_utterance_is_rejected_without_appending() {
        let mut translation = MockTranslationPort::new();
        translation.expect_translate_to_english().never();

        let mut svc = service(
            MockInferencePort::new(),
            translation,
            MockSpeechPort::new(),
            MockAudioPort::new(),
        );

        let result = svc.run_turn("   ").await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::EmptyUtterance))
        ));
        assert_eq!(svc.conversation().message_count(), 1);
    }

    #[tokio::test]
    async fn collaborator_status_reports_each_port() {
        let mut inference = inference_ok();
        inference.expect_is_healthy().returning(|| true);
        let mut translation = translation_ok();
        translation.expect_is_healthy().returning(|| false);
        let mut speech = MockSpeechPort::new();
        speech.expect_is_available().returning(|| true);

        let svc = service(inference, translation, speech, MockAudioPort::new());
        let status = svc.check_collaborators().await;

        assert!(status.inference);
        assert!(!status.translation);
        assert!(status.speech);
        assert!(!status.all_available());
    }
}
