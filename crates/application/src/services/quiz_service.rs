//! Quiz service - structured quiz generation from free-form model output
//!
//! The model is asked for strict JSON but is not trusted to deliver it.
//! Output goes through one repair pass ([`parse_model_json`]) and is then
//! sanitized by [`QuizSet::from_model_output`].

use std::{fmt, sync::Arc};

use ai_core::{ChatProvider, ChatRequest};
use domain::{QuestionCount, QuizSet};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;

/// System instruction for quiz generation
pub const QUIZ_SYSTEM_PROMPT: &str = "You output strict JSON only.";

/// Service generating multiple-choice quizzes
pub struct QuizService {
    provider: Arc<dyn ChatProvider>,
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("provider", &self.provider.provider_id())
            .finish()
    }
}

impl QuizService {
    /// Create a quiz service backed by `provider`
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Generate a quiz of `count` questions on `topic` at `level`
    #[instrument(skip(self), fields(provider = %self.provider.provider_id()))]
    pub async fn generate(
        &self,
        topic: &str,
        level: &str,
        count: QuestionCount,
    ) -> Result<QuizSet, ApplicationError> {
        let (topic, level) = (topic.trim(), level.trim());
        let request =
            ChatRequest::with_system(QUIZ_SYSTEM_PROMPT, build_quiz_prompt(topic, level, count));

        let completion = self.provider.complete(request).await.map_err(|err| {
            warn!(error = %err, "Quiz completion failed");
            ApplicationError::upstream(
                format!("{} error", self.provider.provider_id().display_name()),
                err.diagnostics(),
            )
            .with_status(err.status())
        })?;

        let raw = completion.text().unwrap_or_default();
        let bad_format = || ApplicationError::BadFormat {
            raw: raw.to_string(),
        };

        let parsed = parse_model_json(raw).ok_or_else(bad_format)?;
        let quiz = QuizSet::from_model_output(&parsed, count).ok_or_else(bad_format)?;

        debug!(
            questions = quiz.len(),
            requested = count.value(),
            "Quiz generated"
        );
        Ok(quiz)
    }
}

/// Build the generation prompt
pub fn build_quiz_prompt(topic: &str, level: &str, count: QuestionCount) -> String {
    format!(
        "Create a multiple-choice quiz about \"{topic}\" for a learner at the \"{level}\" level.\n\
         Return exactly {count} questions as JSON with this shape:\n\
         {{\"questions\":[{{\"id\":\"1\",\"question\":\"...\",\"options\":[\"...\",\"...\",\"...\",\"...\"],\"correctAnswer\":0,\"explanation\":\"...\"}}]}}\n\
         Rules:\n\
         - each question has exactly 4 options\n\
         - correctAnswer is the 0-based index of the correct option\n\
         - explanation says briefly why the answer is correct\n\
         - respond with the JSON object only, no markdown code fences"
    )
}

/// Parse model output as JSON, with one recovery attempt
///
/// If the text is not JSON as a whole, the block from the first `{` to a
/// closing `}` that ends the text (ignoring trailing whitespace) is tried.
/// Anything after that brace defeats the recovery.
pub fn parse_model_json(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Some(value);
    }

    let trimmed = raw.trim_end();
    if !trimmed.ends_with('}') {
        return None;
    }
    let start = trimmed.find('{')?;
    serde_json::from_str(&trimmed[start..]).ok()
}

#[cfg(test)]
mod tests {
    use ai_core::{ChatCompletion, ProviderError, ProviderId};
    use domain::MessageRole;
    use mockall::mock;
    use serde_json::json;

    use super::*;

    mock! {
        pub Provider {}

        #[async_trait::async_trait]
        impl ChatProvider for Provider {
            async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError>;
            fn provider_id(&self) -> ProviderId;
            fn default_model(&self) -> &str;
        }
    }

    const WELL_FORMED: &str = r#"{"questions":[
        {"id":"1","question":"2+2?","options":["3","4","5","6"],"correctAnswer":1,"explanation":"Arithmetic."},
        {"id":"2","question":"Capital of France?","options":["Paris","Rome","Oslo","Bern"],"correctAnswer":0,"explanation":"Geography."},
        {"id":"3","question":"H2O is?","options":["Salt","Water","Air","Gold"],"correctAnswer":1,"explanation":"Chemistry."}
    ]}"#;

    fn completion(text: Option<&str>) -> ChatCompletion {
        ChatCompletion {
            content: text.map(str::to_owned),
            model: "gemini-1.5-flash".to_string(),
            usage: None,
            finish_reason: Some("STOP".to_string()),
        }
    }

    fn provider(id: ProviderId) -> MockProvider {
        let mut mock = MockProvider::new();
        mock.expect_provider_id().return_const(id);
        mock.expect_default_model()
            .return_const("gemini-1.5-flash".to_string());
        mock
    }

    fn service_answering(text: &'static str) -> QuizService {
        let mut mock = provider(ProviderId::OpenAi);
        mock.expect_complete()
            .times(1)
            .returning(move |_| Ok(completion(Some(text))));
        QuizService::new(Arc::new(mock))
    }

    #[test]
    fn parses_plain_json() {
        assert_eq!(parse_model_json(r#"{"a":1}"#), Some(json!({"a": 1})));
    }

    #[test]
    fn recovers_json_after_leading_prose() {
        let raw = "Sure! Here is your quiz:\n{\"questions\": []}\n";
        assert_eq!(parse_model_json(raw), Some(json!({"questions": []})));
    }

    #[test]
    fn recovers_json_inside_code_fence_prefix() {
        let raw = "```json\n{\"questions\": [{\"id\": \"1\"}]}";
        assert_eq!(
            parse_model_json(raw),
            Some(json!({"questions": [{"id": "1"}]}))
        );
    }

    #[test]
    fn trailing_text_defeats_recovery() {
        assert!(parse_model_json("{\"questions\": []}\n```").is_none());
        assert!(parse_model_json("{\"questions\": []} Hope this helps!").is_none());
    }

    #[test]
    fn unbalanced_text_is_rejected() {
        assert!(parse_model_json("no json here").is_none());
        assert!(parse_model_json("{\"questions\": [}").is_none());
        assert!(parse_model_json("").is_none());
    }

    #[test]
    fn prompt_names_topic_level_and_count() {
        let prompt = build_quiz_prompt("Photosynthesis", "beginner", QuestionCount::clamped(7));
        assert!(prompt.contains("\"Photosynthesis\""));
        assert!(prompt.contains("\"beginner\""));
        assert!(prompt.contains("exactly 7 questions"));
        assert!(prompt.contains("exactly 4 options"));
        assert!(prompt.contains("no markdown code fences"));
    }

    #[tokio::test]
    async fn generate_returns_sanitized_quiz() {
        let mut mock = provider(ProviderId::OpenAi);
        mock.expect_complete()
            .withf(|request| {
                request.messages[0].role == MessageRole::System
                    && request.messages[0].content == QUIZ_SYSTEM_PROMPT
                    && request.messages[1].content.contains("exactly 3 questions")
            })
            .times(1)
            .returning(|_| Ok(completion(Some(WELL_FORMED))));
        let service = QuizService::new(Arc::new(mock));

        let quiz = service
            .generate("Basics", "beginner", QuestionCount::clamped(3))
            .await
            .unwrap();

        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.questions[1].question, "Capital of France?");
    }

    #[tokio::test]
    async fn prompt_uses_trimmed_topic_and_level() {
        let mut mock = provider(ProviderId::OpenAi);
        mock.expect_complete()
            .withf(|request| {
                request.messages[1]
                    .content
                    .contains("about \"Cells\" for a learner at the \"advanced\" level")
            })
            .times(1)
            .returning(|_| Ok(completion(Some(WELL_FORMED))));
        let service = QuizService::new(Arc::new(mock));

        service
            .generate("  Cells ", "advanced\n", QuestionCount::clamped(3))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn generate_caps_to_requested_count() {
        let service = service_answering(WELL_FORMED);

        let quiz = service
            .generate("Basics", "beginner", QuestionCount::clamped(0))
            .await
            .unwrap();

        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.requested_count.value(), 3);
    }

    #[tokio::test]
    async fn unparsable_output_is_bad_format_with_raw_text() {
        let service = service_answering("I cannot make a quiz about that.");

        let err = service
            .generate("Cells", "advanced", QuestionCount::default())
            .await
            .unwrap_err();

        let ApplicationError::BadFormat { raw } = err else {
            unreachable!("Expected BadFormat error");
        };
        assert_eq!(raw, "I cannot make a quiz about that.");
    }

    #[tokio::test]
    async fn questions_not_an_array_is_bad_format() {
        let service = service_answering(r#"{"questions": "soon"}"#);

        let err = service
            .generate("Cells", "advanced", QuestionCount::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::BadFormat { .. }));
    }

    #[tokio::test]
    async fn empty_completion_is_bad_format_with_empty_raw() {
        let mut mock = provider(ProviderId::OpenAi);
        mock.expect_complete()
            .times(1)
            .returning(|_| Ok(completion(None)));
        let service = QuizService::new(Arc::new(mock));

        let err = service
            .generate("Cells", "advanced", QuestionCount::default())
            .await
            .unwrap_err();

        let ApplicationError::BadFormat { raw } = err else {
            unreachable!("Expected BadFormat error");
        };
        assert!(raw.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_is_upstream_error() {
        let mut mock = provider(ProviderId::Gemini);
        mock.expect_complete().times(1).returning(|_| {
            Err(ProviderError::Upstream {
                status: 500,
                body: "internal".to_string(),
            })
        });
        let service = QuizService::new(Arc::new(mock));

        let err = service
            .generate("Cells", "advanced", QuestionCount::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Gemini error");
        assert!(matches!(
            err,
            ApplicationError::Upstream {
                status: Some(500),
                ..
            }
        ));
    }
}
