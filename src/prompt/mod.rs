//! Interactive operator prompts.
//!
//! [`PromptGateway`] asks free-text and yes/no questions through an
//! [`Operator`] and resolves with the typed text. Only one question is ever
//! outstanding; a second caller waits until the first one is answered.

mod terminal;

pub use terminal::TerminalOperator;

use crate::error::Result;
use tokio::sync::Mutex;

/// Suffix appended to confirmation messages
pub const CONFIRMATION_SUFFIX: &str = " (y/n)";

/// Default answer for confirmations asked without one
pub const CONFIRMATION_DEFAULT: &str = "n";

/// Kind of question being asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Arbitrary text input
    FreeText,
    /// Yes/no styled input, still answered as text
    Confirmation,
}

/// A single request for operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Text shown to the operator
    pub message: String,
    /// Question kind
    pub kind: QuestionKind,
    /// Value used when the operator submits empty input
    pub default: Option<String>,
}

impl Question {
    /// Free-text question. An empty default counts as no default.
    pub fn free_text(message: impl Into<String>, default: Option<&str>) -> Self {
        Self {
            message: message.into(),
            kind: QuestionKind::FreeText,
            default: default.filter(|d| !d.is_empty()).map(str::to_string),
        }
    }

    /// Confirmation question: message gets the `(y/n)` affordance and the
    /// default falls back to `"n"`.
    pub fn confirmation(message: impl Into<String>, default: Option<&str>) -> Self {
        let default = default.filter(|d| !d.is_empty()).unwrap_or(CONFIRMATION_DEFAULT);
        Self {
            message: format!("{}{}", message.into(), CONFIRMATION_SUFFIX),
            kind: QuestionKind::Confirmation,
            default: Some(default.to_string()),
        }
    }

    /// Resolve raw operator input against the default.
    ///
    /// Only empty input takes the default; typed text is returned as is.
    pub fn resolve(&self, input: &str) -> String {
        if input.is_empty() {
            self.default.clone().unwrap_or_default()
        } else {
            input.to_string()
        }
    }
}

/// Capability for asking a human (or a script standing in for one)
#[allow(async_fn_in_trait)]
pub trait Operator {
    /// Show `question` and return the raw input, before default handling
    async fn ask(&self, question: &Question) -> Result<String>;
}

/// Serialized access to an [`Operator`]
pub struct PromptGateway<O: Operator> {
    operator: Mutex<O>,
}

impl<O: Operator> PromptGateway<O> {
    /// Wrap an operator
    pub fn new(operator: O) -> Self {
        Self {
            operator: Mutex::new(operator),
        }
    }

    /// Ask a free-text question. Empty input resolves to `default`.
    pub async fn question(&self, message: &str, default: Option<&str>) -> Result<String> {
        self.prompt(Question::free_text(message, default)).await
    }

    /// Ask a yes/no question and return the raw answer text.
    ///
    /// Callers compare the result against the affirmative values they accept;
    /// nothing is coerced to a boolean here.
    pub async fn confirmation(&self, message: &str, default: Option<&str>) -> Result<String> {
        self.prompt(Question::confirmation(message, default)).await
    }

    /// Ask an already built question
    pub async fn prompt(&self, question: Question) -> Result<String> {
        // Held across the await: one outstanding question at a time
        let operator = self.operator.lock().await;
        log::debug!("prompting: {}", question.message);
        let input = operator.ask(&question).await?;
        Ok(question.resolve(&input))
    }

    /// Consume the gateway and return the operator
    pub fn into_inner(self) -> O {
        self.operator.into_inner()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedOperator;
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_question_empty_input_uses_default() {
        let gateway = PromptGateway::new(ScriptedOperator::new([""]));
        let answer = gateway.question("Version?", Some("1.2.3")).await.unwrap();
        assert_eq!(answer, "1.2.3");
    }

    #[tokio::test]
    async fn test_question_typed_input_wins_over_default() {
        let gateway = PromptGateway::new(ScriptedOperator::new(["2.0.0"]));
        let answer = gateway.question("Version?", Some("1.2.3")).await.unwrap();
        assert_eq!(answer, "2.0.0");
    }

    #[tokio::test]
    async fn test_question_without_default_returns_empty() {
        let gateway = PromptGateway::new(ScriptedOperator::new([""]));
        let answer = gateway.question("Notes?", None).await.unwrap();
        assert_eq!(answer, "");
    }

    #[tokio::test]
    async fn test_typed_text_is_returned_untrimmed() {
        let gateway = PromptGateway::new(ScriptedOperator::new(["  2.0.0 ", "   "]));
        assert_eq!(gateway.question("Version?", Some("1.2.3")).await.unwrap(), "  2.0.0 ");
        // Whitespace is typed input, not an empty answer
        assert_eq!(gateway.question("Notes?", Some("none")).await.unwrap(), "   ");
    }

    #[tokio::test]
    async fn test_confirmation_defaults_to_n() {
        let gateway = PromptGateway::new(ScriptedOperator::new([""]));
        let answer = gateway.confirmation("Proceed?", None).await.unwrap();
        assert_eq!(answer, "n");

        let asked = gateway.into_inner().asked();
        assert_eq!(asked[0].message, "Proceed? (y/n)");
        assert_eq!(asked[0].kind, QuestionKind::Confirmation);
        assert_eq!(asked[0].default.as_deref(), Some("n"));
    }

    #[tokio::test]
    async fn test_confirmation_returns_raw_text() {
        let gateway = PromptGateway::new(ScriptedOperator::new(["Yes please"]));
        let answer = gateway.confirmation("Proceed?", Some("y")).await.unwrap();
        assert_eq!(answer, "Yes please");
    }

    #[test]
    fn test_empty_default_is_treated_as_missing() {
        assert_eq!(Question::free_text("Q", Some("")).default, None);
        assert_eq!(
            Question::confirmation("Q", Some("")).default.as_deref(),
            Some("n")
        );
    }

    /// Operator that counts how many questions are open at once
    struct SlowOperator {
        open: Arc<AtomicUsize>,
        max_open: Arc<AtomicUsize>,
    }

    impl Operator for SlowOperator {
        async fn ask(&self, question: &Question) -> Result<String> {
            let now = self.open.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_open.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.open.fetch_sub(1, Ordering::SeqCst);
            Ok(question.message.clone())
        }
    }

    #[tokio::test]
    async fn test_concurrent_prompts_are_serialized() {
        let max_open = Arc::new(AtomicUsize::new(0));
        let gateway = PromptGateway::new(SlowOperator {
            open: Arc::new(AtomicUsize::new(0)),
            max_open: Arc::clone(&max_open),
        });

        let (a, b, c) = tokio::join!(
            gateway.question("first", None),
            gateway.question("second", None),
            gateway.confirmation("third", None),
        );

        assert_eq!(a.unwrap(), "first");
        assert_eq!(b.unwrap(), "second");
        assert_eq!(c.unwrap(), "third (y/n)");
        assert_eq!(max_open.load(Ordering::SeqCst), 1);
    }
}
