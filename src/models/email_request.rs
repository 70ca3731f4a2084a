use std::fmt;
use serde::{Deserialize, Serialize};

/// An email to answer, plus the tone the reply should take.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub email_content: String,
    #[serde(default)]
    pub tone: Option<String>,
}

impl EmailRequest {
    pub fn new(email_content: impl Into<String>) -> Self {
        EmailRequest {
            email_content: email_content.into(),
            tone: None,
        }
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    /// The tone, if one was given and it is not blank.
    pub fn tone(&self) -> Option<&str> {
        self.tone.as_deref().filter(|t| !is_blank(t))
    }
}

/// Blank means only separator whitespace and ASCII controls. Non-breaking
/// spaces (U+00A0, U+2007, U+202F) and NEL (U+0085) count as content.
fn is_blank(s: &str) -> bool {
    s.chars().all(|c| match c {
        '\u{0085}' | '\u{00A0}' | '\u{2007}' | '\u{202F}' => false,
        '\u{001C}'..='\u{001F}' => true,
        c => c.is_whitespace(),
    })
}

impl fmt::Display for EmailRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EmailRequest:")?;
        if let Some(tone) = self.tone() {
            writeln!(f, "  Tone: {}", tone)?;
        }
        writeln!(f, "  Content: {} chars", self.email_content.chars().count())
    }
}
