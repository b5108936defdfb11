//! Payload extraction.
//!
//! Private messages are forwarded verbatim. Channel messages are only
//! forwarded when they mention the keyword; if they address the display as
//! `Fallblatt<letters>: text`, just `text` is forwarded, otherwise the whole
//! message is.

use crate::relay::event::{InboundEvent, Medium};
use regex::{Regex, RegexBuilder};

/// Matches channel messages against the configured keyword.
#[derive(Debug, Clone)]
pub struct PayloadMatcher {
    keyword_lower: String,
    pattern: Regex,
}

impl PayloadMatcher {
    pub fn new(keyword: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&format!(r"{}[a-zA-Z]*:[ ]?(.*)", regex::escape(keyword)))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            keyword_lower: keyword.to_lowercase(),
            pattern,
        })
    }

    /// Whether `text` contains the keyword anywhere, ignoring case.
    pub fn mentions(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.keyword_lower)
    }

    /// The text after `Keyword<letters>:` and at most one space, if the
    /// message has that shape.
    pub fn match_payload<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Payload to forward for `event`, or `None` if the event is not meant
    /// for the display.
    pub fn extract(&self, event: &InboundEvent) -> Option<String> {
        match &event.medium {
            Medium::Private => Some(event.raw_text.clone()),
            Medium::Channel(_) if !self.mentions(&event.raw_text) => None,
            Medium::Channel(_) => match self.match_payload(&event.raw_text) {
                Some(payload) => Some(payload.to_string()),
                None => Some(event.raw_text.clone()),
            },
        }
    }
}
