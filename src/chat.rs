//! Chat Transcript
//!
//! Message types for the recipe conversation and the normalization applied
//! to assistant replies before they are rendered.

use serde::{Deserialize, Serialize};

/// Greeting shown before the user has said anything.
pub const WELCOME_MESSAGE: &str = "Welcome! Upload an image and ask anything about your recipe.";

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A single entry in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only, in-memory conversation.
///
/// Starts with the assistant greeting; entries are never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
        }
    }
}

impl Transcript {
    /// Transcript with no greeting
    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }
}

/// Prepare an assistant reply for HTML rendering.
///
/// Entity-escaped markup is decoded back to literal characters. Plain text
/// (no `<` after decoding) gets its newlines turned into `<br/>`; text that
/// already carries markup is returned untouched.
pub fn normalize_reply(message: &str) -> String {
    // `&amp;` last so "&amp;lt;" decodes to "&lt;" and not "<"
    let decoded = message
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    if decoded.contains('<') {
        return decoded;
    }

    decoded.replace('\n', "<br/>")
}

/// Strip everything but basic formatting from reply markup.
///
/// Scripts and styles lose their content; event handler attributes and
/// unknown tags are dropped.
pub fn sanitize_html(html: &str) -> String {
    ammonia::Builder::new()
        .tags(maplit::hashset![
            "p", "br", "div", "span", "b", "strong", "i", "em", "u", "small",
            "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6",
            "code", "pre", "blockquote", "hr",
            "table", "thead", "tbody", "tr", "td", "th",
        ])
        .generic_attributes(maplit::hashset!["class"])
        .clean(html)
        .to_string()
}

/// Reverse of the line-break markup, for plain-text output.
pub fn reply_to_plain_text(content: &str) -> String {
    content.replace("<br/>", "\n")
}
