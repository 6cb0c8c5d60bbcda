//! Label templates with `{{ name }}` placeholders
//!
//! Node and breadcrumb labels may embed context lookups:
//!
//! ```text
//! Template: "Inbox ({{ unread }})"
//! With:     unread = 3
//! Result:   "Inbox (3)"
//! ```
//!
//! A label is parsed once into literal and placeholder segments and expanded
//! against a [`Context`] on every render. Unknown names expand to nothing.

use std::fmt;

use serde_json::Value;

use crate::context::Context;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A parsed label template.
#[derive(Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

/// A piece of a label template.
#[derive(Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text included as-is
    Literal(String),

    /// Placeholder name looked up in the context
    Placeholder(String),
}

impl Template {
    /// Parse a label. Never fails: an unterminated `{{` is kept as text.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find(OPEN) {
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                break;
            };
            if start > 0 {
                push_literal(&mut segments, &rest[..start]);
            }
            let name = after_open[..end].trim();
            if name.is_empty() {
                push_literal(&mut segments, &rest[start..start + OPEN.len() + end + CLOSE.len()]);
            } else {
                segments.push(Segment::Placeholder(name.to_string()));
            }
            rest = &after_open[end + CLOSE.len()..];
        }
        if !rest.is_empty() {
            push_literal(&mut segments, rest);
        }

        Self { segments }
    }

    /// Parsed segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the template has no placeholders.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Expand against a context.
    pub fn expand(&self, context: &Context) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    if let Some(value) = context.get(name) {
                        out.push_str(&value_text(value));
                    }
                }
            }
        }
        out
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.segments).finish()
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => write!(f, "Literal({:?})", text),
            Segment::Placeholder(name) => write!(f, "Placeholder({})", name),
        }
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

/// Text form of a context value: strings verbatim, null as nothing,
/// everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
