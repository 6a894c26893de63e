//! Messages.

use crate::property_bag::PropertyBag;

sarif_node! {
    /// Encapsulates a message intended to be read by the end user.
    pub struct Message {
        /// A plain text message string.
        pub text: Option<String>,
        /// A Markdown message string.
        pub markdown: Option<String>,
        /// The identifier for this message.
        pub id: Option<String>,
        /// An array of strings to substitute into the message string.
        pub arguments: Option<Vec<String>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A message string or message format string rendered in multiple formats.
    pub struct MultiformatMessageString {
        /// A plain text message string or format string.
        pub text: String,
        /// A Markdown message string or format string.
        pub markdown: Option<String>,
        pub properties: Option<PropertyBag>,
    }
}

impl Message {
    /// Creates a plain-text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Creates a message that refers to a tool's message string by `id`.
    pub fn with_id(id: impl Into<String>, arguments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: Some(id.into()),
            arguments: Some(arguments.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Formats `template` with this message's `arguments`.
    ///
    /// `{n}` is replaced with the n-th argument and `{{`/`}}` produce
    /// literal braces. Placeholders without a matching argument are kept
    /// verbatim.
    pub fn format(&self, template: &str) -> String {
        format_message(template, self.arguments.as_deref().unwrap_or_default())
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl MultiformatMessageString {
    /// Creates a plain-text message string.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Substitutes `{n}` placeholders in `template` with `arguments[n]`.
pub(crate) fn format_message(template: &str, arguments: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('{')
            && let Some(end) = tail.find('}')
            && let Ok(index) = tail[1..end].parse::<usize>()
            && let Some(argument) = arguments.get(index)
        {
            out.push_str(argument);
            rest = &tail[end + 1..];
        } else {
            // Not a placeholder we can fill; keep the brace as-is.
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
