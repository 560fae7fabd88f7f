//! HTML `<head>` meta tag generator.
//!
//! # Functions
//!
//! - [`render`] — one line per complete tag, indented for a `<head>` block
//! - [`head_block`] — the same lines wrapped in `<head>` / `</head>`
//! - [`MetaTags`] — an editable tag list seeded with [`default_tags`]

use serde::Serialize;

/// A single `name` / `content` pair.
///
/// Names starting with `og:` are Open Graph properties and `title` becomes
/// the document title; everything else is a plain named meta tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

impl MetaTag {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.content.is_empty()
    }

    /// The HTML line for this tag, without indentation.
    pub fn to_html(&self) -> String {
        let name = escape_html(&self.name);
        let content = escape_html(&self.content);
        if self.name.starts_with("og:") {
            format!(r#"<meta property="{name}" content="{content}" />"#)
        } else if self.name == "title" {
            format!("<title>{content}</title>")
        } else {
            format!(r#"<meta name="{name}" content="{content}" />"#)
        }
    }
}

/// The starter set a new page is offered.
pub fn default_tags() -> Vec<MetaTag> {
    const TITLE: &str = "My Awesome Website";
    const DESCRIPTION: &str = "This is my amazing website built with Next.js";
    vec![
        MetaTag::new("title", TITLE),
        MetaTag::new("description", DESCRIPTION),
        MetaTag::new("viewport", "width=device-width, initial-scale=1"),
        MetaTag::new("og:title", TITLE),
        MetaTag::new("og:description", DESCRIPTION),
        MetaTag::new("og:image", "https://example.com/image.jpg"),
    ]
}

/// Render every tag with both a name and content, two-space indented and
/// newline separated. Incomplete tags are skipped.
///
/// # Examples
///
/// ```
/// use toolkit_engine::meta::{render, MetaTag};
///
/// let html = render(&[
///     MetaTag::new("title", "Tools"),
///     MetaTag::new("og:image", "https://x.test/a.png"),
///     MetaTag::new("author", ""),
/// ]);
/// assert_eq!(
///     html,
///     "  <title>Tools</title>\n  <meta property=\"og:image\" content=\"https://x.test/a.png\" />"
/// );
/// ```
pub fn render(tags: &[MetaTag]) -> String {
    tags.iter()
        .filter(|tag| tag.is_complete())
        .map(|tag| format!("  {}", tag.to_html()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// [`render`] output wrapped in a `<head>` element, ready to paste.
pub fn head_block(tags: &[MetaTag]) -> String {
    format!("<head>\n{}\n</head>", render(tags))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ── Editable list ───────────────────────────────────────────────────────────

/// An ordered, editable list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTags {
    tags: Vec<MetaTag>,
}

impl Default for MetaTags {
    fn default() -> Self {
        Self {
            tags: default_tags(),
        }
    }
}

impl MetaTags {
    pub fn empty() -> Self {
        Self { tags: Vec::new() }
    }

    pub fn tags(&self) -> &[MetaTag] {
        &self.tags
    }

    /// Append a tag. Returns `false` and leaves the list unchanged if the
    /// name or content is blank.
    pub fn add(&mut self, name: &str, content: &str) -> bool {
        if name.trim().is_empty() || content.trim().is_empty() {
            return false;
        }
        self.tags.push(MetaTag::new(name, content));
        true
    }

    /// Remove the tag at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<MetaTag> {
        (index < self.tags.len()).then(|| self.tags.remove(index))
    }

    /// Set the content of every tag named `name`; returns how many changed.
    pub fn set(&mut self, name: &str, content: &str) -> usize {
        let mut changed = 0;
        for tag in self.tags.iter_mut().filter(|t| t.name == name) {
            tag.content = content.to_string();
            changed += 1;
        }
        changed
    }

    pub fn render(&self) -> String {
        render(&self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_render() {
        let expected = [
            "  <title>My Awesome Website</title>",
            r#"  <meta name="description" content="This is my amazing website built with Next.js" />"#,
            r#"  <meta name="viewport" content="width=device-width, initial-scale=1" />"#,
            r#"  <meta property="og:title" content="My Awesome Website" />"#,
            r#"  <meta property="og:description" content="This is my amazing website built with Next.js" />"#,
            r#"  <meta property="og:image" content="https://example.com/image.jpg" />"#,
        ]
        .join("\n");
        assert_eq!(MetaTags::default().render(), expected);
    }

    #[test]
    fn test_skips_incomplete_tags() {
        let tags = [MetaTag::new("", "x"), MetaTag::new("author", "")];
        assert_eq!(render(&tags), "");
        assert_eq!(head_block(&tags), "<head>\n\n</head>");
    }

    #[test]
    fn test_escapes_values() {
        let tags = [MetaTag::new("description", r#"Fish & "chips" <b>"#)];
        assert_eq!(
            render(&tags),
            r#"  <meta name="description" content="Fish &amp; &quot;chips&quot; &lt;b&gt;" />"#
        );
    }

    #[test]
    fn test_head_block() {
        let tags = [MetaTag::new("title", "Hi")];
        assert_eq!(head_block(&tags), "<head>\n  <title>Hi</title>\n</head>");
    }

    #[test]
    fn test_add_requires_name_and_content() {
        let mut tags = MetaTags::empty();
        assert!(!tags.add("  ", "x"));
        assert!(!tags.add("author", " "));
        assert!(tags.add("author", "Ada"));
        assert_eq!(tags.tags(), [MetaTag::new("author", "Ada")]);
    }

    #[test]
    fn test_remove_and_set() {
        let mut tags = MetaTags::default();
        assert_eq!(tags.set("og:title", "Other"), 1);
        assert_eq!(tags.tags()[3].content, "Other");
        assert_eq!(tags.remove(0).map(|t| t.name), Some("title".to_string()));
        assert_eq!(tags.tags().len(), 5);
        assert!(tags.remove(99).is_none());
    }
}
