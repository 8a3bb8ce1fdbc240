use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[(?:[^\]\\]|\\.)*\]\(\s*<?([^\s)>]+)>?(?:\s+"[^"]*")?\s*\)"#)
        .unwrap_or_else(|e| panic!("invalid markdown image pattern: {e}"))
});

static HTML_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#)
        .unwrap_or_else(|e| panic!("invalid html image pattern: {e}"))
});

fn escape_alt(alt: &str) -> String {
    alt.replace('\\', "\\\\")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace(['\n', '\r'], " ")
}

fn escape_destination(url: &str) -> String {
    url.trim()
        .replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
}

/// Markdown for an inline image, with an italic caption line when given.
pub fn image_markdown(url: &str, alt: &str, caption: Option<&str>) -> String {
    let image = format!("![{}]({})", escape_alt(alt), escape_destination(url));

    match caption.map(str::trim).filter(|c| !c.is_empty()) {
        Some(caption) => format!("{image}\n*{}*", caption.replace('*', "\\*")),
        None => image,
    }
}

/// Every image URL referenced by `content`, as Markdown images or raw `<img>` tags.
pub fn referenced_image_urls(content: &str) -> HashSet<String> {
    MARKDOWN_IMAGE
        .captures_iter(content)
        .chain(HTML_IMAGE.captures_iter(content))
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Image references of one document, parsed once.
#[derive(Debug, Clone, Default)]
pub struct ImageReferences(HashSet<String>);

impl ImageReferences {
    pub fn parse(content: &str) -> Self {
        Self(referenced_image_urls(content))
    }

    /// Destinations are also compared in escaped form so URLs with spaces still match.
    pub fn contains(&self, url: &str) -> bool {
        self.0.contains(url.trim()) || self.0.contains(&escape_destination(url))
    }
}
