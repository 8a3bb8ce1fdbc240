use chrono::{DateTime, Duration, FixedOffset, Utc};

use super::entities::{ExportablePost, PostTranslation};
use crate::shared_image::application::domain::entities::Language;

/// Languages in the order their files are written.
pub const EXPORT_LANGUAGES: [Language; 2] = [Language::En, Language::Vi];

const UTC_PLUS_7_HOURS: i64 = 7;

/// Keeps `[A-Za-z0-9_-]`, replaces anything else with `-`, collapses dash runs
/// and trims dashes at both ends.
pub fn safe_slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            c
        } else {
            '-'
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    out.trim_matches('-').to_string()
}

fn shift_to_utc_plus_7(at: DateTime<Utc>) -> DateTime<Utc> {
    at + Duration::hours(UTC_PLUS_7_HOURS)
}

/// `YYYY-MM-DD HH:MM:SS +07:00`, or empty for unpublished posts.
pub fn published_at_utc_plus7(published_at: Option<DateTime<FixedOffset>>) -> String {
    published_at
        .map(|at| {
            shift_to_utc_plus_7(at.with_timezone(&Utc))
                .format("%Y-%m-%d %H:%M:%S +07:00")
                .to_string()
        })
        .unwrap_or_default()
}

/// `YYYYMMDD.zip` for the calendar date in UTC+7.
pub fn archive_name(now: DateTime<Utc>) -> String {
    shift_to_utc_plus_7(now).format("%Y%m%d.zip").to_string()
}

/// `{id}-{lang}-{safe_slug}`, shared by the Markdown file and its thumbnail.
pub fn file_stem(post: &ExportablePost, language: Language) -> String {
    format!("{}-{}-{}", post.id, language.code(), safe_slug(&post.slug))
}

pub fn markdown_file_name(post: &ExportablePost, language: Language) -> String {
    format!("{}.md", file_stem(post, language))
}

pub fn thumbnail_file_name(post: &ExportablePost, language: Language, extension: &str) -> String {
    format!("{}-thumbnail{extension}", file_stem(post, language))
}

/// Front matter, optional thumbnail line, then the body.
pub fn render_markdown(
    post: &ExportablePost,
    translation: &PostTranslation,
    thumbnail_name: Option<&str>,
) -> String {
    let mut front_matter = vec![
        "---".to_string(),
        format!("id: {}", post.id),
        format!("slug: {}", post.slug),
        format!("language: {}", translation.language.code()),
        format!("title: {}", translation.title),
        format!("summary: {}", translation.summary.as_deref().unwrap_or_default()),
        format!(
            "published_at_utc_plus7: \"{}\"",
            published_at_utc_plus7(post.published_at)
        ),
    ];
    if let Some(name) = thumbnail_name {
        front_matter.push(format!("thumbnail: ./{name}"));
    }
    front_matter.push("---".to_string());

    let thumbnail_line = thumbnail_name
        .map(|name| format!("\n\n![thumbnail](./{name})\n"))
        .unwrap_or_default();

    format!(
        "{}{}\n\n{}\n",
        front_matter.join("\n"),
        thumbnail_line,
        translation.content.as_deref().unwrap_or_default()
    )
}
