//! Rewrites DocumentCloud viewer/embed URLs into direct S3 asset URLs.

use regex::Regex;
use reqwest::Url;
use std::sync::OnceLock;

/// Host serving the final PDF assets, as opposed to the web-facing viewer.
pub const ASSET_HOST: &str = "s3.documentcloud.org";

/// Matches `<domain>/documents/<docID>-<slug>` on both the www and embed
/// viewer domains, capturing the numeric ID and the slug.
fn document_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"documentcloud\.org/documents/(\d+)-([\w\-]+)")
            .expect("document URL pattern is valid")
    })
}

/// Resolve an input URL to its direct asset URL.
///
/// Already-direct asset URLs pass through unchanged, viewer and embed URLs
/// are rewritten to `https://s3.documentcloud.org/documents/<id>/<slug>.pdf`,
/// and anything else (including unparseable input) yields `None`.
/// Pure and side-effect-free.
pub fn resolve_document_url(input: &str) -> Option<String> {
    // Inputs must carry a scheme; scheme-less strings fail to parse here
    // and are rejected as unrecognized.
    let parsed = Url::parse(input).ok()?;

    if parsed
        .host_str()
        .is_some_and(|host| host.contains(ASSET_HOST))
    {
        return Some(input.to_string());
    }

    let captures = document_pattern().captures(input)?;
    let doc_id = &captures[1];
    let slug = &captures[2];
    Some(format!(
        "https://{ASSET_HOST}/documents/{doc_id}/{slug}.pdf"
    ))
}
