use std::sync::OnceLock;

use regex::Regex;

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").unwrap())
}

fn script_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").unwrap()
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").unwrap())
}

/// Best-effort text extraction from HTML markup.
///
/// Drops comments and script/style blocks, replaces every remaining tag
/// with a space, and decodes the common named entities. Malformed markup
/// degrades to text; this never fails.
pub fn cleantext(html: &str) -> String {
    let text = comment_re().replace_all(html, " ");
    let text = script_style_re().replace_all(&text, " ");
    let text = tag_re().replace_all(&text, " ");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    // `&amp;` goes last so it cannot fabricate new entities
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
