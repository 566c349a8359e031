//! Front-matter parsing
//!
//! Content files carry an ad-hoc delimited metadata block, not YAML: plain
//! `key: value` lines between `---` delimiters, every value a string.

use indexmap::IndexMap;

/// Parsed front-matter fields, in file order
pub type Metadata = IndexMap<String, String>;

/// Split a raw document into front-matter metadata and body.
///
/// The first line must be exactly the `---` delimiter for a metadata block
/// to exist; otherwise metadata is empty and the whole input is body. Lines
/// up to the next delimiter are split at the first colon, values trimmed and
/// stripped of one matching pair of surrounding quotes. Colon-less lines are
/// ignored, duplicate keys keep the last occurrence. The body is everything
/// after the closing delimiter.
pub fn parse(text: &str) -> (Metadata, String) {
    let mut lines = text.split('\n');

    let first = lines.next().map(|l| l.trim_end_matches('\r'));
    if first != Some("---") {
        return (Metadata::new(), text.to_string());
    }

    let mut metadata = Metadata::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_metadata = true;

    for line in lines {
        if !in_metadata {
            body_lines.push(line);
            continue;
        }

        let trimmed = line.trim();
        if trimmed == "---" {
            in_metadata = false;
            continue;
        }

        if let Some(colon) = trimmed.find(':') {
            let key = trimmed[..colon].trim().to_string();
            let value = strip_quote_pair(trimmed[colon + 1..].trim());
            metadata.insert(key, value.to_string());
        }
    }

    (metadata, body_lines.join("\n"))
}

/// Strip one matching pair of surrounding single or double quotes
fn strip_quote_pair(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_block() {
        let text = "---\ntitle: Hello World\ncategory: tech\n---\nBody text.\nMore body.";
        let (meta, body) = parse(text);
        assert_eq!(meta.get("title").map(String::as_str), Some("Hello World"));
        assert_eq!(meta.get("category").map(String::as_str), Some("tech"));
        assert_eq!(body, "Body text.\nMore body.");
    }

    #[test]
    fn test_no_delimiter_is_all_body() {
        let text = "Just a plain document.\ntitle: not metadata";
        let (meta, body) = parse(text);
        assert!(meta.is_empty());
        assert_eq!(body, text);

        // Re-parsing the body alone yields empty metadata again
        let (meta2, body2) = parse(&body);
        assert!(meta2.is_empty());
        assert_eq!(body2, body);
    }

    #[test]
    fn test_quote_stripping() {
        let text = "---\ntitle: \"Quoted Title\"\nexcerpt: 'single quoted'\nodd: \"mismatched'\n---\n";
        let (meta, _) = parse(text);
        assert_eq!(meta.get("title").map(String::as_str), Some("Quoted Title"));
        assert_eq!(
            meta.get("excerpt").map(String::as_str),
            Some("single quoted")
        );
        // Only a matching pair is stripped
        assert_eq!(meta.get("odd").map(String::as_str), Some("\"mismatched'"));
    }

    #[test]
    fn test_split_at_first_colon() {
        let text = "---\ndate: 2024-01-15T10:30:00Z\n---\n";
        let (meta, _) = parse(text);
        assert_eq!(
            meta.get("date").map(String::as_str),
            Some("2024-01-15T10:30:00Z")
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let text = "---\ntitle: First\ntitle: Second\n---\nbody";
        let (meta, _) = parse(text);
        assert_eq!(meta.get("title").map(String::as_str), Some("Second"));
    }

    #[test]
    fn test_malformed_lines_ignored() {
        let text = "---\nthis line has no colon\ntitle: Ok\n\n---\nbody";
        let (meta, body) = parse(text);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("title").map(String::as_str), Some("Ok"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_unclosed_block_has_empty_body() {
        let text = "---\ntitle: Dangling";
        let (meta, body) = parse(text);
        assert_eq!(meta.get("title").map(String::as_str), Some("Dangling"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_crlf_input() {
        let text = "---\r\ntitle: Windows\r\n---\r\nBody line.";
        let (meta, body) = parse(text);
        assert_eq!(meta.get("title").map(String::as_str), Some("Windows"));
        assert_eq!(body, "Body line.");
    }

    #[test]
    fn test_body_keeps_later_delimiters() {
        let text = "---\ntitle: T\n---\nintro\n---\noutro";
        let (_, body) = parse(text);
        assert_eq!(body, "intro\n---\noutro");
    }
}
