//! Input validation and text formatting shared by the tool providers

use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;
use scraper::{node::Node, Html};
use url::Url;

use crate::errors::ToolError;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

pub fn current_local_time() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}

pub fn normalize_icao(icao: &str) -> Result<String, ToolError> {
    static ICAO_PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    let pattern = ICAO_PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z]{4}$"))
        .as_ref()
        .map_err(|err| ToolError::upstream(format!("ICAO pattern failed to compile: {err}")))?;

    let trimmed = icao.trim();
    if !pattern.is_match(trimmed) {
        return Err(ToolError::bad_input("Invalid ICAO code. Must be 4 letters."));
    }

    Ok(trimmed.to_ascii_uppercase())
}

pub fn parse_webpage_url(raw: &str) -> Result<Url, ToolError> {
    let invalid = || ToolError::bad_input("Invalid URL provided");

    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }

    Ok(url)
}

/// Extracts the visible text of an HTML document, collapsing all whitespace runs to a
/// single space.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|element| SKIPPED_ELEMENTS.contains(&element.name()));
        if hidden {
            continue;
        }

        text.push_str(fragment);
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::errors::ToolErrorKind;

    #[test]
    fn current_time_uses_fixed_format() {
        let now = current_local_time();
        assert_eq!(now.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&now, TIME_FORMAT).is_ok());
    }

    #[test]
    fn icao_is_uppercased() {
        assert_eq!(normalize_icao("kjfk").expect("valid icao"), "KJFK");
        assert_eq!(normalize_icao(" EGLL ").expect("valid icao"), "EGLL");
    }

    #[test]
    fn icao_must_be_four_letters() {
        for bad in ["JFK", "KJFKX", "K1FK", "", "KJ K"] {
            let err = normalize_icao(bad).expect_err("invalid icao");
            assert_eq!(err.kind, ToolErrorKind::BadInput, "input {bad:?}");
        }
    }

    #[test]
    fn webpage_url_requires_http_scheme_and_host() {
        assert!(parse_webpage_url("https://example.com/page?x=1").is_ok());
        for bad in ["not a url", "ftp://example.com", "mailto:someone@example.com", ""] {
            let err = parse_webpage_url(bad).expect_err("invalid url");
            assert_eq!(err.message, "Invalid URL provided");
        }
    }

    #[test]
    fn html_text_skips_scripts_and_collapses_whitespace() {
        let html = r#"<html>
            <head><title>Hello</title><style>body { color: red; }</style></head>
            <body>
                <h1>Big   news</h1>
                <script>var hidden = true;</script>
                <p>First
                   paragraph.</p>
            </body>
        </html>"#;

        assert_eq!(html_to_text(html), "Hello Big news First paragraph.");
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        assert_eq!(
            html_to_text("<p>Hel<b>lo</b> world, <i>x</i>.</p>"),
            "Hello world, x."
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_to_text("  just\ttext  "), "just text");
    }
}
