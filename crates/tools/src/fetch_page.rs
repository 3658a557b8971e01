//! Page fetch tool — downloads a URL and returns its readable paragraph text.
//!
//! Text is taken from `<p>` elements when the page has any, otherwise from
//! the whole document. The result is cut to a fixed character budget so a
//! single page cannot flood the prompt.

use async_trait::async_trait;
use regex_lite::Regex;
use scout_config::FetchConfig;
use scout_core::error::ToolError;
use scout_core::tool::Tool;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

const TOOL_NAME: &str = "fetch_page";

const USER_AGENT: &str = concat!("scout/", env!("CARGO_PKG_VERSION"));

/// Wrap width handed to html2text; lines are re-joined afterwards.
const RENDER_WIDTH: usize = 200;

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>").expect("paragraph pattern is valid")
});

pub struct FetchPageTool {
    max_chars: usize,
    client: reqwest::Client,
}

impl FetchPageTool {
    pub fn new(config: &FetchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self {
            max_chars: config.max_chars,
            client,
        }
    }

    fn failed(reason: impl Into<String>) -> ToolError {
        ToolError::ExecutionFailed {
            tool_name: TOOL_NAME.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Tool for FetchPageTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn signature(&self) -> String {
        "fetch_page(url: str)".into()
    }

    fn description(&self) -> &str {
        "Download a web page and return its main text. Use it to read a promising search result."
    }

    async fn execute(&self, url: &str) -> Result<String, ToolError> {
        let url = url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ToolError::InvalidArguments(
                "URL must start with http:// or https://".into(),
            ));
        }

        debug!(url, "Fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::failed(format!("HTTP {status} for {url}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Self::failed(format!("failed to read body: {e}")))?;

        let text = truncate_chars(&extract_text(&html), self.max_chars);
        debug!(url, chars = text.chars().count(), "Page fetched");
        Ok(text)
    }
}

/// Readable text of `html`: its paragraphs separated by blank lines, or the
/// whole document when there are no non-empty paragraphs.
pub fn extract_text(html: &str) -> String {
    let paragraphs: Vec<String> = PARAGRAPH
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|inner| render(inner.as_str()))
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        render(html)
    } else {
        paragraphs.join("\n\n")
    }
}

/// HTML fragment to a single line of plain text, without link footnotes or
/// emphasis markers.
fn render(html: &str) -> String {
    let rendered = html2text::config::plain_no_decorate()
        .string_from_read(html.as_bytes(), RENDER_WIDTH);
    let text = match rendered {
        Ok(text) => text,
        Err(_) => strip_tags(html),
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
