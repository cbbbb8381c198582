use std::fmt::Write as _;
use std::process::ExitCode;

use crate::app::{AppContext, FeedError, Result};
use crate::domain::{Article, FeedState};

/// Whether a one-shot command got a usable feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failed,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failed => ExitCode::FAILURE,
        }
    }
}

/// Rendered output of a one-shot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub status: Status,
}

impl Report {
    fn failed(message: &str) -> Self {
        Self {
            text: render_failure(message, CLI_RETRY_HINT),
            status: Status::Failed,
        }
    }

    fn print(&self) {
        match self.status {
            Status::Success => print!("{}", self.text),
            Status::Failed => eprint!("{}", self.text),
        }
    }
}

const CLI_RETRY_HINT: &str = "Run the command again to retry.";
const WATCH_RETRY_HINT: &str = "Press Enter to try again.";

pub async fn show_headlines(ctx: &AppContext, limit: Option<usize>, json: bool) -> Result<Status> {
    ctx.controller.load().await;

    let report = headlines_report(&ctx.controller.state(), limit, json)?;
    report.print();
    Ok(report.status)
}

/// What `headlines` prints for a settled state.
pub fn headlines_report(state: &FeedState, limit: Option<usize>, json: bool) -> Result<Report> {
    let articles = match state {
        FeedState::Data(articles) => articles,
        FeedState::Error(message) => return Ok(Report::failed(message)),
        FeedState::Loading => return Ok(Report::failed("the feed did not finish loading")),
    };

    let shown = &articles[..limit.unwrap_or(articles.len()).min(articles.len())];

    let text = if json {
        let out = serde_json::to_string_pretty(shown)
            .map_err(|e| FeedError::Other(format!("Failed to encode articles: {}", e)))?;
        format!("{}\n", out)
    } else {
        render_articles(shown)
    };

    Ok(Report {
        text,
        status: Status::Success,
    })
}

pub async fn open_article(ctx: &AppContext, index: usize) -> Result<Status> {
    ctx.controller.load().await;

    let state = ctx.controller.state();
    if let Some(message) = state.error() {
        Report::failed(message).print();
        return Ok(Status::Failed);
    }

    let article = index
        .checked_sub(1)
        .and_then(|i| state.articles().and_then(|a| a.get(i)))
        .ok_or_else(|| FeedError::Other(format!("No article at position {}", index)))?;

    if article.url.is_empty() {
        return Err(FeedError::Other(format!(
            "\"{}\" has no link to open",
            article.display_title()
        )));
    }

    open::that(&article.url)?;
    println!("Opened {}", article.url);
    Ok(Status::Success)
}

/// Text rendering of every state, used by the watch screen.
pub fn render_state(state: &FeedState, limit: Option<usize>) -> String {
    match state {
        FeedState::Loading => "Loading headlines...\n".to_string(),
        FeedState::Data(articles) => {
            let end = limit.unwrap_or(articles.len()).min(articles.len());
            render_articles(&articles[..end])
        }
        FeedState::Error(message) => render_failure(message, WATCH_RETRY_HINT),
    }
}

pub fn render_failure(message: &str, retry_hint: &str) -> String {
    format!("Something went wrong: {}\n{}\n", message, retry_hint)
}

pub fn render_articles(articles: &[Article]) -> String {
    if articles.is_empty() {
        return "No headlines right now.\n".to_string();
    }

    let mut out = String::new();
    for (i, article) in articles.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", i + 1, article.display_title());
        let _ = writeln!(
            out,
            "    {} | {}",
            article.author,
            article.published_at.format("%Y-%m-%d %H:%M")
        );
        if !article.description.is_empty() {
            let _ = writeln!(out, "    {}", article.description);
        }
        if !article.url.is_empty() {
            let _ = writeln!(out, "    {}", article.url);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn article(title: &str) -> Article {
        let mut a = Article::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
        a.title = title.into();
        a.image_url = "https://a/b.jpg".into();
        a
    }

    #[test]
    fn test_render_loading() {
        assert_eq!(render_state(&FeedState::Loading, None), "Loading headlines...\n");
    }

    #[test]
    fn test_render_error_offers_retry() {
        let out = render_state(&FeedState::Error("Feed unavailable: HTTP 404".into()), None);
        assert!(out.starts_with("Something went wrong: Feed unavailable: HTTP 404"));
        assert!(out.contains("try again"));
    }

    #[test]
    fn test_headlines_report_for_error_state() {
        let state = FeedState::Error("Feed unavailable: HTTP 404".into());
        let report = headlines_report(&state, None, false).unwrap();

        assert_eq!(report.status, Status::Failed);
        assert_eq!(
            report.text,
            "Something went wrong: Feed unavailable: HTTP 404\nRun the command again to retry.\n"
        );
    }

    #[test]
    fn test_headlines_report_for_data() {
        let state = FeedState::Data(vec![article("a"), article("b")]);

        let report = headlines_report(&state, Some(1), false).unwrap();
        assert_eq!(report.status, Status::Success);
        assert!(report.text.starts_with(" 1. a\n"));
        assert!(!report.text.contains(" 2. b"));

        let report = headlines_report(&state, None, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&report.text).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(2));
        assert_eq!(parsed[1]["title"], "b");
    }

    #[test]
    fn test_failed_status_exits_nonzero() {
        assert_eq!(ExitCode::from(Status::Failed), ExitCode::FAILURE);
        assert_eq!(ExitCode::from(Status::Success), ExitCode::SUCCESS);
    }

    #[test]
    fn test_render_empty_data() {
        assert_eq!(
            render_state(&FeedState::Data(Vec::new()), None),
            "No headlines right now.\n"
        );
    }

    #[test]
    fn test_render_articles_layout() {
        let mut first = article("Vitamin D");
        first.description = "Sunlight matters.".into();
        first.url = "https://example.com/d".into();

        let out = render_articles(&[first, article("")]);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], " 1. Vitamin D");
        assert_eq!(lines[1], "    Unknown | 2024-05-01 09:30");
        assert_eq!(lines[2], "    Sunlight matters.");
        assert_eq!(lines[3], "    https://example.com/d");
        assert_eq!(lines[4], " 2. (Untitled)");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_render_state_respects_limit() {
        let state = FeedState::Data(vec![article("a"), article("b"), article("c")]);
        let out = render_state(&state, Some(2));
        assert!(out.contains(" 2. b"));
        assert!(!out.contains(" 3. c"));

        let out = render_state(&state, Some(10));
        assert!(out.contains(" 3. c"));
    }
}
