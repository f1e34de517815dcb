use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;

use crate::parser::AnalysisResult;

/// One timestamped caption segment as returned by the transcript provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub offset: f64,
    pub duration: f64,
}

/// An ordered, timestamped transcript for a single video.
///
/// Immutable once produced; segments are kept in non-decreasing offset order.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub video_id: String,
    pub language: Option<String>,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Normalizes the transcript into the single text blob handed to the
    /// LLM and persisted on the episode record: each segment is
    /// entity-decoded, whitespace-collapsed and prefixed with a `[m:ss]`
    /// timestamp, then segments are joined with newlines.
    pub fn to_text(&self) -> String {
        self.segments
            .iter()
            .map(|seg| {
                let text = collapse_whitespace(&decode_html_entities(&seg.text));
                format!("[{}] {}", format_timestamp(seg.offset), text)
            })
            .join("\n")
    }
}

/// Basic video metadata scraped from the watch page's OpenGraph tags.
#[derive(Debug, Clone, Serialize)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
}

/// Structured analysis plus provenance for the raw LLM response.
#[derive(Debug, Clone)]
pub struct EpisodeAnalysis {
    pub sections: AnalysisResult,
    pub metadata: AnalysisMetadata,
}

/// Stored alongside the parsed sections so the unparsed LLM output is never
/// lost (the episode record's `ai_analysis` column).
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    pub raw: String,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

/// Renders an offset in seconds as `m:ss`, seconds zero-padded to two digits.
pub fn format_timestamp(offset_seconds: f64) -> String {
    let total = offset_seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Decodes the handful of HTML entities YouTube's timedtext payloads carry.
/// `&amp;` is decoded last so `&amp;lt;` comes out as `&lt;`, not `<`.
pub(crate) fn decode_html_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}
