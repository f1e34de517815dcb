//! # YouTube source handling
//!
//! Video-id extraction from the URL shapes users paste, plus the
//! [`TranscriptProvider`] seam the orchestrator consumes. The concrete
//! provider lives in [`transcript`].

pub mod transcript;

use std::{future::Future, sync::LazyLock};

use regex::Regex;
use url::Url;

use crate::{error::Error, types::Transcript};

/// Ordered id matchers; the first pattern that matches wins.
static ID_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"youtube\.com/watch\?(?:.*&)?v=([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"youtube\.com/v/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"youtube\.com/embed/([A-Za-z0-9_-]{11})").unwrap(),
    ]
});

/// Extracts the 11-character video id from a YouTube URL.
///
/// Recognizes `watch?v=`, `youtu.be/`, `/v/` and `/embed/` shapes, then
/// falls back to the `v` query parameter on YouTube hosts.
pub fn extract_video_id(source_url: &str) -> Option<String> {
    for pattern in ID_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(source_url) {
            return Some(captures[1].to_string());
        }
    }

    let parsed = Url::parse(source_url).ok()?;
    let host = parsed.host_str()?;
    if host != "youtu.be" && host != "youtube.com" && !host.ends_with(".youtube.com") {
        return None;
    }
    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| id.len() == 11)
}

/// Retrieves a timestamped transcript for a video id.
pub trait TranscriptProvider {
    fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Transcript, Error>> + Send;
}
