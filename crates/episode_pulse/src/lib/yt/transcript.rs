//! Reqwest-based transcript client for YouTube.
//!
//! Fetches the watch page, extracts the `ytInitialPlayerResponse` script
//! JSON, resolves a caption track and downloads its timedtext XML. Responses
//! are memoized per video id for a short window so repeated ingests of the
//! same source within a few minutes don't refetch.

use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
    time::{Duration, Instant},
};

use regex::Regex;
use serde_json::Value;

use crate::{
    error::{Error, TranscriptUnavailable},
    types::{decode_html_entities, Transcript, TranscriptSegment, VideoMetadata},
    yt::TranscriptProvider,
};

static PLAYER_RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var\s+ytInitialPlayerResponse\s*=\s*(\{.*?\})\s*;\s*(?:var\s|</script>)")
        .unwrap()
});

static TEXT_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text start="([^"]+)"(?: dur="([^"]+)")?[^>]*>(.*?)</text>"#).unwrap()
});

static OG_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta property="og:title" content="([^"]*)""#).unwrap()
});
static OG_DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta property="og:description" content="([^"]*)""#).unwrap()
});
static OG_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta property="og:image" content="([^"]*)""#).unwrap()
});

struct CachedTranscript {
    fetched_at: Instant,
    transcript: Transcript,
}

/// Transcript client for YouTube watch pages.
pub struct YtTranscriptClient {
    http: reqwest::Client,
    language: Option<String>,
    user_agent: String,
    cache_ttl: Option<Duration>,
    cache: Mutex<HashMap<String, CachedTranscript>>,
}

impl Default for YtTranscriptClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YtTranscriptClient {
    const WATCH_URL: &str = "https://www.youtube.com/watch";
    const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
    const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

    pub fn new() -> Self {
        YtTranscriptClient {
            http: reqwest::Client::new(),
            language: None,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            cache_ttl: Some(Self::DEFAULT_CACHE_TTL),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Require the transcript in a specific language code (e.g. `en`).
    /// Without this, the first available track is used.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache_ttl = None;
        self
    }

    fn cached(&self, video_id: &str) -> Option<Transcript> {
        let ttl = self.cache_ttl?;
        let mut cache = self.cache.lock().unwrap();
        match cache.get(video_id) {
            Some(entry) if entry.fetched_at.elapsed() < ttl => Some(entry.transcript.clone()),
            Some(_) => {
                cache.remove(video_id);
                None
            }
            None => None,
        }
    }

    fn store(&self, transcript: &Transcript) {
        if self.cache_ttl.is_none() {
            return;
        }
        self.cache.lock().unwrap().insert(
            transcript.video_id.clone(),
            CachedTranscript {
                fetched_at: Instant::now(),
                transcript: transcript.clone(),
            },
        );
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, Error> {
        let page = self
            .http
            .get(Self::WATCH_URL)
            .query(&[("v", video_id)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("User-Agent", &self.user_agent)
            .send()
            .await?
            .text()
            .await
            .inspect_err(|e| tracing::error!(error = %e, video_id, "Failed to load watch page"))?;

        Ok(page)
    }

    /// Scrapes basic OpenGraph metadata from the watch page.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_video_metadata(&self, video_id: &str) -> Result<VideoMetadata, Error> {
        let page = self.fetch_watch_page(video_id).await?;

        let capture = |re: &Regex| {
            re.captures(&page)
                .map(|cap| decode_html_entities(&cap[1]))
                .unwrap_or_default()
        };

        let mut title = capture(&OG_TITLE_RE);
        if title.is_empty() {
            title = "Unknown Title".to_string();
        }

        Ok(VideoMetadata {
            title,
            description: capture(&OG_DESCRIPTION_RE),
            thumbnail: capture(&OG_IMAGE_RE),
        })
    }
}

impl TranscriptProvider for YtTranscriptClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, Error> {
        if let Some(hit) = self.cached(video_id) {
            tracing::debug!(video_id, "Transcript cache hit");
            return Ok(hit);
        }

        let page = self.fetch_watch_page(video_id).await?;
        let player_response = extract_player_response(&page)?;
        let tracks = caption_tracks(&player_response)?;
        let track = select_track(tracks, self.language.as_deref())?;

        let base_url = track["baseUrl"]
            .as_str()
            .ok_or(TranscriptUnavailable::NotAvailable)?;
        let language = track["languageCode"].as_str().map(str::to_string);

        let xml = self
            .http
            .get(base_url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?
            .text()
            .await
            .inspect_err(|e| tracing::error!(error = %e, video_id, "Failed to load timedtext"))?;

        let segments = parse_timedtext(&xml);
        tracing::info!(video_id, segments = segments.len(), "Fetched transcript");

        let transcript = Transcript {
            video_id: video_id.to_string(),
            language,
            segments,
        };
        self.store(&transcript);

        Ok(transcript)
    }
}

fn extract_player_response(page: &str) -> Result<Value, TranscriptUnavailable> {
    PLAYER_RESPONSE_RE
        .captures(page)
        .and_then(|cap| cap.get(1))
        .and_then(|m| serde_json::from_str(m.as_str()).ok())
        // No player response on the page means the watch page did not render
        // a playable video at all.
        .ok_or(TranscriptUnavailable::VideoUnavailable)
}

fn caption_tracks(player_response: &Value) -> Result<&Vec<Value>, TranscriptUnavailable> {
    if let Some(status) = player_response["playabilityStatus"]["status"].as_str() {
        if status == "ERROR" || status == "LOGIN_REQUIRED" {
            return Err(TranscriptUnavailable::VideoUnavailable);
        }
    }

    let renderer = &player_response["captions"]["playerCaptionsTracklistRenderer"];
    if renderer.is_null() {
        return Err(TranscriptUnavailable::TranscriptsDisabled);
    }

    match renderer["captionTracks"].as_array() {
        Some(tracks) if !tracks.is_empty() => Ok(tracks),
        _ => Err(TranscriptUnavailable::NotAvailable),
    }
}

fn select_track<'a>(
    tracks: &'a [Value],
    language: Option<&str>,
) -> Result<&'a Value, TranscriptUnavailable> {
    match language {
        Some(lang) => tracks
            .iter()
            .find(|track| track["languageCode"].as_str() == Some(lang))
            .ok_or_else(|| TranscriptUnavailable::LanguageNotAvailable(lang.to_string())),
        None => Ok(&tracks[0]),
    }
}

fn parse_timedtext(xml: &str) -> Vec<TranscriptSegment> {
    let mut segments: Vec<TranscriptSegment> = TEXT_SEGMENT_RE
        .captures_iter(xml)
        .filter_map(|cap| {
            let offset: f64 = cap[1].parse().ok()?;
            let duration: f64 = cap
                .get(2)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0.0);
            Some(TranscriptSegment {
                text: cap[3].to_string(),
                offset,
                duration,
            })
        })
        .collect();

    segments.sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(std::cmp::Ordering::Equal));
    segments
}
