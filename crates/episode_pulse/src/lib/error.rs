use episode_datastore::SourceType;

/// Why a transcript could not be retrieved for an otherwise valid video id.
///
/// Each variant carries its own user-legible reason string; callers persist
/// the rendered message as the episode's `processing_error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptUnavailable {
    #[error("The video is no longer available")]
    VideoUnavailable,
    #[error("Transcripts are disabled for this video")]
    TranscriptsDisabled,
    #[error("No transcripts are available for this video")]
    NotAvailable,
    #[error("No transcript is available in the requested language: {0}")]
    LanguageNotAvailable(String),
}

/// Pipeline error taxonomy. Nothing here is retried automatically; the
/// ingest caller maps any of these onto a failed episode record.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid YouTube URL: {0}")]
    InvalidSourceUrl(String),
    #[error(transparent)]
    TranscriptUnavailable(#[from] TranscriptUnavailable),
    #[error("Invalid transcript provided")]
    EmptyTranscript,
    #[error("Gemini API quota exceeded. Please try again later.")]
    QuotaExceeded,
    #[error("Gemini analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("Spotify transcripts require API integration or manual upload")]
    SpotifyUnsupported,
    #[error("Unsupported source type: {0}")]
    UnsupportedSource(SourceType),
    #[error("Transcript request failed: {0}")]
    Http(#[from] reqwest::Error),
}
