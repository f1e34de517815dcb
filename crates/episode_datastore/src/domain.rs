use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle tag tracking how far the analysis pipeline got for an episode.
///
/// `Completed` and `Failed` are terminal; the store refuses to move a record
/// out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "processing_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Pending => "pending",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingStatus::Completed | ProcessingStatus::Failed)
    }
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the episode's media lives. Only YouTube sources are fetchable today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "source_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Youtube,
    Spotify,
    Apple,
    Other,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Youtube => "youtube",
            SourceType::Spotify => "spotify",
            SourceType::Apple => "apple",
            SourceType::Other => "other",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "youtube" => Ok(SourceType::Youtube),
            "spotify" => Ok(SourceType::Spotify),
            "apple" => Ok(SourceType::Apple),
            "other" => Ok(SourceType::Other),
            other => Err(format!("unknown source type: {other}")),
        }
    }
}

/// A persisted episode record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Episode {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub source_url: String,
    pub source_type: SourceType,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    #[sqlx(json)]
    pub business_ideas: Vec<String>,
    #[sqlx(json)]
    pub frameworks: Vec<String>,
    #[sqlx(json)]
    pub founder_stories: Vec<String>,
    pub ai_analysis: Option<serde_json::Value>,
    pub processing_status: ProcessingStatus,
    pub processing_error: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the creation request; everything else starts empty.
#[derive(Debug, Clone)]
pub struct NewEpisode {
    pub title: String,
    pub description: Option<String>,
    pub source_url: String,
    pub source_type: SourceType,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// The single terminal write issued when a pipeline run succeeds.
#[derive(Debug, Clone)]
pub struct CompletedAnalysis {
    pub transcript: String,
    pub summary: String,
    pub business_ideas: Vec<String>,
    pub frameworks: Vec<String>,
    pub founder_stories: Vec<String>,
    pub ai_analysis: serde_json::Value,
}
