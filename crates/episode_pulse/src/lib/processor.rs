pub mod builder;

use chrono::Utc;
use episode_datastore::{CompletedAnalysis, DataStore, Episode, NewEpisode, SourceType};

use crate::{
    error::Error,
    llm::Analyzer,
    parser::parse_sections,
    types::{AnalysisMetadata, EpisodeAnalysis},
    yt::{extract_video_id, TranscriptProvider},
};

/// Everything the pipeline produced for one episode: the normalized
/// transcript text and the structured analysis.
#[derive(Debug, Clone)]
pub struct ProcessedEpisode {
    pub transcript: String,
    pub analysis: EpisodeAnalysis,
}

/// The analysis orchestrator: fetch transcript, call the LLM, parse the
/// response, and map the result onto the episode record.
///
/// `process`/`analyze_transcript` are pure computations over the injected
/// provider and analyzer; only `ingest` touches the store, and it writes
/// exactly one terminal update per run.
#[derive(Debug)]
pub struct EpisodeProcessor<D, T, A>
where
    D: DataStore + Send + Sync + 'static,
    T: TranscriptProvider + Send + Sync + 'static,
    A: Analyzer + Send + Sync + 'static,
{
    store: D,
    transcript_provider: T,
    analyzer: A,
}

impl<D, T, A> EpisodeProcessor<D, T, A>
where
    D: DataStore + Send + Sync + 'static,
    T: TranscriptProvider + Send + Sync + 'static,
    A: Analyzer + Send + Sync + 'static,
{
    /// Creates the episode record with status `processing`, runs the
    /// pipeline to a terminal state, and returns the final record.
    ///
    /// Pipeline errors do not bubble out of here; they are written to the
    /// record as `failed` + `processing_error`. Only store failures return
    /// `Err`.
    #[tracing::instrument(skip(self, request), fields(source_url = %request.source_url))]
    pub async fn ingest(&self, request: NewEpisode) -> anyhow::Result<Episode> {
        let episode = self.store.create_episode(&request).await?;
        tracing::info!(episode_id = %episode.id, "Episode record created");

        match self.run_pipeline(&request).await {
            Ok(processed) => {
                let analysis = CompletedAnalysis {
                    transcript: processed.transcript,
                    summary: processed.analysis.sections.summary,
                    business_ideas: processed.analysis.sections.business_ideas,
                    frameworks: processed.analysis.sections.frameworks,
                    founder_stories: processed.analysis.sections.founder_stories,
                    ai_analysis: serde_json::to_value(&processed.analysis.metadata)?,
                };
                let episode = self.store.complete_episode(episode.id, &analysis).await?;
                tracing::info!(episode_id = %episode.id, "Episode processing completed");
                Ok(episode)
            }
            Err(e) => {
                tracing::error!(error = %e, episode_id = %episode.id, "Episode processing failed");
                let episode = self.store.fail_episode(episode.id, &e.to_string()).await?;
                Ok(episode)
            }
        }
    }

    async fn run_pipeline(&self, request: &NewEpisode) -> Result<ProcessedEpisode, Error> {
        match request.source_type {
            SourceType::Youtube => self.process(&request.source_url).await,
            SourceType::Spotify => Err(Error::SpotifyUnsupported),
            other => Err(Error::UnsupportedSource(other)),
        }
    }

    /// Runs fetch → analyze → parse for a YouTube source URL without
    /// touching the store.
    #[tracing::instrument(skip(self))]
    pub async fn process(&self, source_url: &str) -> Result<ProcessedEpisode, Error> {
        let video_id = extract_video_id(source_url)
            .ok_or_else(|| Error::InvalidSourceUrl(source_url.to_string()))?;

        let transcript = self.transcript_provider.fetch_transcript(&video_id).await?;
        let text = transcript.to_text();

        let analysis = self.analyze_transcript(&text).await?;

        Ok(ProcessedEpisode {
            transcript: text,
            analysis,
        })
    }

    /// Analyzes an already-fetched transcript. Sections the LLM omitted or
    /// that could not be parsed come back empty rather than failing.
    #[tracing::instrument(skip_all)]
    pub async fn analyze_transcript(&self, transcript: &str) -> Result<EpisodeAnalysis, Error> {
        if transcript.trim().is_empty() {
            return Err(Error::EmptyTranscript);
        }

        let raw = self.analyzer.analyze(transcript).await?;
        let sections = parse_sections(&raw.text);

        Ok(EpisodeAnalysis {
            sections,
            metadata: AnalysisMetadata {
                raw: raw.text,
                model: A::ANALYZER_MODEL.to_string(),
                timestamp: Utc::now(),
            },
        })
    }
}
