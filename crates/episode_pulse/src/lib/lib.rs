mod error;
mod llm;
pub mod parser;
mod processor;
pub mod tracing;
pub mod types;
pub mod yt;

pub use error::{Error, TranscriptUnavailable};
pub use llm::gemini;
pub use llm::{Analyzer, RawAnalysis};
pub use parser::{parse_sections, AnalysisResult};
pub use processor::{builder::EpisodeProcessorBuilder, EpisodeProcessor, ProcessedEpisode};
pub use types::{AnalysisMetadata, EpisodeAnalysis, Transcript, TranscriptSegment, VideoMetadata};
pub use yt::{extract_video_id, TranscriptProvider};
