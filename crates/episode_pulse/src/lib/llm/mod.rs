pub mod gemini;

use std::future::Future;

use crate::error::Error;

/// Generates the free-form analysis text for a transcript.
///
/// Implementations must surface quota/rate-limit conditions as
/// [`Error::QuotaExceeded`] so callers can tell "try again later" apart from
/// a genuine failure.
pub trait Analyzer {
    const ANALYZER_MODEL: &'static str;

    fn analyze(
        &self,
        transcript: &str,
    ) -> impl Future<Output = Result<RawAnalysis, Error>> + Send;
}

/// The LLM's response, verbatim. No structure is guaranteed beyond what the
/// prompt asked for; the section parser deals with whatever came back.
#[derive(Debug, Clone)]
pub struct RawAnalysis {
    pub text: String,
}
