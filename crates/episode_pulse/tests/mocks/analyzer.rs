use std::sync::{Arc, Mutex};

use episode_pulse::{Analyzer, Error, RawAnalysis};

#[derive(Clone)]
pub enum AnalyzerFailure {
    Quota,
    Other(String),
}

#[derive(Clone)]
pub struct MockAnalyzer {
    pub response: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<AnalyzerFailure>,
}

impl MockAnalyzer {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(failure: AnalyzerFailure) -> Self {
        Self {
            response: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(failure),
        }
    }
}

impl Analyzer for MockAnalyzer {
    const ANALYZER_MODEL: &'static str = "mock-gemini";

    async fn analyze(&self, transcript: &str) -> Result<RawAnalysis, Error> {
        self.calls.lock().unwrap().push(transcript.to_string());
        match &self.fail_with {
            Some(AnalyzerFailure::Quota) => Err(Error::QuotaExceeded),
            Some(AnalyzerFailure::Other(message)) => Err(Error::AnalysisFailed(message.clone())),
            None => Ok(RawAnalysis {
                text: self.response.clone(),
            }),
        }
    }
}
