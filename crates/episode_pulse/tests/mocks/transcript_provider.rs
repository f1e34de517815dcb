use std::sync::{Arc, Mutex};

use episode_pulse::{Error, Transcript, TranscriptProvider, TranscriptSegment, TranscriptUnavailable};

#[derive(Clone)]
pub struct MockTranscriptProvider {
    pub segments: Vec<TranscriptSegment>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<TranscriptUnavailable>,
}

impl MockTranscriptProvider {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            segments,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(reason: TranscriptUnavailable) -> Self {
        Self {
            segments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(reason),
        }
    }
}

impl TranscriptProvider for MockTranscriptProvider {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, Error> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(reason) = &self.fail_with {
            return Err(reason.clone().into());
        }
        Ok(Transcript {
            video_id: video_id.to_string(),
            language: Some("en".to_string()),
            segments: self.segments.clone(),
        })
    }
}
