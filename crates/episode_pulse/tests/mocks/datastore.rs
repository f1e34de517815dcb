use std::sync::{Arc, Mutex};

use chrono::Utc;
use episode_datastore::{
    CompletedAnalysis, DataStore, Episode, NewEpisode, ProcessingStatus,
};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MockDataStore {
    pub created: Arc<Mutex<Vec<Episode>>>,
    pub completed: Arc<Mutex<Vec<(Uuid, CompletedAnalysis)>>>,
    pub failed: Arc<Mutex<Vec<(Uuid, String)>>>,
    pub fail_create_with: Option<String>,
}

impl MockDataStore {
    pub fn failing_create(message: &str) -> Self {
        Self {
            fail_create_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn find(&self, id: Uuid) -> Option<Episode> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .find(|episode| episode.id == id)
            .cloned()
    }
}

impl DataStore for MockDataStore {
    async fn create_episode(&self, episode: &NewEpisode) -> anyhow::Result<Episode> {
        if let Some(message) = &self.fail_create_with {
            anyhow::bail!("{message}");
        }

        let now = Utc::now();
        let created = Episode {
            id: Uuid::new_v4(),
            title: episode.title.clone(),
            description: episode.description.clone(),
            source_url: episode.source_url.clone(),
            source_type: episode.source_type,
            transcript: None,
            summary: None,
            business_ideas: Vec::new(),
            frameworks: Vec::new(),
            founder_stories: Vec::new(),
            ai_analysis: None,
            processing_status: ProcessingStatus::Processing,
            processing_error: None,
            category: episode.category.clone(),
            tags: episode.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        self.created.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn get_episode(&self, id: Uuid) -> anyhow::Result<Option<Episode>> {
        Ok(self.find(id))
    }

    async fn complete_episode(
        &self,
        id: Uuid,
        analysis: &CompletedAnalysis,
    ) -> anyhow::Result<Episode> {
        let mut episode = self
            .find(id)
            .ok_or_else(|| anyhow::anyhow!("Episode {id} not found"))?;
        anyhow::ensure!(
            !episode.processing_status.is_terminal(),
            "Episode {id} already in a terminal state"
        );

        episode.transcript = Some(analysis.transcript.clone());
        episode.summary = Some(analysis.summary.clone());
        episode.business_ideas = analysis.business_ideas.clone();
        episode.frameworks = analysis.frameworks.clone();
        episode.founder_stories = analysis.founder_stories.clone();
        episode.ai_analysis = Some(analysis.ai_analysis.clone());
        episode.processing_status = ProcessingStatus::Completed;
        episode.processing_error = None;

        self.completed.lock().unwrap().push((id, analysis.clone()));
        Ok(episode)
    }

    async fn fail_episode(&self, id: Uuid, error: &str) -> anyhow::Result<Episode> {
        let mut episode = self
            .find(id)
            .ok_or_else(|| anyhow::anyhow!("Episode {id} not found"))?;
        anyhow::ensure!(
            !episode.processing_status.is_terminal(),
            "Episode {id} already in a terminal state"
        );

        episode.processing_status = ProcessingStatus::Failed;
        episode.processing_error = Some(error.to_string());

        self.failed.lock().unwrap().push((id, error.to_string()));
        Ok(episode)
    }
}
