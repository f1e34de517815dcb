use std::future::Future;

use uuid::Uuid;

use crate::{CompletedAnalysis, Episode, NewEpisode};

pub mod postgres;

/// Persistence seam for the analysis pipeline.
///
/// The pipeline issues exactly one of `complete_episode` / `fail_episode`
/// per run; both refuse to touch a record already in a terminal state.
pub trait DataStore {
    fn create_episode(
        &self,
        episode: &NewEpisode,
    ) -> impl Future<Output = anyhow::Result<Episode>> + Send;

    fn get_episode(
        &self,
        id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Option<Episode>>> + Send;

    fn complete_episode(
        &self,
        id: Uuid,
        analysis: &CompletedAnalysis,
    ) -> impl Future<Output = anyhow::Result<Episode>> + Send;

    fn fail_episode(
        &self,
        id: Uuid,
        error: &str,
    ) -> impl Future<Output = anyhow::Result<Episode>> + Send;
}

impl<T: DataStore + Send + Sync> DataStore for &T {
    async fn create_episode(&self, episode: &NewEpisode) -> anyhow::Result<Episode> {
        (**self).create_episode(episode).await
    }

    async fn get_episode(&self, id: Uuid) -> anyhow::Result<Option<Episode>> {
        (**self).get_episode(id).await
    }

    async fn complete_episode(
        &self,
        id: Uuid,
        analysis: &CompletedAnalysis,
    ) -> anyhow::Result<Episode> {
        (**self).complete_episode(id, analysis).await
    }

    async fn fail_episode(&self, id: Uuid, error: &str) -> anyhow::Result<Episode> {
        (**self).fail_episode(id, error).await
    }
}
