use anyhow::Context;
use sqlx::{migrate::Migrator, postgres::PgPoolOptions, types::Json, PgPool};
use uuid::Uuid;

use crate::{
    datastore::DataStore, CompletedAnalysis, Episode, NewEpisode, ProcessingStatus,
};

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, Clone)]
pub struct PgDataStore {
    pub pool: PgPool,
}

impl PgDataStore {
    /// Establish connection to database and run pending migrations.
    pub async fn init(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .inspect_err(
                |e| tracing::error!(error = ?e, "Failed to establish connection to database"),
            )
            .context("Failed to connect to postgres database")?;

        MIGRATOR
            .run(&pool)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to run database migrations"))
            .context("Failed to run database migrations")?;

        Ok(PgDataStore { pool })
    }
}

impl DataStore for PgDataStore {
    async fn create_episode(&self, episode: &NewEpisode) -> anyhow::Result<Episode> {
        let created = sqlx::query_as::<_, Episode>(
            r#"
            INSERT INTO episodes
                (id, title, description, source_url, source_type, processing_status, category, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&episode.title)
        .bind(&episode.description)
        .bind(&episode.source_url)
        .bind(episode.source_type)
        .bind(ProcessingStatus::Processing)
        .bind(&episode.category)
        .bind(&episode.tags)
        .fetch_one(&self.pool)
        .await
        .inspect_err(|e| {
            tracing::error!(error = ?e, source_url = %episode.source_url, "Failed to insert episode")
        })
        .context("Failed to insert episode")?;

        Ok(created)
    }

    async fn get_episode(&self, id: Uuid) -> anyhow::Result<Option<Episode>> {
        let episode = sqlx::query_as::<_, Episode>("SELECT * FROM episodes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, episode_id = %id, "Failed to fetch episode"))
            .context("Failed to fetch episode")?;

        Ok(episode)
    }

    async fn complete_episode(
        &self,
        id: Uuid,
        analysis: &CompletedAnalysis,
    ) -> anyhow::Result<Episode> {
        let updated = sqlx::query_as::<_, Episode>(
            r#"
            UPDATE episodes
            SET transcript = $2,
                summary = $3,
                business_ideas = $4,
                frameworks = $5,
                founder_stories = $6,
                ai_analysis = $7,
                processing_status = $8,
                processing_error = NULL,
                updated_at = now()
            WHERE id = $1 AND processing_status IN ($9, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&analysis.transcript)
        .bind(&analysis.summary)
        .bind(Json(&analysis.business_ideas))
        .bind(Json(&analysis.frameworks))
        .bind(Json(&analysis.founder_stories))
        .bind(&analysis.ai_analysis)
        .bind(ProcessingStatus::Completed)
        .bind(ProcessingStatus::Pending)
        .bind(ProcessingStatus::Processing)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, episode_id = %id, "Failed to complete episode"))
        .context("Failed to complete episode")?;

        updated.ok_or_else(|| {
            anyhow::anyhow!("Episode {id} not found or already in a terminal state")
        })
    }

    async fn fail_episode(&self, id: Uuid, error: &str) -> anyhow::Result<Episode> {
        let updated = sqlx::query_as::<_, Episode>(
            r#"
            UPDATE episodes
            SET processing_status = $2,
                processing_error = $3,
                updated_at = now()
            WHERE id = $1 AND processing_status IN ($4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ProcessingStatus::Failed)
        .bind(error)
        .bind(ProcessingStatus::Pending)
        .bind(ProcessingStatus::Processing)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, episode_id = %id, "Failed to mark episode failed"))
        .context("Failed to mark episode failed")?;

        updated.ok_or_else(|| {
            anyhow::anyhow!("Episode {id} not found or already in a terminal state")
        })
    }
}
