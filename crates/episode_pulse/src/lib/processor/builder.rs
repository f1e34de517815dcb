use episode_datastore::DataStore;

use crate::{llm::Analyzer, yt::TranscriptProvider, EpisodeProcessor};

/// Typestate builder for [`EpisodeProcessor`]; `build` is only available
/// once a store, a transcript provider and an analyzer have been supplied.
pub struct EpisodeProcessorBuilder<D = (), T = (), A = ()> {
    store: D,
    transcript_provider: T,
    analyzer: A,
}

impl Default for EpisodeProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeProcessorBuilder {
    pub fn new() -> Self {
        Self {
            store: (),
            transcript_provider: (),
            analyzer: (),
        }
    }
}

impl<D, T, A> EpisodeProcessorBuilder<D, T, A> {
    pub fn store<D2: DataStore + Send + Sync + 'static>(
        self,
        store: D2,
    ) -> EpisodeProcessorBuilder<D2, T, A> {
        EpisodeProcessorBuilder {
            store,
            transcript_provider: self.transcript_provider,
            analyzer: self.analyzer,
        }
    }

    pub fn transcript_provider<T2: TranscriptProvider + Send + Sync + 'static>(
        self,
        transcript_provider: T2,
    ) -> EpisodeProcessorBuilder<D, T2, A> {
        EpisodeProcessorBuilder {
            store: self.store,
            transcript_provider,
            analyzer: self.analyzer,
        }
    }

    pub fn analyzer<A2: Analyzer + Send + Sync + 'static>(
        self,
        analyzer: A2,
    ) -> EpisodeProcessorBuilder<D, T, A2> {
        EpisodeProcessorBuilder {
            store: self.store,
            transcript_provider: self.transcript_provider,
            analyzer,
        }
    }
}

impl<D, T, A> EpisodeProcessorBuilder<D, T, A>
where
    D: DataStore + Send + Sync + 'static,
    T: TranscriptProvider + Send + Sync + 'static,
    A: Analyzer + Send + Sync + 'static,
{
    pub fn build(self) -> EpisodeProcessor<D, T, A> {
        EpisodeProcessor {
            store: self.store,
            transcript_provider: self.transcript_provider,
            analyzer: self.analyzer,
        }
    }
}
