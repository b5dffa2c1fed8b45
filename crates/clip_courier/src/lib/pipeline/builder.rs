use crate::{
    fetch::MediaFetcher, notify::ProgressNotifier, storage::StorageAreas, Enricher,
    MediaPipeline, Transcriber,
};

pub struct MediaPipelineBuilder<F = (), T = (), E = ()> {
    storage: StorageAreas,
    fetcher: F,
    transcriber: T,
    enricher: E,
    notifier: ProgressNotifier,
}

impl MediaPipelineBuilder {
    pub fn new(storage: StorageAreas) -> Self {
        Self {
            storage,
            fetcher: (),
            transcriber: (),
            enricher: (),
            notifier: ProgressNotifier::default(),
        }
    }
}

impl<F, T, E> MediaPipelineBuilder<F, T, E> {
    pub fn fetcher<F2: MediaFetcher + Send + Sync + 'static>(
        self,
        fetcher: F2,
    ) -> MediaPipelineBuilder<F2, T, E> {
        MediaPipelineBuilder {
            storage: self.storage,
            fetcher,
            transcriber: self.transcriber,
            enricher: self.enricher,
            notifier: self.notifier,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> MediaPipelineBuilder<F, T2, E> {
        MediaPipelineBuilder {
            storage: self.storage,
            fetcher: self.fetcher,
            transcriber,
            enricher: self.enricher,
            notifier: self.notifier,
        }
    }

    pub fn enricher<E2: Enricher + Send + Sync + 'static>(
        self,
        enricher: E2,
    ) -> MediaPipelineBuilder<F, T, E2> {
        MediaPipelineBuilder {
            storage: self.storage,
            fetcher: self.fetcher,
            transcriber: self.transcriber,
            enricher,
            notifier: self.notifier,
        }
    }

    pub fn notifier(mut self, notifier: ProgressNotifier) -> Self {
        self.notifier = notifier;
        self
    }
}

impl<F, T, E> MediaPipelineBuilder<F, T, E>
where
    F: MediaFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    E: Enricher + Send + Sync + 'static,
{
    pub fn build(self) -> MediaPipeline<F, T, E> {
        MediaPipeline {
            storage: self.storage,
            fetcher: self.fetcher,
            transcriber: self.transcriber,
            enricher: self.enricher,
            notifier: self.notifier,
        }
    }
}
