use std::sync::Arc;

use crate::application::ports::{
    AudioEncoder, Captioner, MediaDemuxer, MediaStore, VisualEncoder,
};
use crate::application::services::{CaptioningService, ExtractionService};
use crate::presentation::config::Settings;

pub struct AppState<D, V, A, M>
where
    D: MediaDemuxer,
    V: VisualEncoder,
    A: AudioEncoder,
    M: Captioner,
{
    pub media_store: Arc<dyn MediaStore>,
    pub extraction_service: Arc<ExtractionService<D, V, A>>,
    pub captioning_service: Arc<CaptioningService<M>>,
    pub settings: Settings,
}

impl<D, V, A, M> Clone for AppState<D, V, A, M>
where
    D: MediaDemuxer,
    V: VisualEncoder,
    A: AudioEncoder,
    M: Captioner,
{
    fn clone(&self) -> Self {
        Self {
            media_store: Arc::clone(&self.media_store),
            extraction_service: Arc::clone(&self.extraction_service),
            captioning_service: Arc::clone(&self.captioning_service),
            settings: self.settings.clone(),
        }
    }
}
