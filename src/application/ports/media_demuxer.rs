use async_trait::async_trait;

use crate::domain::VideoId;

/// Frames and audio pulled out of a container by the demuxer.
///
/// Frames are JPEG-encoded stills sampled at a fixed rate; `audio_wav`
/// is `None` when the container carries no audio stream.
#[derive(Debug)]
pub struct DemuxedMedia {
    pub frames: Vec<Vec<u8>>,
    pub audio_wav: Option<Vec<u8>>,
}

#[async_trait]
pub trait MediaDemuxer: Send + Sync {
    async fn demux(&self, video: &[u8], id: &VideoId) -> Result<DemuxedMedia, DemuxError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DemuxError {
    #[error("ffmpeg binary unavailable: {0}")]
    BinaryUnavailable(String),
    #[error("frame extraction failed: {0}")]
    FrameExtractionFailed(String),
    #[error("no frames produced for video {0}")]
    NoFrames(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
