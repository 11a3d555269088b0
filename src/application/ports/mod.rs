mod audio_encoder;
mod caption_log;
mod captioner;
mod feature_store;
mod media_demuxer;
mod media_store;
mod visual_encoder;

pub use audio_encoder::{AudioEncoder, AudioEncoderError};
pub use caption_log::{CaptionLog, CaptionLogError};
pub use captioner::{Captioner, CaptionerError, GeneratedCaption};
pub use feature_store::{FeatureStore, FeatureStoreError};
pub use media_demuxer::{DemuxError, DemuxedMedia, MediaDemuxer};
pub use media_store::{MediaStore, MediaStoreError};
pub use visual_encoder::{VisualEncoder, VisualEncoderError};
