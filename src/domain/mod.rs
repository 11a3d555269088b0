mod caption;
mod feature;
mod token_sequence;
mod video_id;

pub use caption::{Caption, CaptionRecord, EMPTY_CAPTION_PLACEHOLDER};
pub use feature::{
    AudioFeature, FeatureShapeError, VideoFeature, AUDIO_FEATURE_DIM, VIDEO_FEATURE_DIM,
};
pub use token_sequence::{TokenSequence, BOS_ID, EOS_ID, PAD_ID};
pub use video_id::VideoId;
