mod csv_caption_log;
mod npy_feature_store;

pub use csv_caption_log::CsvCaptionLog;
pub use npy_feature_store::NpyFeatureStore;
