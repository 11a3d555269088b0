mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ExtractionSettings, ModelSettings, ServerSettings, Settings, StorageSettings,
};
