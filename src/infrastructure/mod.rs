pub mod audio;
pub mod captioning;
pub mod media;
pub mod observability;
pub mod persistence;
pub mod storage;
pub mod vision;
