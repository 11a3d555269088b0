mod captioning;
mod media;
mod persistence;
