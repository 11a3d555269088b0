use ndarray::Array2;
use tempfile::TempDir;

use vidscribe::application::ports::{FeatureStore, FeatureStoreError};
use vidscribe::domain::{
    AudioFeature, VideoFeature, VideoId, AUDIO_FEATURE_DIM, VIDEO_FEATURE_DIM,
};
use vidscribe::infrastructure::persistence::NpyFeatureStore;

fn store_in(dir: &TempDir) -> NpyFeatureStore {
    NpyFeatureStore::new(
        dir.path().join("features/video"),
        dir.path().join("features/audio"),
    )
    .unwrap()
}

#[tokio::test]
async fn given_saved_video_feature_when_loading_then_contents_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let id = VideoId::from_filename("clip.mp4");

    let mut array = Array2::zeros((4, VIDEO_FEATURE_DIM));
    array[[2, 17]] = 0.75;
    let feature = VideoFeature::new(array).unwrap();

    store.save_video(&id, &feature).await.unwrap();
    let loaded = store.load_video(&id).await.unwrap();

    assert_eq!(loaded.num_frames(), 4);
    assert_eq!(loaded.as_array()[[2, 17]], 0.75);
}

#[tokio::test]
async fn given_single_segment_audio_when_round_tripping_then_it_loads_as_one_segment() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let id = VideoId::from_filename("clip.mp4");

    let mut values = vec![0.0f32; AUDIO_FEATURE_DIM];
    values[3] = -1.5;
    let feature = AudioFeature::from_vector(values).unwrap();

    store.save_audio(&id, &feature).await.unwrap();
    let loaded = store.load_audio(&id).await.unwrap();

    assert_eq!(loaded.num_segments(), 1);
    assert_eq!(loaded.as_array()[[0, 3]], -1.5);
}

#[tokio::test]
async fn given_multi_segment_audio_when_round_tripping_then_segment_count_survives() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let id = VideoId::from_filename("clip.mp4");

    let feature = AudioFeature::new(Array2::from_elem((3, AUDIO_FEATURE_DIM), 0.5)).unwrap();

    store.save_audio(&id, &feature).await.unwrap();
    let loaded = store.load_audio(&id).await.unwrap();

    assert_eq!(loaded.num_segments(), 3);
}

#[tokio::test]
async fn given_unknown_id_when_loading_then_not_found_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let id = VideoId::from_filename("never_extracted.mp4");

    let video = store.load_video(&id).await;
    assert!(matches!(video, Err(FeatureStoreError::NotFound(_))));

    let audio = store.load_audio(&id).await;
    assert!(matches!(audio, Err(FeatureStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_two_videos_when_saving_then_files_are_keyed_by_id() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let feature = VideoFeature::new(Array2::zeros((1, VIDEO_FEATURE_DIM))).unwrap();
    let first = VideoId::from_filename("first.mp4");
    let second = VideoId::from_filename("second.mp4");

    store.save_video(&first, &feature).await.unwrap();
    store.save_video(&second, &feature).await.unwrap();

    assert!(dir.path().join("features/video/first_video.npy").exists());
    assert!(dir.path().join("features/video/second_video.npy").exists());
}
