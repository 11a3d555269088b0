use vidscribe::application::ports::{DemuxError, MediaDemuxer};
use vidscribe::domain::VideoId;
use vidscribe::infrastructure::media::{check_ffmpeg_binary, FfmpegDemuxer};

fn ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Renders a short synthetic test video via ffmpeg's lavfi sources.
fn synthesize_video(with_audio: bool) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.mp4");

    let mut cmd = std::process::Command::new("ffmpeg");
    cmd.args(["-f", "lavfi", "-i", "testsrc=duration=2:size=128x128:rate=4"]);
    if with_audio {
        cmd.args(["-f", "lavfi", "-i", "sine=frequency=440:duration=2"]);
    }
    cmd.arg(path.to_str().unwrap());

    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "ffmpeg failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    std::fs::read(&path).unwrap()
}

#[tokio::test]
async fn given_video_with_audio_when_demuxing_then_frames_and_wav_are_extracted() {
    if !ffmpeg_available() {
        return;
    }

    let video = synthesize_video(true);
    let demuxer = FfmpegDemuxer::default();
    let id = VideoId::from_filename("synthetic.mp4");

    let demuxed = demuxer.demux(&video, &id).await.unwrap();

    // 2 seconds at 1 fps.
    assert!(!demuxed.frames.is_empty());
    assert!(demuxed.frames.len() <= 3);
    let wav = demuxed.audio_wav.expect("audio track should be extracted");
    assert!(!wav.is_empty());
}

#[tokio::test]
async fn given_video_without_audio_track_when_demuxing_then_audio_is_none() {
    if !ffmpeg_available() {
        return;
    }

    let video = synthesize_video(false);
    let demuxer = FfmpegDemuxer::default();
    let id = VideoId::from_filename("silent.mp4");

    let demuxed = demuxer.demux(&video, &id).await.unwrap();

    assert!(!demuxed.frames.is_empty());
    assert!(demuxed.audio_wav.is_none());
}

#[tokio::test]
async fn given_garbage_bytes_when_demuxing_then_frame_extraction_fails() {
    if !ffmpeg_available() {
        return;
    }

    let demuxer = FfmpegDemuxer::default();
    let id = VideoId::from_filename("garbage.bin");

    let result = demuxer.demux(&[0u8; 64], &id).await;
    assert!(matches!(
        result,
        Err(DemuxError::FrameExtractionFailed(_)) | Err(DemuxError::NoFrames(_))
    ));
}

#[tokio::test]
async fn given_installed_ffmpeg_when_checked_then_binary_is_reported_available() {
    if !ffmpeg_available() {
        return;
    }

    check_ffmpeg_binary().await.unwrap();
}
