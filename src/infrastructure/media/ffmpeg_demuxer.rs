use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{DemuxError, DemuxedMedia, MediaDemuxer};
use crate::domain::VideoId;

const DEFAULT_FPS: u32 = 1;
const DEFAULT_FRAME_SIZE: u32 = 256;

/// Demuxes uploaded videos with an ffmpeg subprocess: frames sampled at
/// a fixed rate as JPEG stills, audio as mono 16 kHz WAV.
pub struct FfmpegDemuxer {
    fps: u32,
    frame_size: u32,
}

impl FfmpegDemuxer {
    pub fn new(fps: u32, frame_size: u32) -> Self {
        Self { fps, frame_size }
    }
}

impl Default for FfmpegDemuxer {
    fn default() -> Self {
        Self::new(DEFAULT_FPS, DEFAULT_FRAME_SIZE)
    }
}

/// Verifies the ffmpeg binary is reachable before the service starts.
pub async fn check_ffmpeg_binary() -> Result<(), DemuxError> {
    let output = Command::new("ffmpeg")
        .arg("-version")
        .output()
        .await
        .map_err(|e| DemuxError::BinaryUnavailable(e.to_string()))?;

    if !output.status.success() {
        return Err(DemuxError::BinaryUnavailable(format!(
            "ffmpeg -version exited with {}",
            output.status
        )));
    }
    Ok(())
}

#[async_trait]
impl MediaDemuxer for FfmpegDemuxer {
    async fn demux(&self, video: &[u8], id: &VideoId) -> Result<DemuxedMedia, DemuxError> {
        let workdir = tempfile::tempdir()?;
        let input_path = workdir.path().join("input.bin");
        tokio::fs::write(&input_path, video).await?;

        let frames_dir = workdir.path().join("frames");
        tokio::fs::create_dir(&frames_dir).await?;
        let frame_pattern = frames_dir.join("frame_%04d.jpg");

        let output = Command::new("ffmpeg")
            .args(["-i"])
            .arg(&input_path)
            .args([
                "-vf",
                &format!("fps={},scale={s}:{s}", self.fps, s = self.frame_size),
            ])
            .arg(&frame_pattern)
            .output()
            .await
            .map_err(|e| DemuxError::BinaryUnavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DemuxError::FrameExtractionFailed(
                stderr.lines().last().unwrap_or("unknown").to_string(),
            ));
        }

        let mut frame_paths: Vec<_> = std::fs::read_dir(&frames_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "jpg"))
            .collect();
        frame_paths.sort();

        if frame_paths.is_empty() {
            return Err(DemuxError::NoFrames(id.to_string()));
        }

        let mut frames = Vec::with_capacity(frame_paths.len());
        for path in &frame_paths {
            frames.push(tokio::fs::read(path).await?);
        }

        // Audio extraction failure means a silent video, not an error.
        let wav_path = workdir.path().join("audio.wav");
        let audio_result = Command::new("ffmpeg")
            .args(["-i"])
            .arg(&input_path)
            .args(["-ac", "1", "-ar", "16000", "-vn"])
            .arg(&wav_path)
            .output()
            .await;

        let audio_wav = match audio_result {
            Ok(out) if out.status.success() => match tokio::fs::read(&wav_path).await {
                Ok(bytes) if !bytes.is_empty() => Some(bytes),
                _ => None,
            },
            _ => {
                tracing::debug!(video_id = %id, "ffmpeg produced no audio track");
                None
            }
        };

        tracing::debug!(
            video_id = %id,
            frames = frames.len(),
            has_audio = audio_wav.is_some(),
            "Video demuxed"
        );

        Ok(DemuxedMedia { frames, audio_wav })
    }
}
