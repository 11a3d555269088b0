mod ffmpeg_demuxer;

pub use ffmpeg_demuxer::{check_ffmpeg_binary, FfmpegDemuxer};
