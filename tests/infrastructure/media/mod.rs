mod ffmpeg_demuxer_test;
