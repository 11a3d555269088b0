mod candle_audio_encoder;
pub mod pcm_decoder;

pub use candle_audio_encoder::CandleAudioEncoder;
