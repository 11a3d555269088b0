use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};

use vidscribe::domain::{BOS_ID, EOS_ID};
use vidscribe::infrastructure::captioning::{FusionCaptionModel, FusionModelConfig, GreedySession};

fn tiny_config() -> FusionModelConfig {
    FusionModelConfig {
        video_dim: 16,
        audio_dim: 12,
        hidden_dim: 32,
        vocab_size: 40,
        encoder_layers: 2,
        decoder_layers: 2,
        num_heads: 4,
        decoder_ffn_dim: 64,
        max_positions: 64,
        max_decode_steps: 30,
    }
}

fn build_model(cfg: FusionModelConfig) -> FusionCaptionModel {
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    FusionCaptionModel::load(cfg, vb).unwrap()
}

/// Drives a full greedy decode against the model, the same loop the
/// engine runs, and returns the token trace.
fn greedy_decode(model: &FusionCaptionModel, video: &Tensor, audio: &Tensor) -> Vec<u32> {
    let memory = model.encode(video, audio).unwrap();

    let mut session = GreedySession::new(model.config().max_decode_steps);
    session.begin();

    while !session.is_terminated() {
        let tokens = Tensor::new(session.tokens().as_slice(), &Device::Cpu)
            .unwrap()
            .unsqueeze(0)
            .unwrap();
        let logits = model.decode_last(&tokens, &memory).unwrap();
        let next = logits
            .squeeze(0)
            .unwrap()
            .argmax(0)
            .unwrap()
            .to_scalar::<u32>()
            .unwrap();
        session.advance(next);
    }

    session.into_tokens().as_slice().to_vec()
}

#[test]
fn given_both_modalities_when_encoding_then_memory_concatenates_along_time() {
    let cfg = tiny_config();
    let model = build_model(cfg.clone());

    let video = Tensor::zeros((1, 5, cfg.video_dim), DType::F32, &Device::Cpu).unwrap();
    let audio = Tensor::zeros((1, 1, cfg.audio_dim), DType::F32, &Device::Cpu).unwrap();

    let memory = model.encode(&video, &audio).unwrap();
    assert_eq!(memory.dims(), &[1, 6, cfg.hidden_dim]);
}

#[test]
fn given_token_prefix_when_decoding_then_logits_cover_the_vocabulary() {
    let cfg = tiny_config();
    let model = build_model(cfg.clone());

    let video = Tensor::zeros((1, 3, cfg.video_dim), DType::F32, &Device::Cpu).unwrap();
    let audio = Tensor::zeros((1, 1, cfg.audio_dim), DType::F32, &Device::Cpu).unwrap();
    let memory = model.encode(&video, &audio).unwrap();

    let tokens = Tensor::new(&[BOS_ID, 10u32, 11u32], &Device::Cpu)
        .unwrap()
        .unsqueeze(0)
        .unwrap();

    let logits = model.decode(&tokens, &memory).unwrap();
    assert_eq!(logits.dims(), &[1, 3, cfg.vocab_size]);

    let last = model.decode_last(&tokens, &memory).unwrap();
    assert_eq!(last.dims(), &[1, cfg.vocab_size]);
}

#[test]
fn given_fixed_inputs_when_decoding_greedily_then_trace_is_deterministic_and_bounded() {
    let cfg = tiny_config();
    let max_steps = cfg.max_decode_steps;
    let model = build_model(cfg.clone());

    let video = Tensor::zeros((1, 4, cfg.video_dim), DType::F32, &Device::Cpu).unwrap();
    let audio = Tensor::zeros((1, 1, cfg.audio_dim), DType::F32, &Device::Cpu).unwrap();

    let first = greedy_decode(&model, &video, &audio);
    let second = greedy_decode(&model, &video, &audio);

    assert_eq!(first, second);
    assert_eq!(first[0], BOS_ID);
    // BOS plus at most max_decode_steps generated tokens.
    assert!(first.len() <= 1 + max_steps);
    let terminated_by_eos = first.last() == Some(&EOS_ID);
    assert!(terminated_by_eos || first.len() == 1 + max_steps);
}

#[test]
fn given_contract_width_features_when_decoding_then_pipeline_runs_end_to_end() {
    let cfg = FusionModelConfig {
        video_dim: 1408,
        audio_dim: 1024,
        encoder_layers: 1,
        decoder_layers: 1,
        ..tiny_config()
    };
    let model = build_model(cfg.clone());

    let video = Tensor::zeros((1, 10, cfg.video_dim), DType::F32, &Device::Cpu).unwrap();
    let audio = Tensor::zeros((1, 1, cfg.audio_dim), DType::F32, &Device::Cpu).unwrap();

    let trace = greedy_decode(&model, &video, &audio);
    assert_eq!(trace[0], BOS_ID);
    assert!(trace.len() >= 2);
}
