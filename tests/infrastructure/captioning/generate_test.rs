use vidscribe::domain::{BOS_ID, EOS_ID};
use vidscribe::infrastructure::captioning::{DecodeState, GreedySession};

#[test]
fn given_new_session_when_created_then_it_awaits_start_with_bos_prefix() {
    let session = GreedySession::new(30);
    assert_eq!(session.state(), DecodeState::AwaitingStart);
    assert_eq!(session.tokens().as_slice(), &[BOS_ID]);
}

#[test]
fn given_session_when_begun_then_it_is_generating() {
    let mut session = GreedySession::new(30);
    session.begin();
    assert_eq!(session.state(), DecodeState::Generating);
}

#[test]
fn given_eos_token_when_advancing_then_session_terminates() {
    let mut session = GreedySession::new(30);
    session.begin();
    session.advance(12);
    let state = session.advance(EOS_ID);
    assert_eq!(state, DecodeState::Terminated);
    assert_eq!(session.tokens().as_slice(), &[BOS_ID, 12, EOS_ID]);
}

#[test]
fn given_no_eos_when_advancing_then_session_stops_at_step_cap() {
    let mut session = GreedySession::new(5);
    session.begin();
    for i in 0..5 {
        session.advance(100 + i);
    }
    assert!(session.is_terminated());
    // BOS plus exactly max_steps generated tokens.
    assert_eq!(session.tokens().len(), 6);
}

#[test]
fn given_terminated_session_when_advancing_then_token_is_ignored() {
    let mut session = GreedySession::new(1);
    session.begin();
    session.advance(7);
    assert!(session.is_terminated());

    session.advance(8);
    assert_eq!(session.tokens().as_slice(), &[BOS_ID, 7]);
}

#[test]
fn given_session_not_begun_when_advancing_then_nothing_happens() {
    let mut session = GreedySession::new(3);
    let state = session.advance(9);
    assert_eq!(state, DecodeState::AwaitingStart);
    assert_eq!(session.tokens().as_slice(), &[BOS_ID]);
}

#[test]
fn given_finished_session_when_consumed_then_trace_is_returned() {
    let mut session = GreedySession::new(2);
    session.begin();
    session.advance(21);
    session.advance(EOS_ID);

    let tokens = session.into_tokens();
    assert_eq!(tokens.content_tokens(), vec![21]);
}
