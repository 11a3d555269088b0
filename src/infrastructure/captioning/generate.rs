use crate::domain::{TokenSequence, EOS_ID};

/// Phase of one greedy decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    AwaitingStart,
    Generating,
    Terminated,
}

/// Greedy decoding driver: owns the growing token sequence and the
/// termination rules (EOS token or generated-step cap). Token selection
/// stays outside so the driver is independent of the tensor runtime.
#[derive(Debug)]
pub struct GreedySession {
    tokens: TokenSequence,
    state: DecodeState,
    max_steps: usize,
    generated: usize,
}

impl GreedySession {
    pub fn new(max_steps: usize) -> Self {
        Self {
            tokens: TokenSequence::start(),
            state: DecodeState::AwaitingStart,
            max_steps,
            generated: 0,
        }
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    pub fn tokens(&self) -> &TokenSequence {
        &self.tokens
    }

    pub fn into_tokens(self) -> TokenSequence {
        self.tokens
    }

    pub fn is_terminated(&self) -> bool {
        self.state == DecodeState::Terminated
    }

    /// Enters the generating state; the sequence already holds BOS.
    pub fn begin(&mut self) -> &TokenSequence {
        if self.state == DecodeState::AwaitingStart {
            self.state = DecodeState::Generating;
        }
        &self.tokens
    }

    /// Appends the greedily selected token and applies the termination
    /// rules. Ignored once terminated.
    pub fn advance(&mut self, next_token: u32) -> DecodeState {
        if self.state != DecodeState::Generating {
            return self.state;
        }

        self.tokens.push(next_token);
        self.generated += 1;

        if next_token == EOS_ID || self.generated >= self.max_steps {
            self.state = DecodeState::Terminated;
        }
        self.state
    }
}
