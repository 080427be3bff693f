//! One-time verification codes.
//!
//! Generates, stores and checks the numeric code used to confirm the
//! submitter's contact channel. One live session at a time; regenerating
//! replaces the code and resets consumption. Codes expire after a
//! configurable TTL. This is a UX-layer check, not an auth primitive, so a
//! uniformly distributed `rand` source is sufficient.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::error::VerificationError;

/// Channel the code is (notionally) delivered over. Recorded for display
/// only; does not change verification logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    Email,
    Sms,
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMethod::Email => write!(f, "email"),
            DeliveryMethod::Sms => write!(f, "SMS"),
        }
    }
}

/// A live one-time code.
#[derive(Debug, Clone)]
pub struct VerificationSession {
    code: String,
    method: DeliveryMethod,
    issued_at: Instant,
    consumed: bool,
}

impl VerificationSession {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn method(&self) -> DeliveryMethod {
        self.method
    }

    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Lifecycle phase of the verification session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No code has been generated yet.
    Unissued,

    /// A code is live and unconsumed.
    Issued,

    /// The code was verified; terminal until the next generate.
    Consumed,
}

/// Owns the single live [`VerificationSession`].
pub struct VerificationCodeManager {
    session: Option<VerificationSession>,
    code_length: usize,
    ttl: Duration,
}

impl VerificationCodeManager {
    pub fn new(code_length: usize, ttl: Duration) -> Self {
        Self {
            session: None,
            // 10^length must stay within u64
            code_length: code_length.clamp(4, 18),
            ttl,
        }
    }

    /// Issue a fresh code, replacing any existing session. The previous code
    /// becomes invalid immediately.
    pub fn generate(&mut self, method: DeliveryMethod) -> &VerificationSession {
        let max = 10u64.pow(self.code_length as u32);
        let value = rand::thread_rng().gen_range(0..max);
        let code = format!("{value:0width$}", width = self.code_length);

        tracing::debug!(%method, "issued verification code");

        self.session.insert(VerificationSession {
            code,
            method,
            issued_at: Instant::now(),
            consumed: false,
        })
    }

    /// Re-issue the code, recording the requested delivery channel.
    pub fn resend(&mut self, method: DeliveryMethod) -> &VerificationSession {
        self.generate(method)
    }

    /// Check an entered code against the live session.
    ///
    /// Trims surrounding whitespace, otherwise an exact string match. On
    /// success the session is consumed; re-verifying afterwards reports
    /// `AlreadyConsumed` to block replay within the same session.
    pub fn verify(&mut self, input: &str) -> Result<(), VerificationError> {
        let Some(session) = self.session.as_mut() else {
            // Nothing was issued, so no code can match
            return Err(VerificationError::Mismatch);
        };

        if session.consumed {
            return Err(VerificationError::AlreadyConsumed);
        }

        if session.issued_at.elapsed() >= self.ttl {
            return Err(VerificationError::Expired);
        }

        if session.code != input.trim() {
            return Err(VerificationError::Mismatch);
        }

        session.consumed = true;
        Ok(())
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.session {
            None => SessionPhase::Unissued,
            Some(s) if s.consumed => SessionPhase::Consumed,
            Some(_) => SessionPhase::Issued,
        }
    }

    pub fn session(&self) -> Option<&VerificationSession> {
        self.session.as_ref()
    }
}
