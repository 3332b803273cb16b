//! Per-screen lookup state: `idle -> loading -> loaded | failed`.
//!
//! Each `begin` issues a ticket carrying a sequence number. A completion is
//! applied only if its ticket is the most recent one, so a slow response to
//! an earlier search can never overwrite the result of a later one.

use crate::{
    error::{ErrorKind, WeatherError},
    model::WeatherView,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LookupFailure {
    pub kind: ErrorKind,
    /// Inline text for the screen.
    pub message: &'static str,
    /// Diagnostic detail of the underlying error.
    pub detail: String,
}

impl From<&WeatherError> for LookupFailure {
    fn from(err: &WeatherError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Loaded(WeatherView),
    Failed(LookupFailure),
}

/// Handle for one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Lookup {
    state: LookupState,
    issued: u64,
}

impl Lookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LookupState::Loading)
    }

    /// Start a new request. Any previous result or error is dropped.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.state = LookupState::Loading;
        Ticket(self.issued)
    }

    /// Apply the outcome of `ticket`. Returns `false` (and leaves the
    /// state untouched) when a newer request has been issued since.
    pub fn finish(&mut self, ticket: Ticket, result: Result<WeatherView, WeatherError>) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(
                stale = ticket.0,
                latest = self.issued,
                "discarding superseded lookup result"
            );
            return false;
        }

        self.state = match result {
            Ok(view) => LookupState::Loaded(view),
            Err(err) => {
                tracing::warn!(error = %err, "weather lookup failed");
                LookupState::Failed(LookupFailure::from(&err))
            }
        };
        true
    }
}
