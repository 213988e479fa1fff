//! Divination sessions.
//!
//! A [`Diviner`] owns the RNG and history. Each call to [`Diviner::begin`]
//! casts all six lines at once, resolves the hexagrams and starts the
//! interpretation request immediately, so the caller can reveal lines at
//! its own pace while the provider works.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;
use yj_core::{Casting, Hexagram, LineResult, Resolution, cast, resolve};

use crate::config::OracleConfig;
use crate::error::{SessionError, SessionResult};
use crate::history::{DivinationRecord, History};
use crate::interpretation::{Interpretation, StructuredReply};
use crate::interpreter::Interpreter;
use crate::pending::PendingInterpretation;

/// Casts hexagrams and keeps the history of finished readings.
#[derive(Debug)]
pub struct Diviner {
    interpreter: Arc<Interpreter>,
    rng: StdRng,
    history: History,
}

impl Diviner {
    /// Create a diviner over an interpreter. The RNG uses `config.seed`
    /// when set, otherwise OS entropy.
    pub fn new(interpreter: Arc<Interpreter>, config: &OracleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            interpreter,
            rng,
            history: History::new(),
        }
    }

    /// Create a diviner with an interpreter built from `config`.
    pub fn from_config(config: &OracleConfig) -> Self {
        Self::new(Arc::new(Interpreter::from_config(config)), config)
    }

    /// Replace the history, e.g. with one loaded from disk.
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    /// The interpreter used for readings.
    pub fn interpreter(&self) -> &Arc<Interpreter> {
        &self.interpreter
    }

    /// Finished readings so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Cast for a question and start its interpretation.
    pub fn begin(&mut self, question: &str) -> SessionResult<DivinationSession> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        let casting = cast(&mut self.rng);
        let resolution = resolve(&casting);
        tracing::info!(
            signature = %casting.sum_signature(),
            primary = resolution.primary.number,
            relating = resolution.relating_number(),
            "lines cast"
        );

        let pending = self.interpreter.start(
            question,
            &resolution.primary,
            resolution.relating.as_ref(),
            &casting,
        );

        Ok(DivinationSession {
            id: Uuid::new_v4(),
            date: Utc::now(),
            question: question.to_string(),
            casting,
            resolution,
            pending: Some(pending),
            interpretation: None,
        })
    }

    /// Add a finished session to the history and return its record.
    pub fn record(&mut self, session: &DivinationSession) -> DivinationRecord {
        let record = session.record();
        self.history.append(record.clone());
        record
    }
}

/// One divination in progress.
#[derive(Debug)]
pub struct DivinationSession {
    id: Uuid,
    date: DateTime<Utc>,
    question: String,
    casting: Casting,
    resolution: Resolution,
    pending: Option<PendingInterpretation>,
    interpretation: Option<Interpretation>,
}

impl DivinationSession {
    /// The question, trimmed.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The cast, bottom line first.
    pub fn casting(&self) -> &Casting {
        &self.casting
    }

    /// The six lines, bottom first.
    pub fn lines(&self) -> &[LineResult; 6] {
        self.casting.lines()
    }

    /// The primary hexagram.
    pub fn primary(&self) -> &Hexagram {
        &self.resolution.primary
    }

    /// The relating hexagram, present only when a line changes.
    pub fn relating(&self) -> Option<&Hexagram> {
        self.resolution.relating.as_ref()
    }

    /// Whether the interpretation can be read without waiting.
    pub fn is_interpretation_ready(&self) -> bool {
        self.interpretation.is_some() || self.pending.as_ref().is_some_and(|p| p.is_ready())
    }

    /// Wait for the interpretation started by [`Diviner::begin`].
    pub async fn interpretation(&mut self) -> &Interpretation {
        if self.interpretation.is_none() {
            let reading = match self.pending.take() {
                Some(pending) => pending.wait().await,
                None => Interpretation::fallback(),
            };
            self.interpretation = Some(reading);
        }
        self.interpretation.get_or_insert_with(Interpretation::fallback)
    }

    /// A history record for this session.
    pub fn record(&self) -> DivinationRecord {
        DivinationRecord {
            id: self.id,
            date: self.date,
            question: self.question.clone(),
            casting: self.casting,
            primary: self.resolution.primary.number,
            relating: self.resolution.relating.map(|h| h.number),
            interpretation: self.interpretation.clone(),
        }
    }
}
