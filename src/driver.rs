//! Drives a quiz session with the timed feedback pause after wrong answers

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{Error, Result};
use crate::questions::Question;
use crate::session::{AnswerOutcome, PendingAdvance, QuizSession, QuizState, QuizSummary};
use crate::vocab::VocabularySet;

pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_secs(3);

/// One-shot timer that hands a [`PendingAdvance`] back once it fires.
///
/// Rescheduling or cancelling aborts the previous task.
pub struct FeedbackTimer {
    delay: Duration,
    handle: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<PendingAdvance>,
    rx: mpsc::UnboundedReceiver<PendingAdvance>,
}

impl FeedbackTimer {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            handle: None,
            tx,
            rx,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, token: PendingAdvance) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the driver was dropped
            let _ = tx.send(token);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Cancelled pending feedback timer");
        }
        // drop tokens that fired before the cancel
        while self.rx.try_recv().is_ok() {}
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the scheduled token
    pub async fn fired(&mut self) -> Option<PendingAdvance> {
        self.handle.as_ref()?;
        let token = self.rx.recv().await;
        self.handle = None;
        token
    }
}

/// A [`QuizSession`] paired with its feedback timer.
pub struct QuizDriver {
    session: QuizSession,
    timer: FeedbackTimer,
}

impl QuizDriver {
    pub fn new(session: QuizSession, delay: Duration) -> Self {
        Self {
            session,
            timer: FeedbackTimer::new(delay),
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn begin(&mut self) -> Result<()> {
        self.session.begin()
    }

    /// Start a new quiz, discarding any pending feedback of the previous one
    pub fn start(&mut self, requested: usize, vocab: Arc<VocabularySet>) -> Result<&Question> {
        self.timer.cancel();
        self.session.start(requested, vocab)
    }

    /// Submit an answer; a wrong one schedules the delayed advance.
    pub fn submit_answer(&mut self, selected: Option<&str>) -> Result<AnswerOutcome> {
        let outcome = self.session.submit_answer(selected)?;
        if let AnswerOutcome::Incorrect { pending: Some(token), .. } = &outcome {
            self.timer.schedule(*token);
        }
        Ok(outcome)
    }

    /// Wait out the feedback delay and move to the next question.
    ///
    /// Returns false when nothing was pending or the token went stale.
    pub async fn wait_feedback(&mut self) -> Result<bool> {
        if self.session.pending().is_none() {
            return Ok(false);
        }
        match self.timer.fired().await {
            Some(token) => self.session.apply_advance(token),
            None => Err(Error::InvalidState("feedback timer was not running".to_string())),
        }
    }

    pub fn reset(&mut self) {
        self.timer.cancel();
        self.session.reset();
    }

    pub fn state(&self) -> QuizState {
        self.session.state()
    }

    pub fn summary(&self) -> Option<QuizSummary> {
        self.session.summary()
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
