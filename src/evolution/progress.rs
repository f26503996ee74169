//! # Progress Reporting
//!
//! The evolution loop emits one [`Progress`] record per generation to a
//! [`ProgressSink`]. Sinks never block the loop: channel sinks either use an
//! unbounded channel or drop records a full buffer cannot take.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::mpsc;
//! use genpass::evolution::progress::{Progress, ProgressSink};
//! use genpass::candidate::Password;
//!
//! let (mut tx, rx) = mpsc::channel::<Progress>();
//! tx.emit(&Progress {
//!     best_fitness: 3.5,
//!     best_candidate: Password::from("abc"),
//!     generation: 0,
//! });
//!
//! assert_eq!(rx.recv().unwrap().generation, 0);
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc,
};

use crate::candidate::Password;

/// Snapshot emitted after each generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Best fitness observed so far in the run.
    pub best_fitness: f64,
    /// Best candidate of this generation.
    pub best_candidate: Password,
    /// 0-based index of the generation.
    pub generation: usize,
}

/// Receives per-generation progress.
pub trait ProgressSink {
    fn emit(&mut self, progress: &Progress);
}

impl<F> ProgressSink for F
where
    F: FnMut(&Progress),
{
    fn emit(&mut self, progress: &Progress) {
        self(progress)
    }
}

impl ProgressSink for mpsc::Sender<Progress> {
    fn emit(&mut self, progress: &Progress) {
        if self.send(progress.clone()).is_err() {
            tracing::trace!(generation = progress.generation, "progress receiver hung up");
        }
    }
}

impl ProgressSink for mpsc::SyncSender<Progress> {
    fn emit(&mut self, progress: &Progress) {
        match self.try_send(progress.clone()) {
            Ok(()) => {}
            Err(mpsc::TrySendError::Full(_)) => {
                tracing::debug!(generation = progress.generation, "progress buffer full, dropping record");
            }
            Err(mpsc::TrySendError::Disconnected(_)) => {
                tracing::trace!(generation = progress.generation, "progress receiver hung up");
            }
        }
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&mut self, _progress: &Progress) {}
}

/// Cooperative cancellation flag, checked at generation boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(generation: usize) -> Progress {
        Progress {
            best_fitness: generation as f64,
            best_candidate: Password::from("x"),
            generation,
        }
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: &Progress| seen.push(p.generation);
            sink.emit(&record(0));
            sink.emit(&record(1));
        }
        assert_eq!(seen, vec![0, 1]);
    }

    #[test]
    fn test_sync_sender_drops_when_full() {
        let (mut tx, rx) = mpsc::sync_channel::<Progress>(1);
        tx.emit(&record(0));
        tx.emit(&record(1));

        assert_eq!(rx.try_recv().unwrap().generation, 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_sender_ignores_hung_up_receiver() {
        let (mut tx, rx) = mpsc::channel::<Progress>();
        drop(rx);
        tx.emit(&record(0));
    }

    #[test]
    fn test_cancellation_token_is_shared() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());

        handle.cancel();
        assert!(token.is_cancelled());
    }
}
