//! One-shot background loading of the directory.
//!
//! The fetch runs on a worker thread so the event loop keeps drawing the
//! loading state. The outcome comes back over a channel and is picked up by
//! [`Loader::poll`]. A loader starts at most once per session.
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{error, info, warn};

use crate::api::UserSource;
use crate::error::LoadFailure;
use crate::model::User;

pub type LoadOutcome = Result<Vec<User>, LoadFailure>;

#[derive(Default)]
pub struct Loader {
    started: bool,
    settled: bool,
    rx: Option<Receiver<LoadOutcome>>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start fetching from `source` on a worker thread.
    ///
    /// Returns `false` without doing anything if this loader was already
    /// started, so a second call never issues a second request.
    pub fn start<S: UserSource>(&mut self, source: S) -> bool {
        if self.started {
            warn!("loader already started; ignoring repeated start");
            return false;
        }
        self.started = true;

        let (tx, rx) = mpsc::channel();
        self.rx = Some(rx);
        let spawned = thread::Builder::new()
            .name("user-loader".into())
            .spawn(move || {
                info!(source = %source.describe(), "fetching users");
                let outcome = source.fetch_users();
                match &outcome {
                    Ok(users) => info!(count = users.len(), "users loaded"),
                    Err(e) => error!(error = %e, "error fetching users"),
                }
                // The receiver is gone only if the UI already shut down.
                let _ = tx.send(outcome);
            });
        if let Err(e) = spawned {
            error!(error = %e, "failed to spawn loader thread");
            self.rx = None;
        }
        true
    }

    /// Take the outcome if the fetch has finished.
    ///
    /// Yields `Some` exactly once per started loader, `None` before the
    /// fetch settles and after the outcome was taken.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        if self.settled || !self.started {
            return None;
        }
        let outcome = match &self.rx {
            Some(rx) => match rx.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => Err(LoadFailure::WorkerLost),
            },
            None => Err(LoadFailure::WorkerLost),
        };
        self.settled = true;
        self.rx = None;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        result: LoadOutcome,
    }

    impl UserSource for CountingSource {
        fn fetch_users(&self) -> LoadOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    struct PanickingSource;

    impl UserSource for PanickingSource {
        fn fetch_users(&self) -> LoadOutcome {
            panic!("source blew up");
        }
    }

    fn wait_for(loader: &mut Loader) -> LoadOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = loader.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "loader did not settle");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn poll_before_start_is_none() {
        let mut loader = Loader::new();
        assert!(loader.poll().is_none());
    }

    #[test]
    fn starts_only_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut loader = Loader::new();
        let first = CountingSource {
            calls: calls.clone(),
            result: Ok(vec![]),
        };
        let second = CountingSource {
            calls: calls.clone(),
            result: Ok(vec![]),
        };
        assert!(loader.start(first));
        assert!(!loader.start(second));
        let _ = wait_for(&mut loader);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn delivers_outcome_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let user = User {
            id: 1,
            name: "Leanne Graham".into(),
            ..Default::default()
        };
        let mut loader = Loader::new();
        loader.start(CountingSource {
            calls,
            result: Ok(vec![user.clone()]),
        });
        assert_eq!(wait_for(&mut loader), Ok(vec![user]));
        assert!(loader.poll().is_none());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn failure_is_passed_through() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut loader = Loader::new();
        loader.start(CountingSource {
            calls,
            result: Err(LoadFailure::Status(500)),
        });
        assert_eq!(wait_for(&mut loader), Err(LoadFailure::Status(500)));
    }

    #[test]
    fn worker_panic_reports_worker_lost() {
        let mut loader = Loader::new();
        loader.start(PanickingSource);
        assert_eq!(wait_for(&mut loader), Err(LoadFailure::WorkerLost));
    }
}
