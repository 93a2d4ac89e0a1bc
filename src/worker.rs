//! Background execution of a commit run.
//!
//! The engine stays synchronous; the worker thread drives it and forwards
//! progress to the caller over a channel, ending with a single
//! [`WorkerEvent::Finished`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::progress::ProgressReporter;
use crate::rename::{commit, CommitReport};
use crate::session::Session;

/// Cooperative cancellation flag, checked between candidates
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub enum WorkerEvent {
    Progress { index: usize, total: usize },
    Finished(CommitReport),
}

/// Forwards progress callbacks as channel messages
struct ChannelReporter {
    sender: Sender<WorkerEvent>,
}

impl ProgressReporter for ChannelReporter {
    fn on_file_processed(&mut self, index: usize, total: usize) {
        // Receiver gone means nobody is listening; the run continues regardless
        let _ = self.sender.send(WorkerEvent::Progress { index, total });
    }
}

/// Handle to a running commit
pub struct CommitWorker {
    pub events: Receiver<WorkerEvent>,
    cancel: CancelFlag,
    handle: JoinHandle<()>,
}

impl CommitWorker {
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Block until the worker thread exits
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// Run a commit for `session` on a dedicated thread
pub fn spawn_commit(session: Session) -> CommitWorker {
    let (sender, events) = mpsc::channel();
    let cancel = CancelFlag::new();
    let worker_cancel = cancel.clone();

    let handle = thread::spawn(move || {
        debug!("Commit worker started");
        let mut reporter = ChannelReporter {
            sender: sender.clone(),
        };
        let report = commit(&session, &mut reporter, &worker_cancel);
        let _ = sender.send(WorkerEvent::Finished(report));
        debug!("Commit worker finished");
    });

    CommitWorker {
        events,
        cancel,
        handle,
    }
}
