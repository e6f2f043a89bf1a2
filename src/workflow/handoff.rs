//! One-shot draft handoff
//!
//! The finished draft moves to the next stage (job pricing/creation) as a
//! single navigation payload. The channel is one-shot: once delivered, a
//! second handoff is structurally impossible.

use tokio::sync::oneshot;

use crate::domain::job::SubmittedJob;
use crate::error::{WorkflowError, WorkflowResult};

/// Sending half, held by the workflow. Consumed by the first delivery.
pub struct DraftHandoff {
    tx: Option<oneshot::Sender<SubmittedJob>>,
}

/// Receiving half, held by the downstream stage.
pub struct HandoffReceiver {
    rx: oneshot::Receiver<SubmittedJob>,
}

impl DraftHandoff {
    pub fn channel() -> (Self, HandoffReceiver) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, HandoffReceiver { rx })
    }

    pub fn deliver(&mut self, job: SubmittedJob) -> WorkflowResult<()> {
        let tx = self.tx.take().ok_or(WorkflowError::AlreadyHandedOff)?;
        tx.send(job).map_err(|_| WorkflowError::HandoffClosed)
    }

    pub fn is_delivered(&self) -> bool {
        self.tx.is_none()
    }
}

impl HandoffReceiver {
    /// Waits for the draft. `None` if the capture session was discarded
    /// without submitting.
    pub async fn recv(self) -> Option<SubmittedJob> {
        self.rx.await.ok()
    }

    /// Non-blocking check, for callers polling between frames.
    pub fn try_recv(&mut self) -> Option<SubmittedJob> {
        self.rx.try_recv().ok()
    }
}
