//! Best-effort start/end job events for observers (the UI spinner). A send
//! with nobody listening is normal; nothing here may fail a job.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::types::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobPhase {
    Start,
    End,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobEvent {
    pub job_id: Uuid,
    pub phase: JobPhase,
}

#[derive(Debug, Clone)]
pub struct ProgressNotifier {
    tx: broadcast::Sender<JobEvent>,
}

impl Default for ProgressNotifier {
    fn default() -> Self {
        Self::new(16)
    }
}

impl ProgressNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.tx.subscribe()
    }

    pub fn job_started(&self, job: &Job) {
        self.publish(JobEvent {
            job_id: job.id,
            phase: JobPhase::Start,
        });
    }

    pub fn job_finished(&self, job: &Job) {
        self.publish(JobEvent {
            job_id: job.id,
            phase: JobPhase::End,
        });
    }

    fn publish(&self, event: JobEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("no progress subscribers, event dropped");
        }
    }
}
