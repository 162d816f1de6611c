use crate::shared::infrastructure::subscribers::Subscriber;
use parking_lot::Mutex;
use std::sync::Arc;

pub type SharedLog<E> = Arc<Mutex<Vec<(String, E)>>>;

/// Records every event it receives, tagged with its own name.
pub struct RecordingSubscriber<E> {
    name: String,
    log: SharedLog<E>,
}

impl<E: Clone> RecordingSubscriber<E> {
    pub fn new(name: &str) -> Self {
        Self::with_log(name, Self::shared_log())
    }

    pub fn with_log(name: &str, log: SharedLog<E>) -> Self {
        Self {
            name: name.to_string(),
            log,
        }
    }

    pub fn shared_log() -> SharedLog<E> {
        Arc::new(Mutex::new(Vec::new()))
    }

    pub fn seen(&self) -> Vec<(String, E)> {
        self.log.lock().clone()
    }
}

#[async_trait::async_trait]
impl<E: Clone + Send + Sync> Subscriber<E> for RecordingSubscriber<E> {
    async fn handle(&self, event: &E) -> anyhow::Result<()> {
        self.log.lock().push((self.name.clone(), event.clone()));
        Ok(())
    }
}

pub struct FailingSubscriber;

#[async_trait::async_trait]
impl<E: Send + Sync> Subscriber<E> for FailingSubscriber {
    async fn handle(&self, _event: &E) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("Subscriber offline"))
    }
}
