use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ceti::console::toast::{Notification, Toaster};

/// Records every notification it is shown. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingToaster {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingToaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Toaster for RecordingToaster {
    async fn show(&mut self, notification: &Notification) {
        self.log.lock().unwrap().push(notification.clone());
    }
}
