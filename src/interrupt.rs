//! Ctrl+C for the whole session.
//!
//! Once tokio has been asked for `ctrl_c`, SIGINT no longer kills the
//! process, so a single listener lives as long as the REPL and forwards
//! every press. The REPL races both the prompt and an in-flight query
//! against it.

use std::future::Future;

use tokio::sync::mpsc;

pub struct Interrupts {
    rx: mpsc::UnboundedReceiver<()>,
}

impl Interrupts {
    /// Start forwarding Ctrl+C presses for the rest of the process.
    pub fn listen() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Interrupts fed from an arbitrary channel.
    pub fn from_channel(rx: mpsc::UnboundedReceiver<()>) -> Self {
        Self { rx }
    }

    /// Drive `fut` to completion, or return `None` if an interrupt lands first.
    pub async fn race<F: Future>(&mut self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            Some(()) = self.rx.recv() => None,
            out = fut => Some(out),
        }
    }
}
