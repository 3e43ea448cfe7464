use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::data::loader::{self, IngestError, ValidationMode};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Background file loading
// ---------------------------------------------------------------------------

/// Outcome of one background load, tagged with the generation it was
/// started under.
#[derive(Debug)]
pub struct LoadMessage {
    pub generation: u64,
    pub path: PathBuf,
    pub result: Result<Dataset, IngestError>,
}

/// Decodes files off the UI thread and hands results back over a channel.
pub struct LoadWorker {
    tx: Sender<LoadMessage>,
    rx: Receiver<LoadMessage>,
}

impl Default for LoadWorker {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl LoadWorker {
    /// Start loading `path` on a new thread. `notify` runs after the result
    /// is queued (the UI uses it to request a repaint).
    pub fn spawn<F>(
        &self,
        generation: u64,
        path: PathBuf,
        mode: ValidationMode,
        notify: F,
    ) -> std::io::Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::Builder::new()
            .name(format!("xlsx-load-{generation}"))
            .spawn(move || {
                let result = loader::load_file(&path, mode);
                // The receiver only disappears when the app is closing.
                let _ = tx.send(LoadMessage {
                    generation,
                    path,
                    result,
                });
                notify();
            })?;
        Ok(())
    }

    /// Next finished load, if any.
    pub fn try_recv(&self) -> Option<LoadMessage> {
        self.rx.try_recv().ok()
    }

    #[cfg(test)]
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<LoadMessage> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn failed_load_comes_back_with_its_generation() {
        let dir = tempfile::tempdir().unwrap();
        let worker = LoadWorker::default();
        worker
            .spawn(7, dir.path().join("nada.xlsx"), ValidationMode::Strict, || {})
            .unwrap();

        let msg = worker.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(msg.generation, 7);
        assert!(matches!(msg.result, Err(IngestError::Io(_))));
        assert!(worker.try_recv().is_none());
    }

    #[test]
    fn notify_runs_after_send() {
        let (done_tx, done_rx) = mpsc::channel();
        let worker = LoadWorker::default();
        worker
            .spawn(1, PathBuf::from("dados.csv"), ValidationMode::Lenient, move || {
                let _ = done_tx.send(());
            })
            .unwrap();

        done_rx.recv_timeout(Duration::from_secs(10)).unwrap();
        let msg = worker.try_recv().unwrap();
        assert!(matches!(msg.result, Err(IngestError::UnsupportedFileType(_))));
    }
}
