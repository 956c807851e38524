use super::ui;
use anyhow::{Context, Result};
use std::sync::mpsc;
use std::thread;
use tracing::debug;

/// Runs a blocking `job` on a worker thread and waits for its result on a
/// channel while a spinner is shown.
///
/// The spinner is cleared on every path, including a worker that panics.
pub fn run_in_background<T, F>(message: &str, job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    let _worker = thread::Builder::new()
        .name("stockview-fetch".to_string())
        .spawn(move || {
            // The receiver only goes away if the caller has already given up.
            let _ = tx.send(job());
        })
        .context("Failed to start fetch worker")?;

    let spinner = ui::new_spinner(message);
    let outcome = rx.recv();
    spinner.finish_and_clear();
    debug!(received = outcome.is_ok(), "Fetch worker finished");

    outcome.context("Fetch worker stopped without a result")
}
