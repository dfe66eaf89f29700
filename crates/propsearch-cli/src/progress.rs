//! Console loading indicator driven by the bootstrap state channel.

use propsearch_core::{BootstrapReport, BootstrapState};
use tokio::sync::watch;
use tokio::task::JoinHandle;

const STARTED: &str = "Downloading latest data...";

/// Announce the download, then report the outcome once bootstrap completes.
///
/// The start line is printed before this returns, however quickly the
/// fetches settle. The task yields every line it printed.
pub fn spawn(mut rx: watch::Receiver<BootstrapState>) -> JoinHandle<Vec<&'static str>> {
    eprintln!("{}", STARTED);

    tokio::spawn(async move {
        let mut printed = vec![STARTED];
        loop {
            let state = *rx.borrow_and_update();
            if let Some(message) = outcome(state) {
                eprintln!("{}", message);
                printed.push(message);
                break;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
        printed
    })
}

fn outcome(state: BootstrapState) -> Option<&'static str> {
    match state {
        BootstrapState::Idle | BootstrapState::Initializing => None,
        BootstrapState::Ready => Some("Done!"),
        BootstrapState::PartiallyFailed => Some("Download incomplete"),
    }
}

pub fn print_failures(report: &BootstrapReport) {
    for (id, error) in &report.failed {
        eprintln!("  {}: {}", id.display_name(), error);
    }
}
