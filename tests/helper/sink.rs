//! Consumer side of the version sink

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use atlassian_version_collector::marketplace::VersionEntry;

/// Drains the receiver on its own task until every sender is dropped
pub fn spawn_entry_collector(
    mut rx: mpsc::Receiver<VersionEntry>,
) -> JoinHandle<Vec<VersionEntry>> {
    tokio::spawn(async move {
        let mut entries = Vec::new();
        while let Some(entry) = rx.recv().await {
            entries.push(entry);
        }
        entries
    })
}
