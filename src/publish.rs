//! Publication of fetched version entries as JSON lines

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::trace;

use crate::marketplace::VersionEntry;

/// Writes one JSON line per received entry until every sender is dropped
///
/// Returns the number of entries written. A write failure stops the publisher,
/// which closes the receiver and makes further sends fail.
pub async fn publish_entries<W>(
    mut rx: mpsc::Receiver<VersionEntry>,
    mut writer: W,
) -> io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut published = 0;

    while let Some(entry) = rx.recv().await {
        let mut line = serde_json::to_vec(&entry).map_err(io::Error::other)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
        trace!("published {} {}", entry.application_name, entry.version);
        published += 1;
    }

    Ok(published)
}
