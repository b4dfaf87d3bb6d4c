//! Cooperative shutdown signal shared by the fetcher and the poll loop
//!
//! A `watch::Receiver<bool>` whose value turns `true` once shutdown is requested.

use tokio::sync::watch;

/// Resolves once shutdown is `true`; never resolves if the sender is gone
pub async fn signalled(shutdown: &mut watch::Receiver<bool>) {
    let sender_dropped = shutdown.wait_for(|stop| *stop).await.is_err();
    if sender_dropped {
        std::future::pending::<()>().await;
    }
}
