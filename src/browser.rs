use std::time::Duration;

/// Delay before the browser is opened, giving the listener time to bind
pub const LAUNCH_DELAY: Duration = Duration::from_secs(1);

/// Open `url` in the default browser after `LAUNCH_DELAY`.
///
/// Runs detached from the server; a failure is logged and serving goes on.
pub fn spawn_launch(url: String) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(LAUNCH_DELAY).await;
        let target = url.clone();
        match tokio::task::spawn_blocking(move || open::that(&target)).await {
            Ok(Ok(())) => tracing::debug!("Opened browser at {}", url),
            Ok(Err(e)) => tracing::warn!("Could not open browser at {}: {}", url, e),
            Err(e) => tracing::warn!("Browser launch task failed: {}", e),
        }
    })
}
