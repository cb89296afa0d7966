use std::process::Command;

use anyhow::{Context, Result};
use registration_core::ExternalNavigator;
use url::Url;

/// Hands the URL to the platform's default browser.
pub struct SystemBrowserNavigator;

impl ExternalNavigator for SystemBrowserNavigator {
    fn open(&self, url: &Url) -> Result<()> {
        #[cfg(target_os = "windows")]
        let command = {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", "", url.as_str()]);
            command
        };

        #[cfg(target_os = "macos")]
        let command = {
            let mut command = Command::new("open");
            command.arg(url.as_str());
            command
        };

        #[cfg(all(unix, not(target_os = "macos")))]
        let command = {
            let mut command = Command::new("xdg-open");
            command.arg(url.as_str());
            command
        };

        launch_detached(command).with_context(|| format!("failed to launch browser for {url}"))
    }
}

/// Spawns the opener and reaps it on a background thread so no zombie is left behind.
fn launch_detached(mut command: Command) -> Result<()> {
    let mut child = command.spawn()?;
    std::thread::Builder::new()
        .name("browser-reaper".to_string())
        .spawn(move || {
            if let Err(err) = child.wait() {
                tracing::debug!(error = %err, "failed to reap browser launcher");
            }
        })?;
    Ok(())
}
