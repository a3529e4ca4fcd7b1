use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tomate_protocol::{Request, Response};

use crate::client::DaemonClient;

const DAEMON_BINARY: &str = if cfg!(windows) {
    "tomate-daemon.exe"
} else {
    "tomate-daemon"
};
const STARTUP_TIMEOUT: Duration = Duration::from_secs(5);
const READINESS_POLL: Duration = Duration::from_millis(100);
const PING_TIMEOUT: Duration = Duration::from_millis(500);

/// Spawns the daemon detached from the terminal and waits until it answers a ping.
pub async fn launch_daemon() -> Result<()> {
    let daemon_path = locate_daemon()?;

    Command::new(&daemon_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to launch {}", daemon_path.display()))?;

    wait_until_ready().await
}

/// `TOMATE_DAEMON_PATH`, then next to the running binary, then `PATH`.
fn locate_daemon() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os("TOMATE_DAEMON_PATH") {
        return Ok(PathBuf::from(path));
    }

    let current_exe = std::env::current_exe().context("failed to locate the current executable")?;
    if let Some(sibling) = current_exe.parent().map(|dir| dir.join(DAEMON_BINARY)) {
        if sibling.exists() {
            return Ok(sibling);
        }
    }

    which::which(DAEMON_BINARY)
        .with_context(|| format!("{} not found. Install it or set TOMATE_DAEMON_PATH", DAEMON_BINARY))
}

async fn wait_until_ready() -> Result<()> {
    let client = DaemonClient::new().with_timeout(PING_TIMEOUT);
    let deadline = Instant::now() + STARTUP_TIMEOUT;

    while Instant::now() < deadline {
        if let Ok(Response::Pong) = client.send(Request::Ping).await {
            return Ok(());
        }
        sleep(READINESS_POLL).await;
    }

    bail!(
        "the daemon did not answer within {} seconds",
        STARTUP_TIMEOUT.as_secs()
    );
}
