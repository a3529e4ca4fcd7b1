use super::common::get_translator;
use crate::client::DaemonClient;
use crate::daemon_launcher::launch_daemon;
use anyhow::Result;
use tomate_protocol::{Request, Response};

pub async fn execute() -> Result<()> {
    let translator = get_translator();

    if let Ok(Response::Pong) = DaemonClient::new().send(Request::Ping).await {
        println!("{}", translator.get("command.daemon_already_running"));
        return Ok(());
    }

    println!("{}", translator.get("command.daemon_starting"));
    launch_daemon().await?;
    println!("{}", translator.get("command.daemon_started"));

    Ok(())
}
