use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use tomate_core::{Config, Translator};
use tomate_protocol::{Request, Response};

pub fn get_translator() -> Translator {
    Config::load()
        .map(|config| Translator::new(config.general.language))
        .unwrap_or_default()
}

/// Sends a request and returns the response, exiting when the daemon is down.
pub async fn send(client: &DaemonClient, request: Request, translator: &Translator) -> Result<Response> {
    match client.send(request).await {
        Ok(Response::Error { message }) => bail!("{}", message),
        Ok(response) => Ok(response),
        Err(ClientError::DaemonNotRunning) => {
            eprintln!("{}", translator.get("error.daemon_not_running"));
            eprintln!("{}", translator.get("error.daemon_not_running_hint"));
            std::process::exit(1);
        }
        Err(ClientError::Timeout) => bail!("{}", translator.get("error.connection_timeout")),
        Err(error) => bail!("{}", error),
    }
}

/// Sends a command that answers `Ok` and prints the translated confirmation.
pub async fn acknowledge(request: Request, success_key: &str) -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    match send(&client, request, &translator).await? {
        Response::Ok => {
            println!("{}", translator.get(success_key));
            Ok(())
        }
        _ => bail!("{}", translator.get("error.unexpected_response")),
    }
}
