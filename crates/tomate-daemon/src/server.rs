use crate::actors::TimerHandle;
use crate::settings::SettingsHandle;
use anyhow::{Context, Result};
use interprocess::local_socket::{
    tokio::{prelude::*, Stream},
    GenericFilePath, ListenerOptions,
};
use std::path::PathBuf;
use tokio::sync::watch;
use tomate_core::{PomodoroSettings, TimerView};
use tomate_protocol::{default_socket_path, read_frame, write_frame, Request, Response};
use tracing::{debug, error, info, instrument};

/// Everything a request handler needs, cheap to clone per connection.
#[derive(Clone)]
pub struct Services {
    pub timer: TimerHandle,
    pub view: watch::Receiver<TimerView>,
    pub settings: SettingsHandle,
}

pub struct Server {
    socket_path: PathBuf,
    services: Services,
}

impl Server {
    pub fn new(services: Services) -> Self {
        Self::with_socket_path(default_socket_path(), services)
    }

    pub fn with_socket_path(socket_path: PathBuf, services: Services) -> Self {
        Self {
            socket_path,
            services,
        }
    }

    fn cleanup_stale_socket(&self) -> Result<()> {
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path).context("failed to remove stale socket")?;
            debug!("removed stale socket file");
        }
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn run(&self, mut shutdown: tokio::sync::broadcast::Receiver<()>) -> Result<()> {
        self.cleanup_stale_socket()?;

        let listener = ListenerOptions::new()
            .name(self.socket_path.as_os_str().to_fs_name::<GenericFilePath>()?)
            .create_tokio()?;

        info!(path = %self.socket_path.display(), "server listening");

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok(stream) => {
                            let services = self.services.clone();
                            tokio::spawn(async move {
                                if let Err(error) = handle_connection(stream, services).await {
                                    error!(%error, "connection handler failed");
                                }
                            });
                        }
                        Err(error) => {
                            error!(%error, "failed to accept connection");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        self.cleanup_socket();
        Ok(())
    }

    fn cleanup_socket(&self) {
        if let Err(error) = std::fs::remove_file(&self.socket_path) {
            debug!(%error, "socket file already removed");
        } else {
            debug!("socket file cleaned up");
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.cleanup_socket();
    }
}

async fn handle_connection(mut stream: Stream, services: Services) -> Result<()> {
    debug!("new connection accepted");

    let request: Request = read_frame(&mut stream)
        .await
        .context("failed to read request")?;

    debug!(?request, "received request");

    let response = handle_request(request, &services).await;

    debug!(?response, "sending response");

    write_frame(&mut stream, &response)
        .await
        .context("failed to write response")?;

    Ok(())
}

fn acknowledge<E>(result: Result<(), E>, failure: &str) -> Response {
    match result {
        Ok(()) => Response::Ok,
        Err(_) => Response::Error {
            message: failure.to_string(),
        },
    }
}

async fn handle_request(request: Request, services: &Services) -> Response {
    let timer = &services.timer;

    match request {
        Request::Ping => Response::Pong,

        Request::GetStatus => Response::Status(services.view.borrow().clone()),

        Request::Start => acknowledge(timer.start().await, "failed to start the timer"),

        Request::Pause => acknowledge(timer.pause().await, "failed to pause the timer"),

        Request::Resume => acknowledge(timer.resume().await, "failed to resume the timer"),

        Request::Stop => acknowledge(timer.stop().await, "failed to stop the timer"),

        Request::AdvanceStage => {
            acknowledge(timer.advance_stage().await, "failed to advance the stage")
        }

        Request::GetSettings => Response::Settings(services.settings.current()),

        Request::UpdateSettings {
            task_time_minutes,
            break_time_minutes,
        } => {
            let settings = PomodoroSettings {
                task_time_minutes,
                break_time_minutes,
            };
            match services.settings.update(settings) {
                Ok(changed) => {
                    info!(changed, task_time_minutes, break_time_minutes, "settings update requested");
                    Response::Ok
                }
                Err(error) => Response::Error {
                    message: error.to_string(),
                },
            }
        }
    }
}
