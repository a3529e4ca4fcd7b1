mod actors;
mod server;
mod settings;

use std::sync::Arc;

use actors::{NotifierActor, Presenter, ReminderCoordinator, TimerActor};
use anyhow::{Context, Result};
use server::{Server, Services};
use settings::SettingsHandle;
use tokio::sync::broadcast;
use tomate_adapters::SystemClock;
use tomate_core::{Clock, Config, NotificationService, PomodoroSettings, Translator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("tomate_daemon=debug".parse()?),
        )
        .init();

    info!("tomate daemon starting");

    let config = Config::load().unwrap_or_else(|error| {
        warn!(%error, "failed to load config, using defaults");
        Config::default()
    });
    info!(
        language = config.general.language.code(),
        sound = config.notifications.sound_enabled,
        "config loaded"
    );

    let initial_settings = match config.timer.validate() {
        Ok(()) => config.timer,
        Err(error) => {
            warn!(%error, "invalid timer settings in config, using defaults");
            PomodoroSettings::default()
        }
    };

    let (shutdown_sender, shutdown_receiver) = broadcast::channel::<()>(1);
    let sigint_shutdown_sender = shutdown_sender.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("SIGINT received, initiating shutdown");
        sigint_shutdown_sender.send(()).ok();
    });

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let (settings, settings_receiver) = SettingsHandle::new(initial_settings);

    let (notifier_actor, notifier_handle) = NotifierActor::new(
        clock.clone(),
        config.notifications.urgency,
        config.notifications.sound_enabled,
    );
    tokio::spawn(notifier_actor.run());

    let notifications = Arc::new(NotificationService::new(Arc::new(notifier_handle)));
    notifications.ensure_permission().await;

    let (timer_actor, timer_handle) = TimerActor::new(settings_receiver, clock.clone());
    tokio::spawn(timer_actor.run());

    let (presenter, view) = Presenter::new(timer_handle.clone())
        .await
        .context("timer actor stopped before the presenter could start")?;
    tokio::spawn(presenter.run());

    let coordinator = ReminderCoordinator::new(
        timer_handle.clone(),
        notifications,
        Translator::new(config.general.language),
        clock,
    );
    tokio::spawn(coordinator.run());

    let server = Server::new(Services {
        timer: timer_handle,
        view,
        settings,
    });
    server.run(shutdown_receiver).await?;

    info!("tomate daemon stopped");
    Ok(())
}
