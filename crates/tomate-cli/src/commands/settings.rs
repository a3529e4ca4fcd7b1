use super::common::{get_translator, send};
use crate::client::DaemonClient;
use anyhow::{bail, Result};
use tomate_core::{PomodoroSettings, Translator};
use tomate_protocol::{Request, Response};

pub async fn execute(task: Option<u32>, break_time: Option<u32>) -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    let current = match send(&client, Request::GetSettings, &translator).await? {
        Response::Settings(settings) => settings,
        _ => bail!("{}", translator.get("error.unexpected_response")),
    };

    if task.is_none() && break_time.is_none() {
        println!("{}", describe(&current, &translator));
        return Ok(());
    }

    let updated = merge(current, task, break_time);
    match send(
        &client,
        Request::UpdateSettings {
            task_time_minutes: updated.task_time_minutes,
            break_time_minutes: updated.break_time_minutes,
        },
        &translator,
    )
    .await?
    {
        Response::Ok => {
            println!("{}", translator.get("command.settings_updated"));
            println!("{}", describe(&updated, &translator));
            Ok(())
        }
        _ => bail!("{}", translator.get("error.unexpected_response")),
    }
}

fn merge(current: PomodoroSettings, task: Option<u32>, break_time: Option<u32>) -> PomodoroSettings {
    PomodoroSettings {
        task_time_minutes: task.unwrap_or(current.task_time_minutes),
        break_time_minutes: break_time.unwrap_or(current.break_time_minutes),
    }
}

fn describe(settings: &PomodoroSettings, translator: &Translator) -> String {
    let long = u64::from(settings.task_time_minutes) + u64::from(settings.break_time_minutes);
    translator.format(
        "command.settings_current",
        &[
            ("task", &settings.task_time_minutes.to_string()),
            ("break", &settings.break_time_minutes.to_string()),
            ("long", &long.to_string()),
        ],
    )
}
