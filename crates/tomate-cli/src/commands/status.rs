use super::common::{get_translator, send};
use crate::client::DaemonClient;
use anyhow::{bail, Result};
use serde::Serialize;
use std::time::Duration;
use tomate_core::{Sprint, Stage, TimerStatus, TimerView, Translator};
use tomate_protocol::{Request, Response};

const WATCH_INTERVAL: Duration = Duration::from_millis(250);
const WATCH_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Serialize)]
struct StatusOutput<'a> {
    status: TimerStatus,
    stage: Stage,
    sprint: u8,
    delta_seconds: i64,
    overflow: bool,
    formatted: &'a str,
}

pub async fn execute(json: bool, watch: bool) -> Result<()> {
    let translator = get_translator();

    if !watch {
        let view = fetch_view(&DaemonClient::new(), &translator).await?;
        return print_view(&view, json, &translator);
    }

    let client = DaemonClient::new().with_timeout(WATCH_TIMEOUT);
    let mut interval = tokio::time::interval(WATCH_INTERVAL);
    let mut last_shown: Option<TimerView> = None;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let view = fetch_view(&client, &translator).await?;
                if last_shown.as_ref() != Some(&view) {
                    print_view(&view, json, &translator)?;
                    last_shown = Some(view);
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

async fn fetch_view(client: &DaemonClient, translator: &Translator) -> Result<TimerView> {
    match send(client, Request::GetStatus, translator).await? {
        Response::Status(view) => Ok(view),
        _ => bail!("{}", translator.get("error.unexpected_response")),
    }
}

fn print_view(view: &TimerView, json: bool, translator: &Translator) -> Result<()> {
    if json {
        let output = StatusOutput {
            status: view.status,
            stage: view.timing.stage,
            sprint: view.timing.sprint.index(),
            delta_seconds: view.timing.delta_seconds,
            overflow: view.overflow,
            formatted: &view.formatted,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", render(view, translator));
    }
    Ok(())
}

fn render(view: &TimerView, translator: &Translator) -> String {
    let status = translator.get(&format!("status.{}", view.status.as_str()));
    let stage = translator.get(&format!("stage.{}", view.timing.stage.as_str()));
    let sprint = translator.format(
        "view.sprint",
        &[
            ("current", &(view.timing.sprint.index() + 1).to_string()),
            ("total", &Sprint::COUNT.to_string()),
        ],
    );
    let label = if view.overflow {
        translator.get("view.overtime")
    } else {
        translator.get("view.remaining")
    };

    format!(
        "{}\n   {} · {}\n   {}: {}",
        status, stage, sprint, label, view.formatted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomate_core::{Language, TimingInfo};

    fn view(delta_seconds: i64, stage: Stage, sprint: u8, status: TimerStatus) -> TimerView {
        TimerView::new(
            TimingInfo {
                delta_seconds,
                stage,
                sprint: Sprint::new(sprint).unwrap(),
            },
            status,
        )
    }

    #[test]
    fn renders_running_task() {
        let translator = Translator::new(Language::En);

        let text = render(&view(1453, Stage::Task, 0, TimerStatus::Running), &translator);

        assert_eq!(text, "🟢 Running\n   Task · Sprint 1/4\n   Remaining: 24:13");
    }

    #[test]
    fn renders_overtime_break() {
        let translator = Translator::new(Language::En);

        let text = render(&view(-65, Stage::Break, 3, TimerStatus::Paused), &translator);

        assert_eq!(text, "⏸️  Paused\n   Break · Sprint 4/4\n   Overtime: 01:05");
    }

    #[test]
    fn renders_in_french() {
        let translator = Translator::new(Language::Fr);

        let text = render(&view(300, Stage::Break, 1, TimerStatus::Ready), &translator);

        assert_eq!(text, "⚪ Prêt\n   Pause · Sprint 2/4\n   Temps restant: 05:00");
    }

    #[test]
    fn json_output_uses_lowercase_names() {
        let view = view(-5, Stage::Task, 2, TimerStatus::Running);
        let output = StatusOutput {
            status: view.status,
            stage: view.timing.stage,
            sprint: view.timing.sprint.index(),
            delta_seconds: view.timing.delta_seconds,
            overflow: view.overflow,
            formatted: &view.formatted,
        };

        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["status"], "running");
        assert_eq!(json["stage"], "task");
        assert_eq!(json["sprint"], 2);
        assert_eq!(json["overflow"], true);
        assert_eq!(json["formatted"], "00:05");
    }
}
