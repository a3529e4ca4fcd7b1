use super::common::acknowledge;
use anyhow::Result;
use tomate_protocol::Request;

pub async fn start() -> Result<()> {
    acknowledge(Request::Start, "command.start_success").await
}

pub async fn pause() -> Result<()> {
    acknowledge(Request::Pause, "command.pause_success").await
}

pub async fn resume() -> Result<()> {
    acknowledge(Request::Resume, "command.resume_success").await
}

pub async fn stop() -> Result<()> {
    acknowledge(Request::Stop, "command.stop_success").await
}

pub async fn next() -> Result<()> {
    acknowledge(Request::AdvanceStage, "command.next_success").await
}
