mod command;
mod render;

use anyhow::Result;
use command::Command;
use pdf_query_client::{ApiService, Config, RequestFlowController, SelectedFile};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let api = Arc::new(ApiService::new(config));
    let controller = RequestFlowController::new(api.clone());

    match api.health().await {
        Ok(health) => log::info!("Backend at {} is {}", api.config().base_url, health.status),
        Err(e) => log::warn!("Backend at {} is not reachable: {}", api.config().base_url, e),
    }

    println!("PDF Query Assistant");
    println!("Upload a PDF and ask questions about its content. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match command::parse(&line) {
            Command::Quit => break,
            Command::Empty => continue,
            Command::Help => {
                println!("{}", command::HELP);
                continue;
            }
            Command::Invalid(message) => {
                println!("{}", message);
                continue;
            }
            command => run(&controller, command).await,
        }

        print!("{}", render::render(&controller.snapshot().await));
    }

    Ok(())
}

/// Errors are already recorded in the session state, so the rendered view shows them.
async fn run(controller: &RequestFlowController, command: Command) {
    let outcome = match command {
        Command::Select(path) => match SelectedFile::from_path(&path).await {
            Ok(file) => controller.select_file(file).await.map(|_| ()),
            Err(e) => {
                println!("Cannot read {}: {}", path.display(), e);
                Ok(())
            }
        },
        Command::Upload => controller.submit_upload().await.map(|_| ()),
        Command::Ask(text) => {
            controller.set_query_text(&text).await;
            controller.submit_query(&text).await.map(|_| ())
        }
        Command::Clear => {
            controller.clear_conversation().await;
            Ok(())
        }
        _ => Ok(()),
    };

    if let Err(e) = outcome {
        log::debug!("Command failed: {}", e);
    }
}
