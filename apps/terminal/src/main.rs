use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ClientEvent, ClientState, GameClient, InputOutcome, InputState};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::warn;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Play two-player Yacht against a game server")]
struct Args {
    #[arg(long, default_value = "127.0.0.1:8888")]
    server_addr: String,
    #[arg(long, default_value = "warn")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let (client, mut events) = GameClient::connect(&args.server_addr)
        .await
        .with_context(|| format!("could not reach the game server at {}", args.server_addr))?;
    println!("Connected to {}", args.server_addr);

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut state = ClientState::new();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(ClientEvent::Server(event)) => {
                    state.apply_event(&event);
                    print!("{}", render::event(&state, &event));
                    if state.input() == InputState::Finished {
                        break;
                    }
                }
                Ok(ClientEvent::Error(message)) => eprintln!("ignoring bad server message: {message}"),
                Ok(ClientEvent::Disconnected) | Err(RecvError::Closed) => {
                    println!("\nDisconnected from the server.");
                    break;
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "dropped server events"),
            },
            line = stdin.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match state.handle_input(&line) {
                    InputOutcome::Send(request) => client.send(&request)?,
                    InputOutcome::ChooseCategory => print!("{}", render::category_prompt(&state)),
                    InputOutcome::Invalid(message) => print!(">>> {message}: "),
                    InputOutcome::Ignored => {}
                }
            }
        }
        std::io::stdout().flush().context("failed to flush stdout")?;
    }

    Ok(())
}
