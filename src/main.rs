//! UMS Gateway Client
//!
//! A CLI client for a message broker's HTTP/SOAP gateway (the
//! "Universal Messaging Service" bridge). Sends and receives plain-text
//! or SOAP-encoded messages against named queues and topics.
//!
//! ## Usage
//!
//! ```bash
//! # Send one plain-text message
//! ums-client send -s broker:8080 -d simpleQ -m "Hello"
//!
//! # Send a numbered batch of three
//! ums-client send -s broker:8080 -d simpleQ -m "Hello" -n 3
//!
//! # Receive until Ctrl-C
//! ums-client receive -s broker:8080 -d simpleQ
//!
//! # SOAP variants; -f sends a file as a base64 payload
//! ums-client soap send -s broker:8080 -m "Hello"
//! ums-client soap send -s broker:8080 -f report.pdf
//! ums-client soap receive -s broker:8080 -t -d events
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

mod cli;
mod config;
mod gateway;
mod http;
mod models;
mod output;
mod runner;
mod soap;
mod utils;

use cli::{Args, Command, ConnectArgs, SoapAction};
use config::{ClientConfig, ConfigError};
use runner::{ReceiveRunner, SendRunner};
use utils::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    // Usage errors exit 1; --help and --version exit 0
    let args = Args::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        std::process::exit(code);
    });

    init_logger(args.verbose);

    match args.command {
        Command::Send(send_args) => run_send(send_args).await?,
        Command::Receive(receive_args) => run_receive(receive_args).await?,
        Command::Soap(soap_args) => match soap_args.action {
            SoapAction::Send {
                connect,
                message,
                file,
                count,
            } => run_soap_send(connect, message, file, count).await?,
            SoapAction::Receive { connect, timeout } => {
                run_soap_receive(connect, timeout).await?
            }
        },
    }

    Ok(())
}

async fn run_send(args: cli::SendArgs) -> Result<()> {
    let config = resolve_config(&args.connect, None)?;
    SendRunner::new(config)
        .run_text(&args.message, args.count)
        .await
}

async fn run_receive(args: cli::ReceiveArgs) -> Result<()> {
    let config = resolve_config(&args.connect, args.timeout)?;
    ReceiveRunner::new(config).run_text().await
}

async fn run_soap_send(
    connect: ConnectArgs,
    message: String,
    file: Option<PathBuf>,
    count: u32,
) -> Result<()> {
    let config = resolve_config(&connect, None)?;
    SendRunner::new(config)
        .run_soap(&message, file.as_deref(), count)
        .await
}

async fn run_soap_receive(connect: ConnectArgs, timeout: Option<u64>) -> Result<()> {
    let config = resolve_config(&connect, timeout)?;
    ReceiveRunner::new(config).run_soap().await
}

/// Resolve the effective configuration. A missing server is a usage
/// error: report it with the command usage and exit 1.
fn resolve_config(connect: &ConnectArgs, timeout: Option<u64>) -> Result<ClientConfig> {
    match ClientConfig::resolve(connect, timeout) {
        Ok(config) => Ok(config),
        Err(e @ ConfigError::MissingServer) => {
            eprintln!("error: {e}");
            let mut command = Args::command();
            eprintln!("\n{}", command.render_usage());
            std::process::exit(1);
        }
        Err(ConfigError::Other(e)) => Err(e),
    }
}
