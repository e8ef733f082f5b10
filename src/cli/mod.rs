//! CLI argument parsing
//!
//! Defines the command-line interface using clap. All subcommands share
//! the same connection flags; defaults that come from the environment or
//! a config file are applied later by the config resolver, so optional
//! flags stay `None` here when not given.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Domain;

/// Universal Messaging Service gateway client
#[derive(Parser, Debug)]
#[command(name = "ums-client")]
#[command(version = "0.1.0")]
#[command(about = "Send and receive messages through a UMS HTTP/SOAP gateway")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send plain-text messages
    Send(SendArgs),

    /// Receive plain-text messages until interrupted
    Receive(ReceiveArgs),

    /// Exchange SOAP-encoded messages
    Soap(SoapArgs),
}

/// Connection flags shared by every subcommand
#[derive(Parser, Debug, Clone)]
pub struct ConnectArgs {
    /// Gateway server host:port [env fallback: UMS_SERVER]
    #[arg(short = 's', long)]
    pub server: Option<String>,

    /// Destination name [default: simpleQ]
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Address the destination as a queue (the default)
    #[arg(short, long, overrides_with = "topic")]
    pub queue: bool,

    /// Address the destination as a topic
    #[arg(short, long, overrides_with = "queue")]
    pub topic: bool,

    /// User name [default: guest]
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password [default: guest]
    #[arg(short, long)]
    pub password: Option<String>,

    /// Config file (YAML or JSON) with connection settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConnectArgs {
    /// Domain selected on the command line, if either flag was given.
    /// `-q` and `-t` are mutually exclusive with last-wins semantics.
    pub fn domain(&self) -> Option<Domain> {
        if self.topic {
            Some(Domain::Topic)
        } else if self.queue {
            Some(Domain::Queue)
        } else {
            None
        }
    }
}

/// Arguments for the plain-text send command
#[derive(Parser, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Message text to send
    #[arg(short, long, default_value = "Hello, UMS!")]
    pub message: String,

    /// Number of messages to send
    #[arg(short = 'n', long = "count", default_value = "1")]
    pub count: u32,
}

/// Arguments for the plain-text receive command
#[derive(Parser, Debug)]
pub struct ReceiveArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Server-side poll timeout in milliseconds [default: 15000]
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the SOAP commands
#[derive(Parser, Debug)]
pub struct SoapArgs {
    #[command(subcommand)]
    pub action: SoapAction,
}

#[derive(Subcommand, Debug)]
pub enum SoapAction {
    /// Send SOAP-encoded text messages or one file
    Send {
        #[command(flatten)]
        connect: ConnectArgs,

        /// Message text to send
        #[arg(short, long, default_value = "Hello, UMS!")]
        message: String,

        /// File to send as a base64-encoded payload instead of text
        #[arg(short, long, conflicts_with = "message")]
        file: Option<PathBuf>,

        /// Number of messages to send (text only)
        #[arg(short = 'n', long = "count", default_value = "1")]
        count: u32,
    },

    /// Receive SOAP-encoded messages until interrupted
    Receive {
        #[command(flatten)]
        connect: ConnectArgs,

        /// Server-side poll timeout in milliseconds [default: 15000]
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_args_parsing() {
        let args = Args::parse_from([
            "ums-client",
            "send",
            "-s",
            "broker:8080",
            "-d",
            "q1",
            "-m",
            "hi",
            "-n",
            "3",
        ]);
        match args.command {
            Command::Send(send) => {
                assert_eq!(send.connect.server.as_deref(), Some("broker:8080"));
                assert_eq!(send.connect.destination.as_deref(), Some("q1"));
                assert_eq!(send.message, "hi");
                assert_eq!(send.count, 3);
            }
            _ => panic!("Expected Send command"),
        }
    }

    #[test]
    fn test_domain_flags_last_wins() {
        let args = Args::parse_from(["ums-client", "receive", "-s", "h:1", "-q", "-t"]);
        match args.command {
            Command::Receive(receive) => {
                assert_eq!(receive.connect.domain(), Some(Domain::Topic));
            }
            _ => panic!("Expected Receive command"),
        }

        let args = Args::parse_from(["ums-client", "receive", "-s", "h:1", "-t", "-q"]);
        match args.command {
            Command::Receive(receive) => {
                assert_eq!(receive.connect.domain(), Some(Domain::Queue));
            }
            _ => panic!("Expected Receive command"),
        }
    }

    #[test]
    fn test_domain_unset_without_flags() {
        let args = Args::parse_from(["ums-client", "send", "-s", "h:1"]);
        match args.command {
            Command::Send(send) => assert_eq!(send.connect.domain(), None),
            _ => panic!("Expected Send command"),
        }
    }

    #[test]
    fn test_soap_send_file_conflicts_with_message() {
        let result = Args::try_parse_from([
            "ums-client",
            "soap",
            "send",
            "-s",
            "h:1",
            "-m",
            "hi",
            "-f",
            "notes.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_soap_receive_parsing() {
        let args = Args::parse_from([
            "ums-client",
            "soap",
            "receive",
            "-s",
            "broker:8080",
            "--timeout",
            "2000",
        ]);
        match args.command {
            Command::Soap(soap) => match soap.action {
                SoapAction::Receive { connect, timeout } => {
                    assert_eq!(connect.server.as_deref(), Some("broker:8080"));
                    assert_eq!(timeout, Some(2000));
                }
                _ => panic!("Expected soap receive"),
            },
            _ => panic!("Expected Soap command"),
        }
    }

    #[test]
    fn test_malformed_flags_are_rejected() {
        assert!(Args::try_parse_from(["ums-client", "send", "--bogus"]).is_err());
        assert!(Args::try_parse_from(["ums-client", "send", "-n", "many"]).is_err());
    }
}
