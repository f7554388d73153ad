//! `mailbridge` - command-line control of the macOS Mail application.
//!
//! Each subcommand maps 1:1 to one automation operation. Output is
//! human-readable by default; pass `--json` for machine-readable output.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use anyhow::bail;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailbridge_core::{EmailMessage, MailClient, OperationOutcome};
use mailbridge_osa::OsaScriptRunner;

/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "mailbridge",
    version,
    about = "Script the macOS Mail application from the command line"
)]
struct Cli {
    /// Emit JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// One subcommand per automation operation.
#[derive(Subcommand)]
enum Command {
    /// List unread messages from the inbox.
    Unread {
        /// Maximum number of messages (clamped to 20).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List inbox messages whose subject contains a term.
    Search {
        /// Subject fragment to match, case-insensitively.
        term: String,
        /// Maximum number of messages (clamped to 20).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Compose and send a message.
    Send {
        /// Recipient address.
        to: String,
        /// Message subject.
        subject: String,
        /// Message body.
        body: String,
        /// Optional cc address.
        #[arg(long)]
        cc: Option<String>,
        /// Optional bcc address.
        #[arg(long)]
        bcc: Option<String>,
    },
    /// List every mailbox across all accounts.
    Mailboxes,
    /// List configured accounts.
    Accounts,
    /// List the mailboxes of one account.
    AccountMailboxes {
        /// Account name as shown in Mail.
        account: String,
    },
    /// List the latest messages of one account.
    Latest {
        /// Account name as shown in Mail.
        account: String,
        /// Maximum number of messages (clamped to 20).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Probe automation access, printing remediation steps when denied.
    Access,
    /// Archive the first message matching a subject and sender.
    Archive {
        /// Account name as shown in Mail.
        account: String,
        /// Subject fragment to match.
        subject: String,
        /// Sender fragment to match.
        sender: String,
    },
    /// Move the first matching message to the trash.
    Delete {
        /// Account name as shown in Mail.
        account: String,
        /// Subject fragment to match.
        subject: String,
        /// Sender fragment to match.
        sender: String,
    },
    /// Mark the first matching message as read.
    MarkRead {
        /// Account name as shown in Mail.
        account: String,
        /// Subject fragment to match.
        subject: String,
        /// Sender fragment to match.
        sender: String,
    },
    /// Check whether a message received a reply from this account.
    Replied {
        /// Account name as shown in Mail.
        account: String,
        /// Subject of the original message.
        subject: String,
        /// Sender of the original message.
        sender: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailbridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    debug!("starting mailbridge");
    let client: MailClient<OsaScriptRunner> = MailClient::new();

    match cli.command {
        Command::Unread { limit } => {
            print_messages(&client.get_unread_mails(limit).await, cli.json)
        }
        Command::Search { term, limit } => {
            print_messages(&client.search_mails(&term, limit).await, cli.json)
        }
        Command::Send {
            to,
            subject,
            body,
            cc,
            bcc,
        } => {
            let confirmation = client
                .send_mail(&to, &subject, &body, cc.as_deref(), bcc.as_deref())
                .await?;
            print_line(&confirmation, cli.json)
        }
        Command::Mailboxes => print_names(&client.get_mailboxes().await, cli.json),
        Command::Accounts => print_names(&client.get_accounts().await, cli.json),
        Command::AccountMailboxes { account } => {
            print_names(&client.get_mailboxes_for_account(&account).await, cli.json)
        }
        Command::Latest { account, limit } => {
            print_messages(&client.get_latest_mails(&account, limit).await, cli.json)
        }
        Command::Access => {
            let status = client.request_access().await;
            print_json_or(&status, cli.json, &status.message)?;
            if !status.granted {
                bail!("automation access denied");
            }
            Ok(())
        }
        Command::Archive {
            account,
            subject,
            sender,
        } => print_outcome(&client.archive_email(&account, &subject, &sender).await, cli.json),
        Command::Delete {
            account,
            subject,
            sender,
        } => print_outcome(&client.delete_email(&account, &subject, &sender).await, cli.json),
        Command::MarkRead {
            account,
            subject,
            sender,
        } => print_outcome(&client.mark_as_read(&account, &subject, &sender).await, cli.json),
        Command::Replied {
            account,
            subject,
            sender,
        } => {
            let status = client.check_if_replied(&account, &subject, &sender).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else if let Some(date) = &status.reply_sent_at {
                println!("Replied on {date}");
            } else {
                println!("{}", status.message);
            }
            Ok(())
        }
    }
}

fn print_messages(messages: &[EmailMessage], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(messages)?);
        return Ok(());
    }
    if messages.is_empty() {
        println!("No messages.");
        return Ok(());
    }
    for message in messages {
        let marker = if message.is_read { ' ' } else { '*' };
        println!(
            "{marker} [{}] {} from {} ({})",
            message.mailbox, message.subject, message.sender, message.date_sent
        );
        println!("    {}", message.content);
    }
    Ok(())
}

fn print_names(names: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(names)?);
    } else if names.is_empty() {
        println!("Nothing found.");
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

fn print_line(line: &str, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&line)?);
    } else {
        println!("{line}");
    }
    Ok(())
}

fn print_outcome(outcome: &OperationOutcome, json: bool) -> anyhow::Result<()> {
    print_json_or(outcome, json, &outcome.message)?;
    if !outcome.success {
        bail!("operation failed");
    }
    Ok(())
}

fn print_json_or<T: Serialize>(value: &T, json: bool, plain: &str) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{plain}");
    }
    Ok(())
}
