use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    ContactFormController, Frame, HttpContactTransport, SubmitOutcome, TypingEffect, TypingTicker,
};
use shared::protocol::ContactMessage;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Drive the portfolio site's client state machines from a terminal")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print frames of the hero typing animation.
    Roles {
        #[arg(long, default_value_t = 60)]
        frames: usize,
        /// Wait each frame's delay instead of printing immediately.
        #[arg(long)]
        realtime: bool,
        /// Replace the site's role list. Repeat for several roles.
        #[arg(long = "role")]
        roles: Vec<String>,
    },
    /// Submit the contact form to a running API.
    Contact {
        #[arg(long)]
        server_url: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    match args.command {
        Command::Roles {
            frames,
            realtime,
            roles,
        } => {
            let effect = if roles.is_empty() {
                TypingEffect::default()
            } else {
                TypingEffect::new(roles)?
            };
            if realtime {
                play_realtime(effect, frames).await
            } else {
                for frame in effect.take(frames) {
                    print_frame(&frame);
                }
                Ok(())
            }
        }
        Command::Contact {
            server_url,
            name,
            email,
            subject,
            message,
        } => {
            let transport = contact_transport(&server_url)?;
            let controller = ContactFormController::new(transport);
            controller.set_form(ContactMessage {
                name,
                email,
                subject,
                message,
            });
            match controller.submit().await {
                SubmitOutcome::Sent => {
                    println!("Message sent.");
                    Ok(())
                }
                SubmitOutcome::Rejected(field) => bail!("{field} is required"),
                SubmitOutcome::Failed(detail) => bail!("{detail}"),
                SubmitOutcome::Discarded => bail!("submission was abandoned"),
            }
        }
    }
}

fn contact_transport(server_url: &str) -> Result<HttpContactTransport> {
    HttpContactTransport::new(server_url)
        .with_context(|| format!("invalid server url {server_url}"))
}

async fn play_realtime(effect: TypingEffect, frames: usize) -> Result<()> {
    let ticker = TypingTicker::spawn(effect);
    let mut updates = ticker.subscribe();
    for _ in 0..frames {
        updates
            .changed()
            .await
            .context("typing animation stopped unexpectedly")?;
        let frame = updates.borrow_and_update().clone();
        print_frame(&frame);
    }
    ticker.stop();
    Ok(())
}

fn print_frame(frame: &Frame) {
    let cursor = if frame.deleting { '<' } else { '|' };
    println!("[{}] {}{}", frame.role_index, frame.text, cursor);
}
