//! Solace terminal client - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Build the application session (navigation, dashboard, reply service)
//! 3. Follow each conversation with a `ViewportSync` printing to stdout
//! 4. Read commands and chat input from stdin until `/quit` or EOF

mod cli;
mod command;
mod render;
mod session;

use clap::Parser;
use tracing_subscriber::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use uuid::Uuid;

use solace_chat::{ChatError, ConversationView, ViewportSync};
use solace_core::types::Tab;

use cli::CliArgs;
use command::{Command, DrawerAction};
use render::TerminalHost;
use session::AppSession;

/// The conversation currently mirrored to the terminal.
struct Follower {
    session_id: Uuid,
    task: JoinHandle<u64>,
}

fn follow(view: ConversationView) -> Follower {
    let events = view.subscribe();
    let host = TerminalHost::new(view.clone(), |line: &str| println!("{}", line));
    let sync = ViewportSync::new(host, &view);
    Follower {
        session_id: view.session_id(),
        task: tokio::spawn(sync.run(events, view)),
    }
}

/// Start following the session's conversation if it is new.
fn refresh_follower(session: &AppSession, follower: &mut Option<Follower>) {
    let current = session.conversation_view();
    let same = match (&current, follower.as_ref()) {
        (Some(view), Some(f)) => view.session_id() == f.session_id,
        (None, None) => true,
        _ => false,
    };
    if same {
        return;
    }
    // The previous task ends on its own once its session closes.
    *follower = current.map(follow);
}

/// Apply one command. Returns `false` when the client should exit.
fn execute(session: &mut AppSession, command: Command) -> bool {
    match command {
        Command::Nothing => {}
        Command::Help => println!("{}", command::HELP),
        Command::Quit => return false,
        Command::Tab(tab) => {
            session.select_tab(tab);
            println!("{}", render::render_panel(session));
        }
        Command::Drawer(action) => {
            match action {
                DrawerAction::Open => {
                    session.open_drawer();
                }
                DrawerAction::Close => {
                    session.close_drawer();
                }
                DrawerAction::Toggle => {
                    session.toggle_drawer();
                }
            }
            println!("{}", render::render_navigation(session));
        }
        Command::Viewport(mode) => {
            session.set_viewport(mode);
            println!("{}", render::render_navigation(session));
        }
        Command::Voice => {
            if let Err(e) = session.voice().start_listening() {
                println!("{}", e);
            }
        }
        Command::End => {
            if session.end_session() {
                println!("Conversation ended.");
            } else {
                println!("No conversation in progress.");
            }
        }
        Command::Say(text) => {
            if session.active_tab() != Tab::Chat {
                println!("Open the chat with /tab chat to talk to the assistant.");
            } else {
                match session.submit_user_message(&text) {
                    Ok(index) => tracing::debug!(sequence_index = index.0, "Submitted"),
                    Err(ChatError::SessionClosed) => {
                        println!("The conversation has ended. Use /tab chat to start again.")
                    }
                    Err(e) => println!("{}", e),
                }
            }
        }
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing. The config file's level is applied once it has been read.
    let from_env = tracing_subscriber::EnvFilter::try_from_default_env().ok();
    let env_set = from_env.is_some();
    let initial = from_env.unwrap_or_else(|| {
        tracing_subscriber::EnvFilter::new(args.log_level.as_deref().unwrap_or("info"))
    });
    let (filter, filter_handle) = tracing_subscriber::reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Solace v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = args.resolve_config_path();
    let config = args.effective_config(&config_file);
    if !env_set {
        let level = args.resolve_log_level(&config);
        if let Err(e) = filter_handle.reload(tracing_subscriber::EnvFilter::new(&level)) {
            tracing::warn!(error = %e, "Failed to apply configured log level");
        }
    }

    if args.write_config {
        config.save(&config_file)?;
        println!("Wrote {}", config_file.display());
        return Ok(());
    }

    let mut session = AppSession::new(config)?;
    let mut follower = None;
    refresh_follower(&session, &mut follower);

    println!("{}", render::render_panel(&session));
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let keep_going = match command::parse(&line) {
            Ok(command) => execute(&mut session, command),
            Err(e) => {
                println!("{}", e);
                true
            }
        };
        if !keep_going {
            break;
        }
        refresh_follower(&session, &mut follower);
    }

    session.end_session();
    if let Some(follower) = follower {
        match follower.task.await {
            Ok(requests) => tracing::debug!(requests, "Viewport follower finished"),
            Err(e) => tracing::warn!(error = %e, "Viewport follower failed"),
        }
    }
    tracing::info!("Solace shut down");
    Ok(())
}
