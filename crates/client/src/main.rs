//! Live Quiz client - terminal entry point.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livequiz_client::infrastructure::messaging::CommandBus;
use livequiz_client::infrastructure::websocket::WebSocketTransport;
use livequiz_client::ui::presentation::UiAction;
use livequiz_client::ui::terminal;
use livequiz_client::{ClientConfig, HostRenderer, PlayerRenderer, Renderer, Role, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "livequiz_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env()?;
    let endpoint = config.endpoint();
    tracing::info!(
        role = ?config.role,
        page = %config.location.url(),
        endpoint = %endpoint,
        "Starting Live Quiz client"
    );

    let transport = Arc::new(WebSocketTransport::new());
    match config.role {
        Role::Host => {
            let session = Session::new(endpoint, config.location, HostRenderer::new(), transport);
            run_role(session).await;
        }
        Role::Player => {
            let session =
                Session::new(endpoint, config.location, PlayerRenderer::new(), transport);
            run_role(session).await;
        }
    }

    Ok(())
}

async fn run_role<R: Renderer>(mut session: Session<R>) {
    let actions: Arc<Mutex<Vec<UiAction>>> = Arc::new(Mutex::new(Vec::new()));

    tracing::info!(session = %session.id(), "Session created");

    let shown = Arc::clone(&actions);
    session.set_on_render(move |page| {
        let screen = terminal::draw(page);
        println!("\n{}", screen.text);
        match shown.lock() {
            Ok(mut actions) => *actions = screen.actions,
            Err(e) => tracing::error!(error = %e, "Action list lock poisoned"),
        }
    });

    tokio::spawn(read_input(session.command_bus(), actions));

    let cause = session.run().await;
    tracing::info!(cause = ?cause, "Session ended, press Ctrl-C to exit");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to wait for Ctrl-C");
    }
}

/// Read `N [input]` lines from stdin and activate the numbered action.
async fn read_input(bus: CommandBus, actions: Arc<Mutex<Vec<UiAction>>>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stdin");
                break;
            }
        };

        let Some((number, input)) = terminal::parse_input(&line) else {
            tracing::warn!(line = %line, "Expected an action number");
            continue;
        };

        let action = match actions.lock() {
            Ok(actions) => actions.get(number - 1).cloned(),
            Err(e) => {
                tracing::error!(error = %e, "Action list lock poisoned");
                None
            }
        };

        match action {
            Some(action) => {
                if let Err(e) = bus.interact(action, input) {
                    tracing::warn!(error = %e, "Failed to queue action");
                }
            }
            None => tracing::warn!(number, "No such action"),
        }
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
