use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use shopping_list::client::{HttpTransport, ListEditor, PasswordCookie};
use shopping_list::types::default_items;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "shopping-list-client")]
#[command(about = "Check off shopping list items and send them to the server")]
struct Cli {
    /// Base URL of the shopping list server
    #[arg(long, default_value = "http://localhost:8000")]
    server: String,

    /// Where the last accepted password is remembered
    #[arg(long, default_value = "shopping-list.cookie.json")]
    cookie: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default list
    Items,

    /// Select items by name and submit them
    Send {
        /// Extra items to append to the list before selecting
        #[arg(long = "add")]
        add: Vec<String>,

        /// Admin password; falls back to the remembered one
        #[arg(long, env = "SHOPPING_LIST_PASSWORD")]
        password: Option<String>,

        /// Names of the items to select
        #[arg(required = true)]
        select: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Items => {
            for item in default_items() {
                println!("{}", item.name);
            }
            Ok(())
        }
        Commands::Send {
            add,
            password,
            select,
        } => run_send(&cli.server, cli.cookie, add, password, select).await,
    }
}

async fn run_send(
    server: &str,
    cookie: PathBuf,
    add: Vec<String>,
    password: Option<String>,
    select: Vec<String>,
) -> Result<()> {
    let mut cookie = PasswordCookie::new(cookie);
    let mut editor = ListEditor::new();
    editor.restore_password(&cookie);
    if let Some(password) = password {
        editor.set_password(password);
    }

    for name in &add {
        if editor.add_item(name).is_none() {
            bail!("Item names must not be blank");
        }
    }

    for name in &select {
        if editor.selected_names().iter().any(|selected| selected == name.trim()) {
            continue;
        }
        editor
            .toggle_by_name(name.trim())
            .with_context(|| format!("No item named {name:?} in the list"))?;
    }

    let transport = HttpTransport::new(server);
    editor
        .submit(&transport, &mut cookie)
        .await
        .context("Submission failed")?;

    println!("Sent: {}", select.join(", "));
    Ok(())
}
