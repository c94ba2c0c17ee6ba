/// SoundVault - command-line client for a SoundVault server
use clap::{Parser, Subcommand};
use soundvault_client::SoundVaultClient;
use soundvault_storage::SqliteCredentialStore;
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "soundvault")]
#[command(about = "Browse and curate a SoundVault sound library", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./soundvault.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a username or email address
    Login {
        /// Username or email
        identifier: String,
        /// Password
        #[arg(short, long, env = "SOUNDVAULT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "SOUNDVAULT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget stored credentials
    Logout,
    /// Exchange the stored refresh token for a new access token
    Refresh,
    /// Show the signed-in user
    Whoami,
    /// Browse and manage sounds
    Sounds {
        #[command(subcommand)]
        command: SoundCommands,
    },
    /// Browse and manage tags
    Tags {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Read and write comments
    Comments {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Manage your favorites
    Favorites {
        #[command(subcommand)]
        command: FavoriteCommands,
    },
}

#[derive(Subcommand)]
enum SoundCommands {
    /// List sounds
    List {
        /// Only sounds with this tag
        #[arg(long)]
        tag: Option<String>,
        /// Free-text search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one sound with its recent comments
    Get { id: i64 },
    /// Upload a new sound (admin)
    Upload {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Audio file
        #[arg(long)]
        audio: PathBuf,
        /// Cover image
        #[arg(long)]
        image: Option<PathBuf>,
        /// Comma-separated tag names
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a sound (admin)
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum TagCommands {
    /// List tags
    List,
    /// Create a tag (admin)
    Create { name: String },
    /// Delete a tag (admin)
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum CommentCommands {
    /// List comments on a sound
    List { sound_id: i64 },
    /// Comment on a sound
    Add { sound_id: i64, content: String },
    /// Delete a comment
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum FavoriteCommands {
    /// List favorited sounds
    List,
    /// Favorite a sound
    Add { sound_id: i64 },
    /// Remove a sound from favorites
    Remove { sound_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soundvault=info,soundvault_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }

    let store = SqliteCredentialStore::open(&config.credentials_db, config.namespace.clone()).await?;
    let client = SoundVaultClient::new(config.client_config(), Arc::new(store))?;
    tracing::debug!(base_url = %client.base_url(), "Client ready");

    client.session().bootstrap().await;

    match cli.command {
        Commands::Login {
            identifier,
            password,
        } => commands::login(&client, &identifier, &password).await?,
        Commands::Register {
            username,
            email,
            password,
        } => commands::register(&client, &username, &email, &password).await?,
        Commands::Logout => commands::logout(&client).await,
        Commands::Refresh => commands::refresh(&client).await?,
        Commands::Whoami => commands::whoami(&client)?,
        Commands::Sounds { command } => match command {
            SoundCommands::List { tag, search } => {
                commands::list_sounds(&client, tag, search).await?;
            }
            SoundCommands::Get { id } => commands::show_sound(&client, id).await?,
            SoundCommands::Upload {
                name,
                description,
                audio,
                image,
                tags,
            } => {
                let upload = commands::Upload {
                    name,
                    description,
                    audio,
                    image,
                    tags,
                };
                commands::upload_sound(&client, upload).await?;
            }
            SoundCommands::Delete { id } => commands::delete_sound(&client, id).await?,
        },
        Commands::Tags { command } => match command {
            TagCommands::List => commands::list_tags(&client).await?,
            TagCommands::Create { name } => commands::create_tag(&client, &name).await?,
            TagCommands::Delete { id } => commands::delete_tag(&client, id).await?,
        },
        Commands::Comments { command } => match command {
            CommentCommands::List { sound_id } => commands::list_comments(&client, sound_id).await?,
            CommentCommands::Add { sound_id, content } => {
                commands::add_comment(&client, sound_id, &content).await?;
            }
            CommentCommands::Delete { id } => commands::delete_comment(&client, id).await?,
        },
        Commands::Favorites { command } => match command {
            FavoriteCommands::List => commands::list_favorites(&client).await?,
            FavoriteCommands::Add { sound_id } => commands::add_favorite(&client, sound_id).await?,
            FavoriteCommands::Remove { sound_id } => {
                commands::remove_favorite(&client, sound_id).await?;
            }
        },
    }

    Ok(())
}
