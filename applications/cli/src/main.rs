/// Encore - voice-channel music player core, from the command line
use clap::{Parser, Subcommand};
use encore_cli::{
    build_resolver, config::EncoreConfig, dry_run::DryRunBackend, find_lyrics, lavalink_version,
};
use encore_core::{CommunityId, RequesterId};
use encore_playback::{format_duration, Jukebox, PlayOutcome, PlaybackError, SessionRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore voice-channel music player core", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./config.toml if present)
    #[arg(short, long, global = true, env = "ENCORE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a query or playlist link and print the playable tracks
    Resolve {
        /// Search phrase, track link or playlist link
        query: String,
        /// Requester id attached to the resolved tracks
        #[arg(short, long, default_value_t = 0)]
        requester: u64,
    },
    /// Feed several queries into a dry-run session and show the resulting queue
    Queue {
        /// Queries, played in order
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Look up lyrics for a song
    Lyrics {
        /// Song title
        title: String,
        /// Artist name
        author: String,
    },
    /// Check that the Lavalink node answers
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "encore=info,encore_playback=info,encore_resolver=info,encore_providers=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = EncoreConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Resolve { query, requester } => {
            resolve(&config, &query, RequesterId::new(requester)).await?;
        }
        Commands::Queue { queries } => {
            queue(&config, &queries).await?;
        }
        Commands::Lyrics { title, author } => {
            lyrics(&config, &title, &author).await?;
        }
        Commands::Check => {
            check(&config).await?;
        }
    }

    Ok(())
}

async fn resolve(config: &EncoreConfig, query: &str, requester: RequesterId) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let tracks = resolver.resolve(query, requester).await?;

    if tracks.is_empty() {
        println!("No playable results for \"{}\"", query);
        return Ok(());
    }

    for (i, track) in tracks.iter().enumerate() {
        println!(
            "{}. {} - {} ({})",
            i + 1,
            track.title(),
            track.author(),
            format_duration(track.duration_ms())
        );
    }
    Ok(())
}

async fn queue(config: &EncoreConfig, queries: &[String]) -> anyhow::Result<()> {
    let community = CommunityId::new(0);
    let registry = Arc::new(SessionRegistry::new(config.session_config()));
    let jukebox = Jukebox::new(Arc::clone(&registry), build_resolver(config)?);
    let backend = Arc::new(DryRunBackend::new(community));

    for query in queries {
        match jukebox
            .play(community, query, RequesterId::new(0), backend.clone())
            .await
        {
            Ok(PlayOutcome::Enqueued { first, total, .. }) if total > 1 => {
                println!("Added {} tracks starting with {}", total, first.title());
            }
            Ok(PlayOutcome::Enqueued { first, .. }) => {
                println!("Added {} - {}", first.title(), first.author());
            }
            Ok(PlayOutcome::SessionEnded) => break,
            Err(PlaybackError::NoResults) => println!("No playable results for \"{}\"", query),
            Err(e) => return Err(e.into()),
        }
    }

    let session = registry.require(community).await?;
    let snapshot = session.snapshot().await?;

    match snapshot.now_playing() {
        Some(card) => println!(
            "\nNow playing: {} - {} [{}] volume {}%",
            card.track.title(),
            card.track.author(),
            card.duration_label(),
            card.volume
        ),
        None => println!("\nNothing playing"),
    }

    let view = snapshot.queue_view(config.playback.queue_page_size);
    if view.is_empty() {
        println!("Queue is empty");
    } else {
        println!("Up next:");
        for line in view.lines() {
            println!("  {}", line);
        }
    }

    registry.stop(community).await?;
    Ok(())
}

async fn lyrics(config: &EncoreConfig, title: &str, author: &str) -> anyhow::Result<()> {
    match find_lyrics(config, title, author).await? {
        Some(found) => println!("{}\n\n{}", found.title, found.text),
        None => println!("Lyrics for \"{}\" could not be found", title),
    }
    Ok(())
}

async fn check(config: &EncoreConfig) -> anyhow::Result<()> {
    let url = config.lavalink.base_url();

    match lavalink_version(config).await {
        Ok(version) => {
            println!("Lavalink at {} is up (version {})", url, version);
            Ok(())
        }
        Err(e) => anyhow::bail!("Lavalink at {} is not reachable: {}", url, e),
    }
}
