/// Rock 'em All - terminal player
use clap::{Parser, Subcommand};
use rockem_cli::{commands::HELP, load_songs, CliConfig, ConsoleEngine, ConsoleNotifier, Session};
use rockem_core::Song;
use rockem_playback::{Player, QueueManager};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rockem")]
#[command(about = "Rock 'em All terminal player", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue a song list and start the interactive player
    Play {
        /// Song list (JSON array as served by GET /songs)
        #[arg(short, long, env = "ROCKEM_SONGS")]
        songs: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration and initial queue as JSON
    Info {
        /// Song list (JSON array as served by GET /songs)
        #[arg(short, long, env = "ROCKEM_SONGS")]
        songs: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr, so it never interleaves with player output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rockem=info,rockem_cli=info,rockem_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { songs, config } => play(songs, config)?,
        Commands::Info { songs, config } => info(songs, config)?,
    }

    Ok(())
}

fn load(songs: Option<PathBuf>, config: Option<PathBuf>) -> anyhow::Result<(CliConfig, Vec<Song>)> {
    let mut config = CliConfig::load(config.as_deref())?;
    if songs.is_some() {
        config.player.songs_file = songs;
    }
    config.validate()?;

    let library = match &config.player.songs_file {
        Some(path) => load_songs(path)?,
        None => {
            tracing::warn!("No songs file configured, starting with an empty library");
            Vec::new()
        }
    };

    Ok((config, library))
}

fn queue_for(config: &CliConfig, library: &[Song]) -> QueueManager {
    let mut queue = QueueManager::new(config.queue.clone());
    queue.add_to_queue(library.iter().cloned());
    queue
}

fn play(songs: Option<PathBuf>, config: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, library) = load(songs, config)?;

    tracing::info!("Starting Rock 'em All player");
    tracing::info!("API: {}", config.player.api_base_url);

    let queue = queue_for(&config, &library);
    let engine = ConsoleEngine::new(config.player.api_base_url.clone(), io::stdout());
    let notifier = ConsoleNotifier::new(io::stdout());
    let player = Player::new(queue, engine, notifier);

    println!("{}", HELP);
    let mut session = Session::new(player, library, config.player.api_base_url, io::stdout());
    session.run(io::stdin().lock())?;

    Ok(())
}

fn info(songs: Option<PathBuf>, config: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, library) = load(songs, config)?;
    let queue = queue_for(&config, &library);

    let report = serde_json::json!({
        "config": config,
        "queue": queue.get_queue_info(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
