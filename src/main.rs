//! Rock Drift entry point
//!
//! Headless runner: drives a session with the demo autopilot at a fixed frame
//! rate and keeps the highscore file up to date.

use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use rock_drift::audio::LogAudio;
use rock_drift::highscores::{HighScores, format_date};
use rock_drift::persistence::FileStore;
use rock_drift::platform::Autopilot;
use rock_drift::sim::{GameEvent, TickOutcome};
use rock_drift::{Session, SessionHooks, Settings};

#[derive(Parser, Debug)]
#[command(name = "rock-drift")]
#[command(about = "Wrap-around asteroid shooter: headless session runner")]
struct Cli {
    /// Highscore file
    #[arg(long, default_value = "rock_drift_highscores.json")]
    scores: PathBuf,
    /// Settings file (JSON, any subset of keys)
    #[arg(long)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one session with the autopilot
    Play {
        /// RNG seed (defaults to the wall clock)
        #[arg(long)]
        seed: Option<u64>,
        /// Name recorded on the leaderboard
        #[arg(long, default_value = "")]
        name: String,
        /// Give up after this much simulated time
        #[arg(long, default_value_t = 300)]
        max_seconds: u32,
        #[arg(long, default_value_t = 60)]
        fps: u32,
    },
    /// Print the leaderboard
    Scores,
    /// Write the default settings to the settings path
    InitSettings,
}

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    match cli.command.unwrap_or(Commands::Play {
        seed: None,
        name: String::new(),
        max_seconds: 300,
        fps: 60,
    }) {
        Commands::Play {
            seed,
            name,
            max_seconds,
            fps,
        } => play(&cli.scores, settings, seed, &name, max_seconds, fps),
        Commands::Scores => {
            print_scores(&cli.scores, &settings);
            Ok(())
        }
        Commands::InitSettings => {
            let Some(path) = &cli.settings else {
                bail!("--settings <path> is required for init-settings");
            };
            Settings::default().save(path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn play(
    scores: &Path,
    settings: Settings,
    seed: Option<u64>,
    name: &str,
    max_seconds: u32,
    fps: u32,
) -> Result<()> {
    if fps == 0 {
        bail!("--fps must be positive");
    }
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let (tx, rx) = channel();
    let hooks = SessionHooks::default().with_events(tx).with_audio(LogAudio);
    let mut session = Session::new(settings, seed, Box::new(FileStore::new(scores)), hooks);
    session.set_player_name(name);

    let mut pilot = Autopilot::default();
    let frame_ms = 1000.0 / fps as f32;
    let max_frames = max_seconds as u64 * fps as u64;

    let mut outcome = TickOutcome::Running;
    for _ in 0..max_frames {
        outcome = session.update_from(&mut pilot, frame_ms);
        for event in rx.try_iter() {
            match event {
                GameEvent::LevelChanged(wave) => log::info!("Level: {}", wave),
                GameEvent::LivesChanged(lives) => log::info!("Lives: {}", lives),
                GameEvent::ScoreChanged(score) => log::debug!("Score: {}", score),
                GameEvent::GameOver => log::info!("GAME OVER"),
            }
        }
        if matches!(outcome, TickOutcome::GameOver { .. }) {
            break;
        }
    }

    if !matches!(outcome, TickOutcome::GameOver { .. }) {
        log::info!("Time limit reached, ending session");
        session.abandon();
    }

    println!(
        "Seed {}: score {} on wave {}",
        seed,
        session.score(),
        session.wave().number
    );
    match session.final_rank() {
        Some(rank) => println!("Leaderboard rank #{}", rank),
        None => println!("Did not make the leaderboard"),
    }
    Ok(())
}

fn print_scores(path: &Path, settings: &Settings) {
    let scores = HighScores::load_with_capacity(
        Box::new(FileStore::new(path)),
        settings.highscore_capacity,
    );
    if scores.is_empty() {
        println!("No high scores yet");
        return;
    }
    for (i, entry) in scores.entries().iter().enumerate() {
        println!(
            "{:>2}. {:<8} {:>8}  {}",
            i + 1,
            entry.name,
            entry.score,
            format_date(entry.timestamp)
        );
    }
}
