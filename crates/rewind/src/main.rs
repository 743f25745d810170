//! Rewind - undo/redo over snapshot histories.
//!
//! Replays editor or game operations against a history and prints the
//! state after each step.

mod editor;
mod game;
mod ops;

use anyhow::Context;
use clap::{Parser, Subcommand};
use editor::{EditorOp, EditorOutcome, EditorSession};
use game::{GameOp, GameOutcome, GameSession};
use rewind_history::HistoryConfig;
use rewind_util::log::{self, LogConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "rewind")]
#[command(author, version, about = "Undo/redo over snapshot histories", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file applied on top of global and project config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory to look for rewind.json in (defaults to the current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit text with undo and redo
    Editor {
        /// Operations: insert=TEXT, replace=TEXT, cursor=N, commit, undo, redo
        ops: Vec<EditorOp>,
    },
    /// Play a game with save points
    Game {
        /// Operations: play=LEVEL,HEALTH,POSITION, save, restore
        ops: Vec<GameOp>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli).await?;
    log::init(LogConfig::for_cli(cli.verbose, config.log_level.as_deref()));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Editor { ops } => run_editor(ops, &config, &mut out),
        Commands::Game { ops } => run_game(ops, &mut out),
    }
}

async fn load_config(cli: &Cli) -> anyhow::Result<HistoryConfig> {
    let project_dir = match &cli.project {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let (mut config, _sources) = HistoryConfig::load(Some(&project_dir))
        .await
        .context("Failed to load configuration")?;

    if let Some(path) = &cli.config {
        let explicit = HistoryConfig::load_file(path)
            .await
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        config = config.merge(explicit);
    }

    Ok(config)
}

fn run_editor(
    ops: Vec<EditorOp>,
    config: &HistoryConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let (initial, ops) = if ops.is_empty() {
        editor::default_script()
    } else {
        (editor::EditorSnapshot::new("", 0, false), ops)
    };

    let mut session = EditorSession::new(initial, config)?;
    writeln!(out, "initial state\n{}", session.editor().state())?;

    for op in &ops {
        let outcome = session.apply(op);
        let heading = match outcome {
            EditorOutcome::Saved => format!("after {:?}", op),
            EditorOutcome::Undone => "after undo".to_string(),
            EditorOutcome::Redone => "after redo".to_string(),
            EditorOutcome::NothingToUndo => "nothing to undo".to_string(),
            EditorOutcome::NothingToRedo => "nothing to redo".to_string(),
        };
        writeln!(out, "{}\n{}", heading, session.editor().state())?;
    }

    let history = session.history();
    info!(
        snapshots = history.len(),
        cursor = ?history.cursor(),
        "Editor session finished"
    );
    Ok(())
}

fn run_game(ops: Vec<GameOp>, out: &mut impl Write) -> anyhow::Result<()> {
    let (game, ops) = if ops.is_empty() {
        game::default_script()
    } else {
        (game::Game::new(1, 100, "Start"), ops)
    };

    let mut session = GameSession::new(game);
    writeln!(out, "playing\n{}", session.game())?;

    for op in &ops {
        match session.apply(op) {
            GameOutcome::Played => writeln!(out, "playing\n{}", session.game())?,
            GameOutcome::Saved => {
                if let Some(saved) = session.saves().peek() {
                    writeln!(
                        out,
                        "progress saved: level {}, health {}, {}",
                        saved.level(),
                        saved.health(),
                        saved.position()
                    )?;
                }
            }
            GameOutcome::Restored => writeln!(out, "progress restored\n{}", session.game())?,
            GameOutcome::NothingToRestore => writeln!(out, "no saved progress")?,
        }
    }

    info!(saves = session.saves().len(), "Game session finished");
    Ok(())
}
