//! chessmate command line
//!
//! Every invocation opens the database, performs one operation through the
//! game service and prints the result as JSON.

mod cli;

use anyhow::{Context, Result};
use backend::{BackendConfig, GameService, GameView, MoveResponse, PieceDetailView, ServiceError, SqliteStore};
use chess_rules::PieceId;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = BackendConfig::from_env().context("invalid configuration")?;
    if let Some(url) = cli.database {
        config.database_url = url;
    }

    let store = SqliteStore::connect(&config)
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;
    let service = GameService::new(store);

    match cli.command {
        Command::New { name, white } => {
            let record = service.create_game(&name, white).await?;
            print_json(&GameView::from(&record))?;
        }
        Command::Join { game, black } => {
            let record = service.join_game(game, black).await?;
            print_json(&GameView::from(&record))?;
        }
        Command::Move {
            game,
            player,
            piece,
            x,
            y,
        } => match service.make_move(game, player, PieceId(piece), x, y).await {
            Ok(report) => {
                info!("[CLI] Move accepted, game is now {}", report.status);
                print_json(&MoveResponse::accepted(&report))?;
            }
            Err(ServiceError::Rejected(rejection)) => {
                warn!("[CLI] Move rejected: {}", rejection);
                print_json(&MoveResponse::rejected(&rejection))?;
            }
            Err(other) => return Err(other.into()),
        },
        Command::Show { game, piece: None } => {
            let record = service.show_game(game).await?;
            print_json(&GameView::from(&record))?;
        }
        Command::Show {
            game,
            piece: Some(piece),
        } => {
            let (piece, record) = service.show_piece(game, PieceId(piece)).await?;
            print_json(&PieceDetailView::new(&piece, &record))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
