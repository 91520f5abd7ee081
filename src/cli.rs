//! Command line definition

use chess_rules::GameId;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chessmate", version, about = "Play correspondence chess against a SQLite file")]
pub struct Cli {
    /// Overrides DATABASE_URL
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create a game with yourself in the white seat
    New {
        #[arg(long)]
        name: String,
        /// Player id of the white player
        #[arg(long)]
        white: i64,
    },
    /// Take the black seat and start the game
    Join {
        game: GameId,
        #[arg(long)]
        black: i64,
    },
    /// Move one of your pieces
    Move {
        game: GameId,
        #[arg(long)]
        player: i64,
        /// Piece id as shown by `show`
        #[arg(long)]
        piece: u32,
        #[arg(long)]
        x: u8,
        #[arg(long)]
        y: u8,
    },
    /// Print a game, or one piece with its legal targets
    Show {
        game: GameId,
        #[arg(long)]
        piece: Option<u32>,
    },
}
