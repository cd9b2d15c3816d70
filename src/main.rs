use clap::{Parser, Subcommand};
#[cfg(feature = "perft")]
use vintage_chess::game::perft::PerftConfig;
use vintage_chess::{
    game::{fen::FenError, position::Position},
    protocols::terminal::terminal_client,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays a game on the terminal (DEFAULT)
    Play {
        /// Starting position as a FEN string.
        #[arg(short, long)]
        fen: Option<String>,
    },
    /// Runs perft (generating all moves up to a certain depth)
    Perft {
        /// Maximum depth to reach
        depth: u8,
        /// Starting position as a FEN string.
        #[arg(short, long)]
        fen: Option<String>,
        /// Shows move count for each move from the starting position
        #[arg(short)]
        divide: bool,
        /// Generates moves for each depth up to the maximum
        #[arg(short)]
        iterative: bool,
        /// Show timing information
        #[arg(long)]
        bench: bool,

        /// Does not show the board and other decorations
        #[arg(long)]
        no_board: bool,
    },
}

fn load(fen: Option<String>) -> Result<Position, FenError> {
    match fen {
        Some(fen) => Position::from_fen(&fen),
        None => Ok(Position::new_game()),
    }
}

pub fn main() {
    let args = Arguments::parse();
    env_logger::init();

    match args.command.unwrap_or(Command::Play { fen: None }) {
        Command::Play { fen } => {
            let position = load(fen).unwrap_or_else(|e| {
                log::error!("invalid starting position: {e}");
                std::process::exit(1)
            });
            if let Err(e) = terminal_client(position) {
                log::error!("terminal client stopped: {e}");
                std::process::exit(1)
            }
        }
        #[cfg(feature = "perft")]
        Command::Perft {
            depth,
            fen,
            divide,
            iterative,
            bench,
            no_board,
        } => {
            let mut position = load(fen).unwrap_or_else(|e| {
                log::error!("invalid starting position: {e}");
                std::process::exit(1)
            });

            PerftConfig::default()
                .with_depth(depth)
                .divide_moves(divide)
                .iterative_deepening(iterative)
                .benchmark(bench)
                .show_board(!no_board)
                .go(&mut position);
        }
        #[cfg(not(feature = "perft"))]
        Command::Perft { .. } => {
            eprintln!("vintage-chess has not been compiled with feature `perft`");
        }
    }
}
