//! # Terminal client
//! Plays a game on standard I/O: the player types commands, the client answers
//! with the move played, the board, and the state of the game.
//!
//! The client only talks to the engine through [`Position`]'s public API,
//! polling check, checkmate, stalemate and draw status after each move.

use std::io::{BufRead, Write};

use crate::game::{colour::Colour, position::Position};

pub mod commands;

use commands::TerminalCommand;

/// Runs the terminal client on standard I/O, starting from `position`.
pub fn terminal_client(mut position: Position) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    run(&mut position, stdin.lock(), std::io::stdout())
}

/// Reads commands from `input` until it is exhausted or a `quit` command is
/// received, writing answers to `output`.
pub fn run<R: BufRead, W: Write>(
    position: &mut Position,
    input: R,
    mut output: W,
) -> std::io::Result<()> {
    writeln!(output, "{position}")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match line.parse::<TerminalCommand>() {
            Ok(cmd) => cmd,
            Err(e) => {
                log::error!("could not parse {line:?}: {e}");
                writeln!(output, "{e} (type `help` for a list of commands)")?;
                continue;
            }
        };

        log::info!("Received command {cmd:?}");
        match cmd {
            TerminalCommand::Move {
                from,
                to,
                promotion,
            } => {
                let written = position.algebraic_notation(from, to);
                match position.make_move_promoting(from, to, promotion.unwrap_or_default()) {
                    Ok(_) => {
                        writeln!(output, "{}", written.unwrap_or_default())?;
                        writeln!(output, "{}", position.board())?;
                        report_status(position, &mut output)?;
                    }
                    Err(e) => writeln!(output, "{e}")?,
                }
            }
            TerminalCommand::Moves(square) => {
                let moves = position.legal_moves(square);
                if moves.is_empty() {
                    writeln!(output, "no legal moves from {square}")?
                } else {
                    let targets: Vec<String> = moves.iter().map(|m| m.to.to_string()).collect();
                    writeln!(output, "{}", targets.join(" "))?
                }
            }
            TerminalCommand::Undo => match position.undo_move() {
                Ok(record) => {
                    writeln!(output, "took back {}", record.played)?;
                    writeln!(output, "{}", position.board())?;
                }
                Err(e) => writeln!(output, "{e}")?,
            },
            TerminalCommand::Hint => match position.hint(position.side_to_move()) {
                Some(hint) => writeln!(
                    output,
                    "try {} {}{}",
                    hint.piece.kind.name(),
                    hint.from,
                    hint.to
                )?,
                None => writeln!(output, "no legal moves")?,
            },
            TerminalCommand::NewGame => {
                position.reset();
                writeln!(output, "{position}")?;
            }
            TerminalCommand::Board => {
                writeln!(output, "{position}")?;
                for colour in Colour::COLOURS {
                    let taken: String = position
                        .captured_pieces(colour)
                        .iter()
                        .map(|p| p.symbol())
                        .collect();
                    writeln!(output, "{colour} lost: {taken}")?;
                }
            }
            TerminalCommand::Help => writeln!(output, "{}", TerminalCommand::HELP)?,
            TerminalCommand::Quit => break,
        }
    }

    Ok(())
}

fn report_status<W: Write>(position: &Position, output: &mut W) -> std::io::Result<()> {
    let us = position.side_to_move();
    if position.is_checkmate(us) {
        writeln!(output, "checkmate, {} wins", us.inverse())
    } else if position.is_stalemate(us) {
        writeln!(output, "stalemate")
    } else if position.is_draw() {
        writeln!(output, "draw")
    } else if position.is_in_check(us) {
        writeln!(output, "{us} is in check")
    } else {
        writeln!(output, "{us} to move")
    }
}
