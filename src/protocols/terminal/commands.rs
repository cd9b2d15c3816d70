//! # Terminal commands
//! Commands typed by a player on the terminal, one per line.

use std::str::FromStr;

use thiserror::Error;

use crate::game::{
    piece::{PieceParseError, PromotionTarget},
    square::{Square, SquareParseError},
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Empty command")]
    EmptyCommand,
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid square: {0}")]
    InvalidSquare(#[from] SquareParseError),
    #[error("Invalid promotion: {0}")]
    InvalidPromotion(#[from] PieceParseError),
}

/// Commands understood by the terminal client.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TerminalCommand {
    /// A move written `<from><to>[promotion]`, like `e2e4` or `a7a8n`.
    Move {
        from: Square,
        to: Square,
        promotion: Option<PromotionTarget>,
    },
    /// Lists the legal moves of the piece on a square.
    Moves(Square),
    Undo,
    Hint,
    NewGame,
    Board,
    Help,
    Quit,
}
impl TerminalCommand {
    pub const HELP: &'static str = "\
<from><to>[q|r|b|n]  play a move, e.g. e2e4 or a7a8n
moves <square>       list the legal moves of a piece
undo                 take back the last move
hint                 suggest a move
new                  start a new game
board                show the board
quit                 leave";

    fn parse_move(token: &str) -> Result<Self, CommandError> {
        let unknown = || CommandError::UnknownCommand(token.to_string());
        let from = token.get(0..2).ok_or_else(unknown)?.parse()?;
        let to = token.get(2..4).ok_or_else(unknown)?.parse()?;
        let promotion = match token.get(4..).ok_or_else(unknown)? {
            "" => None,
            p => Some(p.parse()?),
        };
        Ok(Self::Move {
            from,
            to,
            promotion,
        })
    }
}
impl FromStr for TerminalCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        match tokens.next().ok_or(CommandError::EmptyCommand)? {
            "moves" => Ok(Self::Moves(
                tokens
                    .next()
                    .ok_or(CommandError::MissingParameter("<square>"))?
                    .parse()?,
            )),
            "undo" => Ok(Self::Undo),
            "hint" => Ok(Self::Hint),
            "new" => Ok(Self::NewGame),
            "board" => Ok(Self::Board),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            token if (4..=5).contains(&token.len()) => Self::parse_move(token),
            token => Err(CommandError::UnknownCommand(token.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn moves_with_and_without_promotion() {
        assert_eq!(
            "e2e4".parse(),
            Ok(TerminalCommand::Move {
                from: sq("e2"),
                to: sq("e4"),
                promotion: None
            })
        );
        assert_eq!(
            "  a7a8n ".parse(),
            Ok(TerminalCommand::Move {
                from: sq("a7"),
                to: sq("a8"),
                promotion: Some(PromotionTarget::Knight)
            })
        );
        assert_eq!(
            "a7a8k".parse::<TerminalCommand>(),
            Err(CommandError::InvalidPromotion(
                PieceParseError::InvalidPromotionTarget(crate::game::piece::PieceKind::King)
            ))
        );
        assert_eq!(
            "e2e9".parse::<TerminalCommand>(),
            Err(CommandError::InvalidSquare(SquareParseError::InvalidRank('9')))
        );
    }

    #[test]
    fn keywords() {
        assert_eq!("moves g1".parse(), Ok(TerminalCommand::Moves(sq("g1"))));
        assert_eq!(
            "moves".parse::<TerminalCommand>(),
            Err(CommandError::MissingParameter("<square>"))
        );
        assert_eq!("undo".parse(), Ok(TerminalCommand::Undo));
        assert_eq!("exit".parse(), Ok(TerminalCommand::Quit));
        assert_eq!("".parse::<TerminalCommand>(), Err(CommandError::EmptyCommand));
        assert_eq!(
            "castle".parse::<TerminalCommand>(),
            Err(CommandError::UnknownCommand("castle".to_string()))
        );
    }
}
