//! # Chess API
//! This module contains everything chess related: the board, pieces, moves, and
//! the rules engine driving a game.

pub mod action;
pub mod board;
pub mod castling_rights;
pub mod colour;
pub mod fen;
pub mod history;
mod movegen;
pub mod notation;
#[cfg(feature = "perft")]
pub mod perft;
pub mod piece;
pub mod position;
pub mod square;
