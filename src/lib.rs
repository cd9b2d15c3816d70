//! # Vintage chess
//! A compact chess rules engine: legal move generation, check, checkmate,
//! stalemate and draw detection, castling and en passant bookkeeping, and a
//! move history that can be undone one ply at a time.
//!
//! A game is a [`Position`](game::position::Position) owned by its caller:
//! ```
//! # use vintage_chess::game::{position::Position, colour::Colour};
//! let mut game = Position::new_game();
//! let e2 = "e2".parse().unwrap();
//! assert_eq!(game.legal_moves(e2).len(), 2);
//! game.make_move(e2, "e4".parse().unwrap()).unwrap();
//! assert_eq!(game.side_to_move(), Colour::Black);
//! ```
//!
//! It is usable as both a library to embed into your own user interface and a
//! standalone terminal game.

pub mod game;
pub mod protocols;
