//! Protocols are used to drive a game from outside the library.
//!
//! vintage-chess implements a line-based terminal client, which plays the role
//! of a user interface on top of [`Position`](crate::game::position::Position).

pub mod terminal;
