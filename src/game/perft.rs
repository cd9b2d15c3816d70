//! # Perft testing/benchmarking
//!
//! Pawns only ever promote to the piece chosen by [`Position::make_move`]
//! (a queen), so counts diverge from the published ones as soon as
//! promotions appear in the tree.

use std::time::Instant;

use super::{piece::PromotionTarget, position::Position};

/// Builder pattern to configure a Perft test.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerftConfig {
    pub depth: u8,
    pub iterative: bool,
    pub divide: bool,

    pub bench: bool,

    pub show_board: bool,
}
impl PerftConfig {
    /// Whether to show the board at the start of the run.
    ///
    /// Should be disabled when trying to parse the output.
    pub fn show_board(mut self, value: bool) -> Self {
        self.show_board = value;
        self
    }

    /// Sets the maximum depth of the perft run.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// If set to true, the run will start from all depth between 1 and the maximum.
    pub fn iterative_deepening(mut self, value: bool) -> Self {
        self.iterative = value;
        self
    }

    /// Shows perft results per legal move at the starting position.
    pub fn divide_moves(mut self, value: bool) -> Self {
        self.divide = value;
        self
    }

    /// Measures the time it takes to complete one depth.
    pub fn benchmark(mut self, value: bool) -> Self {
        self.bench = value;
        self
    }

    /// Runs a Perft test on the given position, printing the results, and
    /// returns the node count at the maximum depth.
    pub fn go(&self, position: &mut Position) -> u64 {
        if self.show_board {
            println!("{position}\n");
        }

        let mut nodes = 0;
        for depth in (if self.iterative { 1 } else { self.depth.max(1) })..=self.depth.max(1) {
            if self.iterative && self.divide {
                println!("====== DEPTH {depth} ======")
            }

            let start = Instant::now();
            nodes = position
                .all_legal_moves(position.side_to_move())
                .into_iter()
                .map(|mv| {
                    position.play(mv, PromotionTarget::Queen);
                    let mv_nodes = perft_rec(position, depth - 1);
                    undo(position);
                    if self.divide {
                        println!("{mv}: {mv_nodes} nodes");
                    }
                    mv_nodes
                })
                .sum();
            let elapsed = start.elapsed().as_secs_f64();
            log::info!("perft depth {depth}: {nodes} nodes in {elapsed:.3}s");
            println!("depth {depth}: {nodes} nodes");
            if self.bench {
                println!(
                    "\ttook {} ({})",
                    human_readable_time(elapsed),
                    human_readable_nps(nodes as f64 / elapsed)
                );
            }
        }
        nodes
    }
}

impl Position {
    /// Counts the leaf nodes of the legal move tree `depth` plies deep.
    pub fn perft(&mut self, depth: u8) -> u64 {
        perft_rec(self, depth)
    }
}

fn undo(position: &mut Position) {
    if let Err(e) = position.undo_move() {
        log::error!("perft lost track of its moves: {e}");
    }
}

/// Traverses all nodes accessible from a given position, returning the number of
/// nodes traversed.
fn perft_rec(position: &mut Position, depth_left: u8) -> u64 {
    if depth_left == 0 {
        return 1;
    }

    let moves = position.all_legal_moves(position.side_to_move());
    if depth_left == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| {
            position.play(mv, PromotionTarget::Queen);
            let mv_nodes = perft_rec(position, depth_left - 1);
            undo(position);
            mv_nodes
        })
        .sum()
}

fn human_readable_time(secs: f64) -> String {
    if secs < 0.000_001 {
        format!("{:.3}ns", secs * 1_000_000_000.)
    } else if secs < 0.001 {
        format!("{:.3}μs", secs * 1_000_000.)
    } else if secs < 1. {
        format!("{:.3}ms", secs * 1_000.)
    } else {
        format!("{secs:.3}s")
    }
}

fn human_readable_nps(nps: f64) -> String {
    if nps > 1_000_000_000. {
        format!("{:.3}Gnps", nps / 1_000_000_000.)
    } else if nps > 1_000_000. {
        format!("{:.3}Mnps", nps / 1_000_000.)
    } else if nps > 1_000. {
        format!("{:.3}Knps", nps / 1_000.)
    } else {
        format!("{nps:.3}nps")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn check_matching(position: &mut Position, expected: &[u64]) {
        let before = position.clone();
        for (depth, expected) in expected.iter().enumerate() {
            let actual = position.perft(depth as u8 + 1);
            assert_eq!(
                actual,
                *expected,
                "Expected {expected} at depth {} but got {actual}",
                depth + 1,
            );
            assert_eq!(*position, before);
        }
    }

    #[test]
    fn initial_position_perft() {
        check_matching(&mut Position::initial(), &[20, 400, 8902])
    }

    #[test]
    fn kiwipete_perft() {
        check_matching(
            &mut Position::from_fen(
                "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ",
            )
            .unwrap(),
            &[48, 2039],
        )
    }

    #[test]
    fn endgame_perft() {
        check_matching(
            &mut Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - ").unwrap(),
            &[14, 191, 2812],
        )
    }

    #[test]
    #[ignore]
    fn deep_initial_position_perft() {
        check_matching(&mut Position::initial(), &[20, 400, 8902, 197281])
    }

    #[test]
    fn config_returns_last_depth() {
        let nodes = PerftConfig::default()
            .with_depth(2)
            .iterative_deepening(true)
            .go(&mut Position::initial());
        assert_eq!(nodes, 400);
    }
}
