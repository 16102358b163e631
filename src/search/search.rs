// src/search/search.rs

use crate::game::board::Position;
use crate::game::defs::{Side, MAX_EVAL, MIN_EVAL, SEARCH_DEPTH};
use crate::game::moves::{Move, MoveGen};
use crate::search::eval::{evaluate, Score};

/// Fixed-depth alpha-beta over the legal move generator.
///
/// Moves are unmade by restoring a full value snapshot of the position.
/// An incremental unmake would be faster, but the position is twelve words
/// and change, and the copy keeps the search trivially balanced: after every
/// recursive call the position is bitwise what it was before the move.
pub struct Search {
    generator: MoveGen,
}

impl Search {
    pub fn new() -> Self {
        Self { generator: MoveGen::new() }
    }

    /// Search every engine move to full depth and return the best one with
    /// its score, or `None` when the engine has no legal move. A mate in one
    /// comes back with a score of `MAX_EVAL - 1`.
    pub fn best_move(&mut self, pos: &mut Position) -> Option<(Move, Score)> {
        self.generator.generate_engine_moves(pos);
        let moves = self.generator.sorted_moves();

        let mut best: Option<(Move, Score)> = None;
        let mut alpha = MIN_EVAL;
        for mv in &moves {
            let snapshot = *pos;
            pos.apply_move::<true>(mv);
            let score = self.minimize(pos, 1, alpha, MAX_EVAL);
            *pos = snapshot;

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((*mv, score));
            }
            if score > alpha {
                alpha = score;
            }
        }
        best
    }

    /// Engine to move: pick the child with the highest score.
    fn maximize(&mut self, pos: &mut Position, ply: i32, mut alpha: Score, beta: Score) -> Score {
        if ply > SEARCH_DEPTH {
            return evaluate(pos);
        }

        self.generator.generate_engine_moves(pos);
        let moves = self.generator.sorted_moves();
        if moves.is_empty() {
            // Checkmated, unless it is stalemate. The ply offset makes nearer
            // mates score worse, so a losing engine drags the game out.
            return if MoveGen::king_in_check(pos, Side::Engine) {
                MIN_EVAL + ply
            } else {
                0
            };
        }

        let mut best = MIN_EVAL;
        for mv in &moves {
            let snapshot = *pos;
            pos.apply_move::<true>(mv);
            let score = self.minimize(pos, ply + 1, alpha, beta);
            *pos = snapshot;

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }

    /// Player to move: pick the child with the lowest score.
    fn minimize(&mut self, pos: &mut Position, ply: i32, alpha: Score, mut beta: Score) -> Score {
        if ply > SEARCH_DEPTH {
            return evaluate(pos);
        }

        self.generator.generate_player_moves(pos);
        let moves = self.generator.sorted_moves();
        if moves.is_empty() {
            // The player is mated, unless stalemated. The ply offset makes
            // nearer mates score better, so the engine takes the fastest one.
            return if MoveGen::king_in_check(pos, Side::Player) {
                MAX_EVAL - ply
            } else {
                0
            };
        }

        let mut best = MAX_EVAL;
        for mv in &moves {
            let snapshot = *pos;
            pos.apply_move::<false>(mv);
            let score = self.maximize(pos, ply + 1, alpha, beta);
            *pos = snapshot;

            if score < best {
                best = score;
            }
            if best < beta {
                beta = best;
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}
