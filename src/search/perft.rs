// src/search/perft.rs

use crate::game::board::Position;
use crate::game::moves::MoveGen;

/// Count the leaf nodes of the legal move tree to the given depth, unmaking
/// by snapshot exactly the way the search does. The counts pin the generator
/// against the published reference values in the test suite.
pub fn perft(generator: &mut MoveGen, pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    if pos.engine_to_move {
        generator.generate_engine_moves(pos);
    } else {
        generator.generate_player_moves(pos);
    }
    let moves = generator.sorted_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in &moves {
        let snapshot = *pos;
        if pos.engine_to_move {
            pos.apply_move::<true>(mv);
        } else {
            pos.apply_move::<false>(mv);
        }
        nodes += perft(generator, pos, depth - 1);
        *pos = snapshot;
    }
    nodes
}
