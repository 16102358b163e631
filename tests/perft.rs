// tests/perft.rs
//
// Node counts over the legal move tree, checked against the published
// reference values for the standard perft positions. Any slip in check
// evasion, pins, castling legality, en passant or promotion shows up here
// as a wrong count.

use sable::game::io::position_from_fen;
use sable::game::moves::MoveGen;
use sable::search::perft::perft;

fn assert_counts(fen: &str, expected: &[u64]) {
    let mut gen = MoveGen::new();
    for (depth, &nodes) in expected.iter().enumerate() {
        let mut pos = position_from_fen(fen).unwrap();
        let depth = depth as u32 + 1;
        assert_eq!(
            perft(&mut gen, &mut pos, depth),
            nodes,
            "perft({depth}) mismatch for {fen}"
        );
    }
}

#[test]
fn initial_position() {
    assert_counts(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8_902, 197_281],
    );
}

#[test]
fn kiwipete() {
    // castling both ways, pins, en passant and promotions all in play
    assert_counts(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2_039, 97_862],
    );
}

#[test]
fn rook_endgame_with_en_passant_pins() {
    assert_counts("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", &[14, 191, 2_812, 43_238]);
}

#[test]
fn promotion_tangle() {
    assert_counts(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1_486, 62_379],
    );
}

#[test]
fn quiet_middlegame() {
    assert_counts(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        &[46, 2_079],
    );
}
