// src/api.rs

//! The surface the enclosing application consumes: board queries for
//! rendering, move application for the human side, and the engine reply.
//! Everything here is a thin seam over the core; no game logic lives in the
//! host.

use crate::game::board::{BitBoard, Position};
use crate::game::defs::{PieceKind, Side, Square};
use crate::game::moves::{Move, MoveGen, MoveKind};
use crate::search::search::Search;

/// Promotion choice offered to the player when a pawn reaches the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    const fn move_kind(self) -> MoveKind {
        match self {
            Promotion::Queen => MoveKind::QueenPromotion,
            Promotion::Rook => MoveKind::RookPromotion,
            Promotion::Bishop => MoveKind::BishopPromotion,
            Promotion::Knight => MoveKind::KnightPromotion,
        }
    }
}

/// The standard initial setup, oriented by the engine-color build flag.
pub fn new_position() -> Position {
    Position::new()
}

pub fn piece_at(pos: &Position, square: Square) -> Option<PieceKind> {
    pos.piece_at(square)
}

pub fn king_in_check(pos: &Position, side: Side) -> bool {
    MoveGen::king_in_check(pos, side)
}

/// Apply an already-validated move for the given side.
pub fn apply_move(pos: &mut Position, mv: &Move, side: Side) {
    match side {
        Side::Engine => pos.apply_move::<true>(mv),
        Side::Player => pos.apply_move::<false>(mv),
    }
}

/// Every square the piece on `from` can legally move to; empty when the
/// square is empty. Drives move highlighting in the host.
pub fn legal_moves_from(generator: &mut MoveGen, pos: &Position, from: Square) -> BitBoard {
    let side = match pos.piece_at(from) {
        Some(kind) => kind.side(),
        None => return BitBoard::EMPTY,
    };
    generator.generate(pos, side);
    let mut targets = BitBoard::EMPTY;
    for mv in generator.sorted_moves() {
        if mv.from == from {
            targets |= BitBoard::from_square(mv.to);
        }
    }
    targets
}

/// Resolve a player request given as a from/to pair (plus a promotion choice
/// when the move needs one) against the legal move list and apply it.
/// Castling, en passant and captures are recognized by the matching generated
/// move. Returns false, leaving the position untouched, when the request is
/// not a legal player move.
pub fn apply_player_move(
    generator: &mut MoveGen,
    pos: &mut Position,
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
) -> bool {
    generator.generate_player_moves(pos);
    let wanted = promotion.map(Promotion::move_kind);
    for mv in generator.sorted_moves() {
        if mv.from != from || mv.to != to {
            continue;
        }
        let matches = match wanted {
            Some(kind) => mv.kind == kind,
            None => !mv.kind.is_promotion(),
        };
        if matches {
            pos.apply_move::<false>(&mv);
            return true;
        }
    }
    false
}

/// Run the fixed-depth search, apply the chosen move and hand it back for
/// display. `None` when the engine has no legal move (mate or stalemate).
pub fn request_engine_move(search: &mut Search, pos: &mut Position) -> Option<Move> {
    let (mv, _score) = search.best_move(pos)?;
    pos.apply_move::<true>(&mv);
    Some(mv)
}
