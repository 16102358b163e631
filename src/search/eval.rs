// src/search/eval.rs

use crate::game::board::{rankfile, Position};
use crate::game::defs::PieceKind;

pub type Score = i32; // centipawns

const KNIGHT_CENTER_BONUS: Score = 70;
const BISHOP_CENTER_BONUS: Score = 60;
const PAWN_CENTER_BONUS: Score = 10;
const PAWN_FULL_CENTER_BONUS: Score = 30;
const PAWN_ADVANCE_BONUS: Score = 15;

/// Static evaluation of a position: positive when the engine stands better,
/// negative when the player does. Material plus a handful of positional
/// masks; pure with respect to the position.
pub fn evaluate(pos: &Position) -> Score {
    let mut score: Score = 0;

    // material first; the king carries no material value
    for kind in [
        PieceKind::PlayerPawn,
        PieceKind::PlayerKnight,
        PieceKind::PlayerBishop,
        PieceKind::PlayerRook,
        PieceKind::PlayerQueen,
    ] {
        score -= pos.piece_bb(kind).count() as Score * kind.value();
    }
    for kind in [
        PieceKind::EnginePawn,
        PieceKind::EngineKnight,
        PieceKind::EngineBishop,
        PieceKind::EngineRook,
        PieceKind::EngineQueen,
    ] {
        score += pos.piece_bb(kind).count() as Score * kind.value();
    }

    // minor pieces want the extended center
    score -= (pos.piece_bb(PieceKind::PlayerKnight) & rankfile::CENTER_16_SQUARES).count() as Score
        * KNIGHT_CENTER_BONUS;
    score += (pos.piece_bb(PieceKind::EngineKnight) & rankfile::CENTER_16_SQUARES).count() as Score
        * KNIGHT_CENTER_BONUS;

    score -= (pos.piece_bb(PieceKind::PlayerBishop) & rankfile::CENTER_16_SQUARES).count() as Score
        * BISHOP_CENTER_BONUS;
    score += (pos.piece_bb(PieceKind::EngineBishop) & rankfile::CENTER_16_SQUARES).count() as Score
        * BISHOP_CENTER_BONUS;

    // pawns: the central band, the four center squares, and each side's
    // advanced band
    let player_pawns = pos.piece_bb(PieceKind::PlayerPawn);
    score -= (player_pawns & rankfile::PAWN_CENTER).count() as Score * PAWN_CENTER_BONUS;
    score -= (player_pawns & rankfile::CENTER_4_SQUARES).count() as Score * PAWN_FULL_CENTER_BONUS;
    score -=
        (player_pawns & rankfile::PLAYER_ADVANCED_PAWNS).count() as Score * PAWN_ADVANCE_BONUS;

    let engine_pawns = pos.piece_bb(PieceKind::EnginePawn);
    score += (engine_pawns & rankfile::PAWN_CENTER).count() as Score * PAWN_CENTER_BONUS;
    score += (engine_pawns & rankfile::CENTER_4_SQUARES).count() as Score * PAWN_FULL_CENTER_BONUS;
    score +=
        (engine_pawns & rankfile::ENGINE_ADVANCED_PAWNS).count() as Score * PAWN_ADVANCE_BONUS;

    score
}
