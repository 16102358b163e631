// src/game/io.rs

use anyhow::{bail, Result};

use crate::game::board::{BitBoard, Position};
use crate::game::defs::{PieceKind, Square, ENGINE_IS_WHITE};

/// Parse a FEN string onto the engine-oriented board. The halfmove clock and
/// fullmove number are accepted and ignored; the engine tracks neither.
pub fn position_from_fen(fen: &str) -> Result<Position> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        bail!("invalid FEN: expected at least 4 fields, got {}", parts.len());
    }

    let mut pos = Position::blank();

    // 1. piece placement, rank 8 first
    let mut rank: i32 = 7;
    let mut file: i32 = 0;
    for ch in parts[0].chars() {
        if ch == '/' {
            rank -= 1;
            file = 0;
        } else if let Some(digit) = ch.to_digit(10) {
            file += digit as i32;
        } else {
            if rank < 0 || file >= 8 {
                bail!("invalid FEN: board overflow at '{ch}'");
            }
            let engine = ch.is_uppercase() == ENGINE_IS_WHITE;
            let kind = match ch.to_ascii_lowercase() {
                'p' => PieceKind::pawn(engine),
                'n' => PieceKind::knight(engine),
                'b' => PieceKind::bishop(engine),
                'r' => PieceKind::rook(engine),
                'q' => PieceKind::queen(engine),
                'k' => PieceKind::king(engine),
                _ => bail!("invalid FEN: unknown piece character '{ch}'"),
            };
            let sq = Square::from_file_rank(file as u8, rank as u8);
            pos.pieces[kind.index()] |= BitBoard::from_square(sq);
            file += 1;
        }
    }

    // 2. active color
    pos.engine_to_move = match parts[1] {
        "w" => ENGINE_IS_WHITE,
        "b" => !ENGINE_IS_WHITE,
        other => bail!("invalid FEN: invalid active color '{other}'"),
    };

    // 3. castling rights
    for ch in parts[2].chars() {
        let (white, kingside) = match ch {
            'K' => (true, true),
            'Q' => (true, false),
            'k' => (false, true),
            'q' => (false, false),
            '-' => continue,
            _ => bail!("invalid FEN: invalid castling rights '{ch}'"),
        };
        let engine = white == ENGINE_IS_WHITE;
        match (engine, kingside) {
            (true, true) => pos.engine_castle_kingside = true,
            (true, false) => pos.engine_castle_queenside = true,
            (false, true) => pos.player_castle_kingside = true,
            (false, false) => pos.player_castle_queenside = true,
        }
    }

    // 4. en passant: FEN names the square behind the pawn, the engine tracks
    // the double-pushed pawn itself
    if parts[3] != "-" {
        let bytes = parts[3].as_bytes();
        if bytes.len() != 2 {
            bail!("invalid FEN: invalid en passant square '{}'", parts[3]);
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        let pawn_rank = match rank {
            2 => 3, // white just double-pushed onto rank 4
            5 => 4, // black just double-pushed onto rank 5
            _ => bail!("invalid FEN: invalid en passant square '{}'", parts[3]),
        };
        if file > 7 {
            bail!("invalid FEN: invalid en passant square '{}'", parts[3]);
        }
        pos.en_passant_target = BitBoard::from_square(Square::from_file_rank(file, pawn_rank));
    }

    pos.update();
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::defs::Side;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn the_starting_fen_matches_the_initial_position() {
        let parsed = position_from_fen(START).unwrap();
        assert_eq!(parsed, Position::new());
    }

    #[test]
    fn side_to_move_and_rights_follow_the_fields() {
        let pos = position_from_fen("4k3/8/8/8/8/8/8/4K2R b K - 0 1").unwrap();
        assert_eq!(pos.engine_to_move, !ENGINE_IS_WHITE);
        let (kingside, queenside) = if ENGINE_IS_WHITE {
            (pos.engine_castle_kingside, pos.engine_castle_queenside)
        } else {
            (pos.player_castle_kingside, pos.player_castle_queenside)
        };
        assert!(kingside);
        assert!(!queenside);
    }

    #[test]
    fn en_passant_target_is_the_pawn_square() {
        let pos = position_from_fen("rnbqkbnr/ppp1pppp/8/3p4/8/8/PPPPPPPP/RNBQKBNR w - d6 0 2")
            .unwrap();
        let pawn_sq = Square::from_file_rank(3, 4); // the pawn on d5
        assert_eq!(pos.en_passant_target, BitBoard::from_square(pawn_sq));
        let black = if ENGINE_IS_WHITE { Side::Player } else { Side::Engine };
        let black_pawns = pos.piece_bb(PieceKind::pawn(black.is_engine()));
        assert!((pos.en_passant_target & black_pawns).any());
    }

    #[test]
    fn malformed_fens_are_rejected() {
        assert!(position_from_fen("").is_err());
        assert!(position_from_fen("rnbqkbnz/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert!(position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1").is_err());
    }
}
