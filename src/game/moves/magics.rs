// src/game/moves/magics.rs

use std::sync::OnceLock;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::game::board::{rankfile, BitBoard};
use crate::game::defs::{self, Square};

/// Seed for the magic-number search. Fixed, so startup is reproducible.
const MAGIC_SEED: u64 = 0xCAFE_F00D;

/// Cardinal (rook-like) hash keys are 12 bits wide, ordinal (bishop-like)
/// keys 9 bits: a cornered rook sees up to 12 relevant blockers, a centered
/// bishop up to 9.
pub const CARDINAL_SHIFT: u32 = 52;
pub const ORDINAL_SHIFT: u32 = 55;

const CARDINAL_SLOTS: usize = 1 << (64 - CARDINAL_SHIFT);
const ORDINAL_SLOTS: usize = 1 << (64 - ORDINAL_SHIFT);

/// How many multiplier candidates to try per square before declaring the
/// search broken. In practice a square takes well under 100,000 tries.
const MAX_MAGIC_TRIES: u32 = 1_000_000;

pub static MAGICS: OnceLock<Magics> = OnceLock::new();

#[inline]
pub fn magics() -> &'static Magics {
    MAGICS.get_or_init(Magics::new)
}

/// Perfect-hash attack lookup for one slider kind: per-square blocker masks
/// and multipliers, plus one flat attack table. Built once, read-only after.
pub struct MagicTable {
    pub magic: [u64; 64],
    pub mask: [u64; 64],
    shift: u32,
    slots: usize,
    attacks: Vec<u64>,
}

impl MagicTable {
    #[inline]
    pub fn attacks(&self, sq: Square, occ: BitBoard) -> BitBoard {
        let s = sq.index();
        let hash = ((occ.0 & self.mask[s]).wrapping_mul(self.magic[s])) >> self.shift;
        BitBoard(self.attacks[s * self.slots + hash as usize])
    }

    fn build(rng: &mut SmallRng, cardinal: bool) -> Self {
        let (shift, slots) = if cardinal {
            (CARDINAL_SHIFT, CARDINAL_SLOTS)
        } else {
            (ORDINAL_SHIFT, ORDINAL_SLOTS)
        };
        let mut table = MagicTable {
            magic: [0; 64],
            mask: [0; 64],
            shift,
            slots,
            attacks: vec![0; 64 * slots],
        };
        for s in 0..64 {
            let sq = Square(s as u8);
            table.mask[s] = if cardinal {
                cardinal_blocker_mask(sq)
            } else {
                ordinal_blocker_mask(sq)
            };
            table.magic[s] = table.find_magic(rng, sq, cardinal);
        }
        table
    }

    /// Search for a multiplier that hashes every blocker subset of `sq` to a
    /// slot holding its attack set, filling this square's slice of the attack
    /// table as a side effect. Exhaustion is a programming error and fatal.
    fn find_magic(&mut self, rng: &mut SmallRng, sq: Square, cardinal: bool) -> u64 {
        let s = sq.index();
        let mask = self.mask[s];

        // reference attacks for every way this slider can be blocked
        let permutations = 1usize << mask.count_ones();
        let mut blockers = Vec::with_capacity(permutations);
        let mut reference = Vec::with_capacity(permutations);
        enumerate_subsets(mask, |subset| {
            blockers.push(subset);
            reference.push(if cardinal {
                cardinal_attacks_walk(sq, subset, true)
            } else {
                ordinal_attacks_walk(sq, subset, true)
            });
        });

        let shift = self.shift;
        let base = s * self.slots;
        'candidates: for _ in 0..MAX_MAGIC_TRIES {
            // each bit survives three independent draws with probability 1/8;
            // sparse multipliers hash into collision-free patterns far sooner
            let magic = rng.next_u64() & rng.next_u64() & rng.next_u64();

            let slice = &mut self.attacks[base..base + self.slots];
            slice.fill(0);
            for (i, &subset) in blockers.iter().enumerate() {
                let hash = (subset.wrapping_mul(magic) >> shift) as usize;
                // a slider attacks at least one square, so 0 marks a free slot
                if slice[hash] == 0 {
                    slice[hash] = reference[i];
                } else if slice[hash] != reference[i] {
                    continue 'candidates;
                }
            }
            return magic;
        }
        panic!(
            "{} magic number search failed on square {}",
            if cardinal { "cardinal" } else { "ordinal" },
            s
        );
    }
}

pub struct Magics {
    pub cardinal: MagicTable,
    pub ordinal: MagicTable,
}

impl Magics {
    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(MAGIC_SEED);
        Magics {
            cardinal: MagicTable::build(&mut rng, true),
            ordinal: MagicTable::build(&mut rng, false),
        }
    }

    #[inline]
    pub fn cardinal_attacks(&self, sq: Square, occ: BitBoard) -> BitBoard {
        self.cardinal.attacks(sq, occ)
    }

    #[inline]
    pub fn ordinal_attacks(&self, sq: Square, occ: BitBoard) -> BitBoard {
        self.ordinal.attacks(sq, occ)
    }

    #[inline]
    pub fn queen_attacks(&self, sq: Square, occ: BitBoard) -> BitBoard {
        self.cardinal_attacks(sq, occ) | self.ordinal_attacks(sq, occ)
    }
}

impl Default for Magics {
    fn default() -> Self {
        Self::new()
    }
}

/// Visit every subset of `mask`, the empty set included.
fn enumerate_subsets(mask: u64, mut f: impl FnMut(u64)) {
    let mut subset = 0u64;
    loop {
        f(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
}

/// Squares whose occupancy can change a rook-like slider's reach from `sq`:
/// the rays on an empty board minus their terminal squares. A terminal can
/// never block (nothing lies beyond it), and dropping one square halves the
/// subset count, which is what keeps the table width at 12 bits.
pub fn cardinal_blocker_mask(sq: Square) -> u64 {
    let row = sq.row();
    let col = sq.col();
    let mut endpoints = defs::bit(col); // top of the column
    endpoints |= defs::bit(row * 8 + 7); // right end of the row
    endpoints |= defs::bit(56 + col); // bottom of the column
    endpoints |= defs::bit(row * 8); // left end of the row
    cardinal_attacks_walk(sq, endpoints, false)
}

/// Ordinal ray terminals always land on the board edge, since bishops never
/// travel along it.
pub fn ordinal_blocker_mask(sq: Square) -> u64 {
    ordinal_attacks_walk(sq, rankfile::OUTER_SQUARES.0, false)
}

/// Walk the four rank/file rays from `sq`, stopping at the first blocker in
/// each direction. With `include_blockers` the blocker's own square counts as
/// attacked (a capture). Slow by design; used only to build the tables and as
/// the oracle the lookup is tested against.
pub fn cardinal_attacks_walk(sq: Square, blockers: u64, include_blockers: bool) -> u64 {
    walk_rays(sq, blockers, include_blockers, [(-1, 0), (0, 1), (1, 0), (0, -1)])
}

/// The diagonal twin of `cardinal_attacks_walk`.
pub fn ordinal_attacks_walk(sq: Square, blockers: u64, include_blockers: bool) -> u64 {
    walk_rays(sq, blockers, include_blockers, [(-1, 1), (1, 1), (1, -1), (-1, -1)])
}

fn walk_rays(sq: Square, blockers: u64, include_blockers: bool, rays: [(i32, i32); 4]) -> u64 {
    let mut attacks = 0u64;
    for (dr, dc) in rays {
        let mut row = sq.row() as i32 + dr;
        let mut col = sq.col() as i32 + dc;
        while (0..8).contains(&row) && (0..8).contains(&col) {
            let attack = defs::bit((row * 8 + col) as u8);
            if attack & blockers != 0 {
                if include_blockers {
                    attacks |= attack;
                }
                break;
            }
            attacks |= attack;
            row += dr;
            col += dc;
        }
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocker_masks_exclude_ray_terminals() {
        for s in 0..64u8 {
            let sq = Square(s);
            assert_eq!(ordinal_blocker_mask(sq) & rankfile::OUTER_SQUARES.0, 0);
            // worst case widths that size the tables
            assert!(cardinal_blocker_mask(sq).count_ones() <= 12);
            assert!(ordinal_blocker_mask(sq).count_ones() <= 9);
        }
        // a cornered rook keeps the full 12 relevant squares
        assert_eq!(cardinal_blocker_mask(Square(0)).count_ones(), 12);
    }

    #[test]
    fn empty_board_walks_reach_the_edges() {
        // rook on the top-left corner sweeps its row and column
        let rook = cardinal_attacks_walk(Square(0), 0, true);
        assert_eq!(rook.count_ones(), 14);
        // bishop in the middle sweeps both diagonals
        let bishop = ordinal_attacks_walk(Square(27), 0, true);
        assert_eq!(bishop.count_ones(), 13);
    }

    #[test]
    fn walk_stops_at_and_includes_the_first_blocker() {
        // rook on square 0, blocker two squares to the right
        let blockers = defs::bit(2);
        let attacks = cardinal_attacks_walk(Square(0), blockers, true);
        assert_ne!(attacks & defs::bit(1), 0);
        assert_ne!(attacks & defs::bit(2), 0);
        assert_eq!(attacks & defs::bit(3), 0);

        let without_capture = cardinal_attacks_walk(Square(0), blockers, false);
        assert_eq!(without_capture & defs::bit(2), 0);
    }

    #[test]
    fn magic_lookup_matches_the_reference_walk() {
        let m = magics();
        let mut rng = SmallRng::seed_from_u64(1234);
        for s in 0..64u8 {
            let sq = Square(s);
            let mut occupancies = vec![0u64, u64::MAX];
            for _ in 0..48 {
                // biased sample keeps boards realistically sparse
                occupancies.push(rng.next_u64() & rng.next_u64());
            }
            for occ in occupancies {
                assert_eq!(
                    m.cardinal_attacks(sq, BitBoard(occ)).0,
                    cardinal_attacks_walk(sq, occ, true),
                    "cardinal mismatch on square {s}"
                );
                assert_eq!(
                    m.ordinal_attacks(sq, BitBoard(occ)).0,
                    ordinal_attacks_walk(sq, occ, true),
                    "ordinal mismatch on square {s}"
                );
            }
        }
    }

    #[test]
    fn every_blocker_subset_hashes_to_its_attack_set() {
        // exhaustive sweep on a handful of squares: a corner, an edge, the center
        let m = magics();
        for s in [0u8, 4, 28, 63] {
            let sq = Square(s);
            enumerate_subsets(m.cardinal.mask[sq.index()], |subset| {
                assert_eq!(
                    m.cardinal_attacks(sq, BitBoard(subset)).0,
                    cardinal_attacks_walk(sq, subset, true)
                );
            });
            enumerate_subsets(m.ordinal.mask[sq.index()], |subset| {
                assert_eq!(
                    m.ordinal_attacks(sq, BitBoard(subset)).0,
                    ordinal_attacks_walk(sq, subset, true)
                );
            });
        }
    }
}
