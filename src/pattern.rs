use crate::{pos, Faction, Pos};

/// oscillators used to give each faction some deterministic starting structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// three cells in a column, period 2.
    Blinker,
    /// two staggered rows of three, period 2.
    Toad,
    /// two diagonal blocks touching at a corner, period 2.
    Beacon,
}

const BLINKER: [Pos; 3] = [pos!(0, -1), pos!(0, 0), pos!(0, 1)];

const TOAD: [Pos; 6] = [
    pos!(-1, 0),
    pos!(0, 0),
    pos!(1, 0),
    pos!(-2, 1),
    pos!(-1, 1),
    pos!(0, 1),
];

const BEACON: [Pos; 8] = [
    pos!(0, 0),
    pos!(1, 0),
    pos!(0, 1),
    pos!(1, 1),
    pos!(2, 2),
    pos!(3, 2),
    pos!(2, 3),
    pos!(3, 3),
];

impl Pattern {
    /// offsets relative to the anchor of the pattern.
    pub fn offsets(&self) -> &'static [Pos] {
        match self {
            Pattern::Blinker => &BLINKER,
            Pattern::Toad => &TOAD,
            Pattern::Beacon => &BEACON,
        }
    }

    pub fn cells(&self, anchor: Pos) -> impl Iterator<Item = Pos> {
        self.offsets().iter().map(move |&offset| anchor + offset)
    }
}

/// which faction receives each cell of a seeded pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Whole(Faction),
    /// the first half of the cells go to `first`, the rest to `second`.
    Split { first: Faction, second: Faction },
}

impl Ownership {
    pub fn owner(&self, index: usize, len: usize) -> Faction {
        match *self {
            Ownership::Whole(faction) => faction,
            Ownership::Split { first, .. } if index < len / 2 => first,
            Ownership::Split { second, .. } => second,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Seed {
    pub pattern: Pattern,
    /// columns to the right of the leftmost seed anchor.
    pub shift: i32,
    pub ownership: Ownership,
}

impl Seed {
    /// the leftmost anchor sits a quarter of the way across, on the middle row.
    pub fn anchor(&self, rows: usize, cols: usize) -> Pos {
        pos!((cols / 4) as i32 + self.shift, (rows / 2) as i32)
    }
}

pub const SEEDS: [Seed; 3] = [
    Seed {
        pattern: Pattern::Blinker,
        shift: 0,
        ownership: Ownership::Whole(Faction::A),
    },
    Seed {
        pattern: Pattern::Toad,
        shift: 5,
        ownership: Ownership::Whole(Faction::B),
    },
    Seed {
        pattern: Pattern::Beacon,
        shift: 10,
        ownership: Ownership::Split {
            first: Faction::A,
            second: Faction::B,
        },
    },
];

/// cells the seeds would occupy on a board with room for all of them.
pub const RESERVED_PATTERN_CELLS: usize = BLINKER.len() + TOAD.len() + BEACON.len();
