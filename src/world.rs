#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    A,
    B,
}

impl Faction {
    pub const ALL: [Faction; 2] = [Faction::A, Faction::B];

    pub fn opponent(self) -> Self {
        match self {
            Faction::A => Faction::B,
            Faction::B => Faction::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Alive(Faction),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn faction(&self) -> Option<Faction> {
        match self {
            Cell::Empty => None,
            Cell::Alive(faction) => Some(*faction),
        }
    }

    pub fn is_of(&self, faction: Faction) -> bool {
        self.faction() == Some(faction)
    }
}

pub use grid::Grid;
mod grid;
