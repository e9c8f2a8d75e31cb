use std::fmt;

use crate::{pos, Cell, Faction, Pos};

/// dense, row-major board of fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, Pos { x, y }: Pos) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.cols + pos.x as usize)
    }

    /// out of bounds reads as empty.
    pub fn get(&self, pos: Pos) -> Cell {
        self.index(pos)
            .map(|index| self.cells[index])
            .unwrap_or_default()
    }

    /// reads across the edges, as if the board were a torus.
    pub fn get_wrapped(&self, pos: Pos) -> Cell {
        if self.cells.is_empty() {
            return Cell::Empty;
        }
        self.get(pos.wrap(self.cols as i32, self.rows as i32))
    }

    /// returns false and leaves the board untouched when `pos` is out of bounds.
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(index) => {
                self.cells[index] = cell;
                true
            }
            None => false,
        }
    }

    /// every position of the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (rows, cols) = (self.rows as i32, self.cols as i32);
        (0..rows).flat_map(move |y| (0..cols).map(move |x| pos!(x, y)))
    }

    pub fn population(&self, faction: Faction) -> usize {
        self.cells.iter().filter(|cell| cell.is_of(faction)).count()
    }

    /// parses the text board format: `A` and `B` are alive, anything else is empty.
    /// short rows are padded to the longest one.
    pub fn deserialize(str: &str) -> Self {
        let lines: Vec<&str> = str.lines().collect();
        let cols = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let mut grid = Self::new(lines.len(), cols);
        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                let cell = match c {
                    'A' | 'a' => Cell::Alive(Faction::A),
                    'B' | 'b' => Cell::Alive(Faction::B),
                    _ => continue,
                };
                grid.set(pos!(x as i32, y as i32), cell);
            }
        }
        grid
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Alive(Faction::A) => 'A',
                    Cell::Alive(Faction::B) => 'B',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
