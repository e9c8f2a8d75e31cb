use std::io::{self, Write};

use termion::color;

use crate::{pos, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    White,
    Blue,
    Red,
}

impl Shade {
    fn ansi(self) -> color::AnsiValue {
        match self {
            Shade::White => color::AnsiValue(15),
            Shade::Blue => color::AnsiValue(4),
            Shade::Red => color::AnsiValue(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub char: char,
    pub shade: Option<Shade>,
}

impl Tile {
    pub fn plain(char: char) -> Self {
        Self { char, shade: None }
    }

    pub fn filled(shade: Shade) -> Self {
        Self {
            char: ' ',
            shade: Some(shade),
        }
    }
}

pub struct Canvas {
    lines: Vec<Vec<Tile>>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn from_screen() -> io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, height as usize))
    }

    pub fn new(width: usize, height: usize) -> Self {
        let lines = (0..height)
            .map(|_| vec![Tile::plain(' '); width])
            .collect();
        Self {
            height,
            lines,
            width,
        }
    }

    #[cfg(test)]
    pub fn tile(&self, pos: Pos) -> Option<Tile> {
        let (x, y) = (usize::try_from(pos.x).ok()?, usize::try_from(pos.y).ok()?);
        self.lines.get(y)?.get(x).copied()
    }

    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<Tile>) {
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(tile) = f(pos!(x as i32, y as i32)) {
                    self.lines[y][x] = tile;
                }
            }
        }
    }

    /// writes `text` at the start of line `y`, cut at the canvas width.
    pub fn text(&mut self, y: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(y) {
            for (tile, char) in line.iter_mut().zip(text.chars()) {
                *tile = Tile::plain(char);
            }
        }
    }

    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        let clear = termion::clear::All;
        write!(out, "{clear}")?;
        for (index, line) in self.lines.iter().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            write!(out, "{goto}")?;
            let mut current = None;
            for tile in line {
                if tile.shade != current {
                    match tile.shade {
                        Some(shade) => write!(out, "{}", color::Bg(shade.ansi()))?,
                        None => write!(out, "{}", color::Bg(color::Reset))?,
                    }
                    current = tile.shade;
                }
                write!(out, "{}", tile.char)?;
            }
            write!(out, "{}", color::Bg(color::Reset))?;
        }
        out.flush()
    }
}
