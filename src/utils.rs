use std::ops::{Add, Sub};

/// column (`x`) and row (`y`), signed so that relative offsets can point anywhere.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        Pos { x: $x, y: $y }
    };
}

impl Pos {
    /// folds the position back onto a `width` x `height` torus.
    pub fn wrap(self, width: i32, height: i32) -> Self {
        pos!(self.x.rem_euclid(width), self.y.rem_euclid(height))
    }
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        pos!(self.x - rhs.x, self.y - rhs.y)
    }
}

#[test]
fn test_wrap() {
    assert_eq!(pos!(-1, -1).wrap(40, 20), pos!(39, 19));
    assert_eq!(pos!(40, 20).wrap(40, 20), pos!(0, 0));
    assert_eq!(pos!(5, 7).wrap(40, 20), pos!(5, 7));
    assert_eq!(pos!(-41, 3).wrap(40, 20), pos!(39, 3));
}
