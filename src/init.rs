use rand::{seq::SliceRandom, Rng};

use crate::{
    pattern::{RESERVED_PATTERN_CELLS, SEEDS},
    Cell, ConfigurationError, Faction, Grid, Pos,
};

/// builds a generation-0 board: the seed oscillators first, then random cells
/// until each faction reaches its requested count.
///
/// counts include the seeded cells. The capacity check only guards against
/// requests that can never fit; the fill itself may still fall short.
pub fn initialize<R>(
    rows: usize,
    cols: usize,
    count_a: usize,
    count_b: usize,
    rng: &mut R,
) -> Result<Grid, ConfigurationError>
where
    R: Rng + ?Sized,
{
    let capacity = board_capacity(rows, cols)?;
    let requested = count_a.saturating_add(count_b);
    if requested.saturating_add(RESERVED_PATTERN_CELLS) > capacity {
        return Err(ConfigurationError::TooManyCells {
            requested,
            reserved: RESERVED_PATTERN_CELLS,
            capacity,
        });
    }

    let mut grid = Grid::new(rows, cols);
    let (seeded_a, seeded_b) = seed_patterns(&mut grid);
    log::info!("seeded {seeded_a} A cells and {seeded_b} B cells on a {rows}x{cols} board");

    let mut positions: Vec<Pos> = grid.positions().collect();
    positions.shuffle(rng);
    let mut positions = positions.into_iter();

    for (faction, count) in [(Faction::A, count_a), (Faction::B, count_b)] {
        let placed = fill_best_effort(&mut grid, &mut positions, faction, count);
        if placed < count {
            log::warn!("faction {faction:?} starts with {placed} cells instead of {count}");
        }
    }

    Ok(grid)
}

/// number of cells on a `rows` x `cols` board, as long as every position
/// stays addressable.
fn board_capacity(rows: usize, cols: usize) -> Result<usize, ConfigurationError> {
    let max = i32::MAX as usize;
    rows.checked_mul(cols)
        .filter(|_| rows <= max && cols <= max)
        .ok_or(ConfigurationError::BoardTooLarge { rows, cols })
}

/// places the seed patterns in order, each cell going to the faction that owns it,
/// and returns the placed counts for A and B. Cells falling off the board or onto
/// an occupied cell are skipped.
fn seed_patterns(grid: &mut Grid) -> (usize, usize) {
    let (rows, cols) = (grid.rows(), grid.cols());
    let (mut placed_a, mut placed_b) = (0, 0);
    for seed in SEEDS.iter() {
        let len = seed.pattern.offsets().len();
        for (index, pos) in seed.pattern.cells(seed.anchor(rows, cols)).enumerate() {
            if !grid.contains(pos) || !grid.get(pos).is_empty() {
                continue;
            }
            let faction = seed.ownership.owner(index, len);
            grid.set(pos, Cell::Alive(faction));
            match faction {
                Faction::A => placed_a += 1,
                Faction::B => placed_b += 1,
            }
        }
    }
    (placed_a, placed_b)
}

/// claims empty positions from `positions` until `faction` owns `target` cells.
///
/// positions are consumed even when skipped, so the caller can continue with the
/// next faction where this one stopped. Runs out quietly: the returned population
/// may be lower than `target`.
fn fill_best_effort(
    grid: &mut Grid,
    positions: &mut impl Iterator<Item = Pos>,
    faction: Faction,
    target: usize,
) -> usize {
    let mut placed = grid.population(faction);
    while placed < target {
        let Some(pos) = positions.next() else {
            break;
        };
        if grid.get(pos).is_empty() {
            grid.set(pos, Cell::Alive(faction));
            placed += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{pattern::Pattern, pos};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn rejects_requests_over_capacity() {
        let result = initialize(1, 1, 1, 1, &mut rng());
        assert_eq!(
            result,
            Err(ConfigurationError::TooManyCells {
                requested: 2,
                reserved: 17,
                capacity: 1,
            })
        );
    }

    #[test]
    fn capacity_check_is_inclusive() {
        // 10x10 holds exactly 100 = 40 + 43 + 17
        assert!(initialize(10, 10, 40, 43, &mut rng()).is_ok());
        assert!(initialize(10, 10, 40, 44, &mut rng()).is_err());
    }

    #[test]
    fn huge_requests_do_not_overflow() {
        assert!(initialize(20, 40, usize::MAX, usize::MAX, &mut rng()).is_err());
        assert!(initialize(0, 40, 0, 0, &mut rng()).is_err());
    }

    #[test]
    fn huge_boards_are_rejected() {
        let too_wide = i32::MAX as usize + 1;
        assert_eq!(
            initialize(usize::MAX, 2, 0, 0, &mut rng()),
            Err(ConfigurationError::BoardTooLarge {
                rows: usize::MAX,
                cols: 2,
            })
        );
        assert!(initialize(usize::MAX, usize::MAX, 0, 0, &mut rng()).is_err());
        assert!(initialize(1, too_wide, 0, 0, &mut rng()).is_err());
        assert!(initialize(too_wide, 1, 0, 0, &mut rng()).is_err());
    }

    #[test]
    fn reference_board_has_requested_populations() {
        let grid = initialize(20, 40, 80, 80, &mut rng()).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (20, 40));
        assert_eq!(grid.population(Faction::A), 80);
        assert_eq!(grid.population(Faction::B), 80);
        let empty = grid.positions().filter(|&p| grid.get(p).is_empty()).count();
        assert_eq!(empty, 800 - 160);
    }

    #[test]
    fn seed_patterns_keep_their_faction() {
        let grid = initialize(20, 40, 80, 80, &mut rng()).unwrap();
        for pos in Pattern::Blinker.cells(pos!(10, 10)) {
            assert_eq!(grid.get(pos), Cell::Alive(Faction::A));
        }
        for pos in Pattern::Toad.cells(pos!(15, 10)) {
            assert_eq!(grid.get(pos), Cell::Alive(Faction::B));
        }
        let beacon: Vec<Pos> = Pattern::Beacon.cells(pos!(20, 10)).collect();
        for pos in &beacon[..4] {
            assert_eq!(grid.get(*pos), Cell::Alive(Faction::A));
        }
        for pos in &beacon[4..] {
            assert_eq!(grid.get(*pos), Cell::Alive(Faction::B));
        }
    }

    #[test]
    fn seeding_alone_when_no_random_cells_requested() {
        let grid = initialize(20, 40, 0, 0, &mut rng()).unwrap();
        assert_eq!(grid.population(Faction::A), 3 + 4);
        assert_eq!(grid.population(Faction::B), 6 + 4);
    }

    #[test]
    fn same_seed_same_board() {
        let first = initialize(20, 40, 80, 80, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = initialize(20, 40, 80, 80, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn clipped_patterns_are_skipped_quietly() {
        // on a single row only the middle blinker cell and the top row of
        // the toad and beacon fit
        let grid = initialize(1, 40, 0, 0, &mut rng()).unwrap();
        assert_eq!(grid.get(pos!(10, 0)), Cell::Alive(Faction::A));
        assert_eq!(grid.population(Faction::A), 1 + 2);
        assert_eq!(grid.population(Faction::B), 3);
    }

    #[test]
    fn fill_runs_out_quietly() {
        let mut grid = Grid::new(2, 2);
        let mut positions = grid.positions().collect::<Vec<_>>().into_iter();
        let placed_a = fill_best_effort(&mut grid, &mut positions, Faction::A, 3);
        let placed_b = fill_best_effort(&mut grid, &mut positions, Faction::B, 3);
        assert_eq!(placed_a, 3);
        assert_eq!(placed_b, 1);
        assert_eq!(positions.next(), None);
    }

    #[test]
    fn fill_skips_occupied_without_revisiting() {
        let mut grid = Grid::deserialize("B.\n..");
        let mut positions = vec![pos!(0, 0), pos!(1, 0)].into_iter();
        let placed = fill_best_effort(&mut grid, &mut positions, Faction::A, 2);
        assert_eq!(placed, 1);
        assert_eq!(grid.get(pos!(0, 0)), Cell::Alive(Faction::B));
        assert_eq!(grid.get(pos!(1, 0)), Cell::Alive(Faction::A));
    }
}
