use std::{
    sync::mpsc::{self, TryRecvError},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{pos, Cell, Faction, Grid, Pos};

/// live neighbors of a cell, per faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeighborCounts {
    pub a: usize,
    pub b: usize,
}

impl NeighborCounts {
    pub fn of(&self, faction: Faction) -> usize {
        match faction {
            Faction::A => self.a,
            Faction::B => self.b,
        }
    }
}

fn neighbor_offsets() -> impl Iterator<Item = Pos> {
    (-1..=1)
        .flat_map(|x| (-1..=1).map(move |y| pos!(x, y)))
        .filter(|&offset| offset != pos!(0, 0))
}

/// counts the eight neighbors of `pos`, wrapping around the edges of the board.
pub fn neighbor_counts(grid: &Grid, pos: Pos) -> NeighborCounts {
    let mut counts = NeighborCounts::default();
    for offset in neighbor_offsets() {
        match grid.get_wrapped(pos + offset) {
            Cell::Alive(Faction::A) => counts.a += 1,
            Cell::Alive(Faction::B) => counts.b += 1,
            Cell::Empty => (),
        }
    }
    counts
}

/// a live cell is kept by two or three friendly neighbors, whatever the opponent
/// does. An empty cell is born to the faction with exactly three neighbors,
/// unless the opponent has three as well.
pub fn next_cell(cell: Cell, counts: NeighborCounts) -> Cell {
    match cell {
        Cell::Alive(faction) => match counts.of(faction) {
            2 | 3 => cell,    // stay
            _ => Cell::Empty, // die
        },
        Cell::Empty => Faction::ALL
            .into_iter()
            .find(|&faction| counts.of(faction) == 3 && counts.of(faction.opponent()) != 3)
            .map_or(Cell::Empty, Cell::Alive),
    }
}

/// computes the next generation. The input board is left untouched.
pub fn step(grid: &Grid) -> Grid {
    let mut next = Grid::new(grid.rows(), grid.cols());
    for pos in grid.positions() {
        let cell = next_cell(grid.get(pos), neighbor_counts(grid, pos));
        if !cell.is_empty() {
            next.set(pos, cell);
        }
    }
    next
}

/// applies `step` `generations` times in a row, without pacing.
pub fn run(grid: Grid, generations: usize) -> Grid {
    (1..=generations).fold(grid, |grid, generation| {
        let next = step(&grid);
        log_population(generation, &next);
        next
    })
}

fn log_population(generation: usize, grid: &Grid) {
    log::debug!(
        "generation {generation}: A={} B={}",
        grid.population(Faction::A),
        grid.population(Faction::B)
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub generation: usize,
    pub generations: usize,
    pub paused: bool,
    pub grid: Grid,
}

impl Frame {
    pub fn is_finished(&self) -> bool {
        self.generation >= self.generations
    }
}

pub enum SimCmd {
    Snapshot(mpsc::Sender<Frame>),
    TogglePause,
}

#[derive(Clone)]
pub struct SimHandle {
    sender: mpsc::Sender<SimCmd>,
}

impl SimHandle {
    /// `None` once the simulation thread is gone.
    pub fn snapshot(&self) -> Option<Frame> {
        let (sender, receiver) = mpsc::channel();
        self.sender.send(SimCmd::Snapshot(sender)).ok()?;
        receiver.recv().ok()
    }

    pub fn toggle_pause(&self) {
        let _ = self.sender.send(SimCmd::TogglePause);
    }
}

/// runs `step` on its own thread at a fixed pace, for a bounded number of
/// generations. Keeps answering snapshots until every handle is dropped.
#[derive(Debug)]
pub struct Sim {
    thread: JoinHandle<Frame>,
    sender: mpsc::Sender<SimCmd>,
}

impl Sim {
    pub fn spawn(grid: Grid, generations: usize, interval: Duration) -> Self {
        let frame = Frame {
            generation: 0,
            generations,
            paused: false,
            grid,
        };
        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || sim_loop(receiver, frame, interval));

        Self { sender, thread }
    }

    pub fn handle(&self) -> SimHandle {
        let sender = self.sender.clone();
        SimHandle { sender }
    }

    /// waits for every handle to be dropped, then returns the last frame.
    pub fn join(self) -> thread::Result<Frame> {
        let Self { thread, sender } = self;
        drop(sender);
        thread.join()
    }
}

const EVT_CHECK_TIMEOUT: Duration = Duration::from_millis(10);

fn sim_loop(receiver: mpsc::Receiver<SimCmd>, frame: Frame, interval: Duration) -> Frame {
    let mut current = frame;
    let mut last_update = Instant::now();
    log::info!("running {} generations", current.generations);

    loop {
        match receiver.try_recv() {
            Ok(SimCmd::Snapshot(sender)) => {
                let _ = sender.send(current.clone());
            }
            Ok(SimCmd::TogglePause) => {
                current.paused = !current.paused;
                log::info!(
                    "simulation {}",
                    if current.paused { "paused" } else { "resumed" }
                );
            }
            Err(TryRecvError::Empty) => (),
            Err(TryRecvError::Disconnected) => break,
        }

        if !current.paused && !current.is_finished() && last_update.elapsed() >= interval {
            current.grid = step(&current.grid);
            current.generation += 1;
            log_population(current.generation, &current.grid);
            if current.is_finished() {
                log::info!("finished after {} generations", current.generation);
            }
            last_update = Instant::now();
        }

        thread::sleep(EVT_CHECK_TIMEOUT);
    }

    current
}
