use std::{
    io::{self, stdin, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{anyhow, Context};
use termion::{cursor, event::Key, input::TermRead, raw::IntoRawMode, screen::AlternateScreen};

use crate::{pos, Cell, Faction, Frame, Pos, SimHandle};

pub use canvas::{Canvas, Shade, Tile};
mod canvas;

pub struct View {
    thread: JoinHandle<io::Result<()>>,
}

impl View {
    pub fn spawn(handle: SimHandle) -> Self {
        let thread = thread::spawn(|| view_loop(handle));
        Self { thread }
    }

    pub fn join(self) -> anyhow::Result<()> {
        self.thread
            .join()
            .map_err(|_| anyhow!("view thread panicked"))?
            .context("terminal view failed")
    }
}

#[derive(Debug)]
pub enum InputCmd {
    Exit,
    TogglePause,
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for key in stdin().keys() {
        let command = match key {
            Ok(Key::Char('q') | Key::Esc | Key::Ctrl('c')) | Err(_) => InputCmd::Exit,
            Ok(Key::Char(' ')) => InputCmd::TogglePause,
            Ok(_) => continue,
        };

        let exit = matches!(command, InputCmd::Exit);
        if sender.send(command).is_err() || exit {
            break;
        }
    }
}

const VIEW_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

fn view_loop(handle: SimHandle) -> io::Result<()> {
    let mut screen = AlternateScreen::from(stdout().into_raw_mode()?);
    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    write!(screen, "{}", cursor::Hide)?;
    let result = render_until_exit(&mut screen, &handle, &receiver);
    write!(screen, "{}", cursor::Show)?;
    screen.flush()?;
    result
}

fn render_until_exit(
    out: &mut impl Write,
    handle: &SimHandle,
    receiver: &mpsc::Receiver<InputCmd>,
) -> io::Result<()> {
    loop {
        if handle_inputs(receiver, handle) {
            return Ok(());
        }
        let Some(frame) = handle.snapshot() else {
            return Ok(());
        };
        display_frame(out, &frame)?;
        thread::sleep(VIEW_REFRESH_INTERVAL);
    }
}

/// returns true when the user asked to leave.
fn handle_inputs(receiver: &mpsc::Receiver<InputCmd>, handle: &SimHandle) -> bool {
    for cmd in receiver.try_iter() {
        match cmd {
            InputCmd::Exit => return true,
            InputCmd::TogglePause => handle.toggle_pause(),
        }
    }
    false
}

pub fn shade_of(cell: Cell) -> Shade {
    match cell {
        Cell::Empty => Shade::White,
        Cell::Alive(Faction::A) => Shade::Blue,
        Cell::Alive(Faction::B) => Shade::Red,
    }
}

pub fn status_line(frame: &Frame) -> String {
    let mut line = format!(
        "P2Life | generation {}/{} | A: {} | B: {}",
        frame.generation,
        frame.generations,
        frame.grid.population(Faction::A),
        frame.grid.population(Faction::B),
    );
    if frame.is_finished() {
        line += " | done, q to quit";
    } else if frame.paused {
        line += " [paused]";
    }
    line
}

/// the board sits below the status line; each cell is two columns wide.
fn board_pos(Pos { x, y }: Pos) -> Pos {
    pos!(x.div_euclid(2), y - 1)
}

fn display_frame(out: &mut impl Write, frame: &Frame) -> io::Result<()> {
    let mut canvas = Canvas::from_screen()?;
    canvas.text(0, &status_line(frame));
    canvas.layer(|pos| {
        let pos = board_pos(pos);
        frame
            .grid
            .contains(pos)
            .then(|| Tile::filled(shade_of(frame.grid.get(pos))))
    });
    canvas.display(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;

    fn frame(generation: usize, paused: bool) -> Frame {
        Frame {
            generation,
            generations: 50,
            paused,
            grid: Grid::deserialize("AB.\n.A."),
        }
    }

    #[test]
    fn factions_have_their_own_colors() {
        assert_eq!(shade_of(Cell::Empty), Shade::White);
        assert_eq!(shade_of(Cell::Alive(Faction::A)), Shade::Blue);
        assert_eq!(shade_of(Cell::Alive(Faction::B)), Shade::Red);
    }

    #[test]
    fn status_line_shows_progress_and_populations() {
        assert_eq!(
            status_line(&frame(3, false)),
            "P2Life | generation 3/50 | A: 2 | B: 1"
        );
        assert!(status_line(&frame(3, true)).ends_with("[paused]"));
        assert!(status_line(&frame(50, false)).ends_with("done, q to quit"));
    }

    #[test]
    fn cells_are_two_columns_wide() {
        assert_eq!(board_pos(pos!(0, 1)), pos!(0, 0));
        assert_eq!(board_pos(pos!(1, 1)), pos!(0, 0));
        assert_eq!(board_pos(pos!(2, 3)), pos!(1, 2));
        assert_eq!(board_pos(pos!(5, 0)), pos!(2, -1));
    }
}
