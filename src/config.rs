use std::{path::PathBuf, time::Duration};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "p2life",
    version,
    about = "Two factions fight over a toroidal game of life board"
)]
pub struct Config {
    /// Grid height.
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    /// Grid width.
    #[arg(long, default_value_t = 40)]
    pub cols: usize,

    /// Number of generations to run.
    #[arg(long, default_value_t = 50)]
    pub generations: usize,

    /// Starting cells for faction A, seeded patterns included.
    #[arg(long, default_value_t = 80)]
    pub initial_cells_a: usize,

    /// Starting cells for faction B, seeded patterns included.
    #[arg(long, default_value_t = 80)]
    pub initial_cells_b: usize,

    /// Delay between two generations, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub interval_ms: u64,

    /// Seed for the random fill; a fresh board every run when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start from a text board (`A`, `B`, anything else empty) instead of a random one.
    #[arg(long, value_name = "PATH")]
    pub board: Option<PathBuf>,

    /// Run without the terminal UI and print the last generation.
    #[arg(long)]
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 40,
            generations: 50,
            initial_cells_a: 80,
            initial_cells_b: 80,
            interval_ms: 500,
            seed: None,
            board: None,
            headless: false,
        }
    }
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = Config::parse_from(["p2life"]);
        assert_eq!(config, Config::default());
        assert_eq!(config.interval(), Duration::from_millis(500));
    }

    #[test]
    fn parses_every_option() {
        let config = Config::parse_from([
            "p2life",
            "--rows",
            "10",
            "--cols",
            "12",
            "--generations",
            "3",
            "--initial-cells-a",
            "5",
            "--initial-cells-b",
            "6",
            "--interval-ms",
            "0",
            "--seed",
            "9",
            "--board",
            "start.txt",
            "--headless",
        ]);
        assert_eq!(
            config,
            Config {
                rows: 10,
                cols: 12,
                generations: 3,
                initial_cells_a: 5,
                initial_cells_b: 6,
                interval_ms: 0,
                seed: Some(9),
                board: Some(PathBuf::from("start.txt")),
                headless: true,
            }
        );
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        use rand::Rng;

        let config = Config {
            seed: Some(3),
            ..Config::default()
        };
        let first: u64 = config.rng().gen();
        let second: u64 = config.rng().gen();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_negative_counts() {
        assert!(Config::try_parse_from(["p2life", "--rows", "-1"]).is_err());
    }
}
