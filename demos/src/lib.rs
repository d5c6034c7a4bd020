//! Shared pieces of the terminal demo: argument parsing and ASCII rendering.

use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use relief_core::{Cell, Designation, Grid, Point, Status};
use relief_paths::{SearchObserver, SearchOutcome};
use relief_session::{Session, SessionConfig};

pub const USAGE: &str = "\
relief - pathfinding over generated terrain

USAGE:
    relief [OPTIONS]

OPTIONS:
    -a, --algorithm <NAME>   dijkstra, astar or breadth (default: astar)
    -W, --width <N>          interior width in cells (default: 38)
    -H, --height <N>         interior height in cells (default: 29)
    -t, --threshold <PCT>    block cells below this percentage of the cost range (default: 50)
        --no-smoothing       skip the median smoothing pass
        --seed <N>           seed the terrain generator
        --start <X,Y>        start cell (default: first open cell)
        --end <X,Y>          end cell (default: last open cell)
    -i, --input <FILE>       load a saved grid instead of generating one
    -o, --output <FILE>      save the grid after the search
    -h, --help               print this help
";

/// Command-line options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub config: SessionConfig,
    pub seed: Option<u64>,
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Args {
    /// Parse arguments (program name excluded). `Ok(None)` means help was
    /// requested.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Option<Self>, String> {
        let mut out = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
            match arg.as_str() {
                "-a" | "--algorithm" => {
                    out.config.algorithm = value()?.parse().map_err(|e| format!("{e}"))?;
                }
                "-W" | "--width" => out.config.terrain.width = number(&arg, &value()?)?,
                "-H" | "--height" => out.config.terrain.height = number(&arg, &value()?)?,
                "-t" | "--threshold" => {
                    out.config.terrain.threshold_percent = number(&arg, &value()?)?;
                }
                "--no-smoothing" => out.config.terrain.smoothing_passes = 0,
                "--seed" => out.seed = Some(number(&arg, &value()?)?),
                "--start" => out.start = Some(point(&value()?)?),
                "--end" => out.end = Some(point(&value()?)?),
                "-i" | "--input" => out.input = Some(value()?.into()),
                "-o" | "--output" => out.output = Some(value()?.into()),
                "-h" | "--help" => return Ok(None),
                _ => return Err(format!("unknown argument: {arg}")),
            }
        }
        Ok(Some(out))
    }
}

fn number<T: std::str::FromStr>(flag: &str, s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("invalid value for {flag}: {s}"))
}

fn point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s}"))?;
    Ok(Point::new(number("X", x.trim())?, number("Y", y.trim())?))
}

/// Character for one cell.
pub fn glyph(c: &Cell) -> char {
    if c.is_start() {
        'S'
    } else if c.is_end() {
        'E'
    } else if c.reveal().is_some() {
        'o'
    } else {
        match c.status() {
            Status::NonTraversable => '#',
            Status::Visited => '.',
            Status::Unvisited => ' ',
        }
    }
}

/// Draw the interior of `grid`, one text line per row.
pub fn render_ascii(grid: &Grid) -> String {
    let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    grid.render(|c| {
        out.push(glyph(c));
        if c.x() == grid.width() {
            out.push('\n');
        }
    });
    out
}

#[derive(Default)]
struct VisitCounter(usize);

impl SearchObserver for VisitCounter {
    fn visited(&mut self, _grid: &Grid, _p: Point) {
        self.0 += 1;
    }
}

/// Build the session, run one search and return the rendered result.
pub fn run(args: &Args) -> Result<String, Box<dyn Error>> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = match &args.input {
        Some(path) => Session::load(args.config.clone(), rng, path)?,
        None => Session::new(args.config.clone(), rng)?,
    };

    let (stored, first, last) = {
        let g = session.grid();
        let mut open = g.interior_cells().filter(|c| c.is_traversable()).map(|c| c.pos());
        let first = open.next();
        ((g.start(), g.end()), first, open.last().or(first))
    };
    // A loaded grid keeps its endpoints unless the command line overrides one.
    let overridden = args.start.is_some() || args.end.is_some();
    if overridden || stored.0.is_none() || stored.1.is_none() {
        let (Some(start), Some(end)) = (
            args.start.or(stored.0).or(first),
            args.end.or(stored.1).or(last),
        ) else {
            return Err("the terrain has no traversable cell".into());
        };
        session.reset()?;
        if !matches!(session.designate(start)?, Designation::Start(_)) {
            return Err(format!("could not place the start at {start}").into());
        }
        if !matches!(session.designate(end)?, Designation::End(_)) {
            return Err(format!("could not place the end at {end}").into());
        }
    }

    let mut counter = VisitCounter::default();
    let report = session.run_search(&mut counter)?;
    if let Some(path) = &args.output {
        session.save(path)?;
    }

    let (mut out, start, end) = {
        let g = session.grid();
        let endpoint = |p: Option<Point>| p.map_or_else(|| "?".to_string(), |p| p.to_string());
        (render_ascii(&g), endpoint(g.start()), endpoint(g.end()))
    };
    let algorithm = report.algorithm;
    match report.outcome {
        SearchOutcome::Reached { distance, visited } => writeln!(
            out,
            "{algorithm}: {start} -> {end}, distance {distance:.2}, {} cells on path, {visited} visited",
            report.path.len()
        )?,
        outcome => writeln!(
            out,
            "{algorithm}: {start} -> {end}, no path ({} visited)",
            outcome.visited()
        )?,
    }
    log::debug!("observer saw {} finalized cells", counter.0);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_paths::Algorithm;

    fn args(s: &str) -> Result<Option<Args>, String> {
        Args::parse(s.split_whitespace().map(String::from))
    }

    #[test]
    fn parses_options() {
        let a = args("-a breadth -W 10 -H 7 -t 42.5 --no-smoothing --seed 9 --start 1,2 --end 10,7")
            .unwrap()
            .unwrap();
        assert_eq!(a.config.algorithm, Algorithm::BreadthFirst);
        assert_eq!((a.config.terrain.width, a.config.terrain.height), (10, 7));
        assert_eq!(a.config.terrain.threshold_percent, 42.5);
        assert_eq!(a.config.terrain.smoothing_passes, 0);
        assert_eq!(a.seed, Some(9));
        assert_eq!(a.start, Some(Point::new(1, 2)));
        assert_eq!(a.end, Some(Point::new(10, 7)));
    }

    #[test]
    fn defaults_and_help() {
        assert_eq!(args("").unwrap(), Some(Args::default()));
        assert_eq!(args("--seed 1 -h").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(args("--bogus").is_err());
        assert!(args("--width").is_err());
        assert!(args("-a greedy").is_err());
        assert!(args("--start 3").is_err());
    }

    #[test]
    fn renders_interior_rows() {
        let mut g = Grid::new(3, 2).unwrap();
        g.block(Point::new(2, 1));
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_end(Point::new(3, 2)).unwrap();
        assert_eq!(render_ascii(&g), "S# \n  E\n");
    }

    #[test]
    fn seeded_run_is_reproducible() {
        let a = Args {
            seed: Some(5),
            ..Args::parse(["-W", "16", "-H", "10", "-t", "20"].map(String::from))
                .unwrap()
                .unwrap()
        };
        let first = run(&a).unwrap();
        assert_eq!(first, run(&a).unwrap());
        assert_eq!(first.lines().count(), 11);
    }

    #[test]
    fn loaded_grid_takes_new_start() {
        let path = std::env::temp_dir().join(format!("relief-demo-{}.bin", std::process::id()));
        let file = path.display().to_string();
        let saved = args(&format!(
            "-W 10 -H 6 -t 0 --no-smoothing --seed 3 --start 1,1 --end 10,6 -o {file}"
        ))
        .unwrap()
        .unwrap();
        let out = run(&saved).unwrap();
        assert!(out.contains("(1, 1) -> (10, 6)"));

        let rerun = run(&args(&format!("-i {file} --start 4,3")).unwrap().unwrap());
        let kept = run(&args(&format!("-i {file}")).unwrap().unwrap());
        let _ = std::fs::remove_file(&path);

        let out = rerun.unwrap();
        assert!(out.contains("(4, 3) -> (10, 6)"), "{out}");
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows[2].chars().nth(3), Some('S'));
        assert_ne!(rows[0].chars().next(), Some('S'));
        assert!(kept.unwrap().contains("(1, 1) -> (10, 6)"));
    }
}
