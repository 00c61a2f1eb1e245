use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use headway::grid::{MovementModel, OccupancyGrid, Orientation, Waypoint};
use headway::{OpenPolicy, PathFinder, QueueKind, SearchConfig};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;

#[derive(Parser)]
struct Options {
    /// ASCII map: `.` free, `#` blocked, one line per row.
    map: PathBuf,
    /// Start pose as `x,y,heading` with heading one of E, N, W, S.
    #[arg(long, required_unless_present = "random")]
    start: Option<Pose>,
    #[arg(long, required_unless_present = "random")]
    goal: Option<Pose>,
    /// Plan between this many random pose pairs instead, in parallel.
    #[arg(long)]
    random: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Allow arcs and half turns as well as straight moves and quarter turns.
    #[arg(long)]
    arcs: bool,
    #[arg(long, default_value_t = 1)]
    turn_cost: u32,
    /// Lower the cost of already-open waypoints when a cheaper route is found.
    #[arg(long)]
    relax: bool,
    /// Use the linear-scan open list.
    #[arg(long)]
    scan: bool,
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Clone, Copy)]
struct Pose(Waypoint);

impl FromStr for Pose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        let mut parts = s.split(',').map(str::trim);
        let mut coord = |name: &str| -> Result<i32, String> {
            parts
                .next()
                .ok_or_else(|| format!("missing {name}"))?
                .parse()
                .map_err(|e| format!("bad {name}: {e}"))
        };
        let x = coord("x")?;
        let y = coord("y")?;
        let orientation = match parts.next() {
            Some("E") | Some("e") => Orientation::East,
            Some("N") | Some("n") => Orientation::North,
            Some("W") | Some("w") => Orientation::West,
            Some("S") | Some("s") => Orientation::South,
            Some(other) => return Err(format!("unknown heading {other}")),
            None => return Err("missing heading".to_owned()),
        };
        if parts.next().is_some() {
            return Err("unexpected trailing text".to_owned());
        }
        Ok(Pose(Waypoint::new(x, y, orientation)))
    }
}

fn main() {
    env_logger::init();
    let opt = Options::parse();

    let text = match std::fs::read_to_string(&opt.map) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("failed to read {}: {e}", opt.map.display());
            std::process::exit(1);
        }
    };
    let grid: OccupancyGrid = match text.parse() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("failed to parse {}: {e}", opt.map.display());
            std::process::exit(1);
        }
    };

    let model = match opt.arcs {
        true => MovementModel::all(),
        false => MovementModel::default(),
    }
    .with_turn_cost(opt.turn_cost.max(1));

    let mut config = SearchConfig::default();
    if opt.relax {
        config = config.with_open_policy(OpenPolicy::Relax);
    }
    if opt.scan {
        config = config.with_queue(QueueKind::Scan);
    }
    if let Some(limit) = opt.limit {
        config = config.with_expansion_limit(limit);
    }

    match (opt.random, opt.start, opt.goal) {
        (Some(count), _, _) => run_batch(&grid, model, config, count, opt.seed),
        (None, Some(Pose(start)), Some(Pose(goal))) => run_single(&grid, model, config, start, goal),
        _ => unreachable!("clap requires start and goal without --random"),
    }
}

fn run_single(
    grid: &OccupancyGrid,
    model: MovementModel,
    config: SearchConfig,
    start: Waypoint,
    goal: Waypoint,
) {
    let mut finder = PathFinder::with_validator(model).with_config(config);
    let t = std::time::Instant::now();
    let result = finder.plan(grid, start, goal);
    let elapsed = t.elapsed();
    let stats = finder.stats();

    match result {
        Ok(Some(path)) => {
            println!(
                "found path of {} waypoints (cost {}) in {elapsed:?}, {} expanded",
                path.len(),
                stats.path_cost.unwrap_or_default(),
                stats.expanded
            );
            for w in &path {
                println!("  {w}");
            }
            print!("{}", render(grid, &path));
        }
        Ok(None) => println!("no path, {} expanded in {elapsed:?}", stats.expanded),
        Err(e) => println!("search failed: {e}"),
    }
}

fn run_batch(
    grid: &OccupancyGrid,
    model: MovementModel,
    config: SearchConfig,
    count: usize,
    seed: u64,
) {
    let free: Vec<_> = grid.free_cells().collect();
    if free.is_empty() {
        eprintln!("map has no free cells");
        std::process::exit(1);
    }

    let mut rng = Pcg64::seed_from_u64(seed);
    let pose = |rng: &mut Pcg64| {
        let (x, y) = free[rng.gen_range(0..free.len())];
        Waypoint::new(x, y, Orientation::from_index(rng.gen_range(0..4)))
    };
    let problems: Vec<_> = (0..count)
        .map(|_| (pose(&mut rng), pose(&mut rng)))
        .collect();

    let t = std::time::Instant::now();
    let results: Vec<_> = problems
        .par_iter()
        .map_init(
            || PathFinder::with_validator(model).with_config(config),
            |finder, &(start, goal)| {
                let result = finder.plan(grid, start, goal);
                (start, goal, result, finder.stats())
            },
        )
        .collect();
    let elapsed = t.elapsed();

    let mut found = 0;
    let mut expanded = 0;
    for (start, goal, result, stats) in &results {
        expanded += stats.expanded;
        match result {
            Ok(Some(path)) => {
                found += 1;
                println!("{start} -> {goal}: {} waypoints", path.len());
            }
            Ok(None) => println!("{start} -> {goal}: no path"),
            Err(e) => println!("{start} -> {goal}: {e}"),
        }
    }
    println!(
        "{found}/{} problems solved, {expanded} expansions, {elapsed:?}",
        results.len()
    );
}

/// Draws the map in the same layout it was read in, marking each visited cell with the heading
/// the path leaves it with.
fn render(grid: &OccupancyGrid, path: &[Waypoint]) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let on_path = path.iter().rev().find(|w| w.position() == (x, y));
            out.push(match on_path {
                Some(w) => match w.orientation {
                    Orientation::East => 'E',
                    Orientation::North => 'N',
                    Orientation::West => 'W',
                    Orientation::South => 'S',
                },
                None if grid.is_blocked(x, y) => '#',
                None => '.',
            });
        }
        out.push('\n');
    }
    out
}
