//! CLI for maze carving and route finding

use std::time::Instant;

use clap::Parser;
use itertools::Itertools;
use prim_maze::{Maze, WallKind};

/// Carve a perfect maze and optionally route between its corners
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    width: usize,

    /// Maze height in cells
    height: usize,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Find and display the route from (1, 1) to the opposite corner
    #[arg(short, long)]
    solve: bool,

    /// Allow diagonal steps in the route
    #[arg(short, long)]
    diagonals: bool,
}

/// Box-drawing glyph for one structural code; route cells override with a
/// dot.
fn glyph(kind: WallKind, on_path: bool) -> &'static str {
    if on_path {
        return "●";
    }
    match kind {
        WallKind::None => "  ",
        WallKind::Up | WallKind::Down | WallKind::UpDown => "│",
        WallKind::Left | WallKind::Right | WallKind::LeftRight => "─",
        WallKind::LeftUp => "┘",
        WallKind::LeftDown => "┐",
        WallKind::RightUp => "└",
        WallKind::RightDown => "┌",
        WallKind::LeftUpRight => "┴",
        WallKind::UpRightDown => "├",
        WallKind::RightDownLeft => "┬",
        WallKind::DownLeftUp => "┤",
        WallKind::LeftUpRightDown => "┼",
    }
}

/// Renders the grid top-down, highest row first.
fn render(maze: &Maze) -> String {
    (0..maze.height())
        .rev()
        .map(|y| {
            (0..maze.width())
                .filter_map(|x| maze.glyph_code(x, y))
                .map(|(kind, on_path)| glyph(kind, on_path))
                .join("")
        })
        .join("\n")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut maze = Maze::new();
    let carve_started = Instant::now();
    maze.create(args.width, args.height, args.seed)?;
    let carve_ms = carve_started.elapsed().as_secs_f64() * 1e3;

    println!("{}\n", render(&maze));

    let mut find_ms = 0.0;
    if args.solve {
        let goal = (2 * args.width - 1, 2 * args.height - 1);
        let find_started = Instant::now();
        let route = maze.find_path((1, 1), goal, args.diagonals);
        find_ms = find_started.elapsed().as_secs_f64() * 1e3;

        match route {
            Some(_) => println!("{}\n", render(&maze)),
            None => println!("no route found"),
        }
    }

    println!(
        "width = {} height = {} seed = {} create(ms) = {:.3} find(ms) = {:.3}",
        args.width, args.height, args.seed, carve_ms, find_ms
    );
    Ok(())
}
