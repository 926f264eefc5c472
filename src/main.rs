//! Snow Layout CLI
//!
//! Usage:
//!   snow-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -f, --flag <NAME>    Set a flag for `if` blocks (repeatable)
//!   -c, --config <FILE>  Solver configuration (TOML format)
//!   --constraints        Also list the active constraints
//!   -g, --grammar        Show script syntax reference
//!   -h, --help           Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use snow_layout::{solve_with_config, LayoutConfig, ScriptConfig};

#[derive(Parser)]
#[command(name = "snow-layout")]
#[command(about = "Solve auto-layout constraint scripts")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Set a flag for `if` blocks
    #[arg(short, long = "flag", value_name = "NAME")]
    flags: Vec<String>,

    /// Solver configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List the active constraints after the frames
    #[arg(long)]
    constraints: bool,

    /// Show script syntax reference
    #[arg(short, long)]
    grammar: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.grammar {
        print_grammar();
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let layout = match &cli.config {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = ScriptConfig::new()
        .with_layout(layout)
        .with_flags(cli.flags);
    match solve_with_config(&source, &config) {
        Ok(solved) => {
            for (name, frame) in &solved.frames {
                println!("{}: {}", name, frame);
            }
            if cli.constraints {
                println!();
                for constraint in &solved.constraints {
                    println!("{}", constraint);
                }
            }
        }
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename).trim_end());
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Snow Layout - Solve auto-layout constraint scripts

USAGE:
    snow-layout [OPTIONS] [FILE]
    echo '<script>' | snow-layout

OPTIONS:
    -f, --flag <NAME>   Set a flag for `if` blocks (repeatable)
    -c, --config        Solver configuration (TOML file)
    --constraints       Also list the active constraints
    -g, --grammar       Show script syntax reference
    -h, --help          Print help

QUICK START:
    echo 'view root [x: 0, y: 0, width: 320, height: 480]
          view box
          box.size ≈ [100, 50]
          box.center ≈ root.center' | snow-layout

Run --grammar for the syntax reference."#
    );
}

fn print_grammar() {
    println!(
        r#"SNOW LAYOUT SCRIPTS
===================

VIEWS
-----
view name                          Declare a view
view name [x: 0, width: 375]       Suggest frame values
view name [safe_top: 44]           Safe-area insets

Properties: x, y, width, height, safe_top, safe_left, safe_bottom, safe_right

CONSTRAINTS
-----------
a.leading ≈ b.leading + 16         Equal (also ==)
a.width ≥ b.width * 0.5            Greater or equal (also >=)
a.height ≤ 44                      Less or equal (also <=)
a.edges ≈ b.safe.edges + 8         Composite, one constraint per edge
a.size ≈ [44, 44]                  Width and height
a.width ≈ 100 • high               Priority (also @): number or
                                   required, high, low, fitting, lowest

Anchors: leading, trailing, top, bottom, center_x, center_y,
         width, height, edges, center, size
Safe-area anchors (view.safe.*): the above plus
         top_edges, vertical_edges, horizontal_edges

Modifiers apply left to right and each replaces one value:
    + k  offset    - k  inset    * k  scale    / k  divide
Scale and divide apply to width, height and size only.

CONDITIONALS
------------
if compact {{ ... }} else {{ ... }}
if !compact {{ ... }}
Flags are set with --flag NAME.

COMMENTS
--------
// line comment    /* block comment */"#
    );
}
