use clap::{Parser, Subcommand, ValueEnum};
use puzzlesearch::puzzles::{
    football::Football, magic_square::MagicSquare, meeting::Meeting, molecule::Molecule,
    pacman::Pacman, queens::Queens, rooks::Rooks, sudoku::Sudoku,
};
use puzzlesearch::search::{
    parse_duration, validate, Problem, ProblemNode, SearchConfig, SearchEngineName,
    SearchStatistics, Verbosity,
};
use puzzlesearch::{ConfigError, InputError, SearchError, ValidationError};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Largest board for which the queens command counts every solution.
const QUEENS_COUNT_LIMIT: usize = 6;

#[derive(Parser)]
#[command(version)]
/// Solve toy search puzzles with a choice of search engine.
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(
        value_enum,
        help = "The search engine to use, each puzzle has its own default",
        short = 'e',
        long = "engine",
        id = "ENGINE",
        global = true
    )]
    search_engine_name: Option<SearchEngineName>,
    #[arg(
        help = "A TOML file with search settings, overridden by the flags below",
        long = "config",
        id = "CONFIG",
        global = true
    )]
    config: Option<PathBuf>,
    #[arg(
        help = "The depth bound of depth-limited search",
        long = "depth-limit",
        id = "DEPTH_LIMIT",
        global = true
    )]
    depth_limit: Option<usize>,
    #[arg(
        help = "Give up after this much time, e.g. 30s or 2m",
        long = "time-limit",
        id = "TIME_LIMIT",
        value_parser = parse_duration,
        global = true
    )]
    time_limit: Option<Duration>,
    #[arg(
        help = "Give up once the process uses this many MiB",
        long = "memory-limit",
        id = "MEMORY_LIMIT",
        global = true
    )]
    memory_limit: Option<usize>,
    #[arg(
        help = "Give up after expanding this many nodes",
        long = "max-expansions",
        id = "MAX_EXPANSIONS",
        global = true
    )]
    max_expansions: Option<u64>,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal,
        global = true
    )]
    verbosity: Verbosity,
    #[arg(
        help = "Whether to use coloured output",
        short = 'c',
        long = "colour",
        global = true
    )]
    colour: bool,
    #[arg(help = "Print the result as JSON", long = "json", global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Slide two hydrogen atoms and an oxygen atom into an H-O-H row.
    Molecule {
        #[arg(help = "Atom positions, one `x,y` line each; standard input if absent")]
        input: Option<PathBuf>,
        #[arg(help = "Solve the built-in layout instead of reading input", long = "classic")]
        classic: bool,
    },
    /// Dribble the ball past the opponents into the goal.
    Football {
        #[arg(help = "Man and ball positions; standard input if absent")]
        input: Option<PathBuf>,
    },
    /// Collect every star with Pac-Man.
    Pacman {
        #[arg(help = "Position, heading and stars; standard input if absent")]
        input: Option<PathBuf>,
    },
    /// Place non-attacking queens. Small boards report the number of
    /// solutions, larger ones a single placement.
    Queens {
        #[arg(help = "Number of queens and size of the board")]
        n: usize,
    },
    /// Place rooks so that no two share a row or a column.
    Rooks {
        #[arg(help = "Number of rooks and size of the board", default_value_t = 8)]
        n: usize,
    },
    /// Fill an order four magic square.
    MagicSquare,
    /// Solve a Sudoku grid. The input may start with a line naming the
    /// solver, which `--engine` overrides.
    Sudoku {
        #[arg(help = "81 digits, 0 or . for a blank; standard input if absent")]
        input: Option<PathBuf>,
    },
    /// List every valid meeting schedule.
    Meeting,
}

impl Commands {
    fn default_engine(&self) -> SearchEngineName {
        match self {
            Commands::Molecule { .. } => SearchEngineName::BreadthFirstGraph,
            Commands::Football { .. } | Commands::Pacman { .. } => SearchEngineName::Astar,
            Commands::Queens { .. }
            | Commands::Rooks { .. }
            | Commands::MagicSquare
            | Commands::Sudoku { .. }
            | Commands::Meeting => SearchEngineName::DepthFirstTree,
        }
    }
}

#[derive(Error, Debug)]
enum SolverError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("found an invalid solution: {0}")]
    Validation(#[from] ValidationError),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Report<'a, S> {
    puzzle: &'a str,
    engine: String,
    result: String,
    cost: Option<f64>,
    actions: Vec<String>,
    final_state: Option<&'a S>,
    statistics: &'a SearchStatistics,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level: tracing::Level = cli.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(cli.colour)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether a solution was found.
fn run(cli: &Cli) -> Result<bool, SolverError> {
    let config = search_config(cli)?;
    let engine = config.engine_or(cli.command.default_engine());

    match &cli.command {
        Commands::Molecule { input, classic } => {
            let problem = if *classic {
                Molecule::classic()
            } else {
                Molecule::from_text(&read_input(input.as_deref())?)?
            };
            solve(&problem, engine, &config, cli.json, action_lines::<Molecule>)
        }
        Commands::Football { input } => {
            let problem = Football::from_text(&read_input(input.as_deref())?)?;
            solve(&problem, engine, &config, cli.json, |node| {
                node.path_states()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Commands::Pacman { input } => {
            let problem = Pacman::from_text(&read_input(input.as_deref())?)?;
            solve(&problem, engine, &config, cli.json, action_lines::<Pacman>)
        }
        Commands::Queens { n } => {
            let queens = Queens::new(*n)?;
            if *n <= QUEENS_COUNT_LIMIT {
                let count = queens.count_solutions();
                info!(queens = *n, solutions = count);
                if cli.json {
                    println!(
                        "{}",
                        serde_json::json!({ "puzzle": "queens", "n": n, "solutions": count })
                    );
                } else {
                    println!("{}", count);
                }
                Ok(count > 0)
            } else {
                solve(queens.csp(), engine, &config, cli.json, |node| {
                    Queens::decode(node.state())
                        .map(|columns| queens.render(&columns))
                        .unwrap_or_default()
                })
            }
        }
        Commands::Rooks { n } => {
            let rooks = Rooks::new(*n)?;
            solve(rooks.csp(), engine, &config, cli.json, |node| {
                rooks
                    .decode(node.state())
                    .map(|squares| rooks.render(&squares))
                    .unwrap_or_default()
            })
        }
        Commands::MagicSquare => {
            let square = MagicSquare::new()?;
            solve(square.csp(), engine, &config, cli.json, |node| {
                MagicSquare::decode(node.state())
                    .map(|square| MagicSquare::render(&square))
                    .unwrap_or_default()
            })
        }
        Commands::Sudoku { input } => {
            let sudoku = Sudoku::from_text(&read_input(input.as_deref())?)?;
            info!(blanks = sudoku.blanks());
            let engine = match (cli.search_engine_name, sudoku.solver()) {
                (None, Some(solver)) => solver,
                _ => engine,
            };
            solve(sudoku.csp(), engine, &config, cli.json, |node| {
                Sudoku::decode(node.state())
                    .map(|grid| Sudoku::render(&grid))
                    .unwrap_or_default()
            })
        }
        Commands::Meeting => {
            let schedules = Meeting::new()?.all_schedules();
            info!(schedules = schedules.len());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schedules)?);
            } else {
                for schedule in &schedules {
                    println!("{}", schedule);
                }
            }
            Ok(!schedules.is_empty())
        }
    }
}

/// The config file if one is given, with the command line flags applied on
/// top. An engine named nowhere is left to the puzzle's default.
fn search_config(cli: &Cli) -> Result<SearchConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_path(path)?,
        None => SearchConfig::default(),
    };
    if cli.search_engine_name.is_some() {
        config.engine = cli.search_engine_name;
    }
    if let Some(depth_limit) = cli.depth_limit {
        config.depth_limit = depth_limit;
    }
    if cli.time_limit.is_some() {
        config.limits.time_limit = cli.time_limit;
    }
    if cli.memory_limit.is_some() {
        config.limits.memory_limit_mb = cli.memory_limit;
    }
    if cli.max_expansions.is_some() {
        config.limits.max_expansions = cli.max_expansions;
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String, SolverError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| SolverError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| SolverError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(text)
        }
    }
}

fn action_lines<P: Problem>(node: &ProblemNode<P>) -> String {
    node.solution()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs `engine` on `problem` under the budget in `config`, validates any
/// solution and prints it with `render`, or as JSON.
fn solve<P>(
    problem: &P,
    engine: SearchEngineName,
    config: &SearchConfig,
    json: bool,
    render: impl Fn(&ProblemNode<P>) -> String,
) -> Result<bool, SolverError>
where
    P: Problem,
    P::State: Serialize,
{
    let engine_name = engine
        .to_possible_value()
        .map(|value| value.get_name().to_string())
        .unwrap_or_default();
    info!(puzzle = problem.name(), engine = %engine_name);

    let (result, statistics) = engine.search(problem, config)?;
    let node = result.solution_node();
    if let Some(node) = node {
        info!("validating solution");
        validate(problem, &node.solution())?;
        info!("solution is valid");
        info!(solution_length = node.depth());
    }

    if json {
        let report = Report {
            puzzle: problem.name(),
            engine: engine_name,
            result: result.to_string(),
            cost: node.map(|node| node.path_cost().into_inner()),
            actions: node
                .map(|node| node.solution().iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
            final_state: node.map(|node| node.state()),
            statistics: &statistics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match node {
            Some(node) => println!("{}", render(node)),
            None => println!("No solution found: {}", result),
        }
    }
    Ok(node.is_some())
}
