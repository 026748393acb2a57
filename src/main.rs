use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use knights_tour::{
    base::{
        Bounds, Position, Tour, VisitRecord,
        encode_decode::{self, EncodeType, ImportPack},
    },
    config::GlobalConfig,
    engine::{TourSolver, budget::SearchLimits, error::Error as SolverError, possible_moves},
    error::Result,
};
use log::{debug, error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "knights-tour", version, about = "Find, complete and check Knight's Tours")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the cells a knight can jump to from ROW,COL.
    Moves {
        position: Position,
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Complete a recorded tour, or find one from scratch.
    Solve {
        /// Start cell as ROW,COL. Defaults to the last recorded cell, or 0,0.
        #[arg(long)]
        start: Option<Position>,
        /// File holding the moves made so far.
        #[arg(long)]
        record: Option<PathBuf>,
        /// Encoding of the record file. Guessed from the extension if omitted.
        #[arg(long, value_enum)]
        input_format: Option<Format>,
        /// Output encoding.
        #[arg(long, value_enum)]
        format: Option<Format>,
        /// Give up after entering this many cells.
        #[arg(long)]
        max_nodes: Option<u64>,
        /// Give up after this many milliseconds.
        #[arg(long)]
        time_limit_ms: Option<u64>,
        /// Remember board size, output format and limits as new defaults.
        #[arg(long)]
        save: bool,
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Check that a recorded tour is legal and report whether it is complete.
    Verify {
        file: PathBuf,
        #[arg(long, value_enum)]
        input_format: Option<Format>,
        #[command(flatten)]
        board: BoardArgs,
    },
}

#[derive(Debug, Args)]
struct BoardArgs {
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
}

impl BoardArgs {
    fn bounds(&self, config: &GlobalConfig) -> Bounds {
        let defaults = config.bounds();
        Bounds::new(
            self.width.unwrap_or(defaults.width),
            self.height.unwrap_or(defaults.height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Ascii,
    Json,
    Base64,
}

impl From<Format> for EncodeType {
    fn from(value: Format) -> Self {
        match value {
            Format::Ascii => EncodeType::Ascii,
            Format::Json => EncodeType::Json,
            Format::Base64 => EncodeType::Base64,
        }
    }
}

fn guess_format(path: &Path) -> EncodeType {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => EncodeType::Json,
        Some("b64" | "base64") => EncodeType::Base64,
        _ => EncodeType::Ascii,
    }
}

/// Read a record file; the board size comes from the file when its encoding carries one.
fn read_record(path: &Path, format: Option<Format>, fallback: Bounds) -> Result<(Bounds, VisitRecord)> {
    let encode_type = format.map(EncodeType::from).unwrap_or_else(|| guess_format(path));
    debug!("Reading {} record from {}", encode_type, path.to_string_lossy());
    let text = fs::read_to_string(path)?;
    let ImportPack { bounds, record } = encode_decode::decode(encode_type, &text)?;
    if let Some(bounds) = bounds
        && bounds != fallback
    {
        warn!("Using board size {bounds} from {}", path.to_string_lossy());
    }
    Ok((bounds.unwrap_or(fallback), record))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::from(2)
        },
    }
}

fn run(command: Command) -> Result<ExitCode> {
    let mut config = GlobalConfig::load_or_default();
    match command {
        Command::Moves { position, board } => {
            let bounds = board.bounds(&config);
            if !bounds.contains(position) {
                return Err(SolverError::StartOutOfBounds {
                    start: position,
                    bounds,
                }
                .into());
            }
            for destination in possible_moves(position, bounds) {
                println!("{destination}");
            }
            Ok(ExitCode::SUCCESS)
        },
        Command::Solve {
            start,
            record,
            input_format,
            format,
            max_nodes,
            time_limit_ms,
            save,
            board,
        } => {
            let bounds = board.bounds(&config);
            let (bounds, record) = match record {
                Some(path) => read_record(&path, input_format, bounds)?,
                None => (bounds, VisitRecord::new()),
            };
            let start = start.or_else(|| record.last()).unwrap_or(Position::new(0, 0));
            let limits = SearchLimits {
                max_nodes: max_nodes.or(config.limits.max_nodes),
                time_limit_ms: time_limit_ms.or(config.limits.time_limit_ms),
            };
            let output = format.map(EncodeType::from).unwrap_or(config.format);

            if save {
                config.board = [bounds.width, bounds.height];
                config.format = output;
                config.limits = limits;
                _ = config.save().inspect_err(|e| error!("Failed to save config: {e}"));
            }

            let (tour, stats) = TourSolver::new()
                .with_limits(limits)
                .solve_with_stats(start, bounds, &record)?;
            info!(
                "{} search visited {} nodes in {} ms",
                stats.strategy, stats.nodes, stats.elapsed_ms
            );
            match tour {
                Some(tour) => {
                    println!("{}", encode_decode::encode(output, bounds, &tour.to_visit_record())?);
                    Ok(ExitCode::SUCCESS)
                },
                None => {
                    println!("No solution found");
                    Ok(ExitCode::from(1))
                },
            }
        },
        Command::Verify {
            file,
            input_format,
            board,
        } => {
            let (bounds, record) = read_record(&file, input_format, board.bounds(&config))?;
            let tour = Tour::new(bounds, record.to_path(bounds)?);
            match tour.verify() {
                Ok(()) => {
                    println!("Complete tour of the {bounds} board");
                    Ok(ExitCode::SUCCESS)
                },
                Err(SolverError::IncompleteTour { visited, area }) => {
                    println!("Legal partial tour: {visited} of {area} cells visited");
                    Ok(ExitCode::from(1))
                },
                Err(e) => Err(e.into()),
            }
        },
    }
}
