use anyhow::Context;
use citydist::config::Config;
use citydist::location::{build_resolver, Backend, City};
use citydist::prompt::{PromptError, Prompter};
use citydist::{closest_pair, report, DistanceCalculator};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// citydist: great-circle distance between cities
///
/// Resolves "City, Country" names to coordinates from a local CSV dataset or
/// the OpenStreetMap Nominatim geocoder, then applies the haversine formula.
/// Cities not given on the command line are asked for interactively.
///
/// Examples:
///   citydist
///   citydist --backend dataset distance "New York, USA" "Los Angeles, USA"
///   citydist --backend nominatim closest "Madrid, Spain" "Berlin, Germany" "Paris, France"
#[derive(Parser)]
#[command(name = "citydist", version, about, long_about = None)]
struct Cli {
    /// Coordinate source: "dataset", "nominatim" or "stub".
    /// Without it the source is chosen from a menu.
    #[arg(long, global = true, value_parser = parse_backend)]
    backend: Option<Backend>,

    /// CSV dataset with a city,country,lat,lng header
    /// (default: data/worldcities.csv, relative to the working directory).
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Nominatim-compatible search endpoint.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Print the result as JSON on stdout.
    #[arg(long, global = true)]
    json: bool,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Distance between two cities.
    Distance {
        /// First city, e.g. "New York, USA".
        #[arg(value_parser = parse_city)]
        from: Option<City>,
        /// Second city.
        #[arg(value_parser = parse_city)]
        to: Option<City>,
    },
    /// The closest pair among three cities (default).
    Closest {
        /// Up to three cities, e.g. "Madrid, Spain".
        #[arg(value_parser = parse_city, num_args = 0..=3)]
        cities: Vec<City>,
    },
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_city(s: &str) -> Result<City, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::load().context("loading configuration")?;
    if let Some(backend) = cli.backend {
        config.backend = Some(backend);
    }
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());

    // ── Pick the coordinate source once ─────────────────────────

    let backend = match config.backend {
        Some(backend) => backend,
        None => match prompter.choose_backend() {
            Ok(backend) => backend,
            Err(PromptError::InvalidOption(option)) => {
                eprintln!("Invalid option: {}", option);
                return Ok(ExitCode::from(2));
            }
            Err(e) => return Err(e).context("reading backend choice"),
        },
    };
    let calculator = DistanceCalculator::new(build_resolver(backend, &config));

    // ── Compute ─────────────────────────────────────────────────

    let json = cli.json;
    let line = match cli.command.unwrap_or(Command::Closest { cities: Vec::new() }) {
        Command::Distance { from, to } => {
            let cities = fill_cities(&mut prompter, [from, to].into_iter().flatten().collect(), 2)?;
            calculator
                .calculate(&cities[0], &cities[1])
                .with_context(|| format!("measuring {} to {}", cities[0], cities[1]))?
                .map(|km| {
                    if json {
                        report::distance_json(&cities[0], &cities[1], km)
                    } else {
                        Ok(report::distance_line(&cities[0], &cities[1], km))
                    }
                })
                .transpose()?
        }
        Command::Closest { cities } => {
            let cities: [City; 3] = fill_cities(&mut prompter, cities, 3)?
                .try_into()
                .map_err(|_| anyhow::anyhow!("expected exactly three cities"))?;
            closest_pair(&cities, &calculator)
                .context("searching for the closest pair")?
                .map(|pair| {
                    if json {
                        report::closest_json(&pair)
                    } else {
                        Ok(report::closest_line(&pair))
                    }
                })
                .transpose()?
        }
    };

    // ── Report ──────────────────────────────────────────────────

    let mut stdout = io::stdout().lock();
    match line {
        Some(line) => {
            writeln!(stdout, "{}", line)?;
            Ok(ExitCode::SUCCESS)
        }
        None if json => {
            writeln!(stdout, "null")?;
            eprintln!("{}", report::UNRESOLVED_MESSAGE);
            Ok(ExitCode::FAILURE)
        }
        None => {
            writeln!(stdout, "{}", report::UNRESOLVED_MESSAGE)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prompt for cities until `want` are known.
fn fill_cities<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    mut cities: Vec<City>,
    want: usize,
) -> anyhow::Result<Vec<City>> {
    while cities.len() < want {
        let city = prompter
            .read_city(cities.len() + 1)
            .context("reading city from input")?;
        cities.push(city);
    }
    Ok(cities)
}
