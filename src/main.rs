//! stress-engine CLI
//!
//! Run portfolio credit stress tests from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Stress a CSV loan book with per-country collateral shocks
//! stress-engine run --data ./data --shock GB=-5.12,US=-2
//!
//! # Output as JSON and record the run
//! stress-engine run --data ./data --shock GB=-10 --format json --history runs.json
//!
//! # List past runs
//! stress-engine history --file runs.json
//!
//! # Generate a random loan book for testing
//! stress-engine generate --output ./data --portfolios 10 --loans 500
//! ```

use rust_decimal::Decimal;
use std::fs;
use std::process;
use stress_engine::core::country::{CountryCode, ShockTable};
use stress_engine::data::csv_source::write_book;
use stress_engine::data::generate::{generate_random_book, BookConfig};
use stress_engine::data::CsvDataSource;
use stress_engine::run::{RunHistory, StressTestRunner};
use uuid::Uuid;

fn print_usage() {
    eprintln!(
        r#"stress-engine — portfolio credit stress testing and expected loss

USAGE:
    stress-engine <COMMAND> [OPTIONS]

COMMANDS:
    run         Run a stress test over a CSV loan book
    history     List or inspect recorded runs
    generate    Generate a random loan book (for testing)
    help        Show this message

OPTIONS (run):
    --data <DIR>        Directory containing portfolios.csv, loans.csv, ratings.csv
    --shock <LIST>      Comma-separated country shocks, e.g. GB=-5.12,US=-2
    --shock-file <FILE> JSON file mapping country code to percentage change
    --format <FORMAT>   Output format: text (default) or json
    --history <FILE>    Append the run to a JSON history file

OPTIONS (history):
    --file <FILE>       Path to the JSON history file
    --id <UUID>         Show one run with its per-portfolio results
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --output <DIR>      Directory to write the CSV files into
    --portfolios <N>    Number of portfolios (default: 10)
    --loans <N>         Total number of loans (default: 500)
    --countries <LIST>  Comma-separated country codes (default: GB,US,DE)

EXAMPLES:
    stress-engine run --data ./data --shock GB=-5.12
    stress-engine run --data ./data --shock-file shocks.json --format json
    stress-engine history --file runs.json
    stress-engine generate --output ./data --portfolios 20 --loans 2000"#
    );
}

fn parse_shock_list(list: &str) -> ShockTable {
    let mut shocks = ShockTable::new();
    for pair in list.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (country, pct) = pair.split_once('=').unwrap_or_else(|| {
            eprintln!("Invalid shock '{}': expected COUNTRY=PCT (e.g. GB=-5.12)", pair);
            process::exit(1);
        });
        let pct: Decimal = pct.trim().parse().unwrap_or_else(|e| {
            eprintln!("Invalid shock percentage '{}': {}", pct, e);
            process::exit(1);
        });
        shocks.set(CountryCode::new(country.trim()), pct);
    }
    shocks
}

fn load_shock_file(path: &str) -> ShockTable {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(r#"{{ "GB": "-5.12", "US": "-2" }}"#);
        process::exit(1);
    })
}

fn cmd_run(args: &[String]) {
    let mut data_dir = None;
    let mut shock_list = None;
    let mut shock_file = None;
    let mut format = "text".to_string();
    let mut history_file: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--data" => {
                i += 1;
                data_dir = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--data requires a directory path");
                    process::exit(1);
                }));
            }
            "--shock" => {
                i += 1;
                shock_list = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--shock requires a list like GB=-5.12,US=-2");
                    process::exit(1);
                }));
            }
            "--shock-file" => {
                i += 1;
                shock_file = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--shock-file requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--history" => {
                i += 1;
                history_file = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--history requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let data_dir = data_dir.unwrap_or_else(|| {
        eprintln!("Error: --data <DIR> is required");
        process::exit(1);
    });

    let shocks = match (shock_list, shock_file) {
        (Some(list), None) => parse_shock_list(&list),
        (None, Some(file)) => load_shock_file(&file),
        (None, None) => ShockTable::new(),
        (Some(_), Some(_)) => {
            eprintln!("Error: use either --shock or --shock-file, not both");
            process::exit(1);
        }
    };

    let runner = StressTestRunner::new(CsvDataSource::new(&data_dir));
    let run = runner.execute(&shocks).unwrap_or_else(|e| {
        eprintln!("Stress test failed: {}", e);
        process::exit(1);
    });

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&run).unwrap());
    } else {
        println!("{}", run);
    }

    if let Some(path) = history_file {
        let history = RunHistory::open(&path);
        history.append(&run).unwrap_or_else(|e| {
            eprintln!("Error recording run to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Run {} recorded → {}", run.id(), path);
    }
}

fn cmd_history(args: &[String]) {
    let mut file = None;
    let mut id: Option<String> = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--file" => {
                i += 1;
                file = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--file requires a file path");
                    process::exit(1);
                }));
            }
            "--id" => {
                i += 1;
                id = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--id requires a run UUID");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let file = file.unwrap_or_else(|| {
        eprintln!("Error: --file <FILE> is required");
        process::exit(1);
    });

    let history = RunHistory::open(&file);

    if let Some(id) = id {
        let id: Uuid = id.parse().unwrap_or_else(|e| {
            eprintln!("Invalid run id '{}': {}", id, e);
            process::exit(1);
        });
        let run = history
            .find(id)
            .unwrap_or_else(|e| {
                eprintln!("Error reading history '{}': {}", file, e);
                process::exit(1);
            })
            .unwrap_or_else(|| {
                eprintln!("No run {} in '{}'", id, file);
                process::exit(1);
            });

        if format == "json" {
            println!("{}", serde_json::to_string_pretty(&run).unwrap());
        } else {
            println!("{}", run);
        }
        return;
    }

    let summaries = history.runs().unwrap_or_else(|e| {
        eprintln!("Error reading history '{}': {}", file, e);
        process::exit(1);
    });

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summaries).unwrap());
    } else if summaries.is_empty() {
        println!("No runs recorded.");
    } else {
        for s in summaries {
            println!(
                "{}  {}  {} ms  {} portfolios  {} loans  EL {}",
                s.run_at, s.id, s.duration_ms, s.total_portfolios, s.total_loans,
                s.total_expected_loss
            );
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut output_dir = None;
    let mut portfolios = 10usize;
    let mut loans = 500usize;
    let mut countries_str = "GB,US,DE".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                output_dir = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a directory path");
                    process::exit(1);
                }));
            }
            "--portfolios" => {
                i += 1;
                portfolios = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--portfolios requires a number");
                    process::exit(1);
                });
            }
            "--loans" => {
                i += 1;
                loans = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--loans requires a number");
                    process::exit(1);
                });
            }
            "--countries" => {
                i += 1;
                countries_str = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--countries requires a comma-separated list");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let output_dir = output_dir.unwrap_or_else(|| {
        eprintln!("Error: --output <DIR> is required");
        process::exit(1);
    });

    let countries: Vec<CountryCode> = countries_str
        .split(',')
        .map(|s| CountryCode::new(s.trim()))
        .collect();

    let config = BookConfig {
        portfolio_count: portfolios,
        loans_per_portfolio: loans / portfolios.max(1),
        countries,
        ..Default::default()
    };

    let book = generate_random_book(&config);
    write_book(&output_dir, &book).unwrap_or_else(|e| {
        eprintln!("Error writing to '{}': {}", output_dir, e);
        process::exit(1);
    });

    eprintln!(
        "Generated {} portfolios, {} loans, {} ratings → {}",
        book.portfolio_count(),
        book.loan_count(),
        book.rating_count(),
        output_dir
    );
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "run" => cmd_run(rest),
        "history" => cmd_history(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
