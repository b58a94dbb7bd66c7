use crossterm::style::Stylize;

use trips_cli::api_client::{PageRequest, TripsClient};
use trips_cli::config::config::Config;
use trips_cli::error::TransportError;

mod table_display;

use table_display::{display_object, display_records, export_to_csv, records_of};

fn print_help() {
    println!("{}", "Trips CLI - NYC Yellow Cab data explorer".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  trips-cli <COMMAND> [OPTIONS]");
    println!();
    println!("{}", "Commands:".yellow());
    println!(
        "  {}      - Fetch a page of trips (--limit, --offset, --export)",
        "trips".green()
    );
    println!(
        "  {}      - Fetch summary statistics for the dataset",
        "stats".green()
    );
    println!(
        "  {}  - Fetch a single trip by its numeric id",
        "trip <ID>".green()
    );
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {}     - Override the API base address",
        "--api-url <URL>".green()
    );
    println!(
        "  {}         - Page size for the trips command (default 10)",
        "--limit <N>".green()
    );
    println!(
        "  {}        - Records to skip for the trips command (default 0)",
        "--offset <N>".green()
    );
    println!(
        "  {}     - Export trips to a CSV file instead of a table",
        "--export <FILE>".green()
    );
    println!(
        "  {}              - Print the raw JSON response",
        "--json".green()
    );
    println!(
        "  {}       - Initialize configuration with wizard",
        "--init-config".green()
    );
    println!(
        "  {}   - Generate config file with defaults",
        "--generate-config".green()
    );
    println!();
    println!("{}", "Environment:".yellow());
    println!("  TRIPS_API_URL - Overrides the configured API base address");
    println!();
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|pos| args.get(pos + 1))
        .map(|s| s.to_string())
}

fn numeric_flag(args: &[String], name: &str) -> Option<usize> {
    flag_value(args, name).map(|value| {
        value.parse::<usize>().unwrap_or_else(|_| {
            eprintln!(
                "{}",
                format!("{} expects a number, got '{}'", name, value).red()
            );
            std::process::exit(1);
        })
    })
}

fn fail(error: TransportError) -> ! {
    eprintln!("{}", format!("Error: {}", error).red());
    std::process::exit(1);
}

fn print_json(body: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
    );
}

#[tokio::main]
async fn main() {
    trips_cli::logging::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 || args.contains(&"--help".to_string()) {
        print_help();
        return;
    }

    // Check for config initialization
    if args.contains(&"--init-config".to_string()) {
        match Config::init_wizard() {
            Ok(_) => {
                println!("\nConfiguration initialized successfully!");
                return;
            }
            Err(e) => {
                eprintln!("Error initializing config: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Check for config file generation
    if args.contains(&"--generate-config".to_string()) {
        match Config::get_config_path() {
            Ok(path) => {
                let config_content = Config::create_default_with_comments();
                if let Some(parent) = path.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        eprintln!("Error creating config directory: {}", e);
                        std::process::exit(1);
                    }
                }
                if let Err(e) = std::fs::write(&path, config_content) {
                    eprintln!("Error writing config file: {}", e);
                    std::process::exit(1);
                }
                println!("Configuration file created at: {:?}", path);
                println!("Edit this file to customize your Trips CLI experience.");
                return;
            }
            Err(e) => {
                eprintln!("Error determining config path: {}", e);
                std::process::exit(1);
            }
        }
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!(
            "{}",
            format!("Could not load config ({}), using defaults", e).yellow()
        );
        Config::default()
    });

    // Base address resolution: flag, then environment, then config file
    if let Ok(url) = std::env::var("TRIPS_API_URL") {
        config.api.base_url = url;
    }
    if let Some(url) = flag_value(&args, "--api-url") {
        config.api.base_url = url;
    }

    let command = match args.get(1) {
        Some(arg) if !arg.starts_with("--") => arg.clone(),
        _ => {
            eprintln!("{}", "No command given.".red());
            print_help();
            std::process::exit(1);
        }
    };

    let json_mode = args.contains(&"--json".to_string());
    let client = TripsClient::from_config(&config.api);

    match command.as_str() {
        "trips" => {
            let mut page = PageRequest::default();
            if let Some(limit) = numeric_flag(&args, "--limit") {
                page.limit = limit;
            }
            if let Some(offset) = numeric_flag(&args, "--offset") {
                page.offset = offset;
            }

            match client.fetch_paged_trips(page).await {
                Ok(body) => {
                    if json_mode {
                        print_json(&body);
                    } else if let Some(records) = records_of(&body) {
                        if let Some(filename) = flag_value(&args, "--export") {
                            if let Err(e) = export_to_csv(records, &filename) {
                                eprintln!("{}", format!("Export error: {}", e).red());
                                std::process::exit(1);
                            }
                        } else {
                            display_records(records, &config.display);
                        }
                    } else {
                        // Unexpected shape; show it rather than guess
                        print_json(&body);
                    }
                }
                Err(e) => fail(e),
            }
        }
        "stats" => match client.fetch_all_trips_stats().await {
            Ok(body) => {
                if json_mode {
                    print_json(&body);
                } else {
                    display_object(&body);
                }
            }
            Err(e) => fail(e),
        },
        "trip" => {
            let trip_id = match args.get(2) {
                Some(arg) if !arg.starts_with("--") => arg.clone(),
                _ => {
                    eprintln!("{}", "Usage: trips-cli trip <ID>".red());
                    std::process::exit(1);
                }
            };

            match client.fetch_trip(&trip_id).await {
                Ok(body) => {
                    if json_mode {
                        print_json(&body);
                    } else {
                        display_object(&body);
                    }
                }
                Err(e) => fail(e),
            }
        }
        other => {
            eprintln!("{}", format!("Unknown command: {}", other).red());
            print_help();
            std::process::exit(1);
        }
    }
}
