use clap::Parser;
use glacier_analysis::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = commands::run(args) {
        // Print the whole context chain to stderr
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Glacier Analysis - WGMS glacier record toolkit");
    println!("==============================================");
    println!();
    println!("USAGE:");
    println!("    glacier-analysis <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    distance    Great-circle distance in km between two points");
    println!("    check-csv   Check that a CSV file has the required columns");
    println!("    search      Find glaciers by full or wildcard classification code");
    println!("    nearest     List the glaciers closest to a point");
    println!("    plot        Plot a glacier's annual mass balance");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>  JSON configuration file");
    println!("    -v, --verbose        Increase logging verbosity");
    println!("    -q, --quiet          Only show errors");
    println!("    -h, --help           Show help information");
    println!("    -V, --version        Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Distance from Gries to Agua Negra:");
    println!("    glacier-analysis distance 46.44 8.34 -30.16 -69.81");
    println!();
    println!("    # Glaciers whose code has 6 first and 8 last:");
    println!("    glacier-analysis search --glaciers sheet-A.csv '6?8'");
    println!();
    println!("    # Exact code lookup:");
    println!("    glacier-analysis search --glaciers sheet-A.csv 638 --full");
    println!();
    println!("    # Plot the mass balance of Gries:");
    println!("    glacier-analysis plot -g sheet-A.csv -m sheet-EE.csv --id 359 -o gries.svg");
    println!();
    println!("For detailed help on any command, use:");
    println!("    glacier-analysis <COMMAND> --help");
}
