use clap::Parser;
use colored::Colorize;
use mindkids::database::Database;
use mindkids::report::{GameTypeStats, Report};
use mindkids::time_format::{format_date_br, format_seconds};
use std::path::PathBuf;

/// Prints every child's progress from a MindKids database
#[derive(Parser, Debug)]
#[command(name = "progress_report")]
#[command(about = "Summarizes the progress of every child profile stored in a database")]
struct Args {
    /// Path to the SQLite database file
    database_file: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let db = match Database::new(&args.database_file.to_string_lossy()) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            std::process::exit(1);
        }
    };

    let profiles = match db.load_profiles() {
        Ok(profiles) => profiles,
        Err(e) => {
            eprintln!("Error reading profiles: {}", e);
            std::process::exit(1);
        }
    };

    if profiles.is_empty() {
        println!("No profiles found in the database.");
        return;
    }

    println!("{}", "Progress Report".bold());
    println!("===============");
    println!();

    for profile in &profiles {
        let report = Report::from_results(&profile.game_results);
        println!(
            "{} (since {})",
            profile.name.bold(),
            format_date_br(profile.created_at)
        );
        println!("{}", "-".repeat(60));

        if report.total_games == 0 {
            println!("  No games played yet");
            println!();
            continue;
        }

        println!(
            "  Games: {}, Average score: {}, Errors: {}, Average time: {}, Total time: {}",
            report.total_games,
            report.average_score,
            report.total_errors,
            format_seconds(report.average_time_spent),
            format_seconds(report.total_time_spent)
        );
        for stats in &report.per_game_type {
            print_game_stats(stats);
        }
        for strength in &report.observations.strengths {
            println!("    {} {}", "✓".green(), strength);
        }
        for area in &report.observations.development_areas {
            println!("    {} {}", "✗".red(), area);
        }
        println!();
    }
}

/// One line per game, coloured by how the average compares to the report thresholds
fn print_game_stats(stats: &GameTypeStats) {
    let average = format!("{} pts", stats.average_score);
    let average = if stats.average_score >= 70 {
        average.green()
    } else if stats.average_score < 50 {
        average.red()
    } else {
        average.yellow()
    };
    println!(
        "  {:<20} played {:>3}x, average {}",
        stats.game_type.label(),
        stats.count,
        average
    );
}
