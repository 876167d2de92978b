use std::env;
use std::fs;
use std::process::{exit, Command};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "clean-db" => clean_db(),
        "test" => run_tests(),
        "dev" => dev_server(),
        "help" | "--help" | "-h" => print_help(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_help();
            exit(1);
        }
    }
}

fn print_help() {
    println!("Fairday Backend - Development Tasks");
    println!();
    println!("Usage: cargo run --bin xtask <COMMAND>");
    println!();
    println!("Commands:");
    println!("  clean-db      Remove the local SQLite database");
    println!("  test          Run tests");
    println!("  dev           Start development server");
    println!("  help          Show this help");
}

fn clean_db() {
    println!("🧹 Cleaning local database...");

    for file in ["fairday.db", "fairday.db-wal", "fairday.db-shm"] {
        let _ = fs::remove_file(file);
    }

    println!("✅ Database removed; it will be recreated on next start");
}

fn run_tests() {
    println!("🧪 Running tests...");

    let status = Command::new("cargo")
        .args(["test"])
        .status()
        .expect("Failed to run cargo test");

    if !status.success() {
        eprintln!("❌ Tests failed");
        exit(1);
    }

    println!("✅ All tests passed");
}

fn dev_server() {
    println!("🚀 Starting development server...");

    let status = Command::new("cargo")
        .args(["run", "--bin", "fairday-backend"])
        .status()
        .expect("Failed to start server");

    if !status.success() {
        eprintln!("❌ Server failed to start");
        exit(1);
    }
}
