pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use clap::Parser;

pub fn run() {
    if let Err(error) = try_run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = crate::cli::Cli::parse();

    crate::utils::logger::init_logging(cli.log_dir.as_deref())
        .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

    let pool = crate::db::DbPool::new(&cli.db)
        .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;
    let state = crate::commands::AppState::new(pool);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(crate::cli::dispatch(&state, cli.command))?;
    println!("{output}");

    Ok(())
}
