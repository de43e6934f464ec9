// src/main.rs

use std::io;

use log::{error, info};

use leafdb::config::Config;
use leafdb::engine::Engine;
use leafdb::error::DbResult;

fn main() -> DbResult<()> {
    env_logger::init();
    let config = Config::from_args(std::env::args());
    info!("leafdb v{}. Using {}. Type .exit to quit.", env!("CARGO_PKG_VERSION"), config.db_path.display());

    let mut engine = Engine::open(&config.db_path)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = engine.run(stdin.lock(), &mut stdout);
    if let Err(e) = &result {
        error!("Aborting session: {}", e);
    }

    // Close even after a failed session so earlier inserts still reach disk.
    let closed = engine.close();
    info!("Goodbye!");
    result.and(closed)
}
