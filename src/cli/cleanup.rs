use std::path::Path;

use crate::{config, janitor::Janitor};

pub fn run(config_path: &Path) {
    println!("Running cleanup...");
    let config = match config::load(config_path).and_then(config::Config::resolve) {
        Ok(config) => config,
        Err(e) => panic!("Error reading config: {e}"),
    };

    let janitor = Janitor::new(&config.root, config.retention_days);
    let outcome = janitor.purge();
    println!(
        "Cleanup completed. Files deleted: {}, total size: {} bytes",
        outcome.files_deleted, outcome.bytes_deleted
    );
    if let Some(e) = outcome.error {
        panic!("Error during cleanup: {e}");
    }
}
