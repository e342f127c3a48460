//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `lazytask_core` linkage without the Flutter runtime.
//! - Optionally summarize a persisted task database.
//!
//! Usage: `lazytask_cli [db_path]`

use lazytask_core::{StoreConfig, TaskFilter};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("lazytask_core ping={}", lazytask_core::ping());
    println!("lazytask_core version={}", lazytask_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let env = StoreConfig::from_env();
    let config = match StoreConfig::new(&db_path, env.storage_key()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid arguments: {err}");
            return ExitCode::FAILURE;
        }
    };

    match config.open_store() {
        Ok(store) => {
            let counts = store.counts();
            println!("db_path={}", config.db_path().display());
            for filter in TaskFilter::ALL {
                println!("tasks.{}={}", filter.as_str(), counts.get(filter));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to open task store: {err}");
            ExitCode::FAILURE
        }
    }
}
