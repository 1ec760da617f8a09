//! Initialize isoaudit in the working directory

use isoaudit::adapters::JsonFileStore;
use isoaudit::output::{OperationResult, OutputMode, Render};
use isoaudit::paths;

use super::Session;

/// Write `isoaudit.toml` and create the store document
pub fn init(session: &Session, force: bool) -> anyhow::Result<()> {
    let config_path = paths::project_config();
    let human = session.mode == OutputMode::Human;

    if config_path.exists() && !force {
        if human {
            println!("Already initialized ({} exists).", config_path.display());
            println!("Use --force to reinitialize.");
        } else {
            OperationResult {
                success: false,
                message: format!("{} already exists", config_path.display()),
            }
            .render(session.mode);
        }
        return Ok(());
    }

    session.config.save(&config_path)?;
    if human {
        println!("  Created {}", config_path.display());
    }

    let store_path = session.config.storage.store_file();
    let created = JsonFileStore::open(&store_path).initialize()?;
    if human {
        if created {
            println!("  Created {}", store_path.display());
        } else {
            println!("  Kept existing {}", store_path.display());
        }
        println!("\nisoaudit initialized!");
        println!("\nNext steps:");
        println!("  isoaudit templates");
        println!("  isoaudit assessment create \"Annual audit\" --lead <auditor>");
        return Ok(());
    }

    OperationResult::ok(format!("Initialized {}", store_path.display())).render(session.mode);
    Ok(())
}
