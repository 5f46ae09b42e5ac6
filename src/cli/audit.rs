//! Audit log CLI command

use crate::audit::AuditLogger;
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;

/// Print the most recent audit entries, oldest first
pub fn handle_audit(paths: &LedgerPaths, settings: &Settings, count: usize) -> LedgerResult<()> {
    let logger = AuditLogger::new(paths.audit_log());

    if !logger.exists() {
        if settings.audit_enabled {
            println!("No audit entries yet.");
        } else {
            println!("Audit logging is disabled and no audit log exists.");
        }
        return Ok(());
    }

    let total = logger.entry_count()?;
    let entries = logger.read_recent(count)?;

    println!(
        "Audit log: {} (showing {} of {})",
        logger.path().display(),
        entries.len(),
        total
    );
    for entry in &entries {
        println!("  {}", entry.summary());
    }
    Ok(())
}
