//! Check QFieldCloud status.
//!
//! Probes the geodb and the storage bucket and prints one line with the
//! outcome of each. The exit code is 0 whatever the individual outcomes.

use qfieldcloud_core::{
    commands::status, config::Config, health_checker, observability::init_tracing,
};
use std::io::IsTerminal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Dependency settings are not validated; the report covers them.
    let config = Config::load()?;

    init_tracing(&config.observability);

    let checker = health_checker(&config)?;

    let stdout = std::io::stdout();
    let colored = stdout.is_terminal();
    status::run(&checker, &mut stdout.lock(), colored).await?;

    Ok(())
}
