use std::{fs::File, io, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "warn";

/// Initializes the global logger.
///
/// Records go to `log_file` when one is given. Otherwise they go to stderr,
/// unless the command draws on the terminal, in which case they are dropped
/// so the screen stays intact.
pub(crate) fn init(log_file: Option<&Path>, owns_terminal: bool) -> anyhow::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format_timestamp_millis().format_module_path(false);
    if let Some(target) = target(log_file, owns_terminal)? {
        builder.target(target);
    }

    builder
        .try_init()
        .context("Failed to initialize the logger")?;
    Ok(())
}

fn target(log_file: Option<&Path>, owns_terminal: bool) -> anyhow::Result<Option<Target>> {
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        return Ok(Some(Target::Pipe(Box::new(file))));
    }
    Ok(owns_terminal.then(|| Target::Pipe(Box::new(io::sink()))))
}
