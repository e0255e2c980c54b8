use anyhow::{Context, Result};
use log::{debug, error, info};
use ole::cli;
use ole::config_loader::{self, MasterConfig};
use ole::core::AppContext;
use ole::operations::{filename_op, timestamp_op};
use std::io;
use std::time::Instant;

fn main() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let master_config = match matches.get_one::<String>("config") {
        Some(config_path) => config_loader::load_config(config_path)
            .with_context(|| format!("Failed to load master configuration from '{}'", config_path))?,
        None => MasterConfig::default(),
    };

    let context = AppContext::initialize(&master_config.app_settings, matches.get_flag("debug"))
        .context("Failed to initialize application context")?;

    let mut stdout = io::stdout().lock();
    let result = match matches.subcommand() {
        Some(("filename", sub)) => filename_op::handle_filename_cli(&context, sub, &mut stdout),
        Some(("now", sub)) => timestamp_op::handle_now_cli(&context, sub, &mut stdout),
        Some(("stamp", sub)) => timestamp_op::handle_stamp_cli(&context, sub, &mut stdout),
        Some((other, _)) => Err(anyhow::anyhow!("Subcommand '{}' not implemented.", other)),
        None => {
            info!("🤔 No subcommand provided, nothing to do.");
            Ok(())
        }
    };
    drop(stdout);

    if let Err(e) = &result {
        error!("❌ Operation failed after {:?}: {:#}", main_start_time.elapsed(), e);
    } else {
        debug!("🏁 Finished in {:?}.", main_start_time.elapsed());
    }
    context.shutdown();
    result
}
