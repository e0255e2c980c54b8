use crate::common::file_utils::generate_timestamped_filename;
use crate::common::timestamp_utils::format_timestamp;
use crate::core::AppContext;
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::io::Write;

pub fn handle_now_cli(context: &AppContext, args: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let format = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or(&context.config().timestamp_format);
    writeln!(out, "{}", format_timestamp(&context.now(), format))?;
    Ok(())
}

pub fn handle_stamp_cli(context: &AppContext, args: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let base = args.get_one::<String>("base").context("BASE is required")?;
    let ext = args.get_one::<String>("ext").context("--ext is required")?;
    let name = generate_timestamped_filename(
        base,
        &context.now(),
        &context.config().filename_timestamp_format,
        ext,
    )?;
    context.logger("stamp").debug(format_args!("Generated '{}' from '{}'", name, base));
    writeln!(out, "{}", name)?;
    Ok(())
}
