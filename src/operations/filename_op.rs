use crate::common::file_utils::{ensure_output_directory, get_valid_filename};
use crate::core::AppContext;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Writes one sanitized name per line to `out`.
///
/// Names that cannot be made safe are logged as errors on the `filename`
/// logger and skipped; the call fails once all names were processed if any
/// of them was rejected. With `--create-in DIR` an empty file is created for
/// every accepted name.
pub fn handle_filename_cli(context: &AppContext, args: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let logger = context.logger("filename");
    let target_dir = args
        .get_one::<String>("create-in")
        .map(|dir| ensure_output_directory(Path::new(dir)))
        .transpose()?;

    let mut failures = 0usize;
    for name in args.get_many::<String>("names").into_iter().flatten() {
        match get_valid_filename(name) {
            Ok(clean) => {
                writeln!(out, "{}", clean)?;
                if let Some(dir) = &target_dir {
                    let path = dir.join(&clean);
                    OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(&path)
                        .with_context(|| format!("Failed to create '{}'", path.display()))?;
                    logger.info(format_args!("Created {}", path.display()));
                }
            }
            Err(e) => {
                logger.error(format_args!("{}", e));
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{} name(s) could not be turned into a safe file name", failures);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::ApplicationConfig;
    use crate::cli::build_cli;
    use crate::common::{LoggingContext, SystemClock};
    use log::LevelFilter;

    fn test_context() -> AppContext {
        AppContext::from_parts(
            ApplicationConfig::default(),
            SystemClock::capture(),
            LoggingContext::new("ole", LevelFilter::Info),
        )
    }

    fn run(argv: &[&str]) -> (Result<()>, String) {
        let matches = build_cli().try_get_matches_from(argv.iter().copied()).unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let mut out = Vec::new();
        let result = handle_filename_cli(&test_context(), sub, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_one_sanitized_name_per_line() {
        let (result, out) = run(&["ole", "filename", "My File.txt", "a___-___b"]);
        result.unwrap();
        assert_eq!(out, "My_File.txt\na__b\n");
    }

    #[test]
    fn rejected_names_fail_after_the_rest_are_printed() {
        let (result, out) = run(&["ole", "filename", "@#$%", "ok", ".."]);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "2 name(s) could not be turned into a safe file name");
        assert_eq!(out, "ok\n");
    }

    #[test]
    fn create_in_makes_empty_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let dir_str = dir.to_str().unwrap();
        let (result, out) = run(&["ole", "filename", "Run 1.csv", "notes", "--create-in", dir_str]);
        result.unwrap();
        assert_eq!(out, "Run_1.csv\nnotes\n");
        assert!(dir.join("Run_1.csv").is_file());
        assert!(dir.join("notes").is_file());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 2);
    }

    #[test]
    fn create_in_rejects_a_plain_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("taken");
        std::fs::write(&file, "").unwrap();
        let (result, out) = run(&["ole", "filename", "x", "--create-in", file.to_str().unwrap()]);
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
