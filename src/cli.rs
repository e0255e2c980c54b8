use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("ole")
        .version(env!("CARGO_PKG_VERSION"))
        .about("OpenLEDEval helpers: safe file names and timezone-aware timestamps.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom configuration file")
                .global(true)
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("filename")
                .about("Prints a filesystem-safe version of each NAME")
                .arg(Arg::new("names").value_name("NAME").required(true).num_args(1..).help("Strings to sanitize").action(ArgAction::Append))
                .arg(Arg::new("create-in").long("create-in").value_name("DIR").help("Create an empty file with each sanitized name in DIR").action(ArgAction::Set))
        )
        .subcommand(
            Command::new("now")
                .about("Prints the current time with the UTC offset captured at startup")
                .arg(Arg::new("format").short('f').long("format").value_name("FMT").help("strftime format (default from config)").action(ArgAction::Set))
        )
        .subcommand(
            Command::new("stamp")
                .about("Prints a timestamped, filesystem-safe file name")
                .arg(Arg::new("base").value_name("BASE").required(true).help("Base name, sanitized before use").action(ArgAction::Set))
                .arg(Arg::new("ext").short('e').long("ext").value_name("EXT").required(true).help("File extension").action(ArgAction::Set))
        )
}
