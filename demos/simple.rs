//! A single script using `BaseParser` directly
//!
//! Run with: `cargo run --example simple -- data.json -v --format xml`

use clap::{Arg, ArgAction, builder::PossibleValuesParser};
use cliparse::core::{BaseParser, ParseOutcome};

fn main() {
    let parser = BaseParser::new("simple")
        .description("Process input files")
        .epilog("Standard flags: -R recursive, -n dry run, -y assume yes, -v verbose")
        .arg(
            Arg::new("files")
                .value_name("FILES")
                .help("Files to process")
                .num_args(1..)
                .required(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(PossibleValuesParser::new(["json", "xml"]))
                .default_value("json"),
        );

    let args = match parser.parse_env() {
        ParseOutcome::Success(args) => args,
        ParseOutcome::UsageFailure { exit_code, message } => {
            eprint!("{message}");
            std::process::exit(exit_code);
        }
        ParseOutcome::OtherFailure { message } => {
            eprintln!("Error: {message}");
            std::process::exit(1);
        }
    };

    let files = args.get_many::<String>("files");
    let format = args.value("format").unwrap_or("json");

    if args.flag("verbose") == Some(true) {
        println!("Processing {} file(s) as {format}", files.len());
        if args.flag("recursive") == Some(true) {
            println!("Recursing into directories");
        }
    }

    for file in files {
        if args.flag("dry-run") == Some(true) {
            println!("Would process: {file}");
        } else {
            println!("Processing: {file}");
        }
    }
}
