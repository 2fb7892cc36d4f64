//! CLI argument parsing tests

use clap::Parser;
use std::path::PathBuf;
use vips_version::app::cli::args::{Args, Command, OutputFormat};

static COMMAND_NAME: &str = "vips-version";

#[test]
fn test_global_flags() {
    let args = Args::try_parse_from([
        COMMAND_NAME,
        "--log-level",
        "debug",
        "--log-format",
        "ext",
        "--log-file",
        "/tmp/vips.log",
        "--no-color",
        "triple",
    ])
    .unwrap();

    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("ext"));
    assert_eq!(args.log_file, Some(PathBuf::from("/tmp/vips.log")));
    assert!(args.no_color);
    assert!(!args.use_color());
    assert_eq!(args.selected_command(), Command::Triple);
}

#[test]
fn test_rejects_unknown_log_level() {
    assert!(Args::try_parse_from([COMMAND_NAME, "--log-level", "loud"]).is_err());
    assert!(Args::try_parse_from([COMMAND_NAME, "--log-format", "xml"]).is_err());
}

#[test]
fn test_show_options() {
    let args = Args::try_parse_from([COMMAND_NAME, "show", "--verbose", "--format", "json"])
        .unwrap();
    assert_eq!(
        args.selected_command(),
        Command::Show {
            verbose: true,
            format: OutputFormat::Json
        }
    );
}

#[test]
fn test_check_and_compare_take_one_value() {
    let args = Args::try_parse_from([COMMAND_NAME, "check", "7.30"]).unwrap();
    assert_eq!(
        args.selected_command(),
        Command::Check {
            requirement: "7.30".to_string(),
        }
    );

    let args = Args::try_parse_from([COMMAND_NAME, "compare", "7.32.3"]).unwrap();
    assert_eq!(
        args.selected_command(),
        Command::Compare {
            version: "7.32.3".to_string(),
        }
    );

    assert!(Args::try_parse_from([COMMAND_NAME, "check"]).is_err());
}

#[test]
fn test_suffix_name_is_optional() {
    let args = Args::try_parse_from([COMMAND_NAME, "suffix"]).unwrap();
    assert_eq!(args.selected_command(), Command::Suffix { name: None });

    let args = Args::try_parse_from([COMMAND_NAME, "suffix", "vipsthumbnail"]).unwrap();
    assert_eq!(
        args.selected_command(),
        Command::Suffix {
            name: Some("vipsthumbnail".to_string()),
        }
    );
}
