//! Application startup and command dispatch

use super::cli::args::{Args, Command, OutputFormat};
use super::cli::config::load_config_file;
use crate::core::error_handling::{fatal_message, log_error_with_context, ContextualError};
use crate::core::logging::{flush_logging, init_logging};
use crate::core::requirement::Requirement;
use crate::core::styles::{palette_to_clap, StyleRole};
use crate::core::version::{Version, VersionInfo, BUILD_INFO};
use clap::{CommandFactory, FromArgMatches};
use std::cmp::Ordering;
use std::io::{IsTerminal, Write};

pub const EXIT_OK: i32 = 0;
/// `check` found the build incompatible
pub const EXIT_INCOMPATIBLE: i32 = 1;
/// Malformed input or configuration
pub const EXIT_USAGE: i32 = 2;

/// Parse the command line, set up logging and run the selected command.
/// Returns the process exit status.
pub fn startup() -> i32 {
    let help_color = std::io::stdout().is_terminal();
    let matches = <Args as CommandFactory>::command()
        .styles(palette_to_clap(help_color))
        .get_matches();
    let mut args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    // Logging is not up yet, so configuration problems go straight to stderr
    match load_config_file(args.config_file.as_deref()) {
        Ok(Some(config)) => {
            if let Err(e) = args.apply_toml_values(&config) {
                eprintln!("Error: {}", fatal_message(&e, "Applying configuration"));
                return EXIT_USAGE;
            }
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", fatal_message(&e, "Loading configuration"));
            return EXIT_USAGE;
        }
    }

    let use_color = args.use_color();
    let log_file = args.log_file.as_ref().map(|p| p.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error initialising logging: {}", e);
        return EXIT_USAGE;
    }

    log::info!("vips-version {} starting", BUILD_INFO.version_string(true));
    log::debug!("Arguments: {:?}", args);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = match run_command(&args.selected_command(), &BUILD_INFO, use_color, &mut out) {
        Ok(code) => code,
        Err(e) => {
            log::error!("Failed to write output: {}", e);
            EXIT_USAGE
        }
    };
    flush_logging();
    code
}

/// Execute one command against `info`, writing results to `out`
pub fn run_command(
    command: &Command,
    info: &VersionInfo,
    use_color: bool,
    out: &mut dyn Write,
) -> std::io::Result<i32> {
    match command {
        Command::Show { verbose, format } => {
            match format {
                OutputFormat::Text => writeln!(out, "{}", info.version_string(*verbose))?,
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(info)
                        .map_err(std::io::Error::other)?;
                    writeln!(out, "{}", json)?;
                }
            }
            Ok(EXIT_OK)
        }
        Command::Triple => {
            let (major, minor, micro) = info.triple();
            writeln!(out, "{} {} {}", major, minor, micro)?;
            Ok(EXIT_OK)
        }
        Command::Suffix { name } => {
            match name {
                Some(base) => writeln!(out, "{}", info.executable_name(base))?,
                None => writeln!(out, "{}", info.platform_exec_suffix())?,
            }
            Ok(EXIT_OK)
        }
        Command::Check { requirement } => {
            let requirement = match requirement.parse::<Requirement>() {
                Ok(r) => r,
                Err(e) => return Ok(report_usage_error(&e, "Parsing requirement")),
            };
            let verdict = requirement.check(info);
            let role = if verdict.is_compatible() {
                StyleRole::Valid
            } else {
                StyleRole::Invalid
            };
            writeln!(
                out,
                "{} against {}: {}",
                StyleRole::Key.paint(&info.to_string(), use_color),
                requirement,
                role.paint(&verdict.to_string(), use_color)
            )?;
            if verdict.is_compatible() {
                Ok(EXIT_OK)
            } else {
                log::warn!("Build {} does not satisfy {}: {}", info, requirement, verdict);
                Ok(EXIT_INCOMPATIBLE)
            }
        }
        Command::Compare { version } => {
            let other = match version.parse::<Version>() {
                Ok(v) => v,
                Err(e) => return Ok(report_usage_error(&e, "Parsing version")),
            };
            let label = match info.version().cmp(&other) {
                Ordering::Less => "less",
                Ordering::Equal => "equal",
                Ordering::Greater => "greater",
            };
            writeln!(out, "{}", label)?;
            Ok(EXIT_OK)
        }
    }
}

fn report_usage_error<E: ContextualError + std::fmt::Debug>(error: &E, context: &str) -> i32 {
    log_error_with_context(error, context);
    // With a log file, error records are duplicated to stderr by the logger
    if !log::log_enabled!(log::Level::Error) {
        eprintln!("Error: {}", error);
    }
    EXIT_USAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> VersionInfo {
        VersionInfo::with_build_tag(Version::new(7, 32, 3), "Fri Apr 26 12:17:40 BST 2013", "")
    }

    fn run(command: Command) -> (i32, String) {
        let mut out = Vec::new();
        let code = run_command(&command, &build(), false, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_show_short_and_verbose() {
        assert_eq!(run(Command::default()), (EXIT_OK, "7.32.3\n".to_string()));
        let (code, output) = run(Command::Show {
            verbose: true,
            format: OutputFormat::Text,
        });
        assert_eq!(code, EXIT_OK);
        assert_eq!(output, "7.32.3-Fri Apr 26 12:17:40 BST 2013\n");
    }

    #[test]
    fn test_show_json() {
        let (_, output) = run(Command::Show {
            verbose: false,
            format: OutputFormat::Json,
        });
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["version"], "7.32.3");
        assert_eq!(value["minor"], 32);
    }

    #[test]
    fn test_triple_and_suffix() {
        assert_eq!(run(Command::Triple).1, "7 32 3\n");
        assert_eq!(run(Command::Suffix { name: None }).1, "\n");
        assert_eq!(
            run(Command::Suffix {
                name: Some("vips".to_string()),
            })
            .1,
            "vips\n"
        );
    }

    #[test]
    fn test_check_exit_codes() {
        let check = |requirement: &str| {
            run(Command::Check {
                requirement: requirement.to_string(),
            })
        };

        let (code, output) = check("7.30");
        assert_eq!(code, EXIT_OK);
        assert_eq!(output, "7.32.3 against 7.30: compatible\n");

        let (code, output) = check("8.0");
        assert_eq!(code, EXIT_INCOMPATIBLE);
        assert!(output.contains("major version 8 required, found 7"));

        assert_eq!(check("7.33").0, EXIT_INCOMPATIBLE);
        assert_eq!(check("7.x").0, EXIT_USAGE);
    }

    #[test]
    fn test_compare_labels() {
        let compare = |version: &str| {
            run(Command::Compare {
                version: version.to_string(),
            })
        };
        assert_eq!(compare("7.32.3").1, "equal\n");
        assert_eq!(compare("7.33.0").1, "less\n");
        assert_eq!(compare("7.9.99").1, "greater\n");
        assert_eq!(compare("7.32").0, EXIT_USAGE);
    }
}
