use std::ffi::OsString;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::app::ReportMode;
use crate::core::filters::{ConnectionFilter, DEFAULT_PROCESS};

#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub mode: ReportMode,
    pub filter: ConnectionFilter,
    pub show_zero: bool,
}

fn command() -> Command {
    Command::new("netstat-report")
        .version("0.1.0")
        .about("Count connection states in captured netstat output")
        .after_help(
            "Every TCP and UDP line must end with a connection state; \
             stateless UDP rows such as 'UDP 0.0.0.0:123 *:*' abort the run."
        )
        .arg(
            Arg::new("file")
                .help("Captured netstat output")
                .value_name("FILE")
                .required(true)
                .value_parser(value_parser!(PathBuf))
        )
        .arg(
            Arg::new("summary")
                .short('s')
                .long("summary")
                .help("Report the whole capture as one listing instead of one row per timestamp")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("show-zero")
                .long("show-zero")
                .help("Include states without connections in the summary")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("process")
                .short('n')
                .long("process-name")
                .help("Process counted in the filtered column (exact match)")
                .value_name("NAME")
                .default_value(DEFAULT_PROCESS)
                .num_args(1)
        )
        .arg(
            Arg::new("host")
                .short('H')
                .long("host")
                .help("Restrict the filtered column to remote hosts containing HOST")
                .value_name("HOST")
                .num_args(1)
        )
        .arg(
            Arg::new("port")
                .short('P')
                .long("port")
                .help("Restrict the filtered column to a remote port")
                .value_name("PORT")
                .value_parser(value_parser!(u16))
                .num_args(1)
        )
}

pub fn parse_args() -> Settings {
    settings_from(command().get_matches())
}

/// Like [`parse_args`], for an explicit argument list.
pub fn try_parse_from<I, T>(args: I) -> Result<Settings, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    command().try_get_matches_from(args).map(settings_from)
}

fn settings_from(matches: ArgMatches) -> Settings {
    let mut filter = ConnectionFilter::new();

    if let Some(name) = matches.get_one::<String>("process") {
        filter = filter.with_process_name(name.clone());
    }

    if let Some(host) = matches.get_one::<String>("host") {
        filter = filter.with_remote_host(host.clone());
    }

    if let Some(port) = matches.get_one::<u16>("port") {
        filter = filter.with_remote_port(*port);
    }

    let mode = if matches.get_flag("summary") {
        ReportMode::Summary
    } else {
        ReportMode::Timeline
    };

    Settings {
        input: matches
            .get_one::<PathBuf>("file")
            .cloned()
            .unwrap_or_default(),
        mode,
        filter,
        show_zero: matches.get_flag("show-zero"),
    }
}
