//! Command definition

use clap::{value_parser, Arg, ArgAction, Command};
use nexus_graph::Filter;
use nexus_model::{ProjectId, TaskStatus, WorkerId};
use std::path::PathBuf;

/// Entity kinds accepted by `inspect --kind`
pub const INSPECT_KINDS: [&str; 5] = ["root", "project", "team", "worker", "task"];

#[must_use]
pub fn command() -> Command {
    Command::new("nexus")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Organizational diagnostics graph: projects, teams, workers and tasks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON export to load instead of the built-in sample data"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log verbosity (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the filtered hierarchy")
                .args(filter_args())
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("layout")
                .about("Print node positions, links and the initial viewport as JSON")
                .args(filter_args())
                .arg(
                    Arg::new("height")
                        .long("height")
                        .default_value("800")
                        .value_parser(value_parser!(f64))
                        .help("Viewport height used to center the tree"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the detail panel of one entity")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(INSPECT_KINDS)
                        .help("Entity kind"),
                )
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required_if_eq_any([
                            ("kind", "project"),
                            ("kind", "team"),
                            ("kind", "worker"),
                            ("kind", "task"),
                        ])
                        .help("Entity id"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("stats")
                .about("Print the dashboard counters")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("export")
                .about("Write the whole state as JSON")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Output file (stdout if omitted)"),
                ),
        )
        .subcommand(
            Command::new("members")
                .about("List members as offered by the member filter")
                .arg(json_flag()),
        )
}

fn filter_args() -> [Arg; 3] {
    [
        Arg::new("project")
            .long("project")
            .value_parser(|s: &str| s.parse::<Filter<ProjectId>>())
            .help("Project id, or ALL"),
        Arg::new("member")
            .long("member")
            .value_parser(|s: &str| s.parse::<Filter<WorkerId>>())
            .help("Worker id, or ALL"),
        Arg::new("status")
            .long("status")
            .value_parser(|s: &str| s.parse::<Filter<TaskStatus>>())
            .help("GREEN, YELLOW, RED or ALL"),
    ]
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}
