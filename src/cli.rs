use clap::{value_parser, Arg, ArgAction, Command};

use crate::core::config::{Mode, DEFAULT_BASE_URL};

fn threshold_arg(name: &'static str, default: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("VALUE")
        .help(help)
        .value_parser(value_parser!(f64))
        .default_value(default)
}

fn hide_flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new("check-netgear")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Icinga/Nagios check for Netgear managed switches")
        .long_about(
            "Logs in to the switch management API, checks CPU, memory, temperature, fans, \
             per-port packet loss and PoE power draw against thresholds and exits with \
             0 (OK), 1 (WARNING), 2 (CRITICAL) or 3 (UNKNOWN).",
        )
        .arg(
            Arg::new("base-url")
                .short('H')
                .long("base-url")
                .value_name("URL")
                .help("Base URL of the switch")
                .default_value(DEFAULT_BASE_URL),
        )
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .value_name("NAME")
                .env("NETGEAR_USERNAME")
                .help("Username for authentication"),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .value_name("PASSWORD")
                .env("NETGEAR_PASSWORD")
                .hide_env_values(true)
                .help("Password for authentication"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Check groups to run (repeatable) [default: basic]")
                .value_parser(value_parser!(Mode))
                .action(ArgAction::Append),
        )
        .arg(hide_flag("nocpu", "Hide the CPU info"))
        .arg(hide_flag("nomem", "Hide the RAM info"))
        .arg(hide_flag("notemp", "Hide the Temperature info"))
        .arg(hide_flag("nofans", "Hide the Fans info"))
        .arg(hide_flag("noperfdata", "Do not emit performance data"))
        .arg(threshold_arg("cpu-warning", "50", "CPU usage warning threshold (%)"))
        .arg(threshold_arg("cpu-critical", "90", "CPU usage critical threshold (%)"))
        .arg(threshold_arg("mem-warning", "50", "RAM usage warning threshold (%)"))
        .arg(threshold_arg("mem-critical", "90", "RAM usage critical threshold (%)"))
        .arg(threshold_arg("fan-warning", "3000", "Fan speed warning threshold (RPM)"))
        .arg(threshold_arg("fan-critical", "5000", "Fan speed critical threshold (RPM)"))
        .arg(threshold_arg("temp-warning", "50", "Temperature warning threshold (°C)"))
        .arg(threshold_arg("temp-critical", "70", "Temperature critical threshold (°C)"))
        .arg(threshold_arg("stats-warning", "5", "Port packet loss warning threshold (%)"))
        .arg(threshold_arg("stats-critical", "20", "Port packet loss critical threshold (%)"))
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("Port to check (repeatable) [default: 1-8]")
                .value_parser(value_parser!(u32).range(1..))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log to stderr (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
}
