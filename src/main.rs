use std::process;

use clap::error::ErrorKind;

use check_netgear::cli::build_cli;
use check_netgear::ui::render_fatal;
use check_netgear::{commands, CheckConfig, Status};

fn main() {
    let mut cli = build_cli();

    let matches = match cli.try_get_matches_from_mut(std::env::args_os()) {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            // clap exits with 2 on bad usage, which monitoring reads as CRITICAL
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => Status::Unknown.exit_code(),
            };
            process::exit(code);
        }
    };

    check_netgear::init_logging(matches.get_count("verbose"));

    let config = match CheckConfig::from_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            print!("{}", render_fatal(&e.to_string()));
            println!("{}", cli.render_usage());
            process::exit(Status::Unknown.exit_code());
        }
    };

    let status = commands::check(&config);
    process::exit(status.exit_code());
}
