mod cli;
mod commands;

use clap::error::ErrorKind;

use cli::{MatchParams, build_cli};

fn main() {
    let matches = match build_cli().try_get_matches() {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        // Usage errors go to stdout with exit code 1.
        Err(e) => {
            println!("{}", e.render());
            std::process::exit(1);
        }
    };

    let params = MatchParams::from_matches(&matches);
    commands::run::run(params.into());
}
