//! Command builder for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI.
pub fn build_cli() -> Command {
    Command::new("tempori")
        .about("Find occurrences of a temporal query network in a target network")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("tempori -t <FILE> -q <FILE> [-d <DELTA>] [-u] [-o <FILE>]")
        .after_help(
            r#"EXAMPLES:
  tempori -t network.txt -q motif.txt                 # count occurrences
  tempori -t network.txt -q motif.txt -d 3600         # within one hour
  tempori -t network.txt -q motif.txt -o occ.txt      # dump occurrences
  tempori -t network.txt -q motif.txt -u --ordered    # undirected, time-ordered"#,
        )
        .arg(target_arg())
        .arg(query_arg())
        .arg(delta_arg())
        .arg(undirected_arg())
        .arg(output_arg())
        .arg(ordered_arg())
        .arg(order_arg())
        .arg(limit_arg())
        .arg(format_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}
