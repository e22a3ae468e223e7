//! Command-line arguments for the report runner.

use clap::Parser;
use std::path::PathBuf;

use freight_desk::domain::reporting::BrazilianState;

#[derive(Debug, Parser)]
#[command(
    name = "freight-desk",
    version,
    about = "Print the freight charts and carrier report as JSON",
    long_about = "Print the freight charts and carrier report as JSON.\n\n\
                  Reads contracted records from the configured record file \
                  (FREIGHT_DESK__STORAGE__RECORDS_PATH)."
)]
pub struct Cli {
    /// Narrow the carrier report to one destination state (UF, e.g. SP).
    #[arg(value_name = "UF")]
    pub state: Option<BrazilianState>,

    /// Read records from this file instead of the configured one.
    #[arg(long = "records", value_name = "PATH")]
    pub records_path: Option<PathBuf>,
}
