// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for cfn
//
// Separated from main.rs so that build.rs can include this file
// to generate the man page via clap_mangen.

use clap::Parser;

/// CLI argument parser - bools required for clap flag parsing
#[derive(Parser)]
#[command(
    name = "cfn",
    version,
    about = "Cisco Feature Navigator lookup from the terminal",
    disable_version_flag = true
)]
#[command(arg(clap::Arg::new("version").long("version").action(clap::ArgAction::Version).help("Print version")))]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Base URL of the Feature Navigator JSON endpoints
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Leave the minimum version column out of the report
    #[arg(long = "no-min-version")]
    pub no_min_version: bool,

    /// Report network and decode errors and re-prompt instead of exiting
    #[arg(long = "keep-going")]
    pub keep_going: bool,

    /// Allow insecure TLS connections (skip certificate verification)
    #[arg(short = 'k', long = "insecure")]
    pub insecure: bool,

    /// Make the operation more talkative
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion script (only bash is supported currently)
    #[arg(long = "completion", value_name = "SHELL", value_parser = parse_completion_shell)]
    pub completion: Option<String>,
}

fn parse_completion_shell(s: &str) -> Result<String, String> {
    match s.to_lowercase().as_str() {
        "bash" => Ok(s.to_lowercase()),
        _ => Err(format!("unsupported shell: {s} (only 'bash' is supported)")),
    }
}
