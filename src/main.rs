// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Cisco Feature Navigator (cfn) - Main Application
//!
//! This is the entry point for the cfn CLI tool, an interactive terminal
//! client for the Feature Navigator "search by feature" lookup.
//!
//! The application supports:
//! - Searching features by keyword and narrowing the list with a regex
//! - Listing the platforms that support a feature
//! - Reporting minimum versions and licenses for selected platforms
//! - Paginated listings for long result sets

use std::io::{self, IsTerminal};
use std::process::exit;

use clap::Parser;

use cfn::{
    CFN_BASE, Confirm, Console, Endpoints, HttpFetcher, KeyReader, LineConfirm, ReportLayout,
    Session, Settings,
};

mod cli;

use cli::Cli;

/// Main application entry point
///
/// Parses command line arguments, builds the session and runs it until the
/// user quits. Fatal errors are printed to stderr with a non-zero exit.
fn main() {
    let cli = Cli::parse();

    // Handle completion generation first (exits immediately)
    if cli.completion.is_some() {
        print_bash_completion();
        return;
    }

    let endpoints = Endpoints::new(cli.base_url.as_deref().unwrap_or(CFN_BASE));
    let settings = Settings {
        layout: ReportLayout {
            include_min_version: !cli.no_min_version,
        },
        recover_fetch_errors: cli.keep_going,
    };

    if cli.verbose {
        eprintln!("Using endpoints at: {}", endpoints.base());
    }

    let fetcher = HttpFetcher::new(cli.insecure, cli.verbose);
    let mut session = Session::new(fetcher, endpoints, settings);

    // Single keystrokes need a terminal; piped input answers the pager by line
    let confirm: Box<dyn Confirm> = if io::stdin().is_terminal() {
        Box::new(KeyReader)
    } else {
        Box::new(LineConfirm)
    };
    let mut console = Console::new(io::stdin().lock(), io::stdout(), confirm);

    if let Err(e) = session.run(&mut console) {
        eprintln!("{e}");
        exit(1);
    }
}

/// Print bash completion script
fn print_bash_completion() {
    print!(
        r#"# bash completion for cfn

_cfn_completions() {{
    local cur prev
    COMPREPLY=()
    cur="${{COMP_WORDS[COMP_CWORD]}}"
    prev="${{COMP_WORDS[COMP_CWORD-1]}}"

    if [[ "${{prev}}" == "--completion" ]]; then
        COMPREPLY=("bash")
        return
    fi

    if [[ "${{cur}}" == -* ]]; then
        local options=(
            "--base-url        (Base URL of the JSON endpoints)"
            "--completion      (Generate shell completion script)"
            "-h                (Print help)"
            "--help            (Print help)"
            "--insecure        (Skip TLS certificate verification)"
            "-k                (Skip TLS certificate verification)"
            "--keep-going      (Re-prompt after network errors)"
            "--no-min-version  (Leave out the minimum version column)"
            "-v                (Make the operation more talkative)"
            "--verbose         (Make the operation more talkative)"
            "--version         (Print version)"
        )

        local IFS=$'\n'
        local opt name padded
        local width=$((COLUMNS - 1))
        for opt in "${{options[@]}}"; do
            name="${{opt%%  *}}"
            if [[ "$name" == "${{cur}}"* ]]; then
                printf -v padded "%-${{width}}s" "$opt"
                COMPREPLY+=("$padded")
            fi
        done

        if ((${{#COMPREPLY[@]}} == 1)); then
            COMPREPLY[0]="${{COMPREPLY[0]%%  *}}"
        fi
    fi
}}

complete -o nosort -F _cfn_completions cfn
"#
    );
}
