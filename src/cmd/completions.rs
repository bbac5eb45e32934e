//! Completions command implementation
//!
//! Handles the `code-size completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// code-size completions bash > /etc/bash_completion.d/code-size
///
/// # Zsh
/// code-size completions zsh > ~/.zfunc/_code-size
/// ```
pub fn cmd_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    // Cli lives in main.rs, so the command tree is rebuilt here
    use clap::{Arg, ArgAction, Command};

    let shared = || {
        [
            Arg::new("config").long("config").value_name("FILE"),
            Arg::new("objects-dir").long("objects-dir").value_name("DIR"),
            Arg::new("size-tool").long("size-tool").value_name("TOOL"),
            Arg::new("json").long("json").action(ArgAction::SetTrue),
        ]
    };

    let mut cmd = Command::new("code-size")
        .version(env!("CARGO_PKG_VERSION"))
        .about("ROM code size metrics for object files")
        .subcommand(
            Command::new("measure")
                .about("Measure all files of the manifest and write group sizes")
                .arg(Arg::new("output").short('o').long("output").value_name("FILE"))
                .arg(Arg::new("manifest").long("manifest").value_name("FILE"))
                .arg(Arg::new("jobs").short('j').long("jobs").value_name("N"))
                .args(shared()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the section breakdown of object files")
                .arg(Arg::new("names").num_args(1..).value_name("NAME"))
                .args(shared()),
        )
        .subcommand(Command::new("completions").about("Generate shell completions"));

    generate(shell, &mut cmd, "code-size", out);
}
