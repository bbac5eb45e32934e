use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use code_size::cmd::{self, ConfigOverrides, MeasureOptions};
use std::path::PathBuf;
use std::process;

/// ROM code size metrics for object files
///
/// code-size runs a binutils-style `size` tool on every object file named in
/// an implementation manifest, checks its detailed report against its summary
/// report, and writes the size of each group of files followed by the total.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Settings shared by the measuring subcommands
#[derive(Args)]
struct SharedArgs {
    /// Config file (default: ./code-size.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the object files
    #[arg(long, value_name = "DIR")]
    objects_dir: Option<PathBuf>,

    /// Size tool binary, e.g. avr-size
    #[arg(long, value_name = "TOOL")]
    size_tool: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl SharedArgs {
    fn overrides(&self, manifest: Option<&PathBuf>) -> ConfigOverrides {
        ConfigOverrides {
            config: self.config.clone(),
            manifest: manifest.cloned(),
            objects_dir: self.objects_dir.clone(),
            size_tool: self.size_tool.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Measure all files of the manifest and write group sizes
    Measure {
        /// File receiving the "<group>... <total>" line
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Implementation manifest (default: ../source/implementation.info)
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Measurement threads (0 = one per core)
        #[arg(short, long, default_value_t = 1, value_name = "N")]
        jobs: usize,

        #[command(flatten)]
        shared: SharedArgs,
    },

    /// Show the section breakdown of object files
    Inspect {
        /// Object file names, without extension
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,

        #[command(flatten)]
        shared: SharedArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Measure {
            output,
            manifest,
            jobs,
            shared,
        }) => cmd::cmd_measure(&MeasureOptions {
            output: output.clone(),
            overrides: shared.overrides(manifest.as_ref()),
            jobs: *jobs,
            json: shared.json,
        }),
        Some(Commands::Inspect { names, shared }) => {
            cmd::cmd_inspect(names, &shared.overrides(None), shared.json)
        }
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("code-size v{}", env!("CARGO_PKG_VERSION"));
            println!("ROM code size metrics for object files\n");
            println!("Usage: code-size <COMMAND>\n");
            println!("Commands:");
            println!("  measure      Measure all files of the manifest and write group sizes");
            println!("  inspect      Show the section breakdown of object files");
            println!("  completions  Generate shell completions");
            println!("\nRun 'code-size <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use code_size::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
