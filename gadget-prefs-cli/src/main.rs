use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use gadget_prefs_cli::{
    check::{run_check_command, run_defaults_command, run_repair_command},
    formats::DocumentFormat,
    messages::run_messages_command,
    validate::run_validate_command,
    validation::CommandError,
};

#[derive(Parser, Debug)]
#[command(name = "gadget-prefs", author, version, about, long_about = None)]
struct Args {
    /// Log every rejection and repair step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Force the format of input files instead of inferring it from the extension
    #[arg(long, value_enum, global = true)]
    format: Option<DocumentFormat>,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate preference description files (globs allowed).
    Validate {
        /// Description files or glob patterns
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<String>,
    },

    /// Strictly check a preferences file against a description.
    Check {
        /// The preferences description
        #[arg(short, long)]
        description: String,
        /// The preference values to check
        #[arg(short, long)]
        prefs: String,
    },

    /// Repair a preferences file: invalid or missing values get their
    /// defaults, undeclared keys are dropped.
    Repair {
        /// The preferences description
        #[arg(short, long)]
        description: String,
        /// The preference values to repair
        #[arg(short, long)]
        prefs: String,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the default value of every declared field.
    Defaults {
        /// The preferences description
        #[arg(short, long)]
        description: String,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the message keys a description refers to.
    Messages {
        /// The preferences description
        #[arg(short, long)]
        description: String,
        /// Print a JSON array instead of one key per line
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_on_error(result: Result<(), CommandError>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    let format = args.format;

    match args.commands {
        Commands::Validate { input } => {
            if !run_validate_command(&input, format) {
                std::process::exit(1);
            }
        }
        Commands::Check { description, prefs } => {
            exit_on_error(run_check_command(&description, &prefs, format));
        }
        Commands::Repair {
            description,
            prefs,
            output,
        } => {
            exit_on_error(run_repair_command(
                &description,
                &prefs,
                output.as_deref(),
                format,
            ));
        }
        Commands::Defaults {
            description,
            output,
        } => {
            exit_on_error(run_defaults_command(&description, output.as_deref(), format));
        }
        Commands::Messages { description, json } => {
            exit_on_error(run_messages_command(&description, json, format));
        }
        Commands::Completions { shell } => {
            let mut command = Args::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
    }
}
