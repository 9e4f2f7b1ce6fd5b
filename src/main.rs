/*!
 * spare CLI - provision an S3 + CloudFront site and deploy an SPA into it
 */

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spare::{
    cli_style::{print_error, print_warning},
    commands::{self, build::BuildOptions, deploy::DeployOptions, CommonOptions},
    config::CONFIG_FILE_PATH,
    error::{Result, SpareError, EXIT_SUCCESS},
    logging::{self, LogLevel, LogSettings},
    VERSION,
};

#[derive(Parser)]
#[command(name = "spare")]
#[command(version, about = "Provision an S3 bucket behind CloudFront and deploy a single page application to it", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write JSON logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, value_enum, default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .spare.yml
    Init {
        /// Configuration file to create
        #[arg(short, long, default_value = CONFIG_FILE_PATH)]
        file: PathBuf,
    },

    /// Create the bucket, lock it down and put a CDN in front of it
    Build {
        #[command(flatten)]
        common: CommonArgs,

        /// Provision the bucket only (LocalStack has no CloudFront)
        #[arg(long)]
        skip_cdn: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Upload the deploy target into the bucket
    Deploy {
        #[command(flatten)]
        common: CommonArgs,

        /// Maximum concurrent uploads (default: number of CPU cores)
        #[arg(short, long, default_value = "0")]
        concurrency: usize,
    },

    /// Print the version
    Version,
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Use the debugLocalstackEndpoint from the configuration
    #[arg(short, long)]
    debug: bool,

    /// AWS profile (falls back to $AWS_PROFILE, then "default")
    #[arg(short, long)]
    profile: Option<String>,

    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE_PATH)]
    file: PathBuf,
}

impl From<CommonArgs> for CommonOptions {
    fn from(args: CommonArgs) -> Self {
        CommonOptions {
            debug: args.debug,
            profile: args.profile,
            file: args.file,
        }
    }
}

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!(category = %e.category(), error = %e, "Command failed");
            print_error(&e.to_string(), hint(&e));
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let log_settings = LogSettings {
        level: cli.log_level,
        file: cli.log.clone(),
        verbose: cli.verbose,
    };
    if let Err(e) = logging::init_logging(&log_settings) {
        print_warning(&format!("Failed to initialize logging: {}", e));
    }

    handle_subcommand(cli.command)
}

fn handle_subcommand(command: Commands) -> Result<()> {
    match command {
        Commands::Init { file } => commands::init::run_init(&file)
            .map(|_| ())
            .map_err(|e| SpareError::Init(format!("{:#}", e))),
        Commands::Build {
            common,
            skip_cdn,
            yes,
        } => {
            let options = BuildOptions {
                common: common.into(),
                skip_cdn,
                yes,
            };
            commands::build::run_build(&options).map(|_| ())
        }
        Commands::Deploy {
            common,
            concurrency,
        } => {
            let options = DeployOptions {
                common: common.into(),
                concurrency,
            };
            commands::deploy::run_deploy(&options).map(|_| ())
        }
        Commands::Version => {
            println!("spare version {}", VERSION);
            Ok(())
        }
    }
}

fn hint(err: &SpareError) -> Option<&'static str> {
    match err {
        SpareError::Config(_) => Some("Run `spare init` to create a configuration file"),
        SpareError::Validation(_) => Some("Fix the value in the configuration file and retry"),
        SpareError::Client(_) => Some("Check the AWS profile and region"),
        _ => None,
    }
}
