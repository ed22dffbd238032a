use clap::Parser;
use scenario_codegen::cli::commands::{cmd_generate, cmd_name};
use scenario_codegen::cli::config::{Cli, Commands, OptionOverrides, load_config};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        error!(error = %format!("{:#}", e), "code generation failed");
        eprintln!("error: failed to generate code");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Generate {
            request,
            output,
            output_dir,
            pom,
            test,
            base_page,
            render_missing_code,
        } => {
            // CLI > config > request options
            let overrides = OptionOverrides {
                generate_pom: pom,
                generate_test: test,
                generate_base_page: base_page,
                render_missing_code,
            }
            .or(config.generate);

            cmd_generate(&request, output.as_deref(), output_dir.as_deref(), overrides)?;
        }
        Commands::Name { element, scenario } => {
            println!("{}", cmd_name(element.as_deref(), scenario.as_deref())?);
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
