use clap::Parser;
use linestress_cli::cli::{Cli, Commands};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::buses::BusesArgs;
use commands::evaluate::EvaluateArgs;
use commands::sweep::SweepArgs;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Evaluate {
            input,
            environment,
            strategy,
            out,
            json,
            format,
        } => commands::evaluate::handle(EvaluateArgs {
            config,
            input,
            environment,
            strategy: *strategy,
            out: out.as_ref(),
            json: json.as_ref(),
            format: *format,
        }),
        Commands::Classify { input, scheme } => commands::classify::handle(input, *scheme),
        Commands::Sweep {
            input,
            environment,
            temperatures,
            winds,
            strategy,
            out,
        } => commands::sweep::handle(SweepArgs {
            config,
            input,
            environment,
            temperatures,
            winds,
            strategy: *strategy,
            out: out.as_ref(),
        }),
        Commands::Buses {
            input,
            environment,
            strategy,
            scheme,
            out,
        } => commands::buses::handle(BusesArgs {
            config,
            input,
            environment,
            strategy: *strategy,
            scheme: *scheme,
            out: out.as_ref(),
        }),
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(err) = run(&cli) {
        error!("{:?}", err);
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
