//! custseg: Customer Segmentation CLI Tool
//!
//! Predicts the number of web purchases for customers and labels them by
//! income and buying level, from a single form, an uploaded CSV file or a
//! step-by-step wizard.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use custseg::cli::{run_batch_command, run_predict, run_wizard, BatchStatus, Cli, Commands};
use custseg::pipeline::{InferenceContext, Thresholds};
use custseg::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner, print_completion,
    print_config, print_error,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    let paths = cli.artifact_paths();

    match &cli.command {
        None | Some(Commands::Wizard) => {
            // The wizard stays usable without artifacts and reports the error at stage 4
            let artifacts = InferenceContext::load(&paths).map_err(|e| {
                log::warn!("Artifacts unavailable: {}", e);
                e.to_string()
            });
            run_wizard(artifacts, Thresholds::default())
        }
        Some(Commands::Predict(args)) => {
            print_banner(env!("CARGO_PKG_VERSION"));
            let ctx = load_context(&cli)?;
            print_config(
                cli.artifacts_dir(),
                &ctx.model().describe(),
                None,
                Some(&args.thresholds()),
            );
            run_predict(&ctx, args)?;
            Ok(())
        }
        Some(Commands::Batch(args)) => {
            print_banner(env!("CARGO_PKG_VERSION"));
            let ctx = load_context(&cli)?;
            let model = ctx.model().describe();
            print_config(cli.artifacts_dir(), &model, Some(&args.input), None);

            match run_batch_command(&ctx, args, &model, cli.no_confirm)? {
                BatchStatus::Saved(path) => {
                    print_completion(&format!("Segments written to {}", path.display()))
                }
                BatchStatus::Cancelled => print_completion("Nothing written"),
            }
            Ok(())
        }
    }
}

/// Load all artifacts behind a spinner; no prediction runs without them
fn load_context(cli: &Cli) -> Result<InferenceContext> {
    let spinner = create_spinner("Loading model artifacts...");
    match InferenceContext::load(&cli.artifact_paths()) {
        Ok(ctx) => {
            finish_with_success(
                &spinner,
                &format!("Artifacts loaded ({} features)", ctx.schema().len()),
            );
            Ok(ctx)
        }
        Err(e) => {
            finish_with_error(&spinner, "Could not load artifacts");
            print_error(&e.to_string());
            Err(e.into())
        }
    }
}
