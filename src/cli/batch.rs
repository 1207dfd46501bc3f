//! Bulk upload command: preview, predict, label, save

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use super::args::BatchArgs;
use super::prompts::confirm_overwrite;
use crate::pipeline::{load_upload_with_progress, run_batch, write_csv, InferenceContext};
use crate::report::{
    export_run_summary, print_preview, print_results, ExportParams, SegmentSummary,
};
use crate::utils::{
    create_spinner, finish_with_error, finish_with_success, print_count, print_info,
    print_step_header, print_success,
};

/// Where a finished batch run was written, if it was written at all
#[derive(Debug, Clone, PartialEq)]
pub enum BatchStatus {
    Saved(PathBuf),
    Cancelled,
}

/// Run a bulk prediction over an uploaded CSV file
pub fn run_batch_command(
    ctx: &InferenceContext,
    args: &BatchArgs,
    model_description: &str,
    no_confirm: bool,
) -> Result<BatchStatus> {
    let output = args.output_path();

    // STEP 1: Load upload
    print_step_header(1, "Load Upload");
    let load_start = Instant::now();
    let (df, rows, cols) = load_upload_with_progress(&args.input, args.infer_schema_length)?;
    let load_time = load_start.elapsed();
    print_count("rows", rows, Some(&format!("across {} columns", cols)));
    print_preview(&df)?;

    // STEP 2: Predict
    print_step_header(2, "Predict");
    let predict_start = Instant::now();
    let spinner = create_spinner(&format!("Scoring {} customers...", rows));
    let outcome = match run_batch(ctx, &df, args.variant) {
        Ok(outcome) => {
            finish_with_success(&spinner, "Predictions complete");
            outcome
        }
        Err(e) => {
            finish_with_error(&spinner, "Prediction failed");
            return Err(e);
        }
    };
    let predict_time = predict_start.elapsed();
    print_results(&outcome, Some(args.show_rows))?;

    // STEP 3: Save
    print_step_header(3, "Save Results");
    if output.exists() && !no_confirm && !confirm_overwrite(&output)? {
        print_info("Output not written");
        return Ok(BatchStatus::Cancelled);
    }

    let save_start = Instant::now();
    let mut frame = outcome.frame.clone();
    write_csv(&mut frame, &output)?;
    let save_time = save_start.elapsed();
    print_success(&format!("Saved {}", output.display()));

    if let Some(summary_path) = &args.summary_json {
        let params = ExportParams {
            input_file: &args.input,
            output_file: &output,
            model: model_description,
        };
        export_run_summary(&outcome, &params, summary_path)?;
        print_success(&format!("Run summary written to {}", summary_path.display()));
    }

    let mut summary = SegmentSummary::from_outcome(&outcome);
    summary.set_load_time(load_time);
    summary.set_predict_time(predict_time);
    summary.set_save_time(save_time);
    summary.display();

    Ok(BatchStatus::Saved(output))
}
