//! Single-record prediction command

use anyhow::{Context, Result};
use console::style;

use super::args::PredictArgs;
use super::prompts::prompt_customer_input;
use crate::pipeline::{predict_single, InferenceContext, SinglePrediction};

/// The two result lines shown for a single customer
pub fn format_single(result: &SinglePrediction) -> [String; 2] {
    [
        format!("Predicted NumWebPurchases: {:.2}", result.prediction),
        format!("Category: {}", result.category),
    ]
}

/// Run the single-record form against loaded artifacts
pub fn run_predict(ctx: &InferenceContext, args: &PredictArgs) -> Result<SinglePrediction> {
    let customer = if args.interactive {
        prompt_customer_input(&args.customer())?
    } else {
        args.customer()
    };

    let result = predict_single(ctx, &customer, &args.thresholds())
        .context("Customer details do not match the model's inputs")?;

    log::debug!(
        "Predicted {} purchases for income {}",
        result.prediction,
        customer.income
    );

    println!();
    for line in format_single(&result) {
        println!("    {}", style(line).white().bold());
    }
    println!();

    Ok(result)
}
