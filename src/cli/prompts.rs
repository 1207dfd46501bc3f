//! Interactive prompts using dialoguer

use std::path::Path;

use anyhow::Result;
use dialoguer::{Confirm, Input};

use crate::pipeline::{CustomerInput, Spending};

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm replacing an existing output file
pub fn confirm_overwrite(path: &Path) -> Result<bool> {
    let message = format!("{} already exists. Overwrite it?", path.display());
    confirm_step(&message)
}

/// Prompt for one non-negative amount
fn prompt_amount(label: &str, default: f64) -> Result<f64> {
    let value = Input::<f64>::new()
        .with_prompt(label)
        .default(default)
        .validate_with(|v: &f64| -> Result<(), &'static str> {
            if v.is_finite() && *v >= 0.0 {
                Ok(())
            } else {
                Err("Enter a number greater than or equal to 0")
            }
        })
        .interact_text()?;
    Ok(value)
}

/// Collect the single-record form, using `defaults` as pre-filled values
pub fn prompt_customer_input(defaults: &CustomerInput) -> Result<CustomerInput> {
    let income = prompt_amount("Income", defaults.income)?;
    let spending = Spending {
        wines: prompt_amount("Amount Spent on Wine", defaults.spending.wines)?,
        fruits: prompt_amount("Amount Spent on Fruits", defaults.spending.fruits)?,
        meat: prompt_amount("Amount Spent on Meat Products", defaults.spending.meat)?,
        fish: prompt_amount("Amount Spent on Fish Products", defaults.spending.fish)?,
        sweets: prompt_amount("Amount Spent on Sweets", defaults.spending.sweets)?,
        gold: prompt_amount("Amount Spent on Gold Products", defaults.spending.gold)?,
    };
    Ok(CustomerInput { income, spending })
}
