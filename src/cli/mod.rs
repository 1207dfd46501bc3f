//! CLI module - argument parsing, prompts and the three front-ends

pub mod args;
pub mod batch;
pub mod predict;
pub mod prompts;
pub mod wizard;

pub use args::{BatchArgs, Cli, Commands, PredictArgs};
pub use batch::{run_batch_command, BatchStatus};
pub use predict::{format_single, run_predict};
pub use prompts::*;
pub use wizard::{run_wizard, WizardApp, WizardError, WizardSession, WizardStage};
