//! src/main.rs

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

mod commands;
mod config;
mod errors;
mod git;
mod issue;
mod policy;
mod runner;
mod tracker;

use commands::check::{handle_check, CheckStatus};
use commands::configure::handle_configure;
use commands::install_hook::handle_install_hook;
use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { warn_only, branch } => handle_check(warn_only, branch).await,
        Commands::Configure { reconfigure } => {
            handle_configure(reconfigure).await.map(|_| CheckStatus::Passed)
        }
        Commands::InstallHook => handle_install_hook().await.map(|_| CheckStatus::Passed),
    };

    // 任何错误都按校验失败处理，让 git 中止操作
    match result {
        Ok(CheckStatus::Passed) => ExitCode::SUCCESS,
        Ok(CheckStatus::Failed) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}", format!("{err:#}").red());
            ExitCode::FAILURE
        }
    }
}
