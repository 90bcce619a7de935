use std::io;
use std::process::ExitCode;

use anim_export_cli::{run, CliArgs};
use anim_export_core::ExportError;
use clap::Parser;
use log::error;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let stdout = io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let category = err
                .downcast_ref::<ExportError>()
                .map_or("cli", ExportError::category);
            error!("[{category}] {err:#}");
            ExitCode::FAILURE
        }
    }
}
