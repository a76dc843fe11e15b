mod alpha_bleed;
mod asset_name;
mod commands;
mod data;
mod glob;
mod image;
mod options;

use std::{panic, process};

use backtrace::Backtrace;
use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn run(options: Options) -> anyhow::Result<()> {
    match options.command {
        Subcommand::Pack(pack_options) => commands::pack(options.global, pack_options)?,
        Subcommand::Plan(plan_options) => commands::plan(options.global, plan_options)?,
    }

    Ok(())
}

fn main() {
    panic::set_hook(Box::new(|panic_info| {
        // PanicInfo's payload is usually a &'static str or String.
        // See: https://doc.rust-lang.org/beta/std/panic/struct.PanicInfo.html#method.payload
        let message = match panic_info.payload().downcast_ref::<&str>() {
            Some(message) => message.to_string(),
            None => match panic_info.payload().downcast_ref::<String>() {
                Some(message) => message.clone(),
                None => "<no message>".to_string(),
            },
        };

        log::error!("atlaspack crashed! This is a bug.");
        log::error!("{}", message);

        if let Some(location) = panic_info.location() {
            log::error!("in file {} on line {}", location.file(), location.line());
        }

        let backtrace = Backtrace::new();
        log::error!("{:?}", backtrace);

        process::exit(1);
    }));

    let options = Options::from_args();

    let log_filter = "warn,atlaspack=info";
    let log_env = env_logger::Env::default().default_filter_or(log_filter);

    env_logger::Builder::from_env(log_env)
        .format_module_path(false)
        .format_timestamp(None)
        .format_indent(Some(8))
        .init();

    if let Err(err) = run(options) {
        log::error!("{:?}", err);
        process::exit(1);
    }
}
