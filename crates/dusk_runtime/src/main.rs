//! dusk-demo
//!
//! Runs the phone-booth opening headlessly: the full session stack wired
//! to ports that log instead of render. Useful for smoke-testing content
//! edits without a browser build. Run with: cargo run --bin dusk-demo

mod content;
mod host;
mod script;

use std::path::PathBuf;

use clap::Parser;

use crate::content::GameContent;

#[derive(Parser)]
#[command(about = "Headless run of the phone-booth opening", version)]
struct Args {
    /// Content directory; the embedded set is used when omitted.
    #[arg(long)]
    content: Option<PathBuf>,
    /// Page URL the session pretends it was loaded from.
    #[arg(long, default_value = "https://dusk.town/play?preset=phonebooth")]
    url: String,
    /// Settings storage file, standing in for the browser's local storage.
    #[arg(long, default_value = "dusk-settings.json")]
    settings: PathBuf,
    /// Simulation rate, frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let content = match &args.content {
        Some(dir) => GameContent::from_dir(dir),
        None => GameContent::embedded(),
    };
    let content = match content {
        Ok(content) => content,
        Err(err) => {
            log::error!("content: {err}");
            std::process::exit(1);
        }
    };

    script::run(content, &args.url, args.settings, args.fps);
}
