mod audio;
mod catalog;
mod config;
mod game;
mod logging;
mod quiz;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
