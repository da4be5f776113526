mod binfmt;
mod cli;
mod commands;
mod gfx;
mod png;
mod raster;

use clap::Parser;

fn main() {
    cli::Cli::parse().run();
}
