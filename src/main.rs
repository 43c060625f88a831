use clap::Parser;
use viewddl::cli::args::Cli;
use viewddl::cli::dispatch::handle;

fn main() {
    let cli = Cli::parse();
    handle(cli);
}
