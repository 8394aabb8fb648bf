mod cli;
mod glyphs_cmd;
mod page_range;
mod rows_cmd;
mod shared;
mod tables_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    shared::init_tracing(cli.verbose);

    let result = match cli.command {
        cli::Commands::Tables {
            ref file,
            ref pages,
            format,
            ref config,
            cross_page_furniture,
        } => tables_cmd::run(
            file,
            pages.as_deref(),
            format,
            config.as_deref(),
            cross_page_furniture,
        ),
        cli::Commands::Glyphs {
            ref file,
            ref pages,
            format,
            ref config,
        } => glyphs_cmd::run(file, pages.as_deref(), format, config.as_deref()),
        cli::Commands::Rows {
            ref file,
            ref pages,
            format,
            ref config,
        } => rows_cmd::run(file, pages.as_deref(), format, config.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
