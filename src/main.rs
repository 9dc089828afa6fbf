#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "wldoc", about = "WLD world file inspection tools")]
struct Cli {
	/// Raise log verbosity; repeat for more detail.
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Header, counts and decode issues.
	Info(cmd::info::Args),
	/// List fragments, optionally filtered.
	Fragments(cmd::fragments::Args),
	/// Dump the decoded string table.
	Strings(cmd::strings::Args),
	/// Skeleton trees and bound animations.
	Skeleton(cmd::skeleton::Args),
	/// BSP trees, regions and region classification.
	Bsp(cmd::bsp::Args),
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn run(command: Commands) -> wldoc::wld::Result<()> {
	match command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Fragments(args) => cmd::fragments::run(args),
		Commands::Strings(args) => cmd::strings::run(args),
		Commands::Skeleton(args) => cmd::skeleton::run(args),
		Commands::Bsp(args) => cmd::bsp::run(args),
	}
}
