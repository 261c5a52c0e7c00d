use clap::{value_parser, Arg, ArgAction, Command};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use collectstatic::logging::init_tracing;
use collectstatic::strategies::{FinderKind, StorageBackend};
use collectstatic::{CollectOptions, CollectStatic, Config};

fn main() -> Result<(), Box<dyn Error>> {
	init_tracing();

	let matches = Command::new("collectstatic")
		.version(env!("CARGO_PKG_VERSION"))
		.author(env!("CARGO_PKG_AUTHORS"))
		.about("Collect static files into a single location")
		.arg(
			Arg::new("config")
				.short('c')
				.long("config")
				.value_name("FILE")
				.value_parser(value_parser!(PathBuf))
				.help("Configuration file (.toml, .json or .json5)"),
		)
		.arg(
			Arg::new("root")
				.long("root")
				.value_name("DIR")
				.value_parser(value_parser!(PathBuf))
				.help("Destination directory (overrides config and STATICFILES_ROOT)"),
		)
		.arg(
			Arg::new("storage")
				.long("storage")
				.value_name("BACKEND")
				.value_parser(StorageBackend::from_str)
				.help("Destination backend: file-system or memory"),
		)
		.arg(
			Arg::new("finder")
				.long("finder")
				.value_name("FINDER")
				.action(ArgAction::Append)
				.value_parser(FinderKind::from_str)
				.help("Finder to run, in priority order (file-system, app-directories)"),
		)
		.arg(
			Arg::new("noinput")
				.long("noinput")
				.alias("no-input")
				.action(ArgAction::SetTrue)
				.help("Do NOT prompt the user for input of any kind"),
		)
		.arg(
			Arg::new("ignore")
				.short('i')
				.long("ignore")
				.value_name("PATTERN")
				.action(ArgAction::Append)
				.help("Ignore files or directories matching this glob-style pattern"),
		)
		.arg(
			Arg::new("dry-run")
				.short('n')
				.long("dry-run")
				.action(ArgAction::SetTrue)
				.help("Do everything except modify the filesystem"),
		)
		.arg(
			Arg::new("link")
				.short('l')
				.long("link")
				.action(ArgAction::SetTrue)
				.help("Create a symbolic link to each file instead of copying"),
		)
		.arg(
			Arg::new("no-default-ignore")
				.long("no-default-ignore")
				.action(ArgAction::SetTrue)
				.help("Don't ignore the common patterns 'CVS', '.*' and '*~'"),
		)
		.arg(
			Arg::new("verbosity")
				.short('v')
				.long("verbosity")
				.value_name("LEVEL")
				.value_parser(value_parser!(u8).range(0..=2))
				.default_value("1")
				.help("0 = silent, 1 = normal output, 2 = verbose output"),
		)
		.get_matches();

	let mut config = match matches.get_one::<PathBuf>("config") {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	config.apply_env();
	if let Some(root) = matches.get_one::<PathBuf>("root") {
		config.root = root.clone();
	}
	if let Some(storage) = matches.get_one::<StorageBackend>("storage") {
		config.storage = *storage;
	}
	if let Some(finders) = matches.get_many::<FinderKind>("finder") {
		config.finders = finders.copied().collect();
	}

	let mut options = CollectOptions::new()
		.interactive(!matches.get_flag("noinput"))
		.use_default_ignore_patterns(!matches.get_flag("no-default-ignore"))
		.dry_run(matches.get_flag("dry-run"))
		.link(matches.get_flag("link"))
		.verbosity(matches.get_one::<u8>("verbosity").copied().unwrap_or(1));
	if let Some(patterns) = matches.get_many::<String>("ignore") {
		for pattern in patterns {
			options = options.ignore(pattern.as_str());
		}
	}

	let command = CollectStatic::from_config(&config)?;
	command.handle(&options, io::stdin().lock(), io::stdout().lock())?;

	Ok(())
}

// vim: ts=4
