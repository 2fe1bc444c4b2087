use std::path::Path;
use std::path::PathBuf;
use std::process;

use aepdocs_cli::AepdocsCli;
use aepdocs_cli::Commands;
use aepdocs_core::Generator;
use aepdocs_core::SiteConfig;
use aepdocs_core::sidebar::assemble_sidebar;
use aepdocs_core::site::read_site_structure;
use aepdocs_core::site::write_json;
use aepdocs_core::transform;
use aepdocs_core::validate_tags;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
	let args = AepdocsCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Generate) => run_generate(&args),
		Some(Commands::Transform { file }) => run_transform(file),
		Some(Commands::Check { paths }) => run_check(&args, paths),
		Some(Commands::Sidebar) => run_sidebar(&args),
		None => {
			eprintln!("No subcommand specified. Run `aepdocs --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<aepdocs_core::SiteError>() {
			Ok(site_err) => {
				let report: miette::Report = (*site_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` wins over the default level.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_ansi(use_color)
		.with_writer(std::io::stderr)
		.init();
}

fn resolve_root(args: &AepdocsCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_generate(args: &AepdocsCli) -> CommandResult {
	let root = resolve_root(args);
	let config = SiteConfig::load_with_env(&root)?;
	let report = Generator::new(config).run()?;

	println!(
		"{} {} file(s)",
		colored!("Generated", green),
		report.written.len()
	);

	if report.is_ok() {
		return Ok(());
	}

	eprintln!(
		"{}",
		colored!(format!("{} document(s) failed:", report.failures.len()), red)
	);
	for failure in &report.failures {
		eprintln!("  {}: {}", failure.path.display(), failure.error);
	}
	process::exit(1);
}

fn run_transform(file: &Path) -> CommandResult {
	let raw = std::fs::read_to_string(file)?;
	let folder = file.parent().unwrap_or_else(|| Path::new("."));
	let doc = transform(&raw, folder)?;
	let (body, components) = doc.into_parts();

	print!("{body}");
	if !components.is_empty() {
		let names: Vec<&str> = components.iter().map(String::as_str).collect();
		eprintln!("{} {}", colored!("components:", bold), names.join(", "));
	}

	Ok(())
}

fn run_check(args: &AepdocsCli, paths: &[PathBuf]) -> CommandResult {
	let targets = if paths.is_empty() {
		vec![resolve_root(args)]
	} else {
		paths.to_vec()
	};

	let mut files = Vec::new();
	for target in &targets {
		collect_templates(target, &mut files)?;
	}
	files.sort();
	tracing::debug!(count = files.len(), "collected templates");

	let mut failed = 0usize;
	for file in &files {
		let content = std::fs::read_to_string(file)?;
		if let Err(e) = validate_tags(&content) {
			failed += 1;
			eprintln!("{} {}: {e}", colored!("error:", red), file.display());
		}
	}

	if failed > 0 {
		eprintln!(
			"\n{}",
			colored!(format!("{failed} of {} file(s) failed the tag check.", files.len()), red)
		);
		process::exit(1);
	}

	println!(
		"{} {} file(s) only use supported tags.",
		colored!("Check passed:", green),
		files.len()
	);
	Ok(())
}

/// Collect `.md` and `.md.j2` files below `path`. A file path is checked
/// regardless of its name.
fn collect_templates(path: &Path, files: &mut Vec<PathBuf>) -> CommandResult {
	if path.is_file() {
		files.push(path.to_path_buf());
		return Ok(());
	}

	for entry in std::fs::read_dir(path)? {
		let entry_path = entry?.path();
		let skipped = entry_path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(|name| name.starts_with('.') || name == "node_modules");
		if skipped {
			continue;
		}

		if entry_path.is_dir() {
			collect_templates(&entry_path, files)?;
		} else if entry_path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(|name| name.ends_with(".md") || name.ends_with(".md.j2"))
		{
			files.push(entry_path);
		}
	}

	Ok(())
}

fn run_sidebar(args: &AepdocsCli) -> CommandResult {
	let root = resolve_root(args);
	let config = SiteConfig::load_with_env(&root)?;
	let generated = config.output.generated_dir();

	let structure = read_site_structure(&generated.join("site-structure.json"))?;
	let sidebar_path = generated.join("sidebar.json");
	write_json(&sidebar_path, &assemble_sidebar(&structure))?;

	println!(
		"{} {}",
		colored!("Wrote", green),
		sidebar_path.display()
	);
	Ok(())
}
