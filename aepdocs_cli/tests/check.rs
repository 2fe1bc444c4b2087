mod common;

use aepdocs_cli::AepdocsCli;
use aepdocs_cli::Commands;
use aepdocs_core::AnyEmptyResult;

const VALID_TEMPLATE: &str =
	"# Title\n\n{% tab proto %}\nproto\n{% tab oas %}\noas\n{% endtabs %}\n";

#[test]
fn check_passes_when_all_tags_are_supported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "aep/general/0001/aep.md.j2", VALID_TEMPLATE)?;
	common::write(tmp.path(), "aep/general/0001/aep.yaml", "id: 1\n")?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Check passed: 1 file(s) only use supported tags.",
		));

	Ok(())
}

#[test]
fn check_reports_every_failing_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "good.md", VALID_TEMPLATE)?;
	common::write(tmp.path(), "first.md", "{% if x %}\n")?;
	common::write(tmp.path(), "nested/second.md.j2", "{% for y in z %}\n")?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.arg("check")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("first.md"))
		.stderr(predicates::str::contains("second.md.j2"))
		.stderr(predicates::str::contains("`{% for y in z %}`"))
		.stderr(predicates::str::contains("2 of 3 file(s) failed the tag check."));

	Ok(())
}

#[test]
fn check_accepts_explicit_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "notes.txt", VALID_TEMPLATE)?;
	common::write(tmp.path(), "ignored.md", "{% if x %}\n")?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.arg("check")
		.arg(tmp.path().join("notes.txt"))
		.assert()
		.success();

	Ok(())
}

#[test]
fn check_paths_are_parsed() {
	use clap::Parser;

	let cli = AepdocsCli::parse_from(["aepdocs", "check", "a.md", "docs"]);
	match cli.command {
		Some(Commands::Check { paths }) => {
			assert_eq!(paths, vec![
				std::path::PathBuf::from("a.md"),
				std::path::PathBuf::from("docs"),
			]);
		}
		_ => panic!("expected Check command"),
	}

	let cli = AepdocsCli::parse_from(["aepdocs", "check"]);
	match cli.command {
		Some(Commands::Check { paths }) => assert!(paths.is_empty()),
		_ => panic!("expected Check command"),
	}
}
