mod common;

use std::path::Path;

use aepdocs_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use serde_json::Value;

fn create_aep_repo(root: &Path) -> std::io::Result<()> {
	common::write(
		root,
		"aep/general/0001/aep.md.j2",
		"# Purpose and guidelines\n\nAEPs **should** be short.\n",
	)?;
	common::write(
		root,
		"aep/general/0001/aep.yaml",
		"id: 1\nstate: approved\nslug: purpose\nplacement:\n  category: meta\n  order: 0\n",
	)?;
	common::write(
		root,
		"aep/general/scope.yaml",
		"categories:\n  - code: meta\n    title: Meta\n",
	)?;
	common::write(root, "pages/general/faq.md", "# FAQ\n\nQuestions.\n")
}

#[test]
fn generate_writes_site_from_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	create_aep_repo(&tmp.path().join("repos/aep"))?;
	common::write(tmp.path(), "site/aepdocs.toml", "[sources]\naep = \"../repos/aep\"\n")?;
	let site = tmp.path().join("site");

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.arg("generate")
		.arg("--path")
		.arg(&site)
		.assert()
		.success()
		.stdout(predicates::str::contains("Generated"));

	let page = std::fs::read_to_string(site.join("src/content/docs/1.mdx"))?;
	assert!(page.contains("title: Purpose and guidelines"));
	assert!(page.contains("<b class=\"font-extrabold text-yellow-700\">should</b>"));
	assert!(site.join("src/content/docs/faq.md").is_file());
	assert!(site.join("generated/redirects.json").is_file());
	assert!(site.join("generated/sidebar.json").is_file());
	assert!(site.join("public/llms.txt").is_file());

	Ok(())
}

#[test]
fn generate_reads_sources_from_environment() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let repo = tmp.path().join("repos/aep");
	create_aep_repo(&repo)?;
	let site = tmp.path().join("site");
	std::fs::create_dir_all(&site)?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.env("AEP_LOCATION", &repo)
		.arg("generate")
		.arg("--path")
		.arg(&site)
		.assert()
		.success();

	assert!(site.join("src/content/docs/1.mdx").is_file());

	Ok(())
}

#[test]
fn generate_exits_with_one_when_a_document_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let repo = tmp.path().join("repos/aep");
	create_aep_repo(&repo)?;
	common::write(&repo, "aep/general/0002/aep.md.j2", "# Broken\n\n{% include 'x' %}\n")?;
	common::write(
		&repo,
		"aep/general/0002/aep.yaml",
		"id: 2\nplacement:\n  category: meta\n",
	)?;
	let site = tmp.path().join("site");
	std::fs::create_dir_all(&site)?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.env("AEP_LOCATION", &repo)
		.arg("generate")
		.arg("--path")
		.arg(&site)
		.assert()
		.code(1)
		.stderr(predicates::str::contains("1 document(s) failed:"))
		.stderr(predicates::str::contains("0002"));

	assert!(site.join("src/content/docs/1.mdx").is_file());
	assert!(!site.join("src/content/docs/2.mdx").exists());

	Ok(())
}

#[test]
fn sidebar_is_rebuilt_from_site_structure() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let repo = tmp.path().join("repos/aep");
	create_aep_repo(&repo)?;
	let site = tmp.path().join("site");
	std::fs::create_dir_all(&site)?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.env("AEP_LOCATION", &repo)
		.arg("generate")
		.arg("--path")
		.arg(&site)
		.assert()
		.success();

	let sidebar_path = site.join("generated/sidebar.json");
	std::fs::remove_file(&sidebar_path)?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.arg("sidebar")
		.arg("--path")
		.arg(&site)
		.assert()
		.success()
		.stdout(predicates::str::contains("sidebar.json"));

	let sidebar: Value = serde_json::from_str(&std::fs::read_to_string(&sidebar_path)?)?;
	assert_eq!(sidebar[0]["label"], "Overview");
	assert_eq!(sidebar[0]["items"][0], "faq");
	assert_eq!(sidebar[1]["items"][0]["label"], "Meta");
	assert_eq!(sidebar[1]["items"][0]["items"][0]["link"], "1");

	Ok(())
}

#[test]
fn sidebar_requires_site_structure() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.arg("sidebar")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("site structure file not found"))
		.stdout(predicates::str::contains("Wrote").not());

	Ok(())
}
