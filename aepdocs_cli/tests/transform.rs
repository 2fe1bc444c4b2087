mod common;

use aepdocs_core::AnyEmptyResult;

#[test]
fn transform_prints_mdx_body() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(
		tmp.path(),
		"aep.md.j2",
		"# Paths\n\n**Note:** Stable.\n\nYou **must** read it.\n\n{% sample 'book.proto', 'message Book' %}\n",
	)?;
	common::write(tmp.path(), "book.proto", "message Book {}\n")?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.arg("transform")
		.arg(tmp.path().join("aep.md.j2"))
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"<Aside type=\"note\" title=\"Note\">\n  Stable.\n</Aside>",
		))
		.stdout(predicates::str::contains(
			"<b class=\"font-extrabold text-red-700\">must</b>",
		))
		.stdout(predicates::str::contains(
			"```protobuf title=\"book.proto\" token1=\"message Book\"\nmessage Book {}\n```",
		))
		.stderr(predicates::str::contains("components: Aside"));

	Ok(())
}

#[test]
fn transform_rejects_unsupported_tag() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "aep.md.j2", "# Title\n\n{% if draft %}\n")?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.arg("transform")
		.arg(tmp.path().join("aep.md.j2"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("Unsupported Jinja2 tag found"));

	Ok(())
}

#[test]
fn transform_reports_missing_sample() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(
		tmp.path(),
		"aep.md.j2",
		"# Title\n\n{% sample 'missing.proto', 'message Book' %}\n",
	)?;

	let mut cmd = common::aepdocs_cmd();
	let _ = cmd
		.arg("transform")
		.arg(tmp.path().join("aep.md.j2"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("sample file not found"));

	Ok(())
}
