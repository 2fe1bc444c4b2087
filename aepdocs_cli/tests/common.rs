use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

const SOURCE_VARIABLES: [&str; 5] = [
	"AEP_LOCATION",
	"AEP_LINTER_LOC",
	"AEP_OPENAPI_LINTER_LOC",
	"AEP_COMPONENTS_LOC",
	"AEP_EDITION_2026",
];

pub fn aepdocs_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("aepdocs"));
	cmd.env("NO_COLOR", "1");
	for name in SOURCE_VARIABLES {
		cmd.env_remove(name);
	}
	cmd
}

/// Write `content` to `root/relative`, creating parent folders.
pub fn write(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}
