use std::path::Path;
use std::path::PathBuf;

use crate::OutputConfig;
use crate::SiteConfig;
use crate::SourcesConfig;

pub(crate) const PROTO_SAMPLE: &str = "// a <= b\nmessage Book {\n  string name = 1;\n}\n";
pub(crate) const YAML_SAMPLE: &str = "Book:\n  type: object";

pub(crate) const RESOURCE_PATHS_MD: &str = "# Resource paths\n\n**Note:** Paths are stable.\n\nA path **must** be unique, see [aep-121]: ./0121 for details.\n\n{% tab proto %}\n\n{% sample 'example.proto', 'message Book' %}\n\n{% tab oas %}\n\n{% sample 'example.yaml', 'Book' %}\n\n{% endtabs %}\n";
pub(crate) const RESOURCE_PATHS_YAML: &str = "id: 122\nstate: approved\nslug: resource-paths\nplacement:\n  category: resources\n  order: 20\n";

pub(crate) const DESIGN_MD: &str = "# Resource-oriented design\n\nAPIs **should** be resource oriented.\n";
pub(crate) const DESIGN_YAML: &str = "id: 121\nstate: approved\nslug: resource-oriented-design\nplacement:\n  category: design\n  order: 10\n";

pub(crate) const SCOPE_YAML: &str = "categories:\n  - code: design\n    title: Design\n  - code: resources\n    title: Resources\n";

/// Write `content` to `root/relative`, creating parent folders.
pub(crate) fn write(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	std::fs::create_dir_all(path.parent().unwrap()).unwrap();
	std::fs::write(path, content).unwrap();
}

/// A minimal AEP repository with two proposals, a general page, the
/// contributing guide and a blog post.
pub(crate) fn create_aep_repo(root: &Path) {
	write(root, "aep/general/0121/aep.md.j2", DESIGN_MD);
	write(root, "aep/general/0121/aep.yaml", DESIGN_YAML);
	write(root, "aep/general/0122/aep.md.j2", RESOURCE_PATHS_MD);
	write(root, "aep/general/0122/aep.yaml", RESOURCE_PATHS_YAML);
	write(root, "aep/general/0122/example.proto", PROTO_SAMPLE);
	write(root, "aep/general/0122/example.yaml", YAML_SAMPLE);
	write(root, "aep/general/scope.yaml", SCOPE_YAML);
	write(root, "pages/general/faq.md", "# Frequently asked questions\n\nAsk away.\n");
	write(root, "CONTRIBUTING.md", "# Contributing\n\nSend a pull request.\n");
	write(root, "blog/hello.md", "---\ntitle: Hello\n---\n\nFirst post.\n");
	write(root, "config/hero.yaml", "title: API Enhancement Proposals\n");
	write(root, "config/urls.yaml", "repo: https://github.com/aep-dev/aep\n");
	write(root, "config/site.yaml", "name: aep.dev\n");
}

pub(crate) fn create_edition_repo(root: &Path) {
	write(root, "aep/general/0121/aep.md.j2", DESIGN_MD);
	write(root, "aep/general/0121/aep.yaml", DESIGN_YAML);
	write(root, "aep/general/scope.yaml", SCOPE_YAML);
}

pub(crate) fn create_linter_repo(root: &Path) {
	write(root, "README.md", "# api-linter\n\nLints protobuf APIs.\n");
	write(
		root,
		"docs/rules/0131/request-name-field.md",
		"---\nrule:\n  aep: 131\n  name: [core, '0131', request-name-field]\n---\n\n# Name field\n\nGet requests must have a name field.\n",
	);
	write(root, "docs/rules/0131/index.md", "# AEP-131\n");
}

pub(crate) fn create_openapi_linter_repo(root: &Path) {
	write(root, "README.md", "# openapi-linter\n\nLints OpenAPI documents.\n");
	write(
		root,
		"docs/0140.md",
		"# AEP-140\n\nRules for field names.\n\n## Field names\n\nUse snake case.\n\n## Enum values\n\nUse upper case.\n",
	);
}

pub(crate) fn create_components_repo(root: &Path) {
	write(
		root,
		"json_schema/book.yaml",
		"$id: https://aep.dev/json-schema/book.json\ntype: object\nproperties:\n  name:\n    type: string\n",
	);
}

/// Every repository in its own folder below `root`, generating into
/// `root/site`.
pub(crate) fn full_site_config(root: &Path) -> SiteConfig {
	let repo = |name: &str| -> PathBuf { root.join("repos").join(name) };
	create_aep_repo(&repo("aep"));
	create_linter_repo(&repo("linter"));
	create_openapi_linter_repo(&repo("openapi-linter"));
	create_components_repo(&repo("components"));
	create_edition_repo(&repo("edition-2026"));

	let mut config = SiteConfig {
		sources: SourcesConfig {
			aep: Some(repo("aep")),
			linter: Some(repo("linter")),
			openapi_linter: Some(repo("openapi-linter")),
			components: Some(repo("components")),
		},
		editions: Vec::new(),
		output: OutputConfig {
			root: root.join("site"),
		},
	};
	config.apply_env(|name| {
		(name == crate::ENV_EDITION_2026).then(|| repo("edition-2026").display().to_string())
	});
	config
}
