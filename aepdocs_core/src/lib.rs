//! `aepdocs_core` turns the markdown sources of the AEP repositories into the
//! MDX pages, JSON navigation data and static files of the aep.dev site.
//!
//! ## Processing Pipeline
//!
//! ```text
//! aep.md.j2 + aep.yaml
//!   → Tag validation (rejects unsupported `{% ... %}` tags before any rewrite)
//!   → Samples (inline proto/yaml snippets between marker tokens)
//!   → Tabs (`{% tab proto %}` blocks become <Tabs>/<TabItem>)
//!   → Comments and escapes (prose passes from here on skip fenced code)
//!   → Callouts (`**Note:**` paragraphs become <Aside>)
//!   → Rule keywords, title removal, links, graphviz fences
//!   → MdxPage (front matter + component imports + body)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `aepdocs.toml` plus environment
//!   overrides.
//! - [`tags`] — Jinja-style tag scanning and validation.
//! - [`page`] — Front matter and component imports around a transformed body.
//! - [`aep`] — Building proposal pages, redirects and `llms.txt`.
//! - [`linter`] — Protobuf and OpenAPI linter rule pages.
//! - [`site`] and [`sidebar`] — The navigation data consumed by the site.
//! - [`generator`] — Runs every section and writes the output tree.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use aepdocs_core::Generator;
//! use aepdocs_core::SiteConfig;
//!
//! let config = SiteConfig::load_with_env(Path::new(".")).unwrap();
//! let report = Generator::new(config).run().unwrap();
//! if !report.is_ok() {
//!     eprintln!("{} document(s) failed", report.failures.len());
//! }
//! ```

pub use aep::Aep;
pub use config::*;
pub use document::*;
pub use error::*;
pub use generator::*;
pub use page::MdxPage;
pub use pipeline::*;
pub use tags::SampleLanguage;
pub use tags::SampleReference;
pub use tags::TagKind;
pub use tags::TagOccurrence;
pub use tags::validate_tags;

pub mod aep;
pub mod callouts;
pub mod config;
mod document;
#[allow(unused_assignments)]
mod error;
pub(crate) mod fence;
mod generator;
pub(crate) mod lexer;
pub mod linter;
pub mod page;
mod pipeline;
pub mod rules;
pub mod samples;
pub mod sidebar;
pub mod site;
pub mod substitutions;
pub mod tabs;
pub mod tags;

#[cfg(test)]
mod __fixtures;
