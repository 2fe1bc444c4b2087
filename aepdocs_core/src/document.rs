use std::collections::BTreeSet;

use derive_more::Deref;

/// Names of the site components referenced by a transformed document.
///
/// The set only ever grows: passes can register components but nothing can
/// remove them again, so read access goes through `Deref` to the inner set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Components(BTreeSet<String>);

impl Components {
	/// Register a component. Returns `true` when it was not present yet.
	pub fn register(&mut self, name: impl Into<String>) -> bool {
		self.0.insert(name.into())
	}

	pub fn into_inner(self) -> BTreeSet<String> {
		self.0
	}
}

/// The unit every transform pass works on: the document body and the
/// components it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
	pub body: String,
	pub components: Components,
}

impl Document {
	pub fn new(body: impl Into<String>) -> Self {
		Self {
			body: body.into(),
			components: Components::default(),
		}
	}

	pub fn register_component(&mut self, name: impl Into<String>) -> bool {
		self.components.register(name)
	}

	/// Split the document into its body and the referenced component names.
	pub fn into_parts(self) -> (String, BTreeSet<String>) {
		(self.body, self.components.into_inner())
	}
}
