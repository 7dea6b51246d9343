use serde::Deserialize;

/// Per-relation cascade options. Every flag defaults to off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct RelationOptions {
    /// Resolve the relation but never delete through it.
    pub skip_cascade: bool,

    /// A failure of this relation fails the whole delete event.
    pub fail_on_err: bool,

    /// Name of a [`Setter`](super::Setter) registered on the owning model
    /// that replaces the default deletion.
    pub setter: Option<String>,

    /// Name of an [`AfterDelete`](super::AfterDelete) callback registered
    /// on the owning model, notified once the relation's deletion settles.
    pub after_delete_callback: Option<String>,
}

/// A validated cascade entry for one relation of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDescriptor {
    pub relation_name: String,
    pub options: RelationOptions,
}

impl RelationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_cascade(mut self, skip_cascade: bool) -> Self {
        self.skip_cascade = skip_cascade;
        self
    }

    pub fn fail_on_err(mut self, fail_on_err: bool) -> Self {
        self.fail_on_err = fail_on_err;
        self
    }

    pub fn setter(mut self, name: impl Into<String>) -> Self {
        self.setter = Some(name.into());
        self
    }

    pub fn after_delete_callback(mut self, name: impl Into<String>) -> Self {
        self.after_delete_callback = Some(name.into());
        self
    }
}
