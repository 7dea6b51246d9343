use crate::{AfterDelete, CascadeConfig, HookPoint, Methods, Setter};

/// The definition of one model, as registered with a
/// [`db::Builder`](crate::db::Builder).
///
/// Relations name their target (and join) models by name. Names are resolved
/// when the `Db` is built, so models may be registered in any order.
///
/// ```
/// use cascade::{CascadeConfig, ModelDef, RelationOptions};
///
/// let book = ModelDef::new("Book")
///     .has_many("chapters", "Chapter", "book_id")
///     .cascade(
///         CascadeConfig::new()
///             .relation_with("chapters", RelationOptions::new().fail_on_err(true)),
///     );
/// # let _ = book;
/// ```
#[derive(Debug)]
pub struct ModelDef {
    pub(crate) name: String,
    pub(crate) primary_key: String,
    pub(crate) relations: Vec<RelationDef>,
    pub(crate) cascade: Option<CascadeConfig>,
    pub(crate) hook: HookPoint,
    pub(crate) methods: Methods,
}

/// A relation declaration with its models still referenced by name.
#[derive(Debug, Clone)]
pub(crate) enum RelationDef {
    HasOne {
        name: String,
        target: String,
        key_to: String,
    },
    HasMany {
        name: String,
        target: String,
        key_to: String,
    },
    HasManyThrough {
        name: String,
        target: String,
        through: String,
        key_to: String,
        key_through: String,
    },
}

impl ModelDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: "id".to_string(),
            relations: vec![],
            cascade: None,
            hook: HookPoint::default(),
            methods: Methods::default(),
        }
    }

    /// Sets the primary key field. Defaults to `id`.
    pub fn primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = field.into();
        self
    }

    /// Declares a has-one relation: one `target` record whose `key_to` field
    /// holds this model's primary key.
    pub fn has_one(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        key_to: impl Into<String>,
    ) -> Self {
        self.relations.push(RelationDef::HasOne {
            name: name.into(),
            target: target.into(),
            key_to: key_to.into(),
        });
        self
    }

    /// Declares a has-many relation: every `target` record whose `key_to`
    /// field holds this model's primary key.
    pub fn has_many(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        key_to: impl Into<String>,
    ) -> Self {
        self.relations.push(RelationDef::HasMany {
            name: name.into(),
            target: target.into(),
            key_to: key_to.into(),
        });
        self
    }

    /// Declares a has-many-through relation. Rows of the `through` model link
    /// the two sides: `key_to` holds this model's primary key and
    /// `key_through` the target's.
    pub fn has_many_through(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        through: impl Into<String>,
        key_to: impl Into<String>,
        key_through: impl Into<String>,
    ) -> Self {
        self.relations.push(RelationDef::HasManyThrough {
            name: name.into(),
            target: target.into(),
            through: through.into(),
            key_to: key_to.into(),
            key_through: key_through.into(),
        });
        self
    }

    /// Attaches the cascade configuration. A model has at most one; calling
    /// this again replaces it.
    pub fn cascade(mut self, config: CascadeConfig) -> Self {
        self.cascade = Some(config);
        self
    }

    pub fn cascade_on(mut self, hook: HookPoint) -> Self {
        self.hook = hook;
        self
    }

    /// Registers a setter that cascade options can name with `setter`.
    pub fn setter(mut self, name: impl Into<String>, setter: impl Setter) -> Self {
        self.methods.register_setter(name, setter);
        self
    }

    /// Registers a callback that cascade options can name with
    /// `afterDeleteCallback`.
    pub fn after_delete(mut self, name: impl Into<String>, callback: impl AfterDelete) -> Self {
        self.methods.register_after_delete(name, callback);
        self
    }
}

impl RelationDef {
    pub(crate) fn name(&self) -> &str {
        match self {
            RelationDef::HasOne { name, .. }
            | RelationDef::HasMany { name, .. }
            | RelationDef::HasManyThrough { name, .. } => name,
        }
    }
}
