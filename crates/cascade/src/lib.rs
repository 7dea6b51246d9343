//! Delete-time relation cascades.
//!
//! A model declares which of its relations to cascade with a
//! [`CascadeConfig`]. When a record of that model is deleted through a
//! [`Db`], the engine removes the related records of every configured
//! relation concurrently, either before or after the parent row itself is
//! removed (see [`HookPoint`]).

pub mod db;
pub use db::Db;

// Re-exported so drivers and tests only need this crate.
pub use cascade_core::driver;

mod engine;
pub use engine::{
    resolve, AfterDelete, AfterDeleteCx, Cascade, CascadeConfig, CascadeOutcome, DeleteInfo,
    Methods, RawRelationConfig, RelationDescriptor, RelationOptions, RelationOutcome,
    RelationStatus, Setter, SetterCx, StrategyKind,
};

pub mod hook;
pub use hook::{DeleteContext, HookPoint};

mod instance;
pub use instance::Instance;

pub mod relation;
pub use relation::Association;

pub mod schema;
pub use schema::ModelDef;

pub use cascade_core::{
    async_trait, bail,
    err,
    schema::app::{ModelId, Relation, RelationKind},
    stmt::{self, Filter, Record, Value},
    Error, Result,
};
