mod model_def;
pub use model_def::ModelDef;
pub(crate) use model_def::RelationDef;

pub use cascade_core::schema::{app, Schema};
