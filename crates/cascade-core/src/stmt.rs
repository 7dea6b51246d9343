mod filter;
pub use filter::Filter;

mod record;
pub use record::Record;

mod value;
pub use value::Value;
