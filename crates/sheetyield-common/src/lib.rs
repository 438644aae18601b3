pub mod key;
pub mod kind;
pub mod value;

pub use key::Key;
pub use kind::{Cardinality, Kind};
pub use value::{Record, Scalar, Value};
