//! healthplex-core
//!
//! Shared vocabulary of the intake forms: flat field values, the typed form
//! schema, the field collector, and field validation. No network or
//! storage dependency.

pub mod choices;
pub mod collect;
pub mod error;
pub mod family;
pub mod field;
pub mod form_type;
pub mod ordered;
pub mod schema;
pub mod state;
pub mod validate;

pub use error::CoreError;
pub use field::{FieldValue, FlatFormData};
pub use form_type::FormType;
pub use ordered::OrderedMap;
