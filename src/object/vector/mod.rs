/// R Vectors module
///
/// Atomic vectors and lists as seen by the subscript engine: element storage
/// behind a copy-on-write cell plus the `names`, `dim` and `dimnames`
/// attributes.
///
pub mod coercion;
pub mod rep;
pub mod types;

mod core;
pub use core::*;
pub use rep::{Attributes, Rep};
