//! Vector subscripting
//!
//! `x[...]`, `x[[...]]` and their assignment forms run in three stages:
//!
//! 1. each raw subscript is normalized against one axis of the container
//!    into a canonical [`Position`],
//! 2. the positions are validated together against the container's shape,
//!    producing a [`Selection`] with per-axis profiles,
//! 3. the selection is executed, gathering or scattering elements and
//!    carrying `names`, `dim` and `dimnames` along.
//!
//! A [`CallSite`] caches the executor specialized for each container and
//! subscript shape it encounters.

mod cache;
mod check;
mod extract;
mod mode;
mod normalize;
mod operand;
mod position;
mod replace;

pub use cache::{CachePolicy, CacheStats, CallSite, Specialization, DEFAULT_POLYMORPHIC_LIMIT};
pub use check::{check, dimensions_error};
pub use mode::{flag, Access, Mode, Operator};
pub use normalize::{normalize_all, Normalizer};
pub use operand::{ContainerClass, IndexOperand, OperandClass};
pub use position::{Position, PositionProfile, Selection};
