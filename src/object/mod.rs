mod core;
pub use core::*;

mod container;
pub use container::*;

mod cow;
pub use cow::*;

mod environment;
pub use environment::*;

mod scalar;
pub use scalar::*;

mod vector;
pub use vector::*;
