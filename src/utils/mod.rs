//! Commonly used utilities.

#[macro_use]
pub mod handle;
pub mod finally;

pub use self::finally::{finally, FinallyGuard};
