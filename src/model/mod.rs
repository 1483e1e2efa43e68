//! Pure data: the meat, its cooking states, and the roster it sits in.

pub mod item;
pub mod roster;

pub use item::*;
pub use roster::*;
