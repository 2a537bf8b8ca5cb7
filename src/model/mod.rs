//! Pure data structures shared by the resolver, the contact flow and the deck builder.

pub mod advisory;
pub mod catalog;
pub mod contact;

pub use advisory::*;
pub use catalog::*;
pub use contact::*;
