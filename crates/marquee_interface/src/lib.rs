//! Trait definitions for the Marquee copy-assist library.
//!
//! The copy pipeline only talks to a completion provider through
//! [`CompletionDriver`], so production clients and test doubles are
//! interchangeable.

mod driver;

pub use driver::CompletionDriver;
