#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! Type descriptors and value views for xmlbind.
//!
//! A type opts into XML binding by implementing [`Bind`], usually through
//! `#[derive(Bind)]`. The trait exposes three things:
//!
//! - a [`Shape`]: what the type looks like (scalar, struct, list, pointer,
//!   dynamic), built on demand and never cached,
//! - a [`Peek`]: a read-only view of a value, used by the encoder,
//! - a [`Poke`]: a mutable view of a value, used by the decoder.
//!
//! Nothing here knows about XML text; the engine in the `xmlbind` crate walks
//! these views against a node tree.

mod bind;
pub use bind::*;

mod dynamic;
pub use dynamic::*;

mod name;
pub use name::*;

mod peek;
pub use peek::*;

mod poke;
pub use poke::*;

mod scalar;
pub use scalar::*;

mod shape;
pub use shape::*;

mod impls;
