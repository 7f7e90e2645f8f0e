use std::collections::{BTreeMap, HashMap};

use crate::{Bind, Def, Peek, Poke, Shape};

// Maps have no text or element representation. They still implement `Bind` so
// that structs containing them can derive it; the engine reports them as
// unsupported when it reaches one.

impl<K, V, S> Bind for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::new("HashMap", Def::Unsupported)
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Unsupported("HashMap")
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Unsupported("HashMap")
    }
}

impl<K, V> Bind for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::new("BTreeMap", Def::Unsupported)
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Unsupported("BTreeMap")
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Unsupported("BTreeMap")
    }
}
