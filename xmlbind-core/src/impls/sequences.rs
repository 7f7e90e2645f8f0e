use std::any::Any;

use crate::{Bind, Def, ListBind, Peek, Poke, Shape};

impl<T> Bind for Vec<T>
where
    T: Bind + Default + 'static,
{
    fn shape() -> Shape {
        Shape::new(format!("Vec<{}>", T::shape().type_name), Def::List(T::shape))
    }

    fn peek(&self) -> Peek<'_> {
        Peek::List(self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::List(self)
    }
}

impl<T> ListBind for Vec<T>
where
    T: Bind + Default + 'static,
{
    fn item_shape(&self) -> Shape {
        T::shape()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<Peek<'_>> {
        self.get(index).map(Bind::peek)
    }

    fn push_default(&mut self) -> Poke<'_> {
        self.push(T::default());
        let last = Vec::len(self) - 1;
        self[last].poke()
    }

    fn as_bytes(&self) -> Option<&[u8]> {
        (self as &dyn Any)
            .downcast_ref::<Vec<u8>>()
            .map(Vec::as_slice)
    }

    fn set_bytes(&mut self, bytes: &[u8]) -> bool {
        match (self as &mut dyn Any).downcast_mut::<Vec<u8>>() {
            Some(buf) => {
                buf.clear();
                buf.extend_from_slice(bytes);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScalarRef;

    #[test]
    fn push_default_appends_in_order() {
        let mut items: Vec<i32> = vec![1];
        match items.push_default() {
            Poke::Scalar(crate::ScalarMut::I32(slot)) => *slot = 5,
            other => panic!("unexpected view {other:?}"),
        }
        assert_eq!(items, [1, 5]);
    }

    #[test]
    fn byte_vectors_expose_bytes() {
        let mut bytes: Vec<u8> = b"abc".to_vec();
        assert_eq!(ListBind::as_bytes(&bytes), Some(&b"abc"[..]));
        assert!(bytes.set_bytes(b"xy"));
        assert_eq!(bytes, b"xy");

        let mut numbers: Vec<u16> = vec![1, 2];
        assert_eq!(ListBind::as_bytes(&numbers), None);
        assert!(!numbers.set_bytes(b"xy"));
        assert_eq!(numbers, [1, 2]);
    }

    #[test]
    fn items_are_viewable() {
        let items = vec![String::from("a"), String::from("b")];
        let list: &dyn ListBind = &items;
        assert_eq!(list.len(), 2);
        assert!(matches!(list.item(1), Some(Peek::Scalar(ScalarRef::String("b")))));
        assert!(list.item(2).is_none());
        assert!(Vec::<u8>::shape().is_bytes());
        assert_eq!(Vec::<String>::shape().type_name, "Vec<String>");
    }
}
