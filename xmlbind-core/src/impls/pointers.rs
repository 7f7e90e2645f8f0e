use crate::{Bind, Def, Peek, PointerBind, Poke, Shape};

impl<T> Bind for Option<T>
where
    T: Bind + Default,
{
    fn shape() -> Shape {
        Shape::new(
            format!("Option<{}>", T::shape().type_name),
            Def::Pointer(T::shape),
        )
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Pointer(self.as_ref().map(|value| value as &dyn Bind))
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Pointer(self)
    }
}

impl<T> PointerBind for Option<T>
where
    T: Bind + Default,
{
    fn pointee_shape(&self) -> Shape {
        T::shape()
    }

    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn get_or_allocate(&mut self) -> Poke<'_> {
        self.get_or_insert_with(T::default).poke()
    }
}

impl<T> Bind for Box<T>
where
    T: Bind,
{
    fn shape() -> Shape {
        Shape::new(format!("Box<{}>", T::shape().type_name), Def::Pointer(T::shape))
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Pointer(Some(&**self as &dyn Bind))
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Pointer(self)
    }
}

impl<T> PointerBind for Box<T>
where
    T: Bind,
{
    fn pointee_shape(&self) -> Shape {
        T::shape()
    }

    fn is_null(&self) -> bool {
        false
    }

    fn get_or_allocate(&mut self) -> Poke<'_> {
        (**self).poke()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_zero_some_never_is() {
        assert!(None::<u32>.peek().is_zero());
        assert!(!Some(0_u32).peek().is_zero());
        assert!(!Box::new(0_u32).peek().is_zero());
    }

    #[test]
    fn get_or_insert_allocates_once() {
        let mut slot: Option<String> = None;
        assert!(slot.is_null());
        if let Poke::Scalar(crate::ScalarMut::String(value)) = slot.get_or_allocate() {
            value.push_str("hi");
        }
        if let Poke::Scalar(crate::ScalarMut::String(value)) = slot.get_or_allocate() {
            value.push('!');
        }
        assert_eq!(slot.as_deref(), Some("hi!"));
    }

    #[test]
    fn pointer_shape_derefs_to_pointee() {
        let shape = Option::<i64>::shape();
        assert!(shape.is_pointer());
        assert_eq!(shape.type_name, "Option<i64>");
        assert_eq!(shape.deref_once().type_name, "i64");
        assert_eq!(Box::<bool>::shape().deref_once().type_name, "bool");
    }
}
