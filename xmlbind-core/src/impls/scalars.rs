use crate::{Bind, Peek, Poke, ScalarMut, ScalarRef, ScalarType, Shape};

macro_rules! impl_bind_for_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Bind for $ty {
                fn shape() -> Shape {
                    Shape::scalar(ScalarType::$variant)
                }

                fn peek(&self) -> Peek<'_> {
                    Peek::Scalar(ScalarRef::$variant(*self))
                }

                fn poke(&mut self) -> Poke<'_> {
                    Poke::Scalar(ScalarMut::$variant(self))
                }
            }
        )*
    };
}

impl_bind_for_scalar! {
    bool => Bool,
    char => Char,
    f32 => F32,
    f64 => F64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => USize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => ISize,
}

impl Bind for String {
    fn shape() -> Shape {
        Shape::scalar(ScalarType::String)
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(ScalarRef::String(self))
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Scalar(ScalarMut::String(self))
    }
}
