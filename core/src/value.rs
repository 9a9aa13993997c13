/*!
The [`Value`] type.

Timers collect parameters from many places (description parameters, count providers, literal long-running parameters) and hold onto them until the operation finishes, so values are always owned. They're backed by [`value_bag`], which preserves the primitive type of numbers and booleans for sinks that care about it, and captures anything else through its `Display` or `Debug` implementation.
*/

use core::fmt;

use value_bag::{OwnedValueBag, ValueBag};

/**
An owned, type-erased parameter value.
*/
#[derive(Clone)]
pub struct Value(OwnedValueBag);

impl Value {
    /**
    Capture a value using its `Display` implementation.
    */
    pub fn capture_display(value: &impl fmt::Display) -> Self {
        Value(ValueBag::from_display(value).to_owned())
    }

    /**
    Capture a value using its `Debug` implementation.
    */
    pub fn capture_debug(value: &impl fmt::Debug) -> Self {
        Value(ValueBag::from_debug(value).to_owned())
    }

    pub fn by_ref<'v>(&'v self) -> ValueBag<'v> {
        self.0.by_ref()
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.0.by_ref().to_i64()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.0.by_ref().to_u64()
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.0.by_ref().to_f64()
    }

    pub fn to_bool(&self) -> Option<bool> {
        self.0.by_ref().to_bool()
    }

    pub fn to_borrowed_str(&self) -> Option<&str> {
        self.0.by_ref().to_borrowed_str()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0.by_ref(), f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.by_ref(), f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.by_ref().serialize(serializer)
    }
}

impl<'a> From<&'a Value> for Value {
    fn from(value: &'a Value) -> Self {
        value.clone()
    }
}

impl<'a> From<&'a str> for Value {
    fn from(value: &'a str) -> Self {
        Value(ValueBag::from(value).to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::from(value.as_str())
    }
}

impl<'a> From<&'a String> for Value {
    fn from(value: &'a String) -> Self {
        Value::from(value.as_str())
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value(ValueBag::from(value).to_owned())
                }
            }
        )*
    };
}

impl_from_primitive!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64, bool, char);
