//! Canonical "unset" values for mergeable field types.
//!
//! A field whose value equals its type's sentinel is treated as absent when
//! layering sources. This cannot tell an intentional zero apart from a value
//! that was never authored: `0`, `false` and `""` always mean "not set".

/// A type that has a canonical "unset" value.
///
/// Only types implementing this trait can be registered as scalar fields,
/// so a field type without a sentinel is rejected when the field table is
/// compiled rather than when a merge runs.
pub trait Sentinel {
    /// The canonical unset value.
    fn sentinel() -> Self;

    /// Whether this value is the unset value.
    fn is_sentinel(&self) -> bool;
}

macro_rules! integer_sentinel {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sentinel for $t {
                fn sentinel() -> Self {
                    0
                }

                fn is_sentinel(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

integer_sentinel!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_sentinel {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sentinel for $t {
                fn sentinel() -> Self {
                    0.0
                }

                // -0.0 compares equal to 0.0; NaN is never the sentinel.
                fn is_sentinel(&self) -> bool {
                    *self == 0.0
                }
            }
        )*
    };
}

float_sentinel!(f32, f64);

impl Sentinel for bool {
    fn sentinel() -> Self {
        false
    }

    fn is_sentinel(&self) -> bool {
        !*self
    }
}

impl Sentinel for String {
    fn sentinel() -> Self {
        String::new()
    }

    fn is_sentinel(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Sentinel for Option<T> {
    fn sentinel() -> Self {
        None
    }

    fn is_sentinel(&self) -> bool {
        self.is_none()
    }
}

/// Implements [`Sentinel`] for fieldless enums whose `Default` variant is
/// the unset value.
#[macro_export]
macro_rules! default_sentinel {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::merge::Sentinel for $t {
                fn sentinel() -> Self {
                    <$t as ::std::default::Default>::default()
                }

                fn is_sentinel(&self) -> bool {
                    *self == <$t as ::std::default::Default>::default()
                }
            }
        )*
    };
}
