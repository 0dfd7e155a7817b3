//! Element type widening for mixed-type convolution
//!
//! The convolution runs in the common numeric type of input and filter. Float
//! pairs widen to the wider float. An integer paired with a float widens to
//! the narrowest float that holds every value of the integer type exactly:
//! `u8` and `u16` fit in `f32`'s 24-bit mantissa, while `i32`, `u32` and `i64`
//! widen to `f64` even against an `f32` operand (`i64` only up to 2^53).
//! Integer-with-integer pairs have no implementation.

use scirs2_core::numeric::Float;

/// Common element type of `Self` and `Rhs`
///
/// # Examples
///
/// ```
/// use tenconv_kernels::Promote;
///
/// fn common<A: Promote<B>, B>() -> &'static str {
///     std::any::type_name::<<A as Promote<B>>::Output>()
/// }
///
/// assert_eq!(common::<f32, f64>(), "f64");
/// assert_eq!(common::<u8, f32>(), "f32");
/// assert_eq!(common::<i32, f32>(), "f64");
/// assert_eq!(common::<i64, f32>(), "f64");
/// ```
pub trait Promote<Rhs> {
    type Output: Float + 'static;
}

macro_rules! impl_promote {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {
        $(
            impl Promote<$rhs> for $lhs {
                type Output = $out;
            }
        )*
    };
}

impl_promote! {
    f32, f32 => f32;
    f64, f64 => f64;
    f32, f64 => f64;
    f64, f32 => f64;

    u8, f32 => f32;
    u16, f32 => f32;
    i32, f32 => f64;
    u32, f32 => f64;
    i64, f32 => f64;
    f32, u8 => f32;
    f32, u16 => f32;
    f32, i32 => f64;
    f32, u32 => f64;
    f32, i64 => f64;

    u8, f64 => f64;
    u16, f64 => f64;
    i32, f64 => f64;
    u32, f64 => f64;
    i64, f64 => f64;
    f64, u8 => f64;
    f64, u16 => f64;
    f64, i32 => f64;
    f64, u32 => f64;
    f64, i64 => f64;
}
