//! Arithmetic over sequences.

use num_traits::{Float, Num, NumCast, Signed};

use crate::duplicate::duplicate;
use crate::lifecycle::buffered;
use crate::operate::operate;
use crate::sequence::Sequence;
use crate::slice::skip;
use crate::transform::map;

/// Element-wise `a + b`.
pub fn add<T>(a: Sequence<T>, b: Sequence<T>) -> Sequence<T>
where
    T: Num + Send + 'static,
{
    operate(a, b, |x, y| x + y)
}

/// Element-wise `a - b`.
pub fn subtract<T>(a: Sequence<T>, b: Sequence<T>) -> Sequence<T>
where
    T: Num + Send + 'static,
{
    operate(a, b, |x, y| x - y)
}

/// Element-wise `a * b`.
pub fn multiply<T>(a: Sequence<T>, b: Sequence<T>) -> Sequence<T>
where
    T: Num + Send + 'static,
{
    operate(a, b, |x, y| x * y)
}

/// Element-wise `a / b`.
pub fn divide<T>(a: Sequence<T>, b: Sequence<T>) -> Sequence<T>
where
    T: Num + Send + 'static,
{
    operate(a, b, |x, y| x / y)
}

/// Add a constant to every value.
pub fn add_by<T>(input: Sequence<T>, n: T) -> Sequence<T>
where
    T: Num + Copy + Send + 'static,
{
    map(input, move |x| x + n)
}

/// Multiply every value by a constant.
pub fn multiply_by<T>(input: Sequence<T>, n: T) -> Sequence<T>
where
    T: Num + Copy + Send + 'static,
{
    map(input, move |x| x * n)
}

/// Divide every value by a constant.
pub fn divide_by<T>(input: Sequence<T>, n: T) -> Sequence<T>
where
    T: Num + Copy + Send + 'static,
{
    map(input, move |x| x / n)
}

pub fn abs<T>(input: Sequence<T>) -> Sequence<T>
where
    T: Signed + Send + 'static,
{
    map(input, |x| x.abs())
}

pub fn sqrt<T>(input: Sequence<T>) -> Sequence<T>
where
    T: Float + Send + 'static,
{
    map(input, |x| x.sqrt())
}

pub fn pow<T>(input: Sequence<T>, exponent: T) -> Sequence<T>
where
    T: Float + Send + 'static,
{
    map(input, move |x| x.powf(exponent))
}

/// -1, 0 or 1 depending on the sign of each value.
pub fn sign<T>(input: Sequence<T>) -> Sequence<T>
where
    T: Signed + PartialOrd + Send + 'static,
{
    map(input, |x| {
        if x > T::zero() {
            T::one()
        } else if x < T::zero() {
            -T::one()
        } else {
            T::zero()
        }
    })
}

/// Replace negative values with zero.
pub fn keep_positives<T>(input: Sequence<T>) -> Sequence<T>
where
    T: Num + PartialOrd + Send + 'static,
{
    map(input, |x| if x > T::zero() { x } else { T::zero() })
}

/// Replace positive values with zero.
pub fn keep_negatives<T>(input: Sequence<T>) -> Sequence<T>
where
    T: Num + PartialOrd + Send + 'static,
{
    map(input, |x| if x < T::zero() { x } else { T::zero() })
}

/// Difference between each value and the one `before` positions earlier.
///
/// The first `before` values have no predecessor and produce no output.
pub fn change<T>(input: Sequence<T>, before: usize) -> Sequence<T>
where
    T: Num + Clone + Send + 'static,
{
    let mut forks = duplicate(input, 2);
    let current = skip(forks.pop().unwrap_or_else(crate::sequence::closed), before);
    let previous = buffered(forks.pop().unwrap_or_else(crate::sequence::closed), before);
    subtract(current, previous)
}

/// [`change`] relative to the earlier value.
pub fn change_ratio<T>(input: Sequence<T>, before: usize) -> Sequence<T>
where
    T: Num + Clone + Send + 'static,
{
    let mut forks = duplicate(input, 2);
    let changes = change(forks.pop().unwrap_or_else(crate::sequence::closed), before);
    let previous = buffered(forks.pop().unwrap_or_else(crate::sequence::closed), before);
    divide(changes, previous)
}

/// [`change_ratio`] expressed in percent.
pub fn change_percent<T>(input: Sequence<T>, before: usize) -> Sequence<T>
where
    T: Num + NumCast + Copy + Send + 'static,
{
    let hundred = <T as NumCast>::from(100).unwrap_or_else(T::one);
    multiply_by(change_ratio(input, before), hundred)
}

/// Round every value to the given number of decimal digits.
pub fn round_digits<T>(input: Sequence<T>, digits: i32) -> Sequence<T>
where
    T: Float + Send + 'static,
{
    map(input, move |x| {
        let scale = <T as NumCast>::from(10.0_f64.powi(digits)).unwrap_or_else(T::one);
        (x * scale).round() / scale
    })
}

/// Number every value, counting up from `from`.
pub fn count<T>(from: usize, input: Sequence<T>) -> Sequence<usize>
where
    T: Send + 'static,
{
    let mut next = from;
    map(input, move |_| {
        let current = next;
        next += 1;
        current
    })
}
