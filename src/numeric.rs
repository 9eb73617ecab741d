//! Small conversions shared by the analytics code.

const U32_SPAN: f64 = 4_294_967_296.0;

/// Converts a count to `f64`; see [`counter_to_f64`].
pub(crate) fn count_to_f64(count: usize) -> f64 {
    counter_to_f64(u64::try_from(count).unwrap_or(u64::MAX))
}

/// Converts a 64-bit counter to the nearest `f64`.
///
/// Values up to 2^53 convert exactly.
#[expect(
    clippy::float_arithmetic,
    reason = "recombines the two 32-bit halves of the counter"
)]
pub(crate) fn counter_to_f64(count: u64) -> f64 {
    let high = u32::try_from(count >> 32).unwrap_or(u32::MAX);
    let low = u32::try_from(count & u64::from(u32::MAX)).unwrap_or(u32::MAX);
    f64::from(high).mul_add(U32_SPAN, f64::from(low))
}

/// Arithmetic mean; zero for an empty sequence.
#[expect(
    clippy::float_arithmetic,
    reason = "averages are inherently floating-point"
)]
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count_to_f64(count)
    }
}

/// Ratio of two counters; zero when the denominator is zero.
#[expect(
    clippy::float_arithmetic,
    reason = "rates are inherently floating-point"
)]
pub(crate) fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        counter_to_f64(numerator) / counter_to_f64(denominator)
    }
}
