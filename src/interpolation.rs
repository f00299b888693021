use metfor::{HectoPascal, Quantity};
use std::ops::Sub;

/// Interpolate linearly to `x_val` between the points (x1, y1) and (x2, y2).
#[inline]
pub(crate) fn linear_interp<X, Y>(x_val: X, x1: X, x2: X, y1: Y, y2: Y) -> Y
where
    X: Sub<X> + Copy + std::fmt::Debug + std::cmp::PartialEq,
    <X as Sub<X>>::Output: Quantity,
    Y: Quantity + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    debug_assert_ne!(x1, x2);

    let run = (x2 - x1).unpack();
    let rise = (y2 - y1).unpack();
    let dx = (x_val - x1).unpack();

    Y::pack(y1.unpack() + dx * (rise / run))
}

/// Interpolate linearly in the logarithm of pressure, the usual vertical coordinate of a Skew-T.
#[inline]
pub(crate) fn log_p_interp<Y>(
    tgt_p: HectoPascal,
    p1: HectoPascal,
    p2: HectoPascal,
    y1: Y,
    y2: Y,
) -> Y
where
    Y: Quantity + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    debug_assert_ne!(p1, p2);

    let run = p2.unpack().ln() - p1.unpack().ln();
    let rise = (y2 - y1).unpack();
    let dx = tgt_p.unpack().ln() - p1.unpack().ln();

    Y::pack(y1.unpack() + dx * (rise / run))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utility::test_tools::*;
    use metfor::{Celsius, CelsiusDiff};

    #[test]
    fn test_linear_interp() {
        let p = linear_interp(
            CelsiusDiff(0.0),
            CelsiusDiff(-2.0),
            CelsiusDiff(2.0),
            HectoPascal(900.0),
            HectoPascal(800.0),
        );
        assert!(approx_equal(p.unpack(), 850.0, 1.0e-9));
    }

    #[test]
    fn test_log_p_interp() {
        let t = log_p_interp(
            HectoPascal(1000.0),
            HectoPascal(1000.0),
            HectoPascal(500.0),
            Celsius(20.0),
            Celsius(-10.0),
        );
        assert!(approx_equal(t.unpack(), 20.0, 1.0e-9));

        // Halfway in ln(p) is the geometric mean of the pressures.
        let t = log_p_interp(
            HectoPascal((1000.0f64 * 500.0).sqrt()),
            HectoPascal(1000.0),
            HectoPascal(500.0),
            Celsius(20.0),
            Celsius(-10.0),
        );
        assert!(approx_equal(t.unpack(), 5.0, 1.0e-9));
    }
}
