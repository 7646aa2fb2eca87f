use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Wraps an angle into `(-π, π]`.
///
/// The upper bound is inclusive so that π and -π, which describe the same
/// direction, both map onto π and heading comparisons stay single-valued.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    PI - (PI - angle).rem_euclid(TAU)
}

/// Unit vector pointing along `angle`.
#[inline]
pub fn unit_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Smallest signed rotation taking heading `from` onto heading `to`, in
/// `(-π, π]`.
#[inline]
pub fn angle_diff(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f32::consts::PI;

    use super::{angle_diff, unit_vec, wrap_angle};

    macro_rules! assert_eqf32 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-5_f32)
        };
    }

    #[rstest]
    #[case(0., 0.)]
    #[case(PI, PI)]
    #[case(-PI, PI)]
    #[case(3. * PI, PI)]
    #[case(-3. * PI, PI)]
    #[case(2.5 * PI, 0.5 * PI)]
    #[case(-0.5 * PI, -0.5 * PI)]
    fn wrap_angle_maps_into_half_open_interval(#[case] raw: f32, #[case] expected: f32) {
        assert_eqf32!(wrap_angle(raw), expected);
    }

    #[test]
    fn wrap_angle_is_rotation_preserving() {
        // wrapping never changes the direction the angle points at
        for i in -20..=20 {
            let raw = i as f32 * 0.77;
            let wrapped = wrap_angle(raw);
            assert!(wrapped > -PI && wrapped <= PI);
            assert_eqf32!(raw.cos(), wrapped.cos());
            assert_eqf32!(raw.sin(), wrapped.sin());
        }
    }

    #[test]
    fn angle_diff_takes_shortest_path() {
        // crossing the ±π seam must not produce a near-2π turn
        let diff = angle_diff(0.9 * PI, -0.9 * PI);
        assert_eqf32!(diff, 0.2 * PI);

        let diff = angle_diff(-0.9 * PI, 0.9 * PI);
        assert_eqf32!(diff, -0.2 * PI);
    }

    #[test]
    fn unit_vec_has_unit_length() {
        assert_eqf32!(unit_vec(1.234).length(), 1.);
        assert_eqf32!(unit_vec(0.).x, 1.);
        assert_eqf32!(unit_vec(0.5 * PI).y, 1.);
    }
}
