//! Property-based invariant tests for colors and gradients.
//!
//! 1. Hex strings round-trip through `parse`.
//! 2. Interpolation hits both endpoints and stays between them per channel.
//! 3. Gradient sampling is clamped to the end colors.

use proptest::prelude::*;
use pullbox_core::animation::Interpolate;
use pullbox_core::geometry::Point;
use pullbox_style::{Gradient, Rgba};

fn color() -> impl Strategy<Value = Rgba> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(r, g, b, a)| Rgba::new(r, g, b, a))
}

fn between(x: u8, a: u8, b: u8) -> bool {
    x >= a.min(b) && x <= a.max(b)
}

proptest! {
    #[test]
    fn hex_round_trips(c in color()) {
        prop_assert_eq!(Rgba::parse(&c.to_hex_string()), Some(c));
    }

    #[test]
    fn interpolation_stays_between(a in color(), b in color(), t in 0.0f64..=1.0) {
        prop_assert_eq!(a.interpolate(&b, 0.0), a);
        prop_assert_eq!(a.interpolate(&b, 1.0), b);
        let m = a.interpolate(&b, t);
        prop_assert!(between(m.r, a.r, b.r));
        prop_assert!(between(m.g, a.g, b.g));
        prop_assert!(between(m.b, a.b, b.b));
        prop_assert!(between(m.a, a.a, b.a));
    }

    #[test]
    fn gradient_samples_are_clamped(from in color(), to in color(), t in -2.0f64..3.0) {
        let g = Gradient::radial(from, to);
        let c = g.color_at(t);
        if t <= 0.0 {
            prop_assert_eq!(c, from);
        }
        if t >= 1.0 {
            prop_assert_eq!(c, to);
        }
        let far = g.sample(Point::new(5.0, 5.0));
        prop_assert_eq!(far, to);
    }
}
