//! Property tests: per-quadrant region formulas and closed boundaries.

use hitcheck_core::{classify, validate, EvaluationRecord, OutputFormat, Point3};
use proptest::prelude::*;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_radius() -> impl Strategy<Value = f64> {
    0.0001f64..10.0
}

fn arb_coordinate() -> impl Strategy<Value = f64> {
    -5.0f64..=5.0
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn first_quadrant_is_the_rectangle(
        x in 0.0f64..=5.0,
        y in 0.0f64..=5.0,
        r in arb_radius(),
    ) {
        prop_assert_eq!(classify(x, y, r), x <= r / 2.0 && y <= r);
    }

    #[test]
    fn third_quadrant_is_the_quarter_circle(
        x in -5.0f64..=0.0,
        y in -5.0f64..=0.0,
        r in arb_radius(),
    ) {
        prop_assert_eq!(classify(x, y, r), x * x + y * y <= (r / 2.0) * (r / 2.0));
    }

    #[test]
    fn fourth_quadrant_is_the_triangle(
        x in 0.0f64..=5.0,
        y in -5.0f64..0.0,
        r in arb_radius(),
    ) {
        let expected = x <= r / 2.0 && y >= -r && x + y.abs() <= r / 2.0;
        prop_assert_eq!(classify(x, y, r), expected);
    }

    #[test]
    fn second_quadrant_is_empty(
        x in -5.0f64..-0.0001,
        y in 0.0001f64..=5.0,
        r in arb_radius(),
    ) {
        prop_assert!(!classify(x, y, r));
    }

    #[test]
    fn rectangle_edge_is_closed(r in arb_radius()) {
        prop_assert!(classify(r / 2.0, 0.0, r));
    }

    #[test]
    fn classification_is_deterministic(
        x in arb_coordinate(),
        y in arb_coordinate(),
        r in arb_radius(),
    ) {
        prop_assert_eq!(classify(x, y, r), Point3::new(x, y, r).classify());
        prop_assert_eq!(classify(x, y, r), classify(x, y, r));
    }

    #[test]
    fn validated_points_survive_formatting(
        x in arb_coordinate(),
        y in arb_coordinate(),
        r in arb_radius(),
    ) {
        let params: HashMap<String, String> = [
            ("x".to_string(), x.to_string()),
            ("y".to_string(), y.to_string()),
            ("r".to_string(), r.to_string()),
        ]
        .into_iter()
        .collect();

        let point = validate(&params).unwrap();
        prop_assert_eq!(point, Point3::new(x, y, r));
    }
}

#[test]
fn end_to_end_reference_points() {
    let hit = EvaluationRecord::evaluate(Point3::new(-0.5, -0.5, 2.0), "t");
    assert!(hit.hit);

    // (r/2)^2 = 1 and 1 + 1 = 2, outside the circle.
    let miss = EvaluationRecord::evaluate(Point3::new(-1.0, -1.0, 2.0), "t");
    assert!(!miss.hit);

    assert_eq!(OutputFormat::from_wants_structured(false), OutputFormat::Markup);
}
