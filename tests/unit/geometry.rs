use super::*;

fn pair(r: RayAnchorDirection) -> ((f64, f64), (f64, f64)) {
    (
        (r.anchor.x, r.anchor.y),
        (r.direction.x, r.direction.y),
    )
}

#[test]
fn table_matches_for_all_origins() {
    let (w, h) = (1000.0, 800.0);
    let expected = [
        (RayOrigin::TopLeft, (0.0, -160.0), (0.0, 1.0)),
        (RayOrigin::TopRight, (1000.0, -160.0), (0.0, 1.0)),
        (RayOrigin::TopCenter, (500.0, -160.0), (0.0, 1.0)),
        (RayOrigin::TopCenterOffset, (700.0, -160.0), (-0.2, 1.0)),
        (RayOrigin::Left, (-200.0, 400.0), (1.0, 0.0)),
        (RayOrigin::Right, (1200.0, 400.0), (-1.0, 0.0)),
        (RayOrigin::BottomLeft, (0.0, 960.0), (0.0, -1.0)),
        (RayOrigin::BottomCenter, (500.0, 960.0), (0.0, -1.0)),
        (RayOrigin::BottomRight, (1000.0, 960.0), (0.0, -1.0)),
    ];
    for (origin, anchor, dir) in expected {
        let (a, d) = pair(resolve_anchor_and_direction(origin, w, h));
        assert!((a.0 - anchor.0).abs() < 1e-9, "{origin}: anchor {a:?}");
        assert!((a.1 - anchor.1).abs() < 1e-9, "{origin}: anchor {a:?}");
        assert_eq!(d, dir, "{origin}");
    }
}

#[test]
fn unknown_names_resolve_like_top_center() {
    let top_center = resolve_anchor_and_direction(RayOrigin::TopCenter, 1000.0, 800.0);
    for name in ["", "center", "TOP-LEFT", "top_left", "middle"] {
        assert_eq!(resolve_named(name, 1000.0, 800.0), top_center, "{name:?}");
    }
    assert_eq!(
        resolve_named("bottom-right", 1000.0, 800.0),
        resolve_anchor_and_direction(RayOrigin::BottomRight, 1000.0, 800.0)
    );
}

#[test]
fn degenerate_sizes_are_well_defined() {
    let r = resolve_anchor_and_direction(RayOrigin::TopCenter, 0.0, 0.0);
    assert_eq!(pair(r), ((0.0, 0.0), (0.0, 1.0)));

    for origin in RayOrigin::ALL {
        let r = resolve_anchor_and_direction(origin, -100.0, -100.0);
        assert!(r.anchor.x.is_finite() && r.anchor.y.is_finite(), "{origin}");
        let again = resolve_anchor_and_direction(origin, -100.0, -100.0);
        assert_eq!(r, again);
    }

    let r = resolve_anchor_and_direction(RayOrigin::Right, -100.0, -50.0);
    assert!((r.anchor.x + 120.0).abs() < 1e-9);
    assert!((r.anchor.y + 25.0).abs() < 1e-9);
    assert_eq!((r.direction.x, r.direction.y), (-1.0, 0.0));
}

#[test]
fn large_sizes_scale_linearly() {
    let r = resolve_anchor_and_direction(RayOrigin::TopCenter, 10_000.0, 10_000.0);
    assert_eq!(pair(r), ((5000.0, -2000.0), (0.0, 1.0)));
}

#[test]
fn names_round_trip_and_strict_parse_rejects_unknown() {
    for origin in RayOrigin::ALL {
        assert_eq!(origin.name().parse::<RayOrigin>().unwrap(), origin);
        assert_eq!(origin.to_string(), origin.name());
    }
    assert!("sideways".parse::<RayOrigin>().is_err());
    assert_eq!(RayOrigin::from_name_or_default("sideways"), RayOrigin::TopCenter);
}

#[test]
fn serde_uses_kebab_names_and_tolerates_unknown() {
    let o: RayOrigin = serde_json::from_str("\"top-center-offset\"").unwrap();
    assert_eq!(o, RayOrigin::TopCenterOffset);
    let o: RayOrigin = serde_json::from_str("\"nowhere\"").unwrap();
    assert_eq!(o, RayOrigin::TopCenter);
    assert_eq!(
        serde_json::to_string(&RayOrigin::BottomLeft).unwrap(),
        "\"bottom-left\""
    );
}
