use rand::Rng;
use tacmapcore::math::units::FEET_PER_NAUTICAL_MILE;
use tacmapcore::navpoints::NavPointKind;

const ROUTE_LEG_NM: f64 = 20.0;

/// One nav-point feed record: `index:tag,category,y,x` plus `,,name,radius`
/// for threats.
pub fn nav_record(
    index: usize,
    tag: &str,
    kind: NavPointKind,
    x_feet: f64,
    y_feet: f64,
    threat: Option<(&str, f64)>,
) -> String {
    let mut record = format!(
        "{index}:{tag},{},{:.0},{:.0}",
        kind.category(),
        y_feet,
        x_feet
    );
    if let Some((name, radius_feet)) = threat {
        record.push_str(&format!(",,{name},{radius_feet:.0}"));
    }
    record
}

/// A straight route ahead of `origin`, threats scattered around it and a
/// single mark on the first leg.
pub fn synthetic_feed<R: Rng>(
    rng: &mut R,
    origin: (f64, f64),
    heading_deg: f64,
    waypoints: usize,
    threats: usize,
) -> String {
    let (sin, cos) = heading_deg.to_radians().sin_cos();
    let leg = ROUTE_LEG_NM * FEET_PER_NAUTICAL_MILE;
    let mut records = Vec::new();

    for index in 0..waypoints.min(NavPointKind::Waypoint.capacity()) {
        let along = leg * (index + 1) as f64;
        let drift = rng.gen_range(-0.2..0.2) * leg;
        records.push(nav_record(
            index,
            &format!("WP{}", index + 1),
            NavPointKind::Waypoint,
            origin.0 + sin * along + cos * drift,
            origin.1 + cos * along - sin * drift,
            None,
        ));
    }

    for index in 0..threats.min(NavPointKind::PreplannedThreat.capacity()) {
        let bearing = rng.gen_range(0.0..360.0_f64).to_radians();
        let range = rng.gen_range(15.0..60.0) * FEET_PER_NAUTICAL_MILE;
        let radius = rng.gen_range(5.0..25.0) * FEET_PER_NAUTICAL_MILE;
        let name = format!("SA-{}", rng.gen_range(2..20));
        records.push(nav_record(
            index,
            &name,
            NavPointKind::PreplannedThreat,
            origin.0 + bearing.sin() * range,
            origin.1 + bearing.cos() * range,
            Some((&name, radius)),
        ));
    }

    records.push(nav_record(
        0,
        "MK1",
        NavPointKind::Mark,
        origin.0 + sin * leg * 0.5,
        origin.1 + cos * leg * 0.5,
        None,
    ));
    records.join("\n")
}
