//! Nav-point feed parsing.
//!
//! The feed is line oriented, one record per line:
//! `index:kind,category,y,x[,...,name,radius]`. `category` picks the slot
//! table, `index` the slot within it. Every numeric field parses
//! defensively to zero; a point left at the origin marks an unused slot.

use serde::{Deserialize, Serialize};

pub const WAYPOINT_SLOTS: usize = 24;
pub const MARK_SLOTS: usize = 5;
pub const THREAT_SLOTS: usize = 15;
pub const POSITION_POINT_SLOTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavPointKind {
    #[default]
    Waypoint,
    Mark,
    PreplannedThreat,
    PositionPoint,
}

impl NavPointKind {
    pub fn from_category(category: i64) -> Option<Self> {
        match category {
            0 => Some(NavPointKind::Waypoint),
            1 => Some(NavPointKind::Mark),
            2 => Some(NavPointKind::PreplannedThreat),
            3 => Some(NavPointKind::PositionPoint),
            _ => None,
        }
    }

    pub fn category(self) -> i64 {
        match self {
            NavPointKind::Waypoint => 0,
            NavPointKind::Mark => 1,
            NavPointKind::PreplannedThreat => 2,
            NavPointKind::PositionPoint => 3,
        }
    }

    pub fn capacity(self) -> usize {
        match self {
            NavPointKind::Waypoint => WAYPOINT_SLOTS,
            NavPointKind::Mark => MARK_SLOTS,
            NavPointKind::PreplannedThreat => THREAT_SLOTS,
            NavPointKind::PositionPoint => POSITION_POINT_SLOTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavPoint {
    pub kind: NavPointKind,
    pub tag: String,
    pub x_feet: f64,
    pub y_feet: f64,
    pub name: String,
    pub radius_feet: f64,
}

impl NavPoint {
    pub fn is_unused(&self) -> bool {
        self.x_feet == 0.0 && self.y_feet == 0.0
    }
}

fn parse_number(field: &str) -> f64 {
    parse_coordinate(field).unwrap_or(0.0)
}

fn parse_coordinate(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn parse_record(line: &str) -> Option<(usize, NavPoint)> {
    let (index, body) = line.split_once(':')?;
    let fields: Vec<&str> = body.split(',').map(str::trim).collect();
    if fields.len() < 4 {
        return None;
    }

    let kind = NavPointKind::from_category(parse_number(fields[1]) as i64)?;
    let slot = parse_number(index).max(0.0) as usize;

    // A bad coordinate leaves the whole slot unused rather than pinning it to an edge.
    let (Some(y_feet), Some(x_feet)) = (parse_coordinate(fields[2]), parse_coordinate(fields[3]))
    else {
        return Some((
            slot,
            NavPoint {
                kind,
                ..NavPoint::default()
            },
        ));
    };

    let (name, radius_feet) = match fields.len() {
        4 => (String::new(), 0.0),
        5 => (fields[4].to_string(), 0.0),
        len => (
            fields[len - 2].to_string(),
            parse_number(fields[len - 1]).max(0.0),
        ),
    };

    let point = NavPoint {
        kind,
        tag: fields[0].to_string(),
        y_feet,
        x_feet,
        name,
        radius_feet,
    };
    Some((slot, point))
}

/// Fixed-size slot tables, replaced wholesale on every feed update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavPointSet {
    waypoints: Vec<NavPoint>,
    marks: Vec<NavPoint>,
    threats: Vec<NavPoint>,
    position_points: Vec<NavPoint>,
}

impl Default for NavPointSet {
    fn default() -> Self {
        let table = |kind: NavPointKind| {
            vec![
                NavPoint {
                    kind,
                    ..NavPoint::default()
                };
                kind.capacity()
            ]
        };
        Self {
            waypoints: table(NavPointKind::Waypoint),
            marks: table(NavPointKind::Mark),
            threats: table(NavPointKind::PreplannedThreat),
            position_points: table(NavPointKind::PositionPoint),
        }
    }
}

impl NavPointSet {
    pub fn parse_feed(feed: &str) -> Self {
        let mut set = Self::default();
        for line in feed.lines().map(str::trim).filter(|line| !line.is_empty()) {
            match parse_record(line) {
                Some((index, point)) => {
                    let table = set.table_mut(point.kind);
                    if let Some(slot) = table.get_mut(index) {
                        *slot = point;
                    } else {
                        log::debug!("nav point slot {index} out of range: {line}");
                    }
                }
                None => log::debug!("skipping nav point record: {line}"),
            }
        }
        set
    }

    fn table_mut(&mut self, kind: NavPointKind) -> &mut Vec<NavPoint> {
        match kind {
            NavPointKind::Waypoint => &mut self.waypoints,
            NavPointKind::Mark => &mut self.marks,
            NavPointKind::PreplannedThreat => &mut self.threats,
            NavPointKind::PositionPoint => &mut self.position_points,
        }
    }

    pub fn slots(&self, kind: NavPointKind) -> &[NavPoint] {
        match kind {
            NavPointKind::Waypoint => &self.waypoints,
            NavPointKind::Mark => &self.marks,
            NavPointKind::PreplannedThreat => &self.threats,
            NavPointKind::PositionPoint => &self.position_points,
        }
    }

    pub fn used(&self, kind: NavPointKind) -> impl Iterator<Item = &NavPoint> {
        self.slots(kind).iter().filter(|point| !point.is_unused())
    }

    /// Waypoints in slot order up to the first unused slot.
    pub fn route(&self) -> impl Iterator<Item = &NavPoint> {
        self.waypoints.iter().take_while(|point| !point.is_unused())
    }

    pub fn is_empty(&self) -> bool {
        [
            NavPointKind::Waypoint,
            NavPointKind::Mark,
            NavPointKind::PreplannedThreat,
            NavPointKind::PositionPoint,
        ]
        .into_iter()
        .all(|kind| self.used(kind).next().is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "\
0:WP,0,1500000,1200000
1:WP,0,1510000,1230000
2:WP,0,oops,bad
3:WP,0,1530000,1260000
0:SA-6,2,1400000,1100000,,SA-6 Gainful,80000
1:AAA,2,1410000,1105000,ZSU,x
0:MK,1,1450000,1150000
";

    #[test]
    fn parses_each_category_into_its_table() {
        let set = NavPointSet::parse_feed(FEED);
        assert_eq!(set.used(NavPointKind::Waypoint).count(), 3);
        assert_eq!(set.used(NavPointKind::PreplannedThreat).count(), 2);
        assert_eq!(set.used(NavPointKind::Mark).count(), 1);

        let sam = &set.slots(NavPointKind::PreplannedThreat)[0];
        assert_eq!(sam.name, "SA-6 Gainful");
        assert_eq!(sam.radius_feet, 80_000.0);
        assert_eq!(sam.x_feet, 1_100_000.0);
        assert_eq!(sam.y_feet, 1_400_000.0);
    }

    #[test]
    fn malformed_numbers_become_unused_slots() {
        let set = NavPointSet::parse_feed(FEED);
        assert!(set.slots(NavPointKind::Waypoint)[2].is_unused());
        let aaa = &set.slots(NavPointKind::PreplannedThreat)[1];
        assert_eq!(aaa.name, "ZSU");
        assert_eq!(aaa.radius_feet, 0.0);
    }

    #[test]
    fn single_bad_coordinate_empties_the_slot() {
        let set = NavPointSet::parse_feed(
            "0:WP,0,1500000,1200000\n1:WP,0,oops,1230000\n2:WP,0,1520000,1240000",
        );
        let bad = &set.slots(NavPointKind::Waypoint)[1];
        assert!(bad.is_unused());
        assert_eq!(bad.kind, NavPointKind::Waypoint);
        assert_eq!(set.route().count(), 1);
        assert_eq!(set.used(NavPointKind::Waypoint).count(), 2);
    }

    #[test]
    fn five_field_threat_keeps_its_name() {
        let set = NavPointSet::parse_feed("0:SAM,2,900000,900000,SA-6");
        let sam = &set.slots(NavPointKind::PreplannedThreat)[0];
        assert_eq!(sam.name, "SA-6");
        assert_eq!(sam.radius_feet, 0.0);
        assert!(!sam.is_unused());
    }

    #[test]
    fn route_stops_at_first_unused_slot() {
        let set = NavPointSet::parse_feed(FEED);
        assert_eq!(set.route().count(), 2);
    }

    #[test]
    fn unknown_categories_and_out_of_range_slots_are_dropped() {
        let set = NavPointSet::parse_feed("0:X,9,1,1\n99:WP,0,5,5\ngarbage");
        assert!(set.is_empty());
    }
}
