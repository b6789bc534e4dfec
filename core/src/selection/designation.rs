use serde::{Deserialize, Serialize};

use crate::math::{bearing_and_distance_nm, BearingRange, Ellipse, Point, SelectionProjection};
use crate::sim::OwnshipState;

/// A user-placed target on the selection disc.
///
/// The world position is held relative to the bullseye, so the icon stays put
/// while ownship moves; bearing/range from ownship is refreshed every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDesignation {
    pub id: u64,
    pub dx_feet: f64,
    pub dy_feet: f64,
    pub screen: Point,
    pub clip: Ellipse,
    pub from_ownship: BearingRange,
}

impl TargetDesignation {
    pub fn refresh(&mut self, ownship: &OwnshipState) {
        self.from_ownship = bearing_and_distance_nm(
            self.dx_feet - ownship.bullseye_dx_feet,
            self.dy_feet - ownship.bullseye_dy_feet,
        );
    }

    pub fn reproject(&mut self, projection: &SelectionProjection) {
        self.screen = projection.bullseye_to_screen(self.dx_feet, self.dy_feet);
        self.clip = projection.disc();
    }
}

/// Designations, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignationList {
    items: Vec<TargetDesignation>,
    next_id: u64,
}

impl DesignationList {
    pub fn insert_front(
        &mut self,
        dx_feet: f64,
        dy_feet: f64,
        projection: &SelectionProjection,
        ownship: &OwnshipState,
    ) -> &TargetDesignation {
        self.next_id += 1;
        let mut designation = TargetDesignation {
            id: self.next_id,
            dx_feet,
            dy_feet,
            screen: Point::default(),
            clip: Ellipse::default(),
            from_ownship: BearingRange::default(),
        };
        designation.reproject(projection);
        designation.refresh(ownship);
        self.items.insert(0, designation);
        &self.items[0]
    }

    pub fn remove(&mut self, index: usize) -> Option<TargetDesignation> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    /// Nearest designation whose icon lies within `radius` pixels.
    pub fn hit_test(&self, point: Point, radius: f64) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (index, item.screen.distance_to(point)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub fn refresh(&mut self, ownship: &OwnshipState) {
        for item in &mut self.items {
            item.refresh(ownship);
        }
    }

    pub fn reproject(&mut self, projection: &SelectionProjection) {
        for item in &mut self.items {
            item.reproject(projection);
        }
    }

    pub fn latest(&self) -> Option<&TargetDesignation> {
        self.items.first()
    }

    pub fn get(&self, index: usize) -> Option<&TargetDesignation> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetDesignation> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn display_name(index: usize) -> String {
        format!("Target {:02}", index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::AspectRatios;
    use crate::math::units::FEET_PER_NAUTICAL_MILE;

    fn projection() -> SelectionProjection {
        SelectionProjection::new(AspectRatios::new(400.0, 400.0), 1.0)
    }

    #[test]
    fn newest_designation_is_first() {
        let mut list = DesignationList::default();
        let ownship = OwnshipState::default();
        list.insert_front(1000.0, 0.0, &projection(), &ownship);
        let id = list.insert_front(0.0, 1000.0, &projection(), &ownship).id;
        assert_eq!(list.latest().unwrap().id, id);
        assert_eq!(DesignationList::display_name(0), "Target 01");
    }

    #[test]
    fn refresh_tracks_ownship_motion() {
        let mut list = DesignationList::default();
        let north = 20.0 * FEET_PER_NAUTICAL_MILE;
        list.insert_front(0.0, north, &projection(), &OwnshipState::default());
        assert_eq!(list.latest().unwrap().from_ownship.distance_nm, 20.0);

        let moved = OwnshipState {
            bullseye_dx_feet: 0.0,
            bullseye_dy_feet: 30.0 * FEET_PER_NAUTICAL_MILE,
            ..Default::default()
        };
        let screen_before = list.latest().unwrap().screen;
        list.refresh(&moved);
        let target = list.latest().unwrap();
        assert_eq!(target.from_ownship.distance_nm, 10.0);
        assert!((target.from_ownship.bearing_deg - 180.0).abs() < 1e-9);
        assert_eq!(target.screen, screen_before);
    }

    #[test]
    fn hit_test_picks_nearest_within_radius() {
        let mut list = DesignationList::default();
        let ownship = OwnshipState::default();
        list.insert_front(0.0, 0.0, &projection(), &ownship);
        list.insert_front(30_000.0, 0.0, &projection(), &ownship);
        let center = projection().center();
        assert_eq!(list.hit_test(center.offset(1.0, 0.0), 8.0), Some(1));
        assert_eq!(list.hit_test(center.offset(0.0, 100.0), 8.0), None);
        assert!(list.remove(5).is_none());
        assert_eq!(list.clear(), 2);
    }
}
