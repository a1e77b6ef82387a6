use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

use super::DropTarget;

/// How `hit_test` picks a winner when several zones contain the pointer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TieBreak {
    /// Earliest registration wins.
    FirstRegistered,
    /// Smallest area wins; equal areas fall back to registration order.
    SmallestArea,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::FirstRegistered
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DropZone {
    pub field_id: DropTarget,
    pub rect: Rect,
}

/// Screen rectangles of every editable field, keyed by field id.
///
/// Entries keep their first registration slot when overwritten, so iteration
/// order is stable while a field is re-measured during scrolling.
#[derive(Debug, Clone, Default)]
pub struct DropZoneRegistry {
    zones: Vec<DropZone>,
    tie_break: TieBreak,
}

impl DropZoneRegistry {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            zones: Vec::new(),
            tie_break,
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn set_tie_break(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
    }

    /// Inserts or overwrites the rect for `field_id`.
    pub fn register(&mut self, field_id: DropTarget, rect: Rect) {
        match self.zones.iter_mut().find(|zone| zone.field_id == field_id) {
            Some(zone) => zone.rect = rect,
            None => self.zones.push(DropZone { field_id, rect }),
        }
    }

    pub fn get(&self, field_id: DropTarget) -> Option<Rect> {
        self.zones
            .iter()
            .find(|zone| zone.field_id == field_id)
            .map(|zone| zone.rect)
    }

    /// Snapshot in registration order.
    pub fn lookup_all(&self) -> Vec<DropZone> {
        self.zones.clone()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn hit_test(&self, point: Point) -> Option<DropTarget> {
        let mut hits = self.zones.iter().filter(|zone| zone.rect.contains(point));

        match self.tie_break {
            TieBreak::FirstRegistered => hits.next().map(|zone| zone.field_id),
            TieBreak::SmallestArea => {
                let mut best: Option<&DropZone> = None;
                for zone in hits {
                    // strict comparison keeps the earlier zone on equal area
                    if best.map_or(true, |current| zone.rect.area() < current.rect.area()) {
                        best = Some(zone);
                    }
                }
                best.map(|zone| zone.field_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::ContactField;

    fn email() -> DropTarget {
        DropTarget::Field(ContactField::Email)
    }

    fn phone() -> DropTarget {
        DropTarget::Field(ContactField::Phone)
    }

    #[test]
    fn register_overwrites_in_place() {
        let mut registry = DropZoneRegistry::default();
        registry.register(email(), Rect::new(0.0, 0.0, 10.0, 10.0));
        registry.register(phone(), Rect::new(0.0, 20.0, 10.0, 10.0));
        registry.register(email(), Rect::new(0.0, 40.0, 10.0, 10.0));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(email()), Some(Rect::new(0.0, 40.0, 10.0, 10.0)));

        let order: Vec<DropTarget> = registry.lookup_all().iter().map(|z| z.field_id).collect();
        assert_eq!(order, vec![email(), phone()]);
    }

    #[test]
    fn miss_returns_none() {
        let mut registry = DropZoneRegistry::default();
        registry.register(email(), Rect::new(0.0, 0.0, 10.0, 10.0));

        assert_eq!(registry.hit_test(Point::new(50.0, 50.0)), None);
        assert_eq!(DropZoneRegistry::default().hit_test(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn unmeasured_zone_is_skipped() {
        let mut registry = DropZoneRegistry::default();
        registry.register(email(), Rect::default());
        registry.register(phone(), Rect::new(0.0, 0.0, 10.0, 10.0));

        assert_eq!(registry.hit_test(Point::new(0.0, 0.0)), Some(phone()));
    }

    #[test]
    fn overlap_resolves_to_first_registered_by_default() {
        let mut registry = DropZoneRegistry::default();
        registry.register(email(), Rect::new(0.0, 0.0, 100.0, 100.0));
        registry.register(phone(), Rect::new(10.0, 10.0, 20.0, 20.0));

        assert_eq!(registry.hit_test(Point::new(15.0, 15.0)), Some(email()));
    }

    #[test]
    fn overlap_resolves_to_smallest_area_when_configured() {
        let mut registry = DropZoneRegistry::new(TieBreak::SmallestArea);
        registry.register(email(), Rect::new(0.0, 0.0, 100.0, 100.0));
        registry.register(phone(), Rect::new(10.0, 10.0, 20.0, 20.0));

        assert_eq!(registry.hit_test(Point::new(15.0, 15.0)), Some(phone()));
        assert_eq!(registry.hit_test(Point::new(90.0, 90.0)), Some(email()));
    }

    #[test]
    fn equal_areas_fall_back_to_registration_order() {
        let mut registry = DropZoneRegistry::new(TieBreak::SmallestArea);
        registry.register(phone(), Rect::new(0.0, 0.0, 10.0, 10.0));
        registry.register(email(), Rect::new(5.0, 5.0, 10.0, 10.0));

        assert_eq!(registry.hit_test(Point::new(7.0, 7.0)), Some(phone()));
    }
}
