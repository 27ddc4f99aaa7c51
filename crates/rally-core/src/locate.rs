//! The locate query: which risers are on a floor, and which are nearest
//! above and below it.

use serde::{Deserialize, Serialize};

use crate::{Building, Riser};

/// A nearby riser tagged with how many floors away it starts or ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiserProximity {
    pub riser: Riser,
    pub distance: i32,
}

/// Result of one locate query. Recomputed whenever the floor or the riser
/// snapshot changes; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocateResult {
    pub on_current_floor: Vec<Riser>,
    pub above: Option<RiserProximity>,
    pub below: Option<RiserProximity>,
}

/// Find the risers on `current_floor`, the nearest riser strictly above it
/// (smallest min floor greater than the current floor) and the nearest
/// strictly below it (largest max floor less than the current floor).
///
/// Pure query over the snapshot. Risers whose coverage spec parses to nothing
/// cannot contribute and are skipped without error. `on_current_floor` keeps
/// input order; when several risers are equally near above or below, the
/// first in input order wins — a single result, never a list of ties.
pub fn locate(risers: &[Riser], current_floor: i32) -> LocateResult {
    let mut result = LocateResult::default();
    for riser in risers {
        let floors = riser.floor_set();
        let (Some(&min), Some(&max)) = (floors.first(), floors.last()) else {
            continue;
        };
        if floors.contains(&current_floor) {
            result.on_current_floor.push(riser.clone());
        }
        if min > current_floor {
            let distance = min - current_floor;
            if result.above.as_ref().map_or(true, |a| distance < a.distance) {
                result.above = Some(RiserProximity {
                    riser: riser.clone(),
                    distance,
                });
            }
        }
        if max < current_floor {
            let distance = current_floor - max;
            if result.below.as_ref().map_or(true, |b| distance < b.distance) {
                result.below = Some(RiserProximity {
                    riser: riser.clone(),
                    distance,
                });
            }
        }
    }
    result
}

/// The risers covering a specific floor of a building, in input order.
pub fn find_risers_on_floor(building: &Building, floor_number: i32) -> Vec<Riser> {
    building
        .risers
        .iter()
        .filter(|r| r.covers(floor_number))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floors::parse_floors;

    fn riser(id: i64, number: &str, floors_covered: &str) -> Riser {
        Riser {
            id,
            number: number.to_string(),
            floors_covered: floors_covered.to_string(),
            location_description: String::new(),
        }
    }

    fn building(risers: Vec<Riser>) -> Building {
        serde_json::from_str::<Building>(r#"{"id": 1, "name": "Test Building 1"}"#)
            .map(|mut b| {
                b.risers = risers;
                b
            })
            .unwrap()
    }

    #[test]
    fn gap_floor_finds_both_neighbors() {
        let risers = vec![riser(1, "A", "1-10"), riser(2, "B", "12-20")];
        let info = locate(&risers, 11);
        assert!(info.on_current_floor.is_empty());
        let above = info.above.unwrap();
        assert_eq!(above.riser.id, 2);
        assert_eq!(above.distance, 1);
        let below = info.below.unwrap();
        assert_eq!(below.riser.id, 1);
        assert_eq!(below.distance, 1);
    }

    #[test]
    fn shared_floor_lists_all_with_no_neighbors() {
        let risers = vec![riser(1, "East", "24"), riser(2, "West", "24")];
        let info = locate(&risers, 24);
        assert_eq!(info.on_current_floor.len(), 2);
        assert_eq!(info.on_current_floor[0].number, "East");
        assert_eq!(info.on_current_floor[1].number, "West");
        assert!(info.above.is_none());
        assert!(info.below.is_none());
    }

    #[test]
    fn no_risers_at_all() {
        let info = locate(&[], 5);
        assert!(info.on_current_floor.is_empty());
        assert!(info.above.is_none());
        assert!(info.below.is_none());
    }

    #[test]
    fn every_riser_on_current_floor() {
        let risers = vec![riser(1, "A", "1-10"), riser(2, "B", "5-15")];
        let info = locate(&risers, 7);
        assert_eq!(info.on_current_floor.len(), 2);
        assert!(info.above.is_none());
        assert!(info.below.is_none());
    }

    #[test]
    fn topmost_floor_has_nothing_above() {
        let risers = vec![riser(1, "A", "1-10")];
        let info = locate(&risers, 10);
        assert!(info.above.is_none());
        assert_eq!(info.on_current_floor.len(), 1);
    }

    #[test]
    fn bottommost_floor_has_nothing_below() {
        let risers = vec![riser(1, "A", "1-10")];
        let info = locate(&risers, 1);
        assert!(info.below.is_none());
    }

    #[test]
    fn tie_break_keeps_first_in_input_order() {
        let risers = vec![
            riser(1, "A", "10-12"),
            riser(2, "B", "10-14"),
            riser(3, "C", "1-2"),
            riser(4, "D", "2"),
        ];
        let info = locate(&risers, 5);
        assert_eq!(info.above.unwrap().riser.id, 1);
        assert_eq!(info.below.unwrap().riser.id, 3);
    }

    #[test]
    fn negative_floors_are_ordinary_integers() {
        let risers = vec![riser(1, "Garage", "-3--1"), riser(2, "Tower", "2-8")];
        let info = locate(&risers, 0);
        assert!(info.on_current_floor.is_empty());
        let above = info.above.unwrap();
        assert_eq!(above.riser.id, 2);
        assert_eq!(above.distance, 2);
        let below = info.below.unwrap();
        assert_eq!(below.riser.id, 1);
        assert_eq!(below.distance, 1);
    }

    #[test]
    fn unparseable_riser_is_skipped_not_fatal() {
        let risers = vec![riser(1, "Bad", "penthouse"), riser(2, "A", "3-5")];
        let info = locate(&risers, 4);
        assert_eq!(info.on_current_floor.len(), 1);
        assert_eq!(info.on_current_floor[0].id, 2);
    }

    #[test]
    fn locate_is_idempotent() {
        let risers = vec![riser(1, "A", "1-10"), riser(2, "B", "12-20")];
        assert_eq!(locate(&risers, 11), locate(&risers, 11));
    }

    #[test]
    fn on_floor_matches_parsed_membership() {
        let b = building(vec![
            riser(1, "A", "1-3,7"),
            riser(2, "B", "-2-1"),
            riser(3, "C", "24"),
            riser(4, "D", ""),
        ]);
        for floor in -4..=26 {
            let on_floor = find_risers_on_floor(&b, floor);
            for r in &b.risers {
                let covered = parse_floors(&r.floors_covered).contains(&floor);
                assert_eq!(
                    covered,
                    on_floor.iter().any(|f| f.id == r.id),
                    "riser {} at floor {}",
                    r.id,
                    floor
                );
            }
        }
    }

    #[test]
    fn locate_result_serializes_camel_case() {
        let risers = vec![riser(1, "A", "1-10"), riser(2, "B", "12-20")];
        let json = serde_json::to_value(locate(&risers, 11)).unwrap();
        assert!(json.get("onCurrentFloor").is_some());
        assert!(json["above"]["riser"].get("floorsCovered").is_some());
        assert_eq!(json["above"]["distance"], 1);
    }
}
