// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor-plan editor import
//!
//! The editor stores one canvas document per floor under `myFloor1`,
//! `myFloor2`, ... next to a `currentFloors` count. Each document carries an
//! `objects` array of drawn lines. Only the wall fields are read here; all
//! other drawing attributes are ignored.
//!
//! This is the single place where editor pixels become meters and where raw
//! material tags become [`Material`] values.

use crate::error::{Error, Result};
use crate::types::{Footprint, Material, Point2D, WallSegment};
use crate::units::PlanUnits;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key holding the number of floors in an editor export.
pub const FLOOR_COUNT_KEY: &str = "currentFloors";

/// Key of the document for a 1-based floor.
pub fn floor_key(floor: u32) -> String {
    format!("myFloor{}", floor)
}

/// One drawn wall as stored by the editor (pixel units)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallRecord {
    /// Canvas object type; non-line objects are skipped
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub x1: f64,
    #[serde(default)]
    pub y1: f64,
    #[serde(default)]
    pub x2: f64,
    #[serde(default)]
    pub y2: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub floor_number: Option<u32>,
    #[serde(default)]
    pub material: Option<String>,
}

impl WallRecord {
    /// Whether the canvas object is a drawn line.
    pub fn is_line(&self) -> bool {
        self.kind
            .as_deref()
            .map_or(true, |kind| kind.eq_ignore_ascii_case("line"))
    }

    /// Convert to a [`WallSegment`] in meters.
    ///
    /// `document_floor` is used when the record has no `floorNumber`.
    pub fn to_segment(&self, document_floor: u32, units: &PlanUnits) -> Result<WallSegment> {
        let material = match self.material.as_deref() {
            Some(tag) => {
                let material = Material::from_tag(tag);
                if material == Material::Unknown && !tag.eq_ignore_ascii_case("unknown") {
                    tracing::warn!(tag, floor = document_floor, "unrecognized wall material, no loss applied");
                }
                material
            }
            None => {
                tracing::warn!(floor = document_floor, "wall record without material, no loss applied");
                Material::Unknown
            }
        };

        let start = Point2D::new(units.to_meters(self.x1), units.to_meters(self.y1));
        let end = Point2D::new(units.to_meters(self.x2), units.to_meters(self.y2));
        let bounds = Footprint::new(
            units.to_meters(self.left),
            units.to_meters(self.top),
            units.to_meters(self.width.abs()),
            units.to_meters(self.height.abs()),
        );

        WallSegment::with_bounds(
            start,
            end,
            bounds,
            self.floor_number.unwrap_or(document_floor),
            material,
        )
    }
}

/// A single floor's canvas document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FloorDocument {
    #[serde(default)]
    pub objects: Vec<WallRecord>,
}

impl FloorDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a stored value that is either an object or a string holding JSON.
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Self::from_json(text),
            Value::Object(_) => Ok(serde_json::from_value(value.clone())?),
            other => Err(Error::InvalidStore(format!(
                "floor document must be an object or a JSON string, got {}",
                other
            ))),
        }
    }
}

/// Every floor document of an editor export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorStore {
    /// Number of floors as declared by the editor
    pub floor_count: u32,
    /// Documents for floors `1..=floor_count`, in order
    pub floors: Vec<FloorDocument>,
}

impl EditorStore {
    /// Parse an exported key/value store.
    pub fn from_json(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        let entries = root
            .as_object()
            .ok_or_else(|| Error::InvalidStore("export must be a JSON object".into()))?;

        let floor_count = match entries.get(FLOOR_COUNT_KEY) {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| Error::InvalidFloorCount(n.to_string()))?,
            Some(Value::String(s)) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::InvalidFloorCount(s.clone()))?,
            Some(other) => return Err(Error::InvalidFloorCount(other.to_string())),
            None => return Err(Error::InvalidFloorCount(format!("missing `{}`", FLOOR_COUNT_KEY))),
        };

        let mut floors = Vec::with_capacity(floor_count as usize);
        for floor in 1..=floor_count {
            let value = match entries.get(&floor_key(floor)) {
                Some(Value::Null) | None => return Err(Error::MissingFloor(floor)),
                Some(value) => value,
            };
            floors.push(FloorDocument::from_value(value)?);
        }

        Ok(Self {
            floor_count,
            floors,
        })
    }

    /// Convert every stored wall to meters.
    ///
    /// Records that cannot become a wall (floor 0, non-line objects) are
    /// skipped with a warning and counted; they never abort the import.
    pub fn into_plan(&self, units: &PlanUnits) -> BuildingPlan {
        let mut segments = Vec::new();
        let mut skipped_records = 0;

        for (index, document) in self.floors.iter().enumerate() {
            let document_floor = index as u32 + 1;
            for record in &document.objects {
                if !record.is_line() {
                    skipped_records += 1;
                    continue;
                }
                match record.to_segment(document_floor, units) {
                    Ok(segment) => segments.push(segment),
                    Err(e) => {
                        tracing::warn!(floor = document_floor, error = %e, "skipping wall record");
                        skipped_records += 1;
                    }
                }
            }
        }

        BuildingPlan {
            floor_count: self.floor_count,
            segments,
            skipped_records,
        }
    }
}

/// Normalized building input consumed by the coverage engine
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BuildingPlan {
    /// Number of sample layers (floors) in the building
    pub floor_count: u32,
    /// All walls of all floors, in meters
    pub segments: Vec<WallSegment>,
    /// Editor records that could not be converted
    #[serde(default)]
    pub skipped_records: usize,
}

impl BuildingPlan {
    pub fn new(floor_count: u32, segments: Vec<WallSegment>) -> Self {
        Self {
            floor_count,
            segments,
            skipped_records: 0,
        }
    }

    /// Parse an editor export and convert it in one step.
    pub fn from_editor_json(json: &str, units: &PlanUnits) -> Result<Self> {
        Ok(EditorStore::from_json(json)?.into_plan(units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FLOOR_ONE: &str = r#"{
        "version": "1.4.0",
        "objects": [
            {"type": "line", "x1": 0, "y1": 0, "x2": 500, "y2": 0,
             "left": 0, "top": 0, "width": 500, "height": 0,
             "stroke": "black", "floorNumber": 1, "material": "concrete"},
            {"type": "line", "x1": 100, "y1": 300, "x2": 300, "y2": 100,
             "left": 100, "top": 100, "width": 200, "height": 200,
             "floorNumber": 1, "material": "plaster"}
        ]
    }"#;

    #[test]
    fn test_record_to_segment_converts_to_meters() {
        let document = FloorDocument::from_json(FLOOR_ONE).unwrap();
        let units = PlanUnits::default();

        let wall = document.objects[0].to_segment(1, &units).unwrap();
        assert_eq!(wall.floor, 1);
        assert_eq!(wall.material, Material::Concrete);
        assert_relative_eq!(wall.end.x, 10.0);
        assert_relative_eq!(wall.bounds.width, 10.0);
        assert_relative_eq!(wall.bounds.height, 0.0);

        let diagonal = document.objects[1].to_segment(1, &units).unwrap();
        assert_eq!(diagonal.material, Material::Unknown);
        assert!(diagonal.is_backward_diagonal());
        assert_relative_eq!(diagonal.bounds.left, 2.0);
        assert_relative_eq!(diagonal.bounds.top, 2.0);
    }

    #[test]
    fn test_record_without_floor_uses_document_floor() {
        let record: WallRecord = serde_json::from_str(
            r#"{"x1": 0, "y1": 0, "x2": 50, "y2": 0, "left": 0, "top": 0, "width": 50, "height": 0, "material": "wood"}"#,
        )
        .unwrap();
        let wall = record.to_segment(3, &PlanUnits::default()).unwrap();
        assert_eq!(wall.floor, 3);
        assert_eq!(wall.material, Material::Wood);
    }

    #[test]
    fn test_store_with_string_documents() {
        let json = serde_json::json!({
            "currentFloors": "2",
            "myFloor1": FLOOR_ONE,
            "myFloor2": {
                "objects": [
                    {"x1": 0, "y1": 0, "x2": 0, "y2": 250, "left": 0, "top": 0,
                     "width": 0, "height": 250, "floorNumber": 2, "material": "glass"}
                ]
            },
            "unrelated": 42
        })
        .to_string();

        let store = EditorStore::from_json(&json).unwrap();
        assert_eq!(store.floor_count, 2);
        assert_eq!(store.floors.len(), 2);

        let plan = store.into_plan(&PlanUnits::default());
        assert_eq!(plan.floor_count, 2);
        assert_eq!(plan.segments.len(), 3);
        assert_eq!(plan.skipped_records, 0);
        assert_eq!(plan.segments[2].floor, 2);
        assert_eq!(plan.segments[2].material, Material::Glass);
        assert_relative_eq!(plan.segments[2].bounds.height, 5.0);
    }

    #[test]
    fn test_store_missing_floor() {
        let json = r#"{"currentFloors": 2, "myFloor1": {"objects": []}}"#;
        assert!(matches!(EditorStore::from_json(json), Err(Error::MissingFloor(2))));
    }

    #[test]
    fn test_store_bad_floor_count() {
        assert!(matches!(
            EditorStore::from_json(r#"{"currentFloors": "two"}"#),
            Err(Error::InvalidFloorCount(_))
        ));
        assert!(matches!(
            EditorStore::from_json(r#"{"myFloor1": {}}"#),
            Err(Error::InvalidFloorCount(_))
        ));
        assert!(matches!(
            EditorStore::from_json("[1, 2]"),
            Err(Error::InvalidStore(_))
        ));
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let json = r#"{
            "currentFloors": 1,
            "myFloor1": {"objects": [
                {"type": "text", "left": 10, "top": 10},
                {"x1": 0, "y1": 0, "x2": 50, "y2": 0, "left": 0, "top": 0,
                 "width": 50, "height": 0, "floorNumber": 0, "material": "wood"},
                {"x1": 0, "y1": 0, "x2": 50, "y2": 0, "left": 0, "top": 0,
                 "width": 50, "height": 0, "floorNumber": 1, "material": "wood"}
            ]}
        }"#;

        let plan = BuildingPlan::from_editor_json(json, &PlanUnits::default()).unwrap();
        assert_eq!(plan.segments.len(), 1);
        assert_eq!(plan.skipped_records, 2);
    }

    #[test]
    fn test_empty_store() {
        let plan =
            BuildingPlan::from_editor_json(r#"{"currentFloors": 0}"#, &PlanUnits::default())
                .unwrap();
        assert_eq!(plan.floor_count, 0);
        assert!(plan.segments.is_empty());
    }
}
