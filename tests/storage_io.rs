use std::fs;
use tmon_rs::models::{MapPoint, Series};
use tmon_rs::storage;

fn points() -> Vec<MapPoint> {
    vec![
        MapPoint {
            name: "Brazil".into(),
            value: 5.0,
        },
        MapPoint {
            name: "Chile".into(),
            value: -1.25,
        },
    ]
}

#[test]
fn save_map_points_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("map.csv");
    storage::save_map_points_csv(&points(), &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("name,value"));
    assert_eq!(csv_txt.lines().count(), 1 + points().len());
    assert!(csv_txt.contains("Chile,-1.25"));

    let json_path = dir.path().join("map.json");
    storage::save_map_points_json(&points(), &json_path).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v[0]["name"], "Brazil");
    assert_eq!(v[0]["value"], 5.0);
}

#[test]
fn save_series_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let series = Series {
        years: vec!["2023".into(), "2024".into()],
        values: vec![0.0, 2.0],
    };

    let csv_path = dir.path().join("series.csv");
    storage::save_series_csv(&series, &csv_path).unwrap();
    let lines: Vec<String> = fs::read_to_string(&csv_path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(lines, vec!["year,value", "2023,0.0", "2024,2.0"]);

    let json_path = dir.path().join("series.json");
    storage::save_series_json(&series, &json_path).unwrap();
    let back: Series = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(back, series);
}

// Country names come from an external file; a name like "=HYPERLINK(...)" must not
// turn into a live formula when the CSV is opened in a spreadsheet.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inject.csv");
    let pts = vec![
        MapPoint {
            name: "=HYPERLINK(\"http://evil\")".into(),
            value: 1.0,
        },
        MapPoint {
            name: "@foo".into(),
            value: 2.0,
        },
    ];
    storage::save_map_points_csv(&pts, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let names: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert_eq!(names[0], "'=HYPERLINK(\"http://evil\")");
    assert_eq!(names[1], "'@foo");
}
