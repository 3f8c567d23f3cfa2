use lunar_cycle::engine::{MoonEngine, parse_calendar_date};
use lunar_cycle::export::{json, table};

#[test]
fn range_csv_reads_back_one_row_per_day() {
    let engine = MoonEngine::default();
    let start = parse_calendar_date("2024-01-01").unwrap();
    let end = parse_calendar_date("2024-01-07").unwrap();
    let observations = engine.compute_range(start, end).unwrap();

    let dates: Vec<String> = observations.iter().map(|o| o.date.to_string()).collect();
    let rises: Vec<String> = observations
        .iter()
        .map(|o| o.rise_set.rise.to_string())
        .collect();
    let sets: Vec<String> = observations
        .iter()
        .map(|o| o.rise_set.set.to_string())
        .collect();
    let next_dates: Vec<String> = observations
        .iter()
        .map(|o| o.next_phase.date.to_string())
        .collect();
    let rows: Vec<table::DayRow<'_>> = observations
        .iter()
        .enumerate()
        .map(|(i, o)| table::DayRow {
            date: &dates[i],
            phase_name: o.phase_name.label(),
            phase_fraction: o.phase_fraction,
            illumination_fraction: o.illumination_fraction,
            age_days: o.age_days,
            distance_km: o.distance_km,
            rise: &rises[i],
            set: &sets[i],
            next_phase: o.next_phase.phase_name.label(),
            next_phase_date: &next_dates[i],
        })
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("range/week.csv");
    table::write_rows_to_path(&path, &rows).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "date");
    assert_eq!(&headers[1], "phase_name");
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 7);
    for (record, obs) in records.iter().zip(&observations) {
        assert_eq!(&record[0], obs.date.to_string());
        assert_eq!(&record[1], obs.phase_name.label());
        let fraction: f64 = record[2].parse().unwrap();
        assert!((fraction - obs.phase_fraction).abs() < 1e-6);
        assert_eq!(record[5].parse::<i64>().unwrap(), obs.distance_km);
    }
}

#[test]
fn arc_json_lists_labels() {
    let engine = MoonEngine::default();
    let arc = engine
        .generate_date_arc(parse_calendar_date("2024-03-15").unwrap(), 30, 2)
        .unwrap();
    let mut buffer = Vec::new();
    json::write_pretty(&mut buffer, &arc).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(value["interval"], 30);
    let labels: Vec<&str> = value["dates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["14/2", "15/3", "14/4"]);
}
