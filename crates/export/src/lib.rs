//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod json {
    use std::io::{self, Write};
    use std::path::Path;

    use serde::Serialize;

    /// Pretty-print any serializable engine value, newline-terminated.
    pub fn write_pretty<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, value)?;
        writeln!(writer)?;
        writer.flush()
    }

    /// Pretty-print to a path (`-` for stdout).
    pub fn write_pretty_to_path<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
        let mut writer = super::writer_for_path(path)?;
        write_pretty(&mut writer, value)
    }
}

pub mod table {
    use std::io::{self, Write};
    use std::path::Path;

    use serde::Serialize;

    /// CSV row for one day of a range query.
    #[derive(Debug, Clone, Serialize)]
    pub struct DayRow<'a> {
        pub date: &'a str,
        pub phase_name: &'a str,
        pub phase_fraction: f64,
        pub illumination_fraction: f64,
        pub age_days: f64,
        pub distance_km: i64,
        pub rise: &'a str,
        pub set: &'a str,
        pub next_phase: &'a str,
        pub next_phase_date: &'a str,
    }

    /// Write rows with a header line. Fractions and ages keep six decimals.
    pub fn write_rows(writer: &mut dyn Write, rows: &[DayRow<'_>]) -> io::Result<()> {
        let mut csv = csv::Writer::from_writer(&mut *writer);
        for row in rows {
            csv.serialize(RoundedRow::from(row)).map_err(io::Error::other)?;
        }
        csv.flush()
    }

    /// Write rows to a path (`-` for stdout).
    pub fn write_rows_to_path(path: &Path, rows: &[DayRow<'_>]) -> io::Result<()> {
        let mut writer = super::writer_for_path(path)?;
        write_rows(&mut writer, rows)
    }

    #[derive(Serialize)]
    struct RoundedRow<'a> {
        date: &'a str,
        phase_name: &'a str,
        phase_fraction: String,
        illumination_fraction: String,
        age_days: String,
        distance_km: i64,
        rise: &'a str,
        set: &'a str,
        next_phase: &'a str,
        next_phase_date: &'a str,
    }

    impl<'a> From<&DayRow<'a>> for RoundedRow<'a> {
        fn from(row: &DayRow<'a>) -> Self {
            Self {
                date: row.date,
                phase_name: row.phase_name,
                phase_fraction: format!("{:.6}", row.phase_fraction),
                illumination_fraction: format!("{:.6}", row.illumination_fraction),
                age_days: format!("{:.6}", row.age_days),
                distance_km: row.distance_km,
                rise: row.rise,
                set: row.set,
                next_phase: row.next_phase,
                next_phase_date: row.next_phase_date,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::table::{DayRow, write_rows};
    use super::*;

    fn row<'a>(date: &'a str) -> DayRow<'a> {
        DayRow {
            date,
            phase_name: "Full Moon",
            phase_fraction: 0.5,
            illumination_fraction: 1.0,
            age_days: 14.765_294_335,
            distance_km: 384_400,
            rise: "18:00",
            set: "06:00",
            next_phase: "Last Quarter",
            next_phase_date: "2024-01-03",
        }
    }

    #[test]
    fn csv_has_header_and_rounded_values() {
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &[row("2024-01-01"), row("2024-01-02")]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "date,phase_name,phase_fraction,illumination_fraction,age_days,distance_km,rise,set,next_phase,next_phase_date"
        );
        assert_eq!(
            lines[1],
            "2024-01-01,Full Moon,0.500000,1.000000,14.765294,384400,18:00,06:00,Last Quarter,2024-01-03"
        );
    }

    #[test]
    fn json_is_written_to_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/arc.json");
        json::write_pretty_to_path(&path, &vec!["1/1", "8/1"]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec!["1/1", "8/1"]);
        assert!(text.ends_with('\n'));
    }
}
