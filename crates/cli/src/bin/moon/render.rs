use std::io::{self, Write};

use lunar_cycle::engine::{DateArc, GeoCoordinate, Navigation, PhaseObservation};
use lunar_cycle::export::table::DayRow;

pub fn observation(
    out: &mut dyn Write,
    observation: &PhaseObservation,
    observer: Option<&GeoCoordinate>,
) -> io::Result<()> {
    writeln!(out, "=== Moon on {} ===", observation.date)?;
    writeln!(
        out,
        "Phase          : {} ({:.4})",
        observation.phase_name, observation.phase_fraction
    )?;
    writeln!(
        out,
        "Illumination   : {:.1}%",
        observation.illumination_fraction * 100.0
    )?;
    writeln!(out, "Age            : {:.2} days", observation.age_days)?;
    writeln!(out, "Distance       : {} km", observation.distance_km)?;
    match observer {
        Some(at) => writeln!(
            out,
            "Rise / set     : {} / {} UTC at ({:.3}, {:.3})",
            observation.rise_set.rise, observation.rise_set.set, at.latitude_deg, at.longitude_deg
        )?,
        None => writeln!(
            out,
            "Rise / set     : {} / {} (approximate)",
            observation.rise_set.rise, observation.rise_set.set
        )?,
    }
    if observation.rise_set.always_up {
        writeln!(out, "                 moon stays above the horizon all day")?;
    } else if observation.rise_set.always_down {
        writeln!(out, "                 moon stays below the horizon all day")?;
    }
    let next = &observation.next_phase;
    writeln!(
        out,
        "Next phase     : {} on {} (in {})",
        next.phase_name, next.date, next.duration
    )
}

pub fn range(out: &mut dyn Write, observations: &[PhaseObservation]) -> io::Result<()> {
    writeln!(
        out,
        "{:<10}  {:<15}  {:>6}  {:>6}  {:>6}  {:>9}",
        "date", "phase", "frac", "illum", "age", "km"
    )?;
    for o in observations {
        writeln!(
            out,
            "{:<10}  {:<15}  {:>6.4}  {:>5.1}%  {:>6.2}  {:>9}",
            o.date.to_string(),
            o.phase_name.label(),
            o.phase_fraction,
            o.illumination_fraction * 100.0,
            o.age_days,
            o.distance_km
        )?;
    }
    Ok(())
}

pub fn navigation(
    out: &mut dyn Write,
    navigation: &Navigation,
    observer: Option<&GeoCoordinate>,
) -> io::Result<()> {
    writeln!(
        out,
        "{} turned {}° ({}) -> {:+} days -> {}",
        navigation.base,
        navigation.angle_degrees,
        navigation.speed,
        navigation.day_offset,
        navigation.date
    )?;
    observation(out, &navigation.observation, observer)
}

pub fn arc(out: &mut dyn Write, arc: &DateArc) -> io::Result<()> {
    writeln!(out, "{}", arc.labels().join("  "))
}

/// Owned string fields for one CSV row.
pub struct DayRowStrings<'a> {
    observation: &'a PhaseObservation,
    date: String,
    rise: String,
    set: String,
    next_phase_date: String,
}

impl<'a> DayRowStrings<'a> {
    pub fn collect(observations: &'a [PhaseObservation]) -> Vec<Self> {
        observations
            .iter()
            .map(|observation| Self {
                observation,
                date: observation.date.to_string(),
                rise: observation.rise_set.rise.to_string(),
                set: observation.rise_set.set.to_string(),
                next_phase_date: observation.next_phase.date.to_string(),
            })
            .collect()
    }

    pub fn as_row(&self) -> DayRow<'_> {
        DayRow {
            date: &self.date,
            phase_name: self.observation.phase_name.label(),
            phase_fraction: self.observation.phase_fraction,
            illumination_fraction: self.observation.illumination_fraction,
            age_days: self.observation.age_days,
            distance_km: self.observation.distance_km,
            rise: &self.rise,
            set: &self.set,
            next_phase: self.observation.next_phase.phase_name.label(),
            next_phase_date: &self.next_phase_date,
        }
    }
}
