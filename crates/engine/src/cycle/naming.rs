//! The eight named phases and the fixed partition of the synodic month.

use std::fmt;

use serde::{Serialize, Serializer};

/// Canonical phase names in cyclic order, starting at new moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

/// Upper bounds (exclusive) of each band below the waning crescent.
const PHASE_BANDS: [(f64, PhaseName); 7] = [
    (0.033, PhaseName::NewMoon),
    (0.216, PhaseName::WaxingCrescent),
    (0.283, PhaseName::FirstQuarter),
    (0.466, PhaseName::WaxingGibbous),
    (0.533, PhaseName::FullMoon),
    (0.716, PhaseName::WaningGibbous),
    (0.783, PhaseName::LastQuarter),
];

/// Waning crescent includes this bound; anything above wraps back to new moon.
const WANING_CRESCENT_END: f64 = 0.967;

impl PhaseName {
    /// All phases in cyclic order.
    pub const ALL: [PhaseName; 8] = [
        PhaseName::NewMoon,
        PhaseName::WaxingCrescent,
        PhaseName::FirstQuarter,
        PhaseName::WaxingGibbous,
        PhaseName::FullMoon,
        PhaseName::WaningGibbous,
        PhaseName::LastQuarter,
        PhaseName::WaningCrescent,
    ];

    /// Name the phase at a position in the synodic month.
    pub fn from_fraction(phase_fraction: f64) -> Self {
        PHASE_BANDS
            .iter()
            .find(|(upper, _)| phase_fraction < *upper)
            .map(|(_, name)| *name)
            .unwrap_or(if phase_fraction <= WANING_CRESCENT_END {
                PhaseName::WaningCrescent
            } else {
                PhaseName::NewMoon
            })
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// New, first quarter, full and last quarter.
    pub fn is_major(self) -> bool {
        matches!(
            self,
            Self::NewMoon | Self::FirstQuarter | Self::FullMoon | Self::LastQuarter
        )
    }

    /// Cyclic successor; waning crescent is followed by new moon.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cyclic predecessor; new moon is preceded by waning crescent.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PhaseName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_lower_inclusive() {
        let cases = [
            (0.0, PhaseName::NewMoon),
            (0.0329, PhaseName::NewMoon),
            (0.033, PhaseName::WaxingCrescent),
            (0.216, PhaseName::FirstQuarter),
            (0.25, PhaseName::FirstQuarter),
            (0.283, PhaseName::WaxingGibbous),
            (0.30, PhaseName::WaxingGibbous),
            (0.466, PhaseName::FullMoon),
            (0.50, PhaseName::FullMoon),
            (0.533, PhaseName::WaningGibbous),
            (0.716, PhaseName::LastQuarter),
            (0.783, PhaseName::WaningCrescent),
            (0.967, PhaseName::WaningCrescent),
            (0.9671, PhaseName::NewMoon),
            (0.999_999, PhaseName::NewMoon),
        ];
        for (fraction, expected) in cases {
            assert_eq!(PhaseName::from_fraction(fraction), expected, "fraction {fraction}");
        }
    }

    #[test]
    fn cyclic_order_wraps() {
        assert_eq!(PhaseName::WaningCrescent.next(), PhaseName::NewMoon);
        assert_eq!(PhaseName::NewMoon.previous(), PhaseName::WaningCrescent);
        for name in PhaseName::ALL {
            assert_eq!(name.next().previous(), name);
        }
    }

    #[test]
    fn exactly_four_major_phases() {
        let majors: Vec<_> = PhaseName::ALL.into_iter().filter(|n| n.is_major()).collect();
        assert_eq!(
            majors,
            vec![
                PhaseName::NewMoon,
                PhaseName::FirstQuarter,
                PhaseName::FullMoon,
                PhaseName::LastQuarter
            ]
        );
    }

    #[test]
    fn serialises_as_label() {
        assert_eq!(PhaseName::WaxingGibbous.to_string(), "Waxing Gibbous");
        let json = serde_json::to_string(&PhaseName::LastQuarter).unwrap();
        assert_eq!(json, "\"Last Quarter\"");
    }
}
