//! Column vocabulary of the NHM state-level birth-control releases.
//!
//! Recent releases renamed several columns, so more than one raw header maps
//! to the same statistical variable.

/// Raw header -> statistical variable identifier
pub const COLS_TO_NODES: &[(&str, &str)] = &[
    ("State", "State"),
    ("isoCode", "isoCode"),
    ("Date", "Date"),
    (
        "Number of Vasectomies Conducted (Public + Pvt.)",
        "Count_BirthControlEvent_Vasectomy",
    ),
    (
        "Number of Vasectomies Conducted",
        "Count_BirthControlEvent_Vasectomy",
    ),
    (
        "Number of Tubectomies Conducted (Public + Pvt.)",
        "Count_BirthControlEvent_Tubectomy",
    ),
    (
        "Number of Tubectomies Conducted",
        "Count_BirthControlEvent_Tubectomy",
    ),
    (
        "Total Sterilisation Conducted",
        "Count_BirthControlEvent_Sterilisation",
    ),
    (
        "% Male Sterlisation (Vasectomies) to Total sterilisation",
        "Count_BirthControlEvent_Vasectomy_AsFractionOf_Count_BirthControlEvent_Sterlization",
    ),
    (
        "Total cases of deaths following Sterlisation ( Male + Female)",
        "Count_Death_BirthControlSterilisation",
    ),
    (
        "Total IUCD Insertions done(public+private)",
        "Count_BirthControlEvent_IUCDInsertion",
    ),
    (
        "Total Interval IUCD Insertions done",
        "Count_BirthControlEvent_IUCDInsertion",
    ),
    (
        "% IUCD insertions in public plus private institutions to all family planning methods ( IUCD plus permanent)",
        "Count_BirthControlEvent_IUCDInsertion_AsFractionOf_Count_BirthControlEvent",
    ),
    (
        "% IUCD insertions to all family planning methods ( IUCD plus permanent)",
        "Count_BirthControlEvent_IUCDInsertion_AsFractionOf_Count_BirthControlEvent",
    ),
    (
        "Oral Pills distributed",
        "Count_ContraceptiveDistribution_OralPill",
    ),
    (
        "Combined Oral Pills distributed",
        "Count_ContraceptiveDistribution_OralPill",
    ),
    (
        "Condom pieces distributed",
        "Count_ContraceptiveDistribution_Condom",
    ),
];

/// Raw header -> human-readable label
pub const CLEAN_NAMES: &[(&str, &str)] = &[
    ("State", "State"),
    ("isoCode", "isoCode"),
    ("Date", "Date"),
    (
        "Number of Vasectomies Conducted (Public + Pvt.)",
        "Number of Vasectomies Conducted",
    ),
    (
        "Number of Vasectomies Conducted",
        "Number of Vasectomies Conducted",
    ),
    (
        "Number of Tubectomies Conducted (Public + Pvt.)",
        "Number of Tubectomies Conducted",
    ),
    (
        "Number of Tubectomies Conducted",
        "Number of Tubectomies Conducted",
    ),
    (
        "Total Sterilisation Conducted",
        "Total Sterilisation Conducted",
    ),
    (
        "% Male Sterlisation (Vasectomies) to Total sterilisation",
        "Percent of Male Sterlisation (Vasectomies) to Total sterilisation",
    ),
    (
        "Total cases of deaths following Sterlisation ( Male + Female)",
        "Total cases of deaths following Sterilisation (Male and Female)",
    ),
    (
        "Total IUCD Insertions done(public+private)",
        "Total IUCD Insertions done",
    ),
    (
        "Total Interval IUCD Insertions done",
        "Total IUCD Insertions done",
    ),
    (
        "% IUCD insertions in public plus private institutions to all family planning methods ( IUCD plus permanent)",
        "Percent of IUCD insertions to all family planning methods",
    ),
    (
        "% IUCD insertions to all family planning methods ( IUCD plus permanent)",
        "Percent of IUCD insertions to all family planning methods",
    ),
    (
        "Oral Pills distributed",
        "Number of distributed contraceptives (oral pills)",
    ),
    (
        "Combined Oral Pills distributed",
        "Number of distributed contraceptives (oral pills)",
    ),
    (
        "Condom pieces distributed",
        "Number of distributed contraceptives (condoms)",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_clean_names_cover_every_mapped_column() {
        let labelled: HashSet<&str> = CLEAN_NAMES.iter().map(|(raw, _)| *raw).collect();
        for (raw, _) in COLS_TO_NODES {
            assert!(labelled.contains(raw), "no clean label for '{}'", raw);
        }
    }

    #[test]
    fn test_raw_headers_are_unique() {
        let mut seen = HashSet::new();
        for (raw, _) in COLS_TO_NODES {
            assert!(seen.insert(*raw), "duplicate raw header '{}'", raw);
        }
    }
}
