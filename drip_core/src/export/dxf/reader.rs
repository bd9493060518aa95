//! Reads generated DXF text back into entity records.
//!
//! Only the subset this crate writes is understood: a flat pair stream with
//! an ENTITIES section. Used to inspect exported drawings and to check that
//! what was written is what was meant.

use std::collections::BTreeMap;

use crate::errors::{DesignError, DesignResult};
use crate::layout::Point;

/// Split DXF text into `(group code, value)` pairs.
pub fn read_pairs(text: &str) -> DesignResult<Vec<(i32, String)>> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() % 2 != 0 {
        return Err(DesignError::malformed_dxf(
            lines.len(),
            "Odd number of lines: group code without value",
        ));
    }

    lines
        .chunks(2)
        .enumerate()
        .map(|(i, chunk)| -> DesignResult<(i32, String)> {
            let code = chunk[0].trim().parse::<i32>().map_err(|e| {
                DesignError::malformed_dxf(i * 2 + 1, format!("Bad group code '{}': {}", chunk[0], e))
            })?;
            Ok((code, chunk[1].to_string()))
        })
        .collect()
}

/// One entity from the ENTITIES section.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    /// Entity type (`LINE`, `INSERT`, ...)
    pub kind: String,
    pub layer: String,
    /// Remaining groups in file order
    pub codes: Vec<(i32, String)>,
}

impl EntityRecord {
    /// First value for a group code.
    pub fn get(&self, code: i32) -> Option<&str> {
        self.codes
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_f64(&self, code: i32) -> Option<f64> {
        self.get(code).and_then(|v| v.trim().parse().ok())
    }

    /// X/Y pair at `base` and `base + 10`.
    pub fn point(&self, base: i32) -> Option<Point> {
        Some(Point::new(self.get_f64(base)?, self.get_f64(base + 10)?))
    }

    /// Block name of an INSERT.
    pub fn block_name(&self) -> Option<&str> {
        if self.kind == "INSERT" {
            self.get(2)
        } else {
            None
        }
    }
}

/// Collect the records of the ENTITIES section.
pub fn read_entities(text: &str) -> DesignResult<Vec<EntityRecord>> {
    let pairs = read_pairs(text)?;
    let mut records = Vec::new();
    let mut in_entities = false;
    let mut saw_section = false;
    let mut current: Option<EntityRecord> = None;

    for (i, (code, value)) in pairs.iter().enumerate() {
        let line = i * 2 + 1;
        if !in_entities {
            let opens_section = i > 0 && pairs[i - 1].0 == 0 && pairs[i - 1].1 == "SECTION";
            if opens_section && *code == 2 && value == "ENTITIES" {
                in_entities = true;
                saw_section = true;
            }
            continue;
        }

        if *code == 0 {
            if let Some(record) = current.take() {
                records.push(record);
            }
            if value == "ENDSEC" {
                in_entities = false;
                continue;
            }
            current = Some(EntityRecord {
                kind: value.clone(),
                layer: String::new(),
                codes: Vec::new(),
            });
            continue;
        }

        match current.as_mut() {
            Some(record) if *code == 8 && record.layer.is_empty() => record.layer = value.clone(),
            Some(record) => record.codes.push((*code, value.clone())),
            None => return Err(DesignError::malformed_dxf(line, "Group outside of an entity")),
        }
    }

    if in_entities {
        return Err(DesignError::malformed_dxf(pairs.len() * 2, "ENTITIES section not terminated"));
    }
    if !saw_section {
        return Err(DesignError::malformed_dxf(0, "No ENTITIES section"));
    }
    Ok(records)
}

/// Count entities of one kind per layer.
pub fn count_by_layer(records: &[EntityRecord], kind: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records.iter().filter(|r| r.kind == kind) {
        *counts.entry(record.layer.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate_system;
    use crate::export::dxf::render_dxf;
    use crate::params::default_params;
    use crate::params::strategies::drawable_params;
    use proptest::prelude::*;

    fn default_records() -> Vec<EntityRecord> {
        let params = default_params();
        read_entities(&render_dxf(&params, &calculate_system(&params))).unwrap()
    }

    #[test]
    fn test_read_pairs() {
        let pairs = read_pairs("0\nSECTION\n2\nENTITIES\n").unwrap();
        assert_eq!(pairs, vec![(0, "SECTION".to_string()), (2, "ENTITIES".to_string())]);
    }

    #[test]
    fn test_odd_line_count_is_malformed() {
        let err = read_pairs("0\nSECTION\n2\n").unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_DXF");
    }

    #[test]
    fn test_bad_group_code_reports_line() {
        match read_pairs("0\nSECTION\nxx\nENTITIES\n").unwrap_err() {
            DesignError::MalformedDxf { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_entities_section() {
        assert!(read_entities("0\nSECTION\n2\nHEADER\n0\nENDSEC\n0\nEOF\n").is_err());
    }

    #[test]
    fn test_block_entities_are_not_read() {
        let records = default_records();
        // Block members live on EMITTERS too, but only INSERTs appear at top level
        assert!(records.iter().all(|r| !(r.kind == "CIRCLE" && r.layer == "EMITTERS")));
    }

    #[test]
    fn test_counts_match_calculation() {
        let records = default_records();
        let inserts = count_by_layer(&records, "INSERT");
        assert_eq!(inserts.get("EMITTERS"), Some(&330));
        assert_eq!(inserts.get("SENSORS"), Some(&2));
        assert_eq!(inserts.get("COMPONENTS"), Some(&5));

        let lines = count_by_layer(&records, "LINE");
        assert_eq!(lines.get("LATERALS"), Some(&10));
        assert_eq!(lines.get("MAINLINE"), Some(&1));
        assert_eq!(lines.get("PLOT_BOUNDARY"), Some(&4));
    }

    #[test]
    fn test_insert_positions_read_back() {
        let records = default_records();
        let tank = records
            .iter()
            .find(|r| r.block_name() == Some("TANK"))
            .unwrap();
        assert_eq!(tank.point(10), Some(Point::new(-0.5, 5.5)));
        assert_eq!(tank.get_f64(41), Some(1.5));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_entities_follow_the_emitter_grid(params in drawable_params()) {
            let calc = calculate_system(&params);
            let records = read_entities(&render_dxf(&params, &calc)).unwrap();

            let inserts = count_by_layer(&records, "INSERT");
            let lines = count_by_layer(&records, "LINE");
            prop_assert_eq!(inserts.get("EMITTERS").copied().unwrap_or(0) as u64, calc.total_emitters);
            prop_assert_eq!(lines.get("LATERALS").copied().unwrap_or(0), calc.num_laterals as usize);

            let emitters: Vec<Point> = records
                .iter()
                .filter(|r| r.block_name() == Some("EMITTER"))
                .filter_map(|r| r.point(10))
                .collect();
            prop_assert_eq!(emitters.len() as u64, calc.total_emitters);

            let per_lateral = calc.emitters_per_lateral as usize;
            for (k, at) in emitters.iter().enumerate() {
                let (i, j) = (k / per_lateral, k % per_lateral);
                let expected = Point::new(j as f64 * params.emitter_spacing_m, i as f64 * params.lateral_spacing_m);
                prop_assert_eq!(*at, expected, "emitter {} of lateral {}", j, i);
            }
        }
    }
}
