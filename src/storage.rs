use crate::models::Observation;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save observations as CSV with header.
pub fn save_csv<P: AsRef<Path>>(points: &[Observation], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("unit", "year", "breakdown", "raw_value", "region", "rate"))?;
    for p in points {
        wtr.serialize((
            &p.unit,
            &p.year,
            &p.breakdown,
            p.raw_value,
            p.region.map(|r| r.name()),
            p.rate,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save observations as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(points: &[Observation], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(points)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Observation, Region};
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let pts = vec![Observation {
            unit: "Acre".into(),
            year: "2022".into(),
            breakdown: Some("Total".into()),
            raw_value: Some(70.0),
            region: Some(Region::Norte),
            rate: Some(0.70),
        }];
        save_csv(&pts, &csvp).unwrap();
        save_json(&pts, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }
}
