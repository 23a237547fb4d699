use std::io::Write;

use crate::analysis::series::{AreaTable, BandTable, PeakTable, SeriesTable};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// CSV rendering of the result tables
// ---------------------------------------------------------------------------

/// `Alcohol,Concentration,WaveNumber,Absorption_1..N,Absorption_mean,Absorption_stddev`
///
/// N is taken from the first row; every row must carry the same number of
/// replicate readings.
pub fn write_peak_csv<W: Write>(table: &PeakTable, writer: W) -> Result<()> {
    let replicates = table.rows.first().map_or(0, |row| row.absorbances.len());
    if let Some(row) = table.rows.iter().find(|r| r.absorbances.len() != replicates) {
        return Err(Error::grid_mismatch(format!(
            "concentration '{}' has {} replicates, expected {replicates}",
            row.label,
            row.absorbances.len()
        )));
    }

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![
        "Alcohol".to_string(),
        "Concentration".to_string(),
        "WaveNumber".to_string(),
    ];
    header.extend((1..=replicates).map(|i| format!("Absorption_{i}")));
    header.push("Absorption_mean".to_string());
    header.push("Absorption_stddev".to_string());
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![
            row.alcohol.clone(),
            row.concentration.to_string(),
            row.wavenumber.to_string(),
        ];
        record.extend(row.absorbances.iter().map(f64::to_string));
        record.push(row.mean.to_string());
        record.push(row.std_dev.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// `Wavenumber,<label_1>,...,<label_k>`, one line per grid point.
pub fn write_band_csv<W: Write>(table: &BandTable, writer: W) -> Result<()> {
    let grid = table.shared_grid()?;
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Wavenumber".to_string()];
    header.extend(table.columns.iter().map(|c| c.label.clone()));
    wtr.write_record(&header)?;

    for (i, wavenumber) in grid.iter().enumerate() {
        let mut record = vec![wavenumber.to_string()];
        record.extend(table.columns.iter().map(|c| c.absorbance[i].to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// `Alcohol,Concentration,Area`
pub fn write_area_csv<W: Write>(table: &AreaTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Alcohol", "Concentration", "Area"])?;
    for row in &table.rows {
        wtr.write_record(&[
            row.alcohol.clone(),
            row.concentration.to_string(),
            row.area.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Dispatch on the table kind.
pub fn write_csv<W: Write>(table: &SeriesTable, writer: W) -> Result<()> {
    match table {
        SeriesTable::Peak(t) => write_peak_csv(t, writer),
        SeriesTable::Band(t) => write_band_csv(t, writer),
        SeriesTable::Area(t) => write_area_csv(t, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::series::{AreaRow, BandColumn, PeakRow};

    fn render(table: &SeriesTable) -> String {
        let mut out = Vec::new();
        write_csv(table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn peak_schema() {
        let table = PeakTable {
            alcohol: "EtOH".into(),
            rows: vec![PeakRow {
                alcohol: "EtOH".into(),
                label: "0250".into(),
                concentration: 2.5,
                wavenumber: 1745.5,
                absorbances: vec![0.25, 0.5, 0.75],
                mean: 0.5,
                std_dev: 0.125,
            }],
        };
        assert_eq!(
            render(&SeriesTable::Peak(table)),
            "Alcohol,Concentration,WaveNumber,Absorption_1,Absorption_2,Absorption_3,\
             Absorption_mean,Absorption_stddev\n\
             EtOH,2.5,1745.5,0.25,0.5,0.75,0.5,0.125\n"
        );
    }

    #[test]
    fn ragged_peak_rows_are_rejected() {
        let row = |label: &str, n: usize| PeakRow {
            alcohol: "EtOH".into(),
            label: label.into(),
            concentration: 1.0,
            wavenumber: 1740.0,
            absorbances: vec![0.1; n],
            mean: 0.1,
            std_dev: 0.0,
        };
        let table = PeakTable {
            alcohol: "EtOH".into(),
            rows: vec![row("0100", 3), row("0200", 2)],
        };
        let err = write_peak_csv(&table, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::GridMismatch(_)));
    }

    #[test]
    fn band_schema_has_a_column_per_label() {
        let column = |label: &str, values: Vec<f64>| BandColumn {
            label: label.into(),
            concentration: 0.0,
            wavenumbers: vec![1700, 1698],
            absorbance: values,
        };
        let table = BandTable {
            alcohol: "MeOH".into(),
            columns: vec![column("0250", vec![0.5, 0.25]), column("0500", vec![1.0, 0.5])],
        };
        assert_eq!(
            render(&SeriesTable::Band(table)),
            "Wavenumber,0250,0500\n1700,0.5,1\n1698,0.25,0.5\n"
        );
    }

    #[test]
    fn short_band_column_is_rejected() {
        let table = BandTable {
            alcohol: "MeOH".into(),
            columns: vec![BandColumn {
                label: "0250".into(),
                concentration: 2.5,
                wavenumbers: vec![1700, 1698],
                absorbance: vec![0.5],
            }],
        };
        let err = write_band_csv(&table, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::GridMismatch(_)), "{err}");
    }

    #[test]
    fn area_schema() {
        let table = AreaTable {
            alcohol: "MeOH".into(),
            rows: vec![AreaRow {
                alcohol: "MeOH".into(),
                label: "0500".into(),
                concentration: 5.0,
                area: 12.5,
            }],
        };
        assert_eq!(
            render(&SeriesTable::Area(table)),
            "Alcohol,Concentration,Area\nMeOH,5,12.5\n"
        );
    }
}
