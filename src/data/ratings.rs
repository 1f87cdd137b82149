use std::fs::File;
use std::io::Read;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use serde::Deserialize;

use crate::series::RawPoint;

/// One named series as read from a ratings file or the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInput {
    pub key: String,
    pub points: Vec<RawPoint>,
    pub class_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    series: String,
    label: String,
    value: f64,
    #[serde(default)]
    class: Option<String>,
}

/// Labels typed on one line spell a line break as a literal `\n`.
pub fn unescape_label(s: &str) -> String {
    s.replace("\\n", "\n")
}

/// Reads `series,label,value[,class]` rows, grouping them by series in the
/// order each series first appears.
pub fn read_ratings<R: Read>(input: R) -> Result<Vec<SeriesInput>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let mut out: Vec<SeriesInput> = Vec::new();
    for (i, rec) in rdr.deserialize().enumerate() {
        let row: RatingRow = rec.with_context(|| format!("ratings row {}", i + 1))?;
        let point = RawPoint::new(unescape_label(&row.label), row.value);
        let class = row.class.filter(|c| !c.is_empty());

        let idx = match out.iter().position(|s| s.key == row.series) {
            Some(idx) => idx,
            None => {
                out.push(SeriesInput {
                    key: row.series,
                    points: Vec::new(),
                    class_name: None,
                });
                out.len() - 1
            }
        };
        let entry = &mut out[idx];
        entry.points.push(point);
        if class.is_some() {
            entry.class_name = class;
        }
    }
    Ok(out)
}

/// Loads a ratings CSV from disk. Paths ending in `.gz` are decompressed.
pub fn load_ratings(path: &str) -> Result<Vec<SeriesInput>> {
    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    let series = if path.ends_with(".gz") {
        read_ratings(GzDecoder::new(file))
    } else {
        read_ratings(file)
    };
    series.with_context(|| format!("reading ratings from {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const CSV: &str = "\
series,label,value,class
p1,sweet,5,
p1,sour,0,
p2,sweet,1,mine
p1,salty,5,bold
p2,stone\\nfruit,2.5,
";

    #[test]
    fn groups_rows_by_series_in_first_seen_order() {
        let series = read_ratings(CSV.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);

        assert_eq!(series[0].key, "p1");
        assert_eq!(
            series[0].points,
            vec![
                RawPoint::new("sweet", 5.0),
                RawPoint::new("sour", 0.0),
                RawPoint::new("salty", 5.0),
            ]
        );
        assert_eq!(series[0].class_name.as_deref(), Some("bold"));

        assert_eq!(series[1].key, "p2");
        assert_eq!(series[1].points[1], RawPoint::new("stone\nfruit", 2.5));
        assert_eq!(series[1].class_name.as_deref(), Some("mine"));
    }

    #[test]
    fn class_column_is_optional() {
        let csv = "series,label,value\na, sweet ,3\n";
        let series = read_ratings(csv.as_bytes()).unwrap();
        assert_eq!(series[0].points, vec![RawPoint::new("sweet", 3.0)]);
        assert_eq!(series[0].class_name, None);
    }

    #[test]
    fn bad_value_reports_the_row() {
        let csv = "series,label,value\na,sweet,3\na,sour,lots\n";
        let err = read_ratings(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("ratings row 2"), "{err:#}");
    }

    #[test]
    fn reads_gzipped_input() {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(CSV.as_bytes()).unwrap();
        let gz = enc.finish().unwrap();

        let series = read_ratings(GzDecoder::new(gz.as_slice())).unwrap();
        assert_eq!(series, read_ratings(CSV.as_bytes()).unwrap());
    }

    #[test]
    fn load_from_disk_picks_decoder_by_extension() {
        let dir = std::env::temp_dir();
        let plain = dir.join(format!("flavorwheel-ratings-{}.csv", std::process::id()));
        let gz = dir.join(format!("flavorwheel-ratings-{}.csv.gz", std::process::id()));
        std::fs::write(&plain, CSV).unwrap();
        let mut enc = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        enc.write_all(CSV.as_bytes()).unwrap();
        enc.finish().unwrap();

        let a = load_ratings(plain.to_str().unwrap()).unwrap();
        let b = load_ratings(gz.to_str().unwrap()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);

        std::fs::remove_file(plain).unwrap();
        std::fs::remove_file(gz).unwrap();
        assert!(load_ratings("/nonexistent/ratings.csv").is_err());
    }
}
