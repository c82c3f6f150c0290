//! Export helpers for CSV position tracks and JSON orbit paths.

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

pub mod track {
    use std::io::Write;

    use orbitscope_orbits::Vector3;
    use orbitscope_orbits::vector::norm;
    use serde::{Deserialize, Serialize};

    /// CSV row: one object's position at one propagation time.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Record {
        pub time_s: f64,
        pub satellite: String,
        pub x: f64,
        pub y: f64,
        pub z: f64,
        pub radius: f64,
    }

    impl Record {
        pub fn new(time_s: f64, satellite: &str, position: Vector3) -> Self {
            Self {
                time_s,
                satellite: satellite.to_string(),
                x: position[0],
                y: position[1],
                z: position[2],
                radius: norm(&position),
            }
        }
    }

    /// Header-first CSV writer for track records.
    pub struct TrackWriter<W: Write> {
        inner: csv::Writer<W>,
    }

    impl<W: Write> TrackWriter<W> {
        pub fn new(writer: W) -> Self {
            Self {
                inner: csv::Writer::from_writer(writer),
            }
        }

        pub fn write(&mut self, record: &Record) -> csv::Result<()> {
            self.inner.serialize(record)
        }

        pub fn finish(mut self) -> csv::Result<()> {
            self.inner.flush()?;
            Ok(())
        }
    }
}

pub mod path {
    use std::io::{self, Write};

    use orbitscope_orbits::{OrbitPath, Vector3};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// JSON document describing one closed orbit path.
    #[derive(Debug, Clone, Serialize)]
    pub struct OrbitPathDocument<'a> {
        pub satellite: &'a str,
        pub body: &'a str,
        pub sample_count: usize,
        pub points: &'a [Vector3],
    }

    impl<'a> OrbitPathDocument<'a> {
        pub fn new(satellite: &'a str, body: &'a str, path: &'a OrbitPath) -> Self {
            Self {
                satellite,
                body,
                sample_count: path.sample_count(),
                points: path.points(),
            }
        }
    }

    /// Write a list of orbit paths as a pretty-printed JSON array.
    pub fn write_paths(writer: &mut dyn Write, docs: &[OrbitPathDocument<'_>]) -> io::Result<()> {
        to_writer_pretty(&mut *writer, docs)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use orbitscope_orbits::{CentralBody, DisplayScale, Orbit, OrbitalElements};

    use super::path::{OrbitPathDocument, write_paths};
    use super::track::{Record, TrackWriter};
    use super::writer_for_path;

    #[test]
    fn track_csv_has_header_and_radius() {
        let mut buf: Vec<u8> = Vec::new();
        let mut writer = TrackWriter::new(&mut buf);
        writer
            .write(&Record::new(0.0, "Hubble", [3.0, 4.0, 0.0]))
            .unwrap();
        writer.finish().unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("time_s,satellite,x,y,z,radius"));
        assert_eq!(lines.next(), Some("0.0,Hubble,3.0,4.0,0.0,5.0"));
    }

    #[test]
    fn path_json_lists_every_point() {
        let orbit = Orbit::new(
            &OrbitalElements::new(7000.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            &CentralBody::earth(),
            DisplayScale::KILOMETRES,
        )
        .unwrap();
        let path = orbit.build_path(4).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        write_paths(&mut buf, &[OrbitPathDocument::new("Sat", "Earth", &path)]).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let doc = &value[0];
        assert_eq!(doc["satellite"], "Sat");
        assert_eq!(doc["body"], "Earth");
        assert_eq!(doc["sample_count"], 4);
        assert_eq!(doc["points"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out/track.csv");
        {
            let mut w = writer_for_path(&target).unwrap();
            w.write_all(b"hello").unwrap();
            w.flush().unwrap();
        }
        assert_eq!(std::fs::read_to_string(target).unwrap(), "hello");
    }
}
