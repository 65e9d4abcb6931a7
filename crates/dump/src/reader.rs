//! Read particle dumps back into spheres
//!
//! Only the layout produced by [DumpWriter](crate::DumpWriter) is
//! understood. Intended for checking exported files rather than as a general
//! LIGGGHTS reader.

// standard library
use std::path::Path;

// crate modules
use crate::dump::{ATOMS_ITEM, BOUNDS_ITEM, COUNT_ITEM, TIMESTEP_ITEM};
use crate::error::{Error, Result};

// spheretools modules
use spheretools_tree::Sphere;

// nom parser combinators
use nom::character::complete::{self, space1};
use nom::combinator::all_consuming;
use nom::number::complete::double;
use nom::sequence::preceded;
use nom::IResult;

/// Contents of a single dump
#[derive(Debug, Clone, PartialEq)]
pub struct Dump {
    /// Value under `ITEM: TIMESTEP`
    pub timestep: u64,
    /// `[min, max]` for the x, y, and z axes
    pub bounds: [[f64; 2]; 3],
    /// Every `id x y z radius` line in order
    pub records: Vec<DumpRecord>,
}

/// A single `id x y z radius` line of a dump
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DumpRecord {
    /// 1-based identifier
    pub id: u64,
    /// Sphere rebuilt from the coordinates and radius
    pub sphere: Sphere,
}

/// Parse dump text produced by a [DumpWriter](crate::DumpWriter)
///
/// ```rust
/// # use spheretools_dump::{export_level, read_dump};
/// # use spheretools_tree::Sphere;
/// let spheres = [Sphere::new([0.1, 0.2, 0.3], 0.4)];
/// let dump = read_dump(&export_level(&spheres, 5)).unwrap();
///
/// assert_eq!(dump.timestep, 5);
/// assert_eq!(dump.records[0].id, 1);
/// assert_eq!(dump.records[0].sphere, spheres[0]);
/// ```
pub fn read_dump(text: &str) -> Result<Dump> {
    let mut lines = Lines::new(text);

    lines.expect_marker(TIMESTEP_ITEM)?;
    let timestep = lines.parse_next(unsigned)?;
    lines.expect_marker(COUNT_ITEM)?;
    let count = lines.parse_next(unsigned)?;

    lines.expect_marker(BOUNDS_ITEM)?;
    let mut bounds = [[0.0; 2]; 3];
    for pair in bounds.iter_mut() {
        *pair = lines.parse_next(bound_pair)?;
    }

    lines.expect_marker(ATOMS_ITEM)?;
    let records = (0..count)
        .map(|_| lines.parse_next(record))
        .collect::<Result<Vec<DumpRecord>>>()?;

    Ok(Dump {
        timestep,
        bounds,
        records,
    })
}

/// Read a dump file from disk, see [read_dump()]
pub fn read_dump_file<P: AsRef<Path>>(path: P) -> Result<Dump> {
    let text = std::fs::read_to_string(path)?;
    read_dump(&text)
}

/// Line iterator that keeps track of line numbers for error messages
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    number: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            number: 0,
        }
    }

    fn next_line(&mut self) -> Result<&'a str> {
        self.number += 1;
        self.inner.next().map(str::trim).ok_or(Error::MalformedDump {
            line: self.number,
            text: "unexpected end of dump".to_string(),
        })
    }

    fn expect_marker(&mut self, marker: &str) -> Result<()> {
        let line = self.next_line()?;
        if line == marker {
            Ok(())
        } else {
            Err(self.malformed(line))
        }
    }

    fn parse_next<T>(&mut self, parser: fn(&str) -> IResult<&str, T>) -> Result<T> {
        let line = self.next_line()?;
        match all_consuming(parser)(line) {
            Ok((_, value)) => Ok(value),
            Err(_) => Err(self.malformed(line)),
        }
    }

    fn malformed(&self, line: &str) -> Error {
        Error::MalformedDump {
            line: self.number,
            text: line.to_string(),
        }
    }
}

fn unsigned(i: &str) -> IResult<&str, u64> {
    complete::u64(i)
}

fn bound_pair(i: &str) -> IResult<&str, [f64; 2]> {
    let (i, min) = double(i)?;
    let (i, max) = preceded(space1, double)(i)?;
    Ok((i, [min, max]))
}

fn record(i: &str) -> IResult<&str, DumpRecord> {
    let (i, id) = complete::u64(i)?;
    let (i, x) = preceded(space1, double)(i)?;
    let (i, y) = preceded(space1, double)(i)?;
    let (i, z) = preceded(space1, double)(i)?;
    let (i, radius) = preceded(space1, double)(i)?;
    Ok((
        i,
        DumpRecord {
            id,
            sphere: Sphere::new([x, y, z], radius),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_line() {
        assert_eq!(
            record("3 1.0e+00 -2.5e-01 0 4.00000000e-01"),
            Ok((
                "",
                DumpRecord {
                    id: 3,
                    sphere: Sphere::new([1.0, -0.25, 0.0], 0.4)
                }
            ))
        );
        assert!(record("x 1 2 3 4").is_err());
    }

    #[test]
    fn bounds_line() {
        assert_eq!(bound_pair("-1e+00 1e+00"), Ok(("", [-1.0, 1.0])));
        assert!(bound_pair("-1e+00").is_err());
    }

    #[test]
    fn truncated_dump() {
        let text = "ITEM: TIMESTEP\n10000\nITEM: NUMBER OF ATOMS\n";
        match read_dump(text) {
            Err(Error::MalformedDump { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected a malformed dump, found {other:?}"),
        }
    }

    #[test]
    fn wrong_marker() {
        match read_dump("ITEM: TIMESTEPS\n10000\n") {
            Err(Error::MalformedDump { line, text }) => {
                assert_eq!(line, 1);
                assert_eq!(text, "ITEM: TIMESTEPS");
            }
            other => panic!("expected a malformed dump, found {other:?}"),
        }
    }
}
