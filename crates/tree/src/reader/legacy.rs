//! Extraction of the legacy flat positional format
//!
//! Records have no level marker. The level of each record comes from its
//! position, with `branching_factor^level` slots per level.

// crate modules
use crate::error::{Error, Location, Result};
use crate::format::RecordPolicy;
use crate::reader::parsers;
use crate::reader::SphereTreeReader;
use crate::tree::SphereTree;

// spheretools modules
use spheretools_utils::f;

// standard library
use std::io::{BufRead, ErrorKind};

// external crates
use log::{debug, trace, warn};

impl SphereTreeReader {
    pub(crate) fn extract_legacy<R: BufRead>(&self, reader: R) -> Result<SphereTree> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) if e.kind() == ErrorKind::InvalidData => {
                return Err(Error::MissingHeader {
                    reason: "header is not valid UTF-8".to_string(),
                })
            }
            Some(Err(e)) => return Err(e.into()),
            None => {
                return Err(Error::MissingHeader {
                    reason: "input is empty".to_string(),
                })
            }
        };

        let (_, (level_count, branching_factor)) =
            parsers::header(&header).map_err(|_| Error::MissingHeader {
                reason: f!(
                    "expected \"<levels> <branching factor>\", found \"{}\"",
                    header.trim()
                ),
            })?;

        // levels are only added as the data reaches them
        let mut tree = SphereTree::new(level_count, branching_factor)?;
        tree.insert_level(0);

        let mut tally = Tally::default();
        let mut level = 0;
        let mut filled = 0;
        let mut line_number = 1;

        while let Some(line) = lines.next() {
            line_number += 1;

            let record = match line {
                Ok(line) if !parsers::is_sphere_record(&line) => {
                    trace!("End of sphere data at line {line_number}");
                    break;
                }
                Ok(line) => parsers::sphere_record(&line).map_err(|reason| (line, reason)),
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    Err(("<invalid UTF-8>".to_string(), e.to_string()))
                }
                Err(e) => return Err(e.into()),
            };

            match record {
                Ok(sphere) => {
                    let sphere = sphere.scaled(self.scale);
                    match self.radius_policy.apply(sphere) {
                        Some(kept) => {
                            if sphere.radius < 0.0 {
                                tally.clamped += 1;
                            }
                            tree.push(level, kept);
                        }
                        None => tally.dropped += 1,
                    }
                }
                Err((text, reason)) => {
                    let error = Error::MalformedRecord {
                        location: Location::Line(line_number),
                        text: text.trim().to_string(),
                        reason,
                    };
                    match self.record_policy {
                        RecordPolicy::Strict => return Err(error),
                        RecordPolicy::Skip => {
                            warn!("Skipping {error}");
                            tally.skipped += 1;
                        }
                    }
                }
            }

            // every record uses up a slot, even if nothing was stored
            filled += 1;
            if filled == tree.nominal_size(level) {
                level += 1;
                filled = 0;
                if level == level_count {
                    if lines.next().is_some() {
                        warn!("Ignoring data after the last level (line {})", line_number + 1);
                    }
                    break;
                }
                tree.insert_level(level);
            }
        }

        if level < level_count {
            debug!(
                "Sphere data ended in level {level} after {filled} of {} records",
                tree.nominal_size(level)
            );
        }

        tally.report();
        Ok(tree)
    }
}

/// Counts of records that did not make it into the tree unchanged
#[derive(Debug, Default)]
struct Tally {
    clamped: usize,
    dropped: usize,
    skipped: usize,
}

impl Tally {
    fn report(&self) {
        if self.clamped > 0 {
            debug!("Clamped {} negative radii to 0.0", self.clamped);
        }
        if self.dropped > 0 {
            debug!("Dropped {} pruned spheres", self.dropped);
        }
        if self.skipped > 0 {
            warn!("Skipped {} malformed records", self.skipped);
        }
    }
}
