//! Extraction of the structured hierarchical (YAML) format

// crate modules
use crate::error::{Error, Location, Result};
use crate::format::RecordPolicy;
use crate::reader::SphereTreeReader;
use crate::sphere::Sphere;
use crate::tree::SphereTree;

// spheretools modules
use spheretools_utils::f;

// external crates
use log::{debug, warn};
use serde::Deserialize;
use serde_yaml::Value;

/// One entry of the `data` sequence
#[derive(Debug, Deserialize)]
struct LevelEntry {
    level: usize,
    #[serde(default)]
    spheres: Option<Vec<Value>>,
}

/// Fields of a sphere that are used, anything else (`aux`, etc...) is ignored
#[derive(Debug, Deserialize)]
struct SphereEntry {
    center: [f64; 3],
    radius: f64,
}

impl SphereTreeReader {
    pub(crate) fn extract_structured(&self, text: &str) -> Result<SphereTree> {
        let document: Value = serde_yaml::from_str(text)?;

        let level_count = header_field(&document, "levels")?;
        let branching_factor = header_field(&document, "degree")?;
        let mut tree = SphereTree::new(level_count, branching_factor)?;

        let entries = match document.get("data") {
            None | Some(Value::Null) => {
                debug!("No sphere data in document");
                return Ok(tree);
            }
            Some(Value::Sequence(entries)) => entries,
            Some(other) => {
                return Err(Error::MalformedRecord {
                    location: Location::Data,
                    text: yaml_text(other),
                    reason: "expected a sequence of levels".to_string(),
                })
            }
        };

        let mut dropped = 0;
        for (n, entry) in entries.iter().enumerate() {
            let Some(record) = self.level_entry(n, entry)? else {
                continue;
            };

            if !tree.insert_level(record.level) {
                warn!("Level {} appears more than once, appending", record.level);
            }
            if record.level >= level_count {
                warn!(
                    "Level {} is outside of the {level_count} levels in the header",
                    record.level
                );
            }

            for (index, value) in record.spheres.unwrap_or_default().iter().enumerate() {
                let location = Location::Sphere { entry: n, index };
                let Some(sphere) = self.sphere_entry(location, value)? else {
                    continue;
                };

                let sphere = sphere.scaled(self.scale);
                if sphere.is_pruned() {
                    dropped += 1;
                } else {
                    tree.push(record.level, sphere);
                }
            }
        }

        if dropped > 0 {
            debug!("Dropped {dropped} pruned spheres");
        }

        Ok(tree)
    }

    /// Deserialise a level entry, `None` if it was skipped
    fn level_entry(&self, n: usize, value: &Value) -> Result<Option<LevelEntry>> {
        let result = LevelEntry::deserialize(value).map_err(|e| Error::MalformedRecord {
            location: Location::Entry(n),
            text: yaml_text(value),
            reason: e.to_string(),
        });
        self.apply_record_policy(result)
    }

    /// Deserialise a sphere, `None` if it was skipped
    fn sphere_entry(&self, location: Location, value: &Value) -> Result<Option<Sphere>> {
        let result = SphereEntry::deserialize(value)
            .map(|s| Sphere::new(s.center, s.radius))
            .map_err(|e| Error::MalformedRecord {
                location,
                text: yaml_text(value),
                reason: e.to_string(),
            });
        self.apply_record_policy(result)
    }

    fn apply_record_policy<T>(&self, result: Result<T>) -> Result<Option<T>> {
        match (result, self.record_policy) {
            (Ok(value), _) => Ok(Some(value)),
            (Err(error), RecordPolicy::Strict) => Err(error),
            (Err(error), RecordPolicy::Skip) => {
                warn!("Skipping {error}");
                Ok(None)
            }
        }
    }
}

/// Unsigned integer header field, i.e. `levels` or `degree`
fn header_field(document: &Value, key: &str) -> Result<usize> {
    match document.get(key) {
        Some(value) => value
            .as_u64()
            .map(|v| v as usize)
            .ok_or_else(|| Error::MissingHeader {
                reason: f!("\"{key}\" is not an unsigned integer: {}", yaml_text(value)),
            }),
        None => Err(Error::MissingHeader {
            reason: f!("\"{key}\" field not found"),
        }),
    }
}

/// Compact text of a YAML value for error messages
fn yaml_text(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim().replace('\n', " "))
        .unwrap_or_else(|_| f!("{value:?}"))
}
