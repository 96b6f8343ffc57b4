//! Typed catalogue documents: unit-tagged quantities, implementation entries,
//! and the F/R schema header. The serialized layout is the catalogue format
//! consumed by the downstream MCDP solver.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative value tagged with its unit, e.g. `25 ha` or `150000 USD`.
/// Serialized as its `"<value> <unit>"` text so documents round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub value: u64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: u64, unit: &str) -> Self {
        Self {
            value,
            unit: unit.to_string(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl FromStr for Quantity {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.trim().splitn(2, ' ');
        let value = parts
            .next()
            .unwrap_or_default()
            .parse::<u64>()
            .map_err(|err| format!("bad value in quantity {raw:?}: {err}"))?;
        let unit = parts.next().unwrap_or_default().trim().to_string();
        if unit.is_empty() {
            return Err(format!("missing unit in quantity {raw:?}"));
        }
        Ok(Self { value, unit })
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// One implementation row: maximum achievable capability per functionality
/// dimension, minimum required consumption per resource dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub f_max: Vec<Quantity>,
    pub r_min: Vec<Quantity>,
}

/// Entry mapping in insertion order (`model0`, `model1`, ...). Order is
/// irrelevant to the solver but kept stable for readable diffs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Implementations(pub Vec<(String, CatalogueEntry)>);

impl Serialize for Implementations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, entry)| (id, entry)))
    }
}

impl<'de> Deserialize<'de> for Implementations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = Implementations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of entry id to implementation")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((id, entry)) = map.next_entry::<String, CatalogueEntry>()? {
                    entries.push((id, entry));
                }
                Ok(Implementations(entries))
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

/// Root structure of a catalogue document: the F/R schema plus the entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueFile {
    #[serde(rename = "F")]
    pub functionality: Vec<String>,
    #[serde(rename = "R")]
    pub resources: Vec<String>,
    pub implementations: Implementations,
}

/// Write a catalogue document with its title comment line.
pub fn write_catalogue_file(
    path: impl AsRef<Path>,
    header: &str,
    file: &CatalogueFile,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let yaml = serde_yaml::to_string(file)?;
    fs::write(path, format!("# {header}\n{yaml}"))?;
    Ok(())
}

/// Load a single catalogue document. The title line is a YAML comment and
/// is ignored by the parser.
pub fn load_catalogue_file(
    path: impl AsRef<Path>,
) -> Result<CatalogueFile, Box<dyn std::error::Error + Send + Sync>> {
    let raw = fs::read_to_string(path)?;
    let parsed: CatalogueFile = serde_yaml::from_str(&raw)?;
    Ok(parsed)
}
