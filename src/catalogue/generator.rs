//! Synthesizes option catalogues for the wildfire response MCDP.
//!
//! Convention: functionality (F) is "more is better" (area controlled,
//! retardant capacity); resources (R) are "less is better" (cost, logistics
//! load, response time). Response time is therefore a resource column
//! everywhere: the solver minimizes it or bounds it from above.

use std::path::{Path, PathBuf};

use crate::catalogue::rng::Rng;
use crate::catalogue::schema::{
    write_catalogue_file, CatalogueEntry, CatalogueFile, Implementations, Quantity,
};

pub const DEFAULT_CATALOGUE_DIR: &str = "wildfire.mcdplib/catalogues";

/// Linear model for one derived resource column:
/// `base + per_functionality * f + rush_penalty * max(0, rush_threshold - driver)`
/// plus uniform noise in `[-noise, +noise]`, clamped to `floor`.
///
/// More functionality costs more; a driver (response time) below the rush
/// threshold costs more still.
#[derive(Debug, Clone)]
pub struct ResourceModel {
    pub base: i64,
    pub per_functionality: i64,
    pub rush_penalty: i64,
    pub rush_threshold: i64,
    pub noise: i64,
    pub floor: i64,
}

impl ResourceModel {
    fn sample(&self, functionality: i64, driver: i64, rng: &mut Rng) -> u64 {
        let rush = (self.rush_threshold - driver).max(0);
        let value = self.base
            + self.per_functionality * functionality
            + self.rush_penalty * rush
            + rng.range_i64(-self.noise, self.noise);
        value.max(self.floor) as u64
    }
}

/// How one resource column is produced.
#[derive(Debug, Clone)]
pub enum ResourceRule {
    /// Computed from the linear model.
    Derived(ResourceModel),
    /// The sampled driver bin itself (the response-time column).
    DriverValue,
}

/// Fixed row appended after the sampled rows. Values are configuration
/// constants chosen to pin the extremes of the visible tradespace.
#[derive(Debug, Clone)]
pub struct AnchorRow {
    pub functionality: u64,
    pub resources: Vec<u64>,
}

#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    pub header: String,
    pub file_name: String,
    pub functionality_unit: String,
    pub resource_units: Vec<String>,
    pub rows: usize,
    pub functionality_bins: Vec<i64>,
    /// Bins for the penalty driver (response time). Empty means the
    /// functionality value drives the model directly.
    pub driver_bins: Vec<i64>,
    /// One rule per resource column, aligned with `resource_units`.
    pub resources: Vec<ResourceRule>,
    pub anchors: Vec<AnchorRow>,
}

/// Full generation run: one seed, three catalogues.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub seed: u64,
    pub aircraft: CatalogueConfig,
    pub crews: CatalogueConfig,
    pub retardant: CatalogueConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            aircraft: CatalogueConfig {
                header: "Catalogue of aircraft options".to_string(),
                file_name: "aircraft_catalogue.yaml".to_string(),
                functionality_unit: "ha".to_string(),
                resource_units: vec!["USD".to_string(), "kg".to_string(), "min".to_string()],
                rows: 100,
                functionality_bins: vec![10, 15, 20, 25, 30, 35, 40, 45, 50],
                driver_bins: vec![6, 8, 10, 12, 15, 18, 22, 26, 30],
                resources: vec![
                    ResourceRule::Derived(ResourceModel {
                        base: 150_000,
                        per_functionality: 25_000,
                        rush_penalty: 40_000,
                        rush_threshold: 22,
                        noise: 25_000,
                        floor: 120_000,
                    }),
                    ResourceRule::Derived(ResourceModel {
                        base: 1_200,
                        per_functionality: 55,
                        rush_penalty: 95,
                        rush_threshold: 22,
                        noise: 200,
                        floor: 500,
                    }),
                    ResourceRule::DriverValue,
                ],
                anchors: vec![
                    // slow/cheap-ish
                    AnchorRow {
                        functionality: 10,
                        resources: vec![250_000, 1_500, 30],
                    },
                    // fast/expensive/heavy
                    AnchorRow {
                        functionality: 50,
                        resources: vec![2_000_000, 7_000, 6],
                    },
                ],
            },
            crews: CatalogueConfig {
                header: "Catalogue of ground crew options".to_string(),
                file_name: "crews_catalogue.yaml".to_string(),
                functionality_unit: "ha".to_string(),
                resource_units: vec!["USD".to_string(), "min".to_string()],
                rows: 100,
                functionality_bins: vec![20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120],
                driver_bins: vec![10, 15, 18, 20, 25, 30, 35, 40, 45, 60],
                resources: vec![
                    ResourceRule::Derived(ResourceModel {
                        base: 80_000,
                        per_functionality: 6_500,
                        rush_penalty: 8_000,
                        rush_threshold: 45,
                        noise: 12_000,
                        floor: 60_000,
                    }),
                    ResourceRule::DriverValue,
                ],
                anchors: vec![
                    AnchorRow {
                        functionality: 20,
                        resources: vec![150_000, 60],
                    },
                    AnchorRow {
                        functionality: 120,
                        resources: vec![1_050_000, 10],
                    },
                ],
            },
            retardant: CatalogueConfig {
                header: "Catalogue of retardant/supply options".to_string(),
                file_name: "retardant_catalogue.yaml".to_string(),
                functionality_unit: "kg".to_string(),
                resource_units: vec!["USD".to_string()],
                rows: 40,
                functionality_bins: vec![1_000, 1_500, 2_000, 2_500, 3_000, 4_000, 5_000, 6_000, 7_000],
                driver_bins: Vec::new(),
                resources: vec![ResourceRule::Derived(ResourceModel {
                    base: 20_000,
                    per_functionality: 18,
                    rush_penalty: 0,
                    rush_threshold: 0,
                    noise: 3_000,
                    floor: 10_000,
                })],
                anchors: vec![
                    AnchorRow {
                        functionality: 2_000,
                        resources: vec![50_000],
                    },
                    AnchorRow {
                        functionality: 6_000,
                        resources: vec![50_000],
                    },
                ],
            },
        }
    }
}

/// Generate one catalogue: `rows` sampled rows plus the anchor rows, with
/// sequential `model<k>` identifiers.
pub fn generate_catalogue(config: &CatalogueConfig, rng: &mut Rng) -> CatalogueFile {
    let mut rows = Vec::with_capacity(config.rows + config.anchors.len());

    for _ in 0..config.rows {
        let functionality = *rng.pick(&config.functionality_bins);
        let driver = if config.driver_bins.is_empty() {
            functionality
        } else {
            *rng.pick(&config.driver_bins)
        };

        let resources: Vec<u64> = config
            .resources
            .iter()
            .map(|rule| match rule {
                ResourceRule::Derived(model) => model.sample(functionality, driver, rng),
                ResourceRule::DriverValue => driver as u64,
            })
            .collect();

        rows.push((functionality as u64, resources));
    }

    for anchor in &config.anchors {
        rows.push((anchor.functionality, anchor.resources.clone()));
    }

    let implementations = rows
        .into_iter()
        .enumerate()
        .map(|(k, (functionality, resources))| {
            let entry = CatalogueEntry {
                f_max: vec![Quantity::new(functionality, &config.functionality_unit)],
                r_min: resources
                    .iter()
                    .zip(&config.resource_units)
                    .map(|(value, unit)| Quantity::new(*value, unit))
                    .collect(),
            };
            (format!("model{k}"), entry)
        })
        .collect();

    CatalogueFile {
        functionality: vec![config.functionality_unit.clone()],
        resources: config.resource_units.clone(),
        implementations: Implementations(implementations),
    }
}

/// Generate and write all three catalogues under `out_dir`. One PRNG stream
/// feeds the whole run, so the seed pins every document. Returns the written
/// paths with their implementation counts, in write order.
pub fn write_catalogues(
    config: &GenerationConfig,
    out_dir: &Path,
) -> Result<Vec<(PathBuf, usize)>, Box<dyn std::error::Error + Send + Sync>> {
    let mut rng = Rng::new(config.seed);
    let mut written = Vec::new();
    for catalogue in [&config.aircraft, &config.crews, &config.retardant] {
        let file = generate_catalogue(catalogue, &mut rng);
        let path = out_dir.join(&catalogue.file_name);
        write_catalogue_file(&path, &catalogue.header, &file)?;
        written.push((path, file.implementations.0.len()));
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived_floors(config: &CatalogueConfig) -> Vec<Option<i64>> {
        config
            .resources
            .iter()
            .map(|rule| match rule {
                ResourceRule::Derived(model) => Some(model.floor),
                ResourceRule::DriverValue => None,
            })
            .collect()
    }

    #[test]
    fn generated_rows_respect_floors() {
        let config = GenerationConfig::default();
        for catalogue in [&config.aircraft, &config.crews, &config.retardant] {
            let mut rng = Rng::new(config.seed);
            let file = generate_catalogue(catalogue, &mut rng);
            let floors = derived_floors(catalogue);
            // Anchors are fixed rows and exempt from the model floor.
            for (_, entry) in &file.implementations.0[..catalogue.rows] {
                for (quantity, floor) in entry.r_min.iter().zip(&floors) {
                    if let Some(floor) = floor {
                        assert!(
                            quantity.value >= *floor as u64,
                            "{} below floor {}",
                            quantity,
                            floor
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn document_has_sampled_rows_plus_anchors() {
        let config = GenerationConfig::default();
        let mut rng = Rng::new(config.seed);
        let file = generate_catalogue(&config.aircraft, &mut rng);
        assert_eq!(
            file.implementations.0.len(),
            config.aircraft.rows + config.aircraft.anchors.len()
        );
    }

    #[test]
    fn entry_arity_matches_declared_schema() {
        let config = GenerationConfig::default();
        for catalogue in [&config.aircraft, &config.crews, &config.retardant] {
            let mut rng = Rng::new(config.seed);
            let file = generate_catalogue(catalogue, &mut rng);
            for (id, entry) in &file.implementations.0 {
                assert_eq!(entry.f_max.len(), file.functionality.len(), "{id}");
                assert_eq!(entry.r_min.len(), file.resources.len(), "{id}");
            }
        }
    }

    #[test]
    fn entry_ids_are_sequential() {
        let config = GenerationConfig::default();
        let mut rng = Rng::new(config.seed);
        let file = generate_catalogue(&config.crews, &mut rng);
        for (k, (id, _)) in file.implementations.0.iter().enumerate() {
            assert_eq!(id, &format!("model{k}"));
        }
    }

    #[test]
    fn anchors_land_verbatim_at_the_tail() {
        let config = GenerationConfig::default();
        let mut rng = Rng::new(config.seed);
        let file = generate_catalogue(&config.aircraft, &mut rng);
        let tail = &file.implementations.0[config.aircraft.rows..];
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].1.f_max[0], Quantity::new(10, "ha"));
        assert_eq!(tail[0].1.r_min[0], Quantity::new(250_000, "USD"));
        assert_eq!(tail[1].1.r_min[2], Quantity::new(6, "min"));
    }

    #[test]
    fn same_seed_reproduces_the_catalogue() {
        let config = GenerationConfig::default();
        let mut a = Rng::new(config.seed);
        let mut b = Rng::new(config.seed);
        let first = generate_catalogue(&config.aircraft, &mut a);
        let second = generate_catalogue(&config.aircraft, &mut b);
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_diverge() {
        let config = GenerationConfig::default();
        let mut a = Rng::new(7);
        let mut b = Rng::new(8);
        let first = generate_catalogue(&config.aircraft, &mut a);
        let second = generate_catalogue(&config.aircraft, &mut b);
        assert_ne!(first, second);
    }

    #[test]
    fn retardant_driver_falls_back_to_functionality() {
        // With no driver bins and no rush penalty the model reduces to
        // base + slope * load + noise, always >= the floor.
        let config = GenerationConfig::default();
        let mut rng = Rng::new(config.seed);
        let file = generate_catalogue(&config.retardant, &mut rng);
        for (_, entry) in &file.implementations.0[..config.retardant.rows] {
            let load = entry.f_max[0].value as i64;
            let cost = entry.r_min[0].value as i64;
            assert!((cost - (20_000 + 18 * load)).abs() <= 3_000);
        }
    }
}
