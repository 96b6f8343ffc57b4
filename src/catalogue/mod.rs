pub mod generator;
pub mod rng;
pub mod schema;

pub use generator::{
    generate_catalogue, write_catalogues, AnchorRow, CatalogueConfig, GenerationConfig,
    ResourceModel, ResourceRule, DEFAULT_CATALOGUE_DIR,
};
pub use rng::Rng;
pub use schema::{
    load_catalogue_file, write_catalogue_file, CatalogueEntry, CatalogueFile, Implementations,
    Quantity,
};
