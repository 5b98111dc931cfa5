//! Tagfall: locale fallback resolution
//!
//! Picks a per-locale value for a ranked list of user locales:
//! - `locale`: split tags into language/script/region and build the fallback chain
//! - `resolve`: walk user locales through the chain with a caller-supplied selector
//! - `params`: `${name}` substitution in resolved text
//! - `value` / `catalog`: nested YAML/JSON candidates addressed by property path
//! - `state`: observable preferred locale for UI layers

mod catalog;
mod error;
mod locale;
mod params;
mod preferences;
mod resolve;
mod state;
mod value;

pub use catalog::{restrict_locales, Catalog, MAX_CATALOG_LOCALES};
pub use error::CatalogError;
pub use locale::{decompose, fallback_chain, region_alias, FallbackKey, FallbackStep, LocaleTag};
pub use params::{substitute, Param, Params, MISSING_PARAM};
pub use preferences::UserLocales;
pub use resolve::{localize, localize_match, localize_text, select, Candidates, Leaf, Match};
pub use state::{LocaleState, SubscriptionId, DEFAULT_LOCALE};
pub use value::{PropertyPath, Segment, Value};
