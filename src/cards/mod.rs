//! Card system: catalog, secret envelope and dealing.
//!
//! ## Key Types
//!
//! - `CardId`: Dense index into the catalog
//! - `CardKind`: Suspect, Weapon or Room
//! - `Card`: Immutable catalog entry
//! - `CardCatalog`: Lookup by id and by wire key
//! - `SecretEnvelope`: The hidden solution
//! - `Deal`: Envelope, hands and table cards for one match

pub mod catalog;
pub mod deal;
pub mod definition;
pub mod envelope;

pub use catalog::{CardCatalog, MAX_CARDS};
pub use deal::{verify_partition, Deal};
pub use definition::{Card, CardId, CardKind};
pub use envelope::SecretEnvelope;
