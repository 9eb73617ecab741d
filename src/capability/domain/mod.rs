//! Domain model for capability definitions.

mod contract;
mod definition;
mod error;
mod key;

pub use contract::{Contract, ContractKind};
pub use definition::CapabilityDefinition;
pub(crate) use definition::DefinitionParts;
pub use error::{CapabilityDomainError, ParseContractKindError};
pub use key::CapabilityKey;

/// Version recorded when a registration names none.
pub const DEFAULT_CAPABILITY_VERSION: &str = "1.0.0";

/// Realm recorded when a registration names none.
pub const DEFAULT_REALM: &str = "unknown";
