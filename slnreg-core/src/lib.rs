//! slnreg core library: registry model, persistence, folder inference and
//! project registration.
//!
//! - [`types`] — registry model (projects, solution folder arena)
//! - [`error`] — [`RegistryError`], [`ConfigError`]
//! - [`registry`] — locate / load / save / create registry files
//! - [`placement`] — which solution folder a project belongs in
//! - [`register`] — idempotent add with a single conditional write
//! - [`paths`] — lexical path helpers

pub mod error;
pub mod paths;
pub mod placement;
pub mod register;
pub mod registry;
pub mod types;

pub use error::{ConfigError, RegistryError};
pub use placement::{infer, Placement, PlacementMode};
pub use register::{register, RegisterOutcome, Registration, RegistrySink};
pub use registry::RegistryFile;
pub use types::{Group, GroupId, ProjectEntry, ProjectName, Registry};
