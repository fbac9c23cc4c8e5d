pub mod aggregate;
pub mod context_resolver;
pub mod discovery;
pub mod exclude;
pub mod executor;
pub mod operations;

pub use context_resolver::{ContextResolver, DefaultSelection, Resolution, Selectors};
pub use discovery::Detector;
pub use exclude::ExcludeMatcher;
pub use executor::ModuleExecutor;
