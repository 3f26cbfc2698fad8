// Adapters layer: concrete implementations of the domain ports used by
// the demo binary and tests. Production deployments supply their own.

pub mod descriptor;
pub mod format;
pub mod memory;
pub mod registry;

pub use descriptor::JsonDescriptorBuilder;
pub use format::ExtensionFormatService;
pub use memory::InMemoryContentService;
pub use registry::MapHandlerRegistry;
