// Device page serving.
// Resolves a device's configuration (plus optional patch) and assembles its HTML page.
// Resolver calls block on the filesystem and must run inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod lookup;
pub mod page;

pub use lookup::resolve_device;
pub use page::DevicePage;
