use tracing::{debug, info};

use crate::config::Config;
use crate::resolver::{normalize_key, ConfigResolver, DeviceConfiguration, ResolverError};

/// Loads the configuration for a raw device identifier and overlays its patch, if any.
///
/// The identifier is normalized first, so "Samsung UE40" and "samsung-ue40" resolve
/// to the same document. A missing device document is an error; a missing patch is not.
pub fn resolve_device(
    resolver: &ConfigResolver,
    config: &Config,
    device_id: &str,
) -> Result<DeviceConfiguration, ResolverError> {
    let key = normalize_key(device_id);
    let device = resolver.load_device_configuration(&key, &config.device_config_type)?;

    match resolver.load_device_configuration(&key, &config.patch_config_type) {
        Ok(patch) => {
            info!("Applying configuration patch for device '{key}'");
            device.merged_with(patch)
        }
        Err(e) if e.is_not_found() => {
            debug!("No configuration patch for device '{key}'");
            Ok(device)
        }
        Err(e) => Err(e),
    }
}
