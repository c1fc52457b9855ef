// Device configuration resolver.
// Strict: device documents (missing or malformed JSON is an error).
// Lenient: page strategy elements (any read failure falls back to a default).
// Nothing is cached; every lookup hits the filesystem.

mod device;
mod error;
mod merge;
mod normalize;
mod strategy;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

pub use device::DeviceConfiguration;
pub use error::ResolverError;
pub use normalize::normalize_key;
pub use strategy::{PageStrategyElement, PAGE_STRATEGY_DIR};

/// Resolves device configurations and page strategy elements under a fixed root.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    root: PathBuf,
}

impl ConfigResolver {
    /// Roots the resolver at the working directory, joined with `config_dir` if given.
    /// Only fails if the working directory itself cannot be determined.
    pub fn new(config_dir: Option<&Path>) -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let root = match config_dir {
            Some(dir) => cwd.join(dir),
            None => cwd,
        };
        Ok(Self { root })
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads and parses `<root>/<config_type>/<key>.json`.
    ///
    /// `key` is expected to already be normalized (see [`normalize_key`]).
    pub fn load_device_configuration(
        &self,
        key: &str,
        config_type: &str,
    ) -> Result<DeviceConfiguration, ResolverError> {
        validate_segment(config_type)?;
        validate_segment(key)?;

        let path = self.root.join(config_type).join(format!("{key}.json"));
        debug!("Loading device configuration from {}", path.display());

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ResolverError::NotFound { path });
            }
            Err(source) => return Err(ResolverError::Read { path, source }),
        };

        serde_json::from_str(&raw).map_err(|source| ResolverError::Parse { path, source })
    }
}

/// Rejects anything that is not a single plain path component.
fn validate_segment(segment: &str) -> Result<(), ResolverError> {
    let invalid = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);
    if invalid {
        return Err(ResolverError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_device(root: &TempDir, config_type: &str, key: &str, contents: &str) {
        let dir = root.path().join(config_type);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{key}.json")), contents).unwrap();
    }

    #[test]
    fn test_new_joins_working_directory() {
        let cwd = std::env::current_dir().unwrap();
        let resolver = ConfigResolver::new(Some(Path::new("config"))).unwrap();
        assert_eq!(resolver.root(), cwd.join("config"));

        let resolver = ConfigResolver::new(None).unwrap();
        assert_eq!(resolver.root(), cwd);
    }

    #[test]
    fn test_load_round_trips_document() {
        let root = TempDir::new().unwrap();
        write_device(&root, "tv", "samsung_ue40", r#"{"pageStrategy":"html5"}"#);
        let resolver = ConfigResolver::with_root(root.path());

        let device = resolver.load_device_configuration("samsung_ue40", "tv").unwrap();
        assert_eq!(device.as_value(), &json!({"pageStrategy": "html5"}));
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let root = TempDir::new().unwrap();
        let resolver = ConfigResolver::with_root(root.path());

        let err = resolver.load_device_configuration("unknown_tv", "tv").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_invalid_json_is_parse_error() {
        let root = TempDir::new().unwrap();
        write_device(&root, "tv", "broken", "{not json");
        let resolver = ConfigResolver::with_root(root.path());

        let err = resolver.load_device_configuration("broken", "tv").unwrap_err();
        assert!(matches!(err, ResolverError::Parse { .. }));
    }

    #[test]
    fn test_load_unreadable_is_read_error() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("tv").join("dir_key.json")).unwrap();
        let resolver = ConfigResolver::with_root(root.path());

        let err = resolver.load_device_configuration("dir_key", "tv").unwrap_err();
        assert!(!err.is_not_found());
        match err {
            ResolverError::Read { path, .. } => {
                assert_eq!(path, root.path().join("tv").join("dir_key.json"));
            }
            other => panic!("expected a read error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rereads_file_each_call() {
        let root = TempDir::new().unwrap();
        write_device(&root, "tv", "lg_42lm", r#"{"pageStrategy":"html5"}"#);
        let resolver = ConfigResolver::with_root(root.path());
        assert_eq!(
            resolver
                .load_device_configuration("lg_42lm", "tv")
                .unwrap()
                .page_strategy(),
            Some("html5")
        );

        write_device(&root, "tv", "lg_42lm", r#"{"pageStrategy":"netcast"}"#);
        assert_eq!(
            resolver
                .load_device_configuration("lg_42lm", "tv")
                .unwrap()
                .page_strategy(),
            Some("netcast")
        );
    }

    #[test]
    fn test_load_rejects_bad_segments() {
        let root = TempDir::new().unwrap();
        let resolver = ConfigResolver::with_root(root.path());

        for (key, config_type) in [("a", ""), ("../etc/passwd", "tv"), ("a", ".."), ("a", "x/y")] {
            let err = resolver
                .load_device_configuration(key, config_type)
                .unwrap_err();
            assert!(
                matches!(err, ResolverError::InvalidSegment(_)),
                "{key:?} {config_type:?}"
            );
        }
    }

    #[test]
    fn test_concurrent_lookups_match_sequential() {
        let root = TempDir::new().unwrap();
        let devices = [("samsung_ue40", "html5"), ("lg_42lm", "netcast"), ("sony_bravia", "ps3")];
        for (key, strategy) in devices {
            write_device(&root, "tv", key, &format!(r#"{{"pageStrategy":"{strategy}"}}"#));
            let dir = root.path().join(PAGE_STRATEGY_DIR).join(strategy);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("doctype"), format!("<!DOCTYPE {strategy}>")).unwrap();
        }
        let resolver = ConfigResolver::with_root(root.path());

        let lookup = |key: &str| {
            let device = resolver.load_device_configuration(key, "tv").unwrap();
            (resolver.doc_type(&device), resolver.mime_type(&device))
        };
        let sequential: Vec<_> = devices.iter().map(|(key, _)| lookup(*key)).collect();

        let concurrent: Vec<_> = std::thread::scope(|scope| {
            let lookup = &lookup;
            let handles: Vec<_> = devices
                .iter()
                .map(|(key, _)| scope.spawn(move || lookup(*key)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, concurrent);
    }
}
