use std::io::ErrorKind;

use tracing::{debug, warn};

use super::device::DeviceConfiguration;
use super::{validate_segment, ConfigResolver};

/// Directory under the config root holding one sub-directory per page strategy.
pub const PAGE_STRATEGY_DIR: &str = "pagestrategy";

/// The presentation fragments a page strategy may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStrategyElement {
    DocType,
    MimeType,
    RootElement,
    Header,
    Body,
}

impl PageStrategyElement {
    pub const ALL: [PageStrategyElement; 5] = [
        PageStrategyElement::DocType,
        PageStrategyElement::MimeType,
        PageStrategyElement::RootElement,
        PageStrategyElement::Header,
        PageStrategyElement::Body,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            PageStrategyElement::DocType => "doctype",
            PageStrategyElement::MimeType => "mimetype",
            PageStrategyElement::RootElement => "rootelement",
            PageStrategyElement::Header => "header",
            PageStrategyElement::Body => "body",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            PageStrategyElement::DocType => "<!DOCTYPE html>",
            PageStrategyElement::MimeType => "text/html",
            PageStrategyElement::RootElement => "<html>",
            PageStrategyElement::Header | PageStrategyElement::Body => "",
        }
    }
}

impl ConfigResolver {
    /// Returns the raw contents of `pagestrategy/<strategy>/<element>` or `default`.
    ///
    /// Never fails: a missing strategy directory, a missing element file and any
    /// other read error all yield `default` verbatim. Errors other than absence
    /// are logged since they usually point at a broken deployment.
    pub fn page_strategy_element(&self, strategy: &str, element: &str, default: &str) -> String {
        if let Err(e) = validate_segment(strategy).and_then(|_| validate_segment(element)) {
            warn!("Ignoring page strategy lookup {strategy:?}/{element:?}: {e}");
            return default.to_string();
        }

        let path = self.root.join(PAGE_STRATEGY_DIR).join(strategy).join(element);
        match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No {element} for page strategy '{strategy}', using default");
                default.to_string()
            }
            Err(e) => {
                warn!(
                    "Failed to read page strategy element {}: {e}; using default",
                    path.display()
                );
                default.to_string()
            }
        }
    }

    /// Looks up `element` in the device's page strategy, falling back to the element default.
    pub fn device_element(
        &self,
        device: &DeviceConfiguration,
        element: PageStrategyElement,
    ) -> String {
        match device.page_strategy() {
            Some(strategy) => {
                self.page_strategy_element(strategy, element.file_name(), element.default_value())
            }
            None => element.default_value().to_string(),
        }
    }

    pub fn doc_type(&self, device: &DeviceConfiguration) -> String {
        self.device_element(device, PageStrategyElement::DocType)
    }

    pub fn mime_type(&self, device: &DeviceConfiguration) -> String {
        self.device_element(device, PageStrategyElement::MimeType)
    }

    pub fn root_html_tag(&self, device: &DeviceConfiguration) -> String {
        self.device_element(device, PageStrategyElement::RootElement)
    }

    /// Extra markup the device needs inside `<head>`.
    pub fn device_headers(&self, device: &DeviceConfiguration) -> String {
        self.device_element(device, PageStrategyElement::Header)
    }

    /// Extra markup the device needs inside `<body>`.
    pub fn device_body(&self, device: &DeviceConfiguration) -> String {
        self.device_element(device, PageStrategyElement::Body)
    }
}
