// HTML page assembly for a single device.
// Strategy fragments are inserted verbatim; only the embedded config JSON is escaped.
// Output stays well-formed XML so XHTML strategies (e.g. HbbTV) parse it.

use crate::resolver::{ConfigResolver, DeviceConfiguration, PageStrategyElement};

/// All page strategy fragments resolved for one device.
#[derive(Debug, Clone, PartialEq)]
pub struct DevicePage {
    pub doc_type: String,
    pub mime_type: String,
    pub root_tag: String,
    pub headers: String,
    pub body: String,
}

impl DevicePage {
    pub fn resolve(resolver: &ConfigResolver, device: &DeviceConfiguration) -> Self {
        Self {
            doc_type: resolver.doc_type(device),
            mime_type: resolver.mime_type(device),
            root_tag: resolver.root_html_tag(device),
            headers: resolver.device_headers(device),
            body: resolver.device_body(device),
        }
    }

    pub fn element(&self, element: PageStrategyElement) -> &str {
        match element {
            PageStrategyElement::DocType => &self.doc_type,
            PageStrategyElement::MimeType => &self.mime_type,
            PageStrategyElement::RootElement => &self.root_tag,
            PageStrategyElement::Header => &self.headers,
            PageStrategyElement::Body => &self.body,
        }
    }

    /// Mimetype suitable for a `Content-Type` header (surrounding whitespace removed).
    pub fn content_type(&self) -> &str {
        self.mime_type.trim()
    }

    /// Renders the full HTML document, exposing the device configuration to
    /// client script as `window.deviceConfig`.
    pub fn render(&self, title: &str, device: &DeviceConfiguration) -> String {
        let config_json = script_safe_json(device);
        let mut html = String::with_capacity(
            256 + self.headers.len() + self.body.len() + config_json.len(),
        );

        html.push_str(&self.doc_type);
        html.push('\n');
        html.push_str(&self.root_tag);
        html.push_str("\n<head>\n<meta charset=\"utf-8\" />\n<title>");
        html.push_str(&escape_text(title));
        html.push_str("</title>\n<script>window.deviceConfig = ");
        html.push_str(&config_json);
        html.push_str(";</script>\n");
        html.push_str(&self.headers);
        html.push_str("\n</head>\n<body>\n");
        html.push_str(&self.body);
        html.push_str("\n</body>\n</html>\n");
        html
    }
}

/// Device config as JSON with no markup-significant characters, so it can neither
/// close the surrounding `<script>` element nor break an XHTML parse.
fn script_safe_json(device: &DeviceConfiguration) -> String {
    // Serializing a serde_json::Value cannot fail.
    let json = serde_json::to_string(device.as_value()).unwrap_or_else(|_| "{}".to_string());
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn html5_page() -> DevicePage {
        DevicePage {
            doc_type: "<!DOCTYPE html>".to_string(),
            mime_type: "text/html\n".to_string(),
            root_tag: "<html>".to_string(),
            headers: "<link rel=\"stylesheet\" href=\"tv.css\">".to_string(),
            body: "<div id=\"app\"></div>".to_string(),
        }
    }

    #[test]
    fn test_render_orders_fragments() {
        let device = DeviceConfiguration::from(json!({"pageStrategy": "html5"}));
        let html = html5_page().render("My TV App", &device);

        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<head>"));
        let head = html.find("<link rel").unwrap();
        let head_end = html.find("</head>").unwrap();
        let body = html.find("<div id=\"app\">").unwrap();
        assert!(head < head_end && head_end < body);
        assert!(html.ends_with("</body>\n</html>\n"));
        assert!(html.contains("<title>My TV App</title>"));
        assert!(html.contains(r#"window.deviceConfig = {"pageStrategy":"html5"};"#));
    }

    #[test]
    fn test_config_cannot_close_script() {
        let device = DeviceConfiguration::from(json!({"banner": "</script><script>alert(1)"}));
        let html = html5_page().render("t", &device);
        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains(r"\u003c/script\u003e\u003cscript\u003ealert(1)"));
    }

    #[test]
    fn test_xhtml_page_is_well_formed() {
        let page = DevicePage {
            doc_type: "<!DOCTYPE html PUBLIC \"-//HbbTV//1.1.1//EN\">".to_string(),
            mime_type: "application/vnd.hbbtv.xhtml+xml".to_string(),
            root_tag: "<html xmlns=\"http://www.w3.org/1999/xhtml\">".to_string(),
            headers: String::new(),
            body: String::new(),
        };
        let device = DeviceConfiguration::from(json!({"pageStrategy": "hbbtv", "a": "x&y"}));
        let html = page.render("t", &device);

        assert!(html.contains("<meta charset=\"utf-8\" />"));
        assert!(!html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains(r#""a":"x\u0026y""#));

        let script_start = html.find("window.deviceConfig = ").unwrap();
        let script_end = html[script_start..].find("</script>").unwrap() + script_start;
        let script = &html[script_start..script_end];
        assert!(!script.contains('&') && !script.contains('<') && !script.contains('>'));

        // The escaped JSON still decodes to the original configuration.
        let json = script
            .trim_start_matches("window.deviceConfig = ")
            .trim_end_matches(';');
        let decoded: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(&decoded, device.as_value());
    }

    #[test]
    fn test_title_escaped() {
        let device = DeviceConfiguration::from(json!({}));
        let html = html5_page().render("News & <Sport>", &device);
        assert!(html.contains("<title>News &amp; &lt;Sport&gt;</title>"));
    }

    #[test]
    fn test_content_type_trimmed() {
        assert_eq!(html5_page().content_type(), "text/html");
    }

    #[test]
    fn test_element_accessor() {
        let page = html5_page();
        for element in PageStrategyElement::ALL {
            let value = page.element(element);
            match element {
                PageStrategyElement::Body => assert_eq!(value, "<div id=\"app\"></div>"),
                PageStrategyElement::DocType => assert_eq!(value, "<!DOCTYPE html>"),
                _ => assert!(!value.is_empty()),
            }
        }
    }
}
