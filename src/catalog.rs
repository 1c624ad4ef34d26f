//! Suggested header catalog offered during interactive entry

/// HTTP methods offered by the prompt layer. The core treats the method as
/// an opaque string, so this list only bounds what the menus display.
pub const METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

/// One suggested header name with its common values.
#[derive(Clone, Debug)]
pub struct HeaderSuggestion {
    pub name: &'static str,
    pub values: &'static [&'static str],
}

/// Catalog of suggested header names and values.
///
/// Owned by the session layer as plain configuration data; requests accept
/// any header the user types, suggested or not.
#[derive(Clone, Debug)]
pub struct HeaderCatalog {
    pub entries: Vec<HeaderSuggestion>,
}

impl Default for HeaderCatalog {
    fn default() -> Self {
        HeaderCatalog {
            entries: vec![
                HeaderSuggestion {
                    name: "Content-Type",
                    values: &[
                        "application/json",
                        "application/x-www-form-urlencoded",
                        "text/plain",
                    ],
                },
                HeaderSuggestion {
                    name: "Accept",
                    values: &["*/*", "application/json", "text/plain"],
                },
                HeaderSuggestion {
                    name: "Accept-Language",
                    values: &["fr-FR", "en-US", "es-ES"],
                },
                HeaderSuggestion {
                    name: "Authorization",
                    values: &["Bearer ", "Basic "],
                },
                HeaderSuggestion {
                    name: "Cache-Control",
                    values: &["no-cache", "no-store", "max-age=0"],
                },
                HeaderSuggestion {
                    name: "User-Agent",
                    values: &["Mozilla/5.0", "curl/8.5.0", "curlsmith"],
                },
            ],
        }
    }
}
