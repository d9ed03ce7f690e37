//! Site name resolution

/// Site name used when the embedding application does not configure one
pub const DEFAULT_SITE_NAME: &str = "Kat Corner";

/// Fixed name of this application
pub const THE_APP_NAME: &str = "Kat Corner";

/// Resolve the site name from the `THE_SITE_NAME` setting, falling back to the default
pub fn resolve_site_name(configured: Option<&str>) -> String {
    configured.unwrap_or(DEFAULT_SITE_NAME).to_string()
}

/// Display names shared by the views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub site_name: String,
    pub app_name: String,
}

impl SiteSettings {
    pub fn from_configured(the_site_name: Option<&str>) -> Self {
        Self {
            site_name: resolve_site_name(the_site_name),
            app_name: THE_APP_NAME.to_string(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self::from_configured(None)
    }
}
