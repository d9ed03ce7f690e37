//! Public pages of the kat corner site

use axum::{extract::State, response::Html};
use tracing::debug;

use crate::config::SiteSettings;

use super::state::AppState;

/// Render the greeting page for the given site settings
pub fn render_index(site: &SiteSettings) -> String {
    format!(
        "<title>{site} - {app}</title>Hello, Kats! You're at the {site} : {app} site.",
        site = site.site_name,
        app = site.app_name,
    )
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    debug!(site = %state.site.site_name, "Rendering index");

    Html(render_index(&state.site))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index_default_site() {
        let body = render_index(&SiteSettings::default());

        assert_eq!(
            body,
            "<title>Kat Corner - Kat Corner</title>\
             Hello, Kats! You're at the Kat Corner : Kat Corner site."
        );
    }

    #[test]
    fn test_render_index_custom_site() {
        let body = render_index(&SiteSettings::from_configured(Some("Custom Corner")));

        assert!(body.contains("<title>Custom Corner - Kat Corner</title>"));
        assert!(body.contains("You're at the Custom Corner : Kat Corner site."));
    }
}
