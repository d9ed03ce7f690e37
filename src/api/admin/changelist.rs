//! HTML change list page for registered models

use std::fmt::Write as _;

use axum::extract::{Query, State};
use axum::response::Html;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::config::SiteSettings;
use crate::domain::admin::{ChangeList, ChangeListParams, ModelAdmin, KAT_ADMIN};

/// Escape text for use inside HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

fn hidden_input(html: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = write!(
            html,
            r#"<input type="hidden" name="{}" value="{}">"#,
            name,
            escape_html(value)
        );
    }
}

fn render_search(html: &mut String, params: &ChangeListParams) {
    html.push_str(r#"<form id="changelist-search" method="get">"#);
    let _ = write!(
        html,
        r#"<input type="text" name="q" value="{}">"#,
        escape_html(params.q.as_deref().unwrap_or_default())
    );
    hidden_input(html, "age", params.age.map(|age| age.to_string()).as_deref());
    hidden_input(html, "o", params.o.as_deref());
    html.push_str(r#"<input type="submit" value="Search"></form>"#);
}

fn render_filters(html: &mut String, list: &ChangeList, params: &ChangeListParams) {
    if list.filters.is_empty() {
        return;
    }

    html.push_str(r#"<div id="changelist-filter"><h2>Filter</h2>"#);

    for filter in &list.filters {
        let _ = write!(html, "<h3>By {}</h3><ul>", escape_html(&filter.field));

        html.push_str(if filter.selected.is_none() {
            r#"<li class="selected">"#
        } else {
            "<li>"
        });
        html.push_str(r#"<form method="get">"#);
        hidden_input(html, "q", params.q.as_deref());
        hidden_input(html, "o", params.o.as_deref());
        html.push_str(r#"<button type="submit">All</button></form></li>"#);

        for choice in &filter.choices {
            html.push_str(if filter.selected == Some(*choice) {
                r#"<li class="selected">"#
            } else {
                "<li>"
            });
            html.push_str(r#"<form method="get">"#);
            hidden_input(html, "q", params.q.as_deref());
            hidden_input(html, "o", params.o.as_deref());
            let _ = write!(
                html,
                r#"<button type="submit" name="{field}" value="{choice}">{choice}</button></form></li>"#,
                field = escape_html(&filter.field),
                choice = choice,
            );
        }

        html.push_str("</ul>");
    }

    html.push_str("</div>");
}

fn render_results(html: &mut String, list: &ChangeList) {
    html.push_str(r#"<table id="result_list"><thead><tr>"#);

    for column in &list.columns {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }

    html.push_str("</tr></thead><tbody>");

    for row in &list.rows {
        html.push_str("<tr>");

        for (i, cell) in row.cells.iter().enumerate() {
            if i == 0 {
                let _ = write!(
                    html,
                    r#"<th><a href="/admin/kats/{}">{}</a></th>"#,
                    row.id,
                    escape_html(cell)
                );
            } else {
                let _ = write!(html, "<td>{}</td>", escape_html(cell));
            }
        }

        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
}

/// Render a full change list page
pub fn render_change_list(
    admin: &ModelAdmin,
    site: &SiteSettings,
    list: &ChangeList,
    params: &ChangeListParams,
) -> String {
    let mut html = String::new();
    let site_name = escape_html(&site.site_name);

    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><title>Select {model} to change | {site} site admin</title></head><body>\
         <h1>Select {model} to change</h1>",
        model = admin.model_name,
        site = site_name,
    );

    render_search(&mut html, params);
    render_filters(&mut html, list, params);
    render_results(&mut html, list);

    let _ = write!(
        html,
        r#"<p class="paginator">{} {}</p></body></html>"#,
        list.total, admin.verbose_name_plural
    );

    html
}

/// GET /admin/kat_corner/kat/
pub async fn kat_change_list(
    State(state): State<AppState>,
    Query(params): Query<ChangeListParams>,
) -> Result<Html<String>, ApiError> {
    debug!(?params, "Admin viewing kat change list");

    let list = state
        .kat_service
        .change_list(&KAT_ADMIN, &params)
        .await
        .map_err(ApiError::from)?;

    Ok(Html(render_change_list(
        &KAT_ADMIN,
        &state.site,
        &list,
        &params,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::admin::{ChangeListRow, ListFilter};
    use crate::domain::KatId;

    fn sample_list() -> ChangeList {
        ChangeList {
            columns: vec!["name".to_string(), "age".to_string()],
            rows: vec![ChangeListRow {
                id: KatId::new(1).unwrap(),
                display: "Whiskers : 3".to_string(),
                cells: vec!["Whiskers".to_string(), "3".to_string()],
            }],
            filters: vec![ListFilter {
                field: "age".to_string(),
                choices: vec![2, 3],
                selected: Some(3),
            }],
            search: None,
            total: 1,
            limit: 100,
            offset: 0,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & <Jerry>"), "Tom &amp; &lt;Jerry&gt;");
        assert_eq!(escape_html(r#"say "hi" 'there'"#), "say &quot;hi&quot; &#x27;there&#x27;");
    }

    #[test]
    fn test_render_change_list() {
        let params = ChangeListParams {
            age: Some(3),
            ..Default::default()
        };
        let html = render_change_list(&KAT_ADMIN, &SiteSettings::default(), &sample_list(), &params);

        assert!(html.contains("<title>Select kat to change | Kat Corner site admin</title>"));
        assert!(html.contains("<th>name</th><th>age</th>"));
        assert!(html.contains(r#"<th><a href="/admin/kats/1">Whiskers</a></th><td>3</td>"#));
        assert!(html.contains("<h3>By age</h3>"));
        assert!(html.contains(
            r#"<li class="selected"><form method="get"><button type="submit" name="age" value="3">3</button>"#
        ));
        assert!(html.contains(r#"<input type="hidden" name="age" value="3">"#));
        assert!(html.contains(r#"<p class="paginator">1 kats</p>"#));
    }

    #[test]
    fn test_render_change_list_escapes_names() {
        let mut list = sample_list();
        list.rows[0].cells[0] = "<script>".to_string();

        let params = ChangeListParams {
            q: Some("\"><b>".to_string()),
            ..Default::default()
        };
        let html = render_change_list(&KAT_ADMIN, &SiteSettings::default(), &list, &params);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;b&gt;""#));
    }
}
