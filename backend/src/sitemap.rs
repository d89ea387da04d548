//! Plain-text sitemap.

use academy_common::CourseStatus;
use serde_json::json;

use crate::graph::{GraphError, GraphStore, Row};

const SITEMAP_QUERY: &str = r#"
MATCH (c:Course)
RETURN 'course' AS kind, c.slug AS slug, c.status AS status
UNION ALL
MATCH (c:Category)
RETURN 'category' AS kind, c.slug AS slug, null AS status
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkKind {
    Course,
    Category,
}

/// Path of a publicly listed page, or `None` if the row should be skipped.
///
/// Courses need a status outside `negative` (and not `redirect`); a course
/// without a status is skipped. Categories are always listed.
fn listed_path(row: &Row, negative: &[CourseStatus]) -> Result<Option<String>, GraphError> {
    let Some(slug) = row.get_opt::<String>("slug")? else {
        return Ok(None);
    };

    let kind = match row.get_as::<String>("kind")?.as_str() {
        "course" => LinkKind::Course,
        "category" => LinkKind::Category,
        other => {
            return Err(GraphError::InvalidField {
                field: "kind".to_string(),
                message: format!("unexpected link kind {:?}", other),
            })
        }
    };

    Ok(match kind {
        LinkKind::Category => Some(format!("/categories/{}", slug)),
        LinkKind::Course => row
            .get_opt::<CourseStatus>("status")?
            .filter(|status| status.is_listed(negative))
            .map(|_| format!("/courses/{}", slug)),
    })
}

/// Newline-separated absolute URLs for every listed course and every category.
///
/// Order follows the query: courses first, then categories.
pub async fn generate(
    graph: &dyn GraphStore,
    base_url: &str,
    negative: &[CourseStatus],
) -> Result<String, GraphError> {
    let rows = graph.read(SITEMAP_QUERY, json!({})).await?;
    let base_url = base_url.trim_end_matches('/');

    let mut links = Vec::with_capacity(rows.len());
    for row in &rows {
        if let Some(path) = listed_path(row, negative)? {
            links.push(format!("{}{}", base_url, path));
        }
    }

    Ok(links.join("\n"))
}
