//! Page feedback storage.

use academy_common::FeedbackRequest;
use serde_json::json;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::graph::{GraphError, GraphStore};

const RECORD_FEEDBACK: &str = r#"
CREATE (f:Feedback {
    id: $id,
    page: $page,
    helpful: $helpful,
    reason: $reason,
    additional: $additional,
    createdAt: datetime()
})
WITH f
OPTIONAL MATCH (u:User {sub: $sub})
FOREACH (author IN CASE WHEN u IS NULL THEN [] ELSE [u] END |
    MERGE (author)-[:PROVIDED_FEEDBACK]->(f)
)
RETURN f.id AS id
"#;

/// Normalise the page part of a `<page>/feedback` path.
///
/// Trailing slashes are dropped so `/courses/x/` and `/courses/x` match;
/// the site root stays `/`.
pub fn page_key(page: &str) -> &str {
    let trimmed = page.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Store one feedback entry and return its id.
///
/// Signed-in readers are linked to their feedback; anonymous feedback is
/// stored unlinked.
pub async fn record(
    graph: &dyn GraphStore,
    page: &str,
    user: Option<&AuthUser>,
    feedback: &FeedbackRequest,
) -> Result<Uuid, GraphError> {
    let id = Uuid::new_v4();
    let params = json!({
        "id": id.to_string(),
        "page": page_key(page),
        "helpful": feedback.helpful,
        "reason": feedback.reason.map(|r| r.as_str()),
        "additional": feedback.additional,
        "sub": user.map(|u| u.sub.as_str()),
    });

    graph.write(RECORD_FEEDBACK, params).await?;
    tracing::info!(page = %page_key(page), helpful = feedback.helpful, "Recorded feedback {}", id);
    Ok(id)
}
