use academy_common::{CourseWithProgress, EnrolmentsResponse, UserEnrolments};
use async_trait::async_trait;
use serde_json::json;

use super::{EnrolmentService, GraphCatalog};
use crate::graph::GraphError;

const ENROLMENTS_QUERY: &str = r#"
MATCH (:User {sub: $sub})-[:HAS_ENROLMENT]->(e:Enrolment)-[:FOR_COURSE]->(c:Course)
WHERE NOT c.status IN $hidden
RETURN CASE WHEN e:CompletedEnrolment THEN 'completed' ELSE 'enrolled' END AS group,
    c {
        .slug, .title, .status,
        enrolled: true,
        lastSeenAt: e.lastSeenAt.epochMillis,
        completedPercentage: toInteger(coalesce(e.percentage, 0))
    } AS course
"#;

#[async_trait]
impl EnrolmentService for GraphCatalog {
    async fn user_enrolments(&self, sub: &str) -> Result<EnrolmentsResponse, GraphError> {
        let params = json!({
            "sub": sub,
            "hidden": self.hidden_statuses(),
        });

        let rows = self.graph.read(ENROLMENTS_QUERY, params).await?;

        let mut enrolled: Option<Vec<CourseWithProgress>> = None;
        let mut completed: Option<Vec<CourseWithProgress>> = None;

        for row in &rows {
            let group: String = row.get_as("group")?;
            let course: CourseWithProgress = row.get_as("course")?;
            match group.as_str() {
                "completed" => completed.get_or_insert_with(Vec::new).push(course),
                _ => enrolled.get_or_insert_with(Vec::new).push(course),
            }
        }

        Ok(EnrolmentsResponse {
            enrolments: UserEnrolments {
                enrolled,
                completed,
            },
        })
    }
}
