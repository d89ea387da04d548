use academy_common::Category;
use async_trait::async_trait;
use serde_json::json;

use super::{CategoryService, GraphCatalog};
use crate::auth::AuthUser;
use crate::graph::GraphError;

/// Top-level categories, two levels deep, each level with its listed courses.
const CATEGORIES_QUERY: &str = r#"
MATCH (c:Category)
WHERE NOT (:Category)-[:HAS_CHILD]->(c)
WITH c ORDER BY c.order ASC, c.title ASC
RETURN c {
    .slug, .title, .description,
    courses: [(c)<-[:IN_CATEGORY]-(course:Course) WHERE NOT course.status IN $hidden | course {
        .slug, .title, .status,
        enrolled: EXISTS { (:User {sub: $sub})-[:HAS_ENROLMENT]->(:Enrolment)-[:FOR_COURSE]->(course) }
    }],
    children: [(c)-[:HAS_CHILD]->(child:Category) | child {
        .slug, .title, .description,
        courses: [(child)<-[:IN_CATEGORY]-(course:Course) WHERE NOT course.status IN $hidden | course {
            .slug, .title, .status,
            enrolled: EXISTS { (:User {sub: $sub})-[:HAS_ENROLMENT]->(:Enrolment)-[:FOR_COURSE]->(course) }
        }]
    }]
} AS category
"#;

#[async_trait]
impl CategoryService for GraphCatalog {
    async fn categories(&self, user: Option<&AuthUser>) -> Result<Vec<Category>, GraphError> {
        let params = json!({
            "hidden": self.hidden_statuses(),
            "sub": user.map(|u| u.sub.as_str()),
        });

        let rows = self.graph.read(CATEGORIES_QUERY, params).await?;
        rows.iter().map(|row| row.get_as("category")).collect()
    }
}
