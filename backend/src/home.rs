//! Homepage aggregation.
//!
//! Combines the catalog with the visitor's in-progress courses into the
//! model the `home` view renders. The catalog is required; enrolments are
//! best effort and never fail the page.

use academy_common::{find_by_slug, Category, CourseWithProgress, EnrolmentsResponse};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::catalog::{CategoryService, EnrolmentService};
use crate::graph::GraphError;

const PAGE_TITLE: &str = "Free, Self-Paced, Hands-on Online Training ";
const HERO_TITLE: &str = "Free, Self-Paced, Hands-on Online Training";
const HERO_OVERLINE: &str = "Learn with GraphAcademy";
const DESCRIPTION: &str =
    "Learn how to build, optimize and launch your Neo4j project, all from the Neo4j experts.";
const BODY_CLASSES: &str = "home transparent-nav preload";

/// Learning path highlighted in the homepage navigation.
pub const ACTIVE_PATH: &str = "developer";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hero {
    pub title: &'static str,
    pub byline: &'static str,
    pub overline: &'static str,
}

/// Render model for the `home` view.
///
/// Every field is always set; missing slices are `None`, never placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub title: &'static str,
    pub hero: Hero,
    pub description: &'static str,
    pub classes: &'static str,
    /// In-progress courses, most recently seen first.
    pub current: Vec<CourseWithProgress>,
    pub categories: Vec<Category>,
    /// `beginners` child of the `experience` category.
    pub beginners: Option<Category>,
    /// `paths` category with children sorted by title.
    pub paths: Option<Category>,
    pub certification: Option<Category>,
    pub active_path: &'static str,
}

/// Fetch and shape everything the homepage needs.
///
/// The two lookups run concurrently. Only a catalog failure is returned;
/// an enrolment failure is logged and leaves `current` empty.
pub async fn load_home_page(
    categories: &dyn CategoryService,
    enrolments: &dyn EnrolmentService,
    user: Option<&AuthUser>,
) -> Result<HomePage, GraphError> {
    let enrolled = async {
        match user {
            Some(user) => Some(enrolments.user_enrolments(&user.sub).await),
            None => None,
        }
    };

    let (catalog, enrolled) = tokio::join!(categories.categories(user), enrolled);
    let catalog = catalog?;

    let current = match enrolled {
        Some(result) => result
            .map(EnrolmentsResponse::into_enrolled)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load enrolments, rendering without them: {}", e);
                Vec::new()
            }),
        None => Vec::new(),
    };

    Ok(build_home_page(catalog, current))
}

/// Sort and slice already-fetched data into the render model.
pub fn build_home_page(mut categories: Vec<Category>, mut current: Vec<CourseWithProgress>) -> HomePage {
    // Stable, so equal timestamps keep source order; `None` sorts last.
    current.sort_by(|a, b| b.last_seen_at.cmp(&a.last_seen_at));

    if let Some(paths) = categories.iter_mut().find(|c| c.slug == "paths") {
        paths.sort_children_by_title();
    }

    let beginners = find_by_slug(&categories, "experience")
        .and_then(|experience| experience.child("beginners"))
        .cloned();
    let paths = find_by_slug(&categories, "paths").cloned();
    let certification = find_by_slug(&categories, "certification").cloned();

    HomePage {
        title: PAGE_TITLE,
        hero: Hero {
            title: HERO_TITLE,
            byline: DESCRIPTION,
            overline: HERO_OVERLINE,
        },
        description: DESCRIPTION,
        classes: BODY_CLASSES,
        current,
        categories,
        beginners,
        paths,
        certification,
        active_path: ACTIVE_PATH,
    }
}
