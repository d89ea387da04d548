//! Course taxonomy.

use serde::{Deserialize, Serialize};

use crate::course::Course;

/// A node in the course taxonomy tree.
///
/// Slugs are unique within one taxonomy snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub children: Vec<Category>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Category {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            description: None,
            children: Vec::new(),
            courses: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Category>) -> Self {
        self.children = children;
        self
    }

    /// Direct child with the given slug.
    pub fn child(&self, slug: &str) -> Option<&Category> {
        find_by_slug(&self.children, slug)
    }

    /// Sort direct children ascending by title. Equal titles keep their order.
    pub fn sort_children_by_title(&mut self) {
        self.children.sort_by(|a, b| a.title.cmp(&b.title));
    }
}

/// First category in `categories` with the given slug. Does not descend.
pub fn find_by_slug<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
    categories.iter().find(|category| category.slug == slug)
}
