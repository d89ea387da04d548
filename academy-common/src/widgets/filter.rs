//! Course filter toggle.

/// Class applied to a filter container while its options are shown.
pub const COURSE_FILTERS_VISIBLE: &str = "course-filters--visible";

/// Ordered set of CSS class names on one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    /// Parse a `class` attribute value.
    pub fn parse(attr: &str) -> Self {
        let mut list = Self::default();
        for class in attr.split_whitespace() {
            list.add(class);
        }
        list
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Flip `class` and return whether it is now present.
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.contains(class) {
            self.remove(class);
            false
        } else {
            self.add(class);
            true
        }
    }

    /// Render back to a `class` attribute value.
    pub fn to_attr(&self) -> String {
        self.classes.join(" ")
    }
}

/// Click handler for `.course-filter-title`: shows or hides the filters in
/// the title's parent container.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterToggle;

impl FilterToggle {
    /// Toggle visibility on the parent's classes. Returns whether the
    /// filters are now visible.
    pub fn toggle(&self, parent: &mut ClassList) -> bool {
        parent.toggle(COURSE_FILTERS_VISIBLE)
    }
}
