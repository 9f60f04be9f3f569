//! Narrow query layer over parsed HTML
//!
//! The extractors only need four operations from a parsed document: find
//! the first element by tag and class, find all such elements, read an
//! element's text and read an attribute. [`DocumentQuery`] exposes exactly
//! that over `scraper`, for both whole documents and fragments.

mod class_filter;

pub use class_filter::ClassFilter;

use scraper::{ElementRef, Html};

/// Find-by-tag/class capability shared by documents and fragments
pub trait DocumentQuery {
    /// Returns every matching element below this node, in document order
    fn find_all(&self, tag: &str, filter: &ClassFilter) -> Vec<ElementRef<'_>>;

    /// Returns the first matching element below this node
    fn find_first(&self, tag: &str, filter: &ClassFilter) -> Option<ElementRef<'_>>;
}

impl DocumentQuery for Html {
    fn find_all(&self, tag: &str, filter: &ClassFilter) -> Vec<ElementRef<'_>> {
        let root = self.root_element();
        std::iter::once(root)
            .chain(descendant_elements(root))
            .filter(|element| matches(element, tag, filter))
            .collect()
    }

    fn find_first(&self, tag: &str, filter: &ClassFilter) -> Option<ElementRef<'_>> {
        let root = self.root_element();
        std::iter::once(root)
            .chain(descendant_elements(root))
            .find(|element| matches(element, tag, filter))
    }
}

impl<'a> DocumentQuery for ElementRef<'a> {
    fn find_all(&self, tag: &str, filter: &ClassFilter) -> Vec<ElementRef<'_>> {
        descendant_elements(*self)
            .filter(|element| matches(element, tag, filter))
            .collect()
    }

    fn find_first(&self, tag: &str, filter: &ClassFilter) -> Option<ElementRef<'_>> {
        descendant_elements(*self).find(|element| matches(element, tag, filter))
    }
}

/// Returns the element's text content with surrounding whitespace removed
pub fn text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Returns an attribute value, treating an empty value as absent
pub fn attribute<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name).filter(|value| !value.is_empty())
}

/// Strict descendants of `root` that are elements
fn descendant_elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants().skip(1).filter_map(ElementRef::wrap)
}

fn matches(element: &ElementRef<'_>, tag: &str, filter: &ClassFilter) -> bool {
    element.value().name().eq_ignore_ascii_case(tag)
        && filter.matches(element.value().attr("class"))
}
