//! Retained page elements with CSS-like marker classes
//!
//! Rects are in document coordinates; subtract the viewport's scroll offset to get
//! screen coordinates.

use glam::Vec2;

/// Marker added to every element tracked by the scroll reveal
pub const REVEAL_CLASS: &str = "reveal";

/// Marker added once an element has scrolled into view
pub const ACTIVE_CLASS: &str = "active";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Half-open containment: the max edges are outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// The kinds of element the page effects select on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    RecipeCard,
    MethodCard,
    FeedbackCard,
    /// `.content-section h2`
    SectionHeading,
    /// `.content-section p`
    SectionParagraph,
}

impl ElementKind {
    /// Class name (or element selector) the kind corresponds to on the page
    pub fn selector(self) -> &'static str {
        match self {
            ElementKind::RecipeCard => ".recipe-card",
            ElementKind::MethodCard => ".method-card",
            ElementKind::FeedbackCard => ".feedback-card",
            ElementKind::SectionHeading => ".content-section h2",
            ElementKind::SectionParagraph => ".content-section p",
        }
    }

    pub fn is_card(self) -> bool {
        matches!(
            self,
            ElementKind::RecipeCard | ElementKind::MethodCard | ElementKind::FeedbackCard
        )
    }
}

/// Elements that get the 3D tilt
pub const CARD_SELECTOR: &[ElementKind] = &[
    ElementKind::RecipeCard,
    ElementKind::MethodCard,
    ElementKind::FeedbackCard,
];

/// Elements that fade in on scroll
pub const REVEAL_SELECTOR: &[ElementKind] = &[
    ElementKind::RecipeCard,
    ElementKind::MethodCard,
    ElementKind::FeedbackCard,
    ElementKind::SectionHeading,
    ElementKind::SectionParagraph,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Set of marker classes; adding a present class is a no-op
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList(Vec<&'static str>);

impl ClassList {
    /// Returns `true` if the class was not present before
    pub fn add(&mut self, class: &'static str) -> bool {
        if self.contains(class) {
            false
        } else {
            self.0.push(class);
            true
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| *c == class)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    pub kind: ElementKind,
    /// Layout box in document coordinates
    pub rect: Rect,
    pub classes: ClassList,
}

/// The visible part of the document
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Document y at the top edge of the viewport
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Document-to-screen translation
    pub fn offset(&self) -> Vec2 {
        Vec2::new(0.0, -self.scroll_y)
    }

    /// Scroll by `delta` px, keeping the viewport inside a document of `document_height`
    pub fn scroll_by(&mut self, delta: f32, document_height: f32) {
        let max_scroll = (document_height - self.height).max(0.0);
        self.scroll_y = (self.scroll_y + delta).clamp(0.0, max_scroll);
    }
}

#[derive(Clone, Debug, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ElementKind, rect: Rect) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            kind,
            rect,
            classes: ClassList::default(),
        });
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementId(i), e))
    }

    /// Ids of all elements whose kind is in `selector`, in document order
    pub fn query(&self, selector: &[ElementKind]) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, e)| selector.contains(&e.kind))
            .map(|(id, _)| id)
            .collect()
    }

    /// Lowest document y covered by any element
    pub fn height(&self) -> f32 {
        self.elements
            .iter()
            .map(|e| e.rect.max.y)
            .fold(0.0, f32::max)
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.classes.contains(class))
    }

    /// Element box relative to the viewport (like `getBoundingClientRect`)
    pub fn client_rect(&self, id: ElementId, viewport: &Viewport) -> Option<Rect> {
        self.get(id).map(|e| e.rect.translate(viewport.offset()))
    }
}
