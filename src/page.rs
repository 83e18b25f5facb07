//! Demo page drawn over the particle field
//!
//! A hero gap followed by three content sections, each with a heading, a paragraph and a
//! grid of cards. Cards tilt under the pointer and every block fades in on scroll.

use field_core::{Canvas, Color, Theme};
use glam::Vec2;
use page_effects::{
    glare_quad, init_tilt, project_points, project_quad, Document, ElementId, ElementKind,
    Rect, RevealAppearance, RevealParams, ScrollReveal, TiltEffect, TiltTransform, Viewport,
    ACTIVE_CLASS, REVEAL_SELECTOR,
};

const MARGIN: f32 = 48.0;
const MAX_CONTENT_WIDTH: f32 = 1100.0;
const MIN_CARD_WIDTH: f32 = 260.0;
const MAX_COLUMNS: usize = 3;

const HERO_HEIGHT: f32 = 420.0;
const HEADING_HEIGHT: f32 = 40.0;
const PARAGRAPH_HEIGHT: f32 = 48.0;
const BLOCK_GAP: f32 = 24.0;
const CARD_GAP: f32 = 24.0;
const SECTION_GAP: f32 = 120.0;
const BOTTOM_PADDING: f32 = 160.0;

const CARD_ACCENT_HEIGHT: f32 = 8.0;
const CARD_PADDING: f32 = 20.0;
const CARD_TITLE_HEIGHT: f32 = 14.0;
const TEXT_LINE_HEIGHT: f32 = 10.0;

struct Section {
    card: ElementKind,
    cards: usize,
    card_height: f32,
}

const SECTIONS: [Section; 3] = [
    Section {
        card: ElementKind::RecipeCard,
        cards: 6,
        card_height: 220.0,
    },
    Section {
        card: ElementKind::MethodCard,
        cards: 3,
        card_height: 160.0,
    },
    Section {
        card: ElementKind::FeedbackCard,
        cards: 3,
        card_height: 140.0,
    },
];

/// Element boxes for a viewport `width` px wide, in document order
pub fn layout(width: f32) -> Vec<(ElementKind, Rect)> {
    let content_width = (width - 2.0 * MARGIN)
        .min(MAX_CONTENT_WIDTH)
        .max(MIN_CARD_WIDTH);
    let left = ((width - content_width) * 0.5).max(0.0);
    let columns = (((content_width + CARD_GAP) / (MIN_CARD_WIDTH + CARD_GAP)) as usize)
        .clamp(1, MAX_COLUMNS);
    let card_width = (content_width - CARD_GAP * (columns - 1) as f32) / columns as f32;

    // Full content-width block starting at `top`
    let band = |top: f32, height: f32| {
        Rect::from_min_size(Vec2::new(left, top), Vec2::new(content_width, height))
    };

    let mut boxes = Vec::new();
    let mut y = HERO_HEIGHT;

    for section in &SECTIONS {
        boxes.push((ElementKind::SectionHeading, band(y, HEADING_HEIGHT)));
        y += HEADING_HEIGHT + BLOCK_GAP;

        boxes.push((ElementKind::SectionParagraph, band(y, PARAGRAPH_HEIGHT)));
        y += PARAGRAPH_HEIGHT + BLOCK_GAP;

        for i in 0..section.cards {
            let column = i % columns;
            let row = i / columns;
            let min = Vec2::new(
                left + column as f32 * (card_width + CARD_GAP),
                y + row as f32 * (section.card_height + CARD_GAP),
            );
            boxes.push((
                section.card,
                Rect::from_min_size(min, Vec2::new(card_width, section.card_height)),
            ));
        }

        let rows = section.cards.div_ceil(columns);
        y += rows as f32 * (section.card_height + CARD_GAP) - CARD_GAP + SECTION_GAP;
    }

    boxes
}

fn accent_index(kind: ElementKind) -> usize {
    match kind {
        ElementKind::MethodCard => 1,
        ElementKind::FeedbackCard => 2,
        _ => 0,
    }
}

/// Fully revealed, for elements the scroll reveal does not track
const SHOWN: RevealAppearance = RevealAppearance {
    opacity: 1.0,
    offset_y: 0.0,
};

pub struct Page {
    document: Document,
    viewport: Viewport,
    reveal: ScrollReveal,
    tilt: TiltEffect,
    pointer: Option<Vec2>,
}

impl Page {
    /// Lay out the page, attach tilt and reveal, and reveal what is already in view
    pub fn new(width: f32, height: f32) -> Self {
        let mut document = Document::new();
        for (kind, rect) in layout(width) {
            document.push(kind, rect);
        }

        let mut tilt = TiltEffect::new();
        init_tilt(&document, &mut tilt);

        let mut reveal =
            ScrollReveal::install(&mut document, REVEAL_SELECTOR, RevealParams::default());
        let viewport = Viewport::new(width, height);
        let revealed = reveal.reveal_on_scroll(&mut document, &viewport);
        log::info!(
            "Page laid out: {} elements, {} revealed on load",
            document.len(),
            revealed
        );

        Self {
            document,
            viewport,
            reveal,
            tilt,
            pointer: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// (revealed, tracked) element counts
    pub fn reveal_progress(&self) -> (usize, usize) {
        let tracked = self.reveal.tracked().count();
        let revealed = self
            .reveal
            .tracked()
            .filter(|id| self.document.has_class(*id, ACTIVE_CLASS))
            .count();
        (revealed, tracked)
    }

    /// Relayout for a new viewport size. Element identity and classes survive.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;

        for (i, (_, rect)) in layout(width).into_iter().enumerate() {
            if let Some(element) = self.document.get_mut(ElementId(i)) {
                element.rect = rect;
            }
        }

        self.viewport.scroll_by(0.0, self.document_height());
        self.tilt
            .pointer_moved(&self.document, &self.viewport, self.pointer);
    }

    fn document_height(&self) -> f32 {
        self.document.height() + BOTTOM_PADDING
    }

    /// Scroll by `delta` px and reveal anything that came into view.
    ///
    /// Returns how many elements were revealed.
    pub fn scroll_by(&mut self, delta: f32) -> usize {
        self.viewport.scroll_by(delta, self.document_height());
        let revealed = self
            .reveal
            .reveal_on_scroll(&mut self.document, &self.viewport);

        // Content moved under a stationary pointer
        self.tilt
            .pointer_moved(&self.document, &self.viewport, self.pointer);
        revealed
    }

    pub fn pointer_moved(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
        self.tilt
            .pointer_moved(&self.document, &self.viewport, pointer);
    }

    pub fn tick(&mut self, dt: f32) {
        self.reveal.tick(dt);
        self.tilt.tick(dt);
    }

    /// `true` while a reveal or tilt transition still needs frames
    pub fn is_animating(&self) -> bool {
        self.reveal.is_animating() || self.tilt.is_animating()
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, theme: Theme) {
        for (id, element) in self.document.iter() {
            let appearance = self.reveal.appearance(id).unwrap_or(SHOWN);
            if appearance.opacity <= 0.0 {
                continue;
            }

            let rect = element
                .rect
                .translate(self.viewport.offset() + Vec2::new(0.0, appearance.offset_y));
            if rect.max.y < 0.0 || rect.min.y > self.viewport.height {
                continue;
            }

            match element.kind {
                ElementKind::SectionHeading => {
                    let max = Vec2::new(rect.min.x + rect.width() * 0.4, rect.max.y);
                    canvas.fill_rect(rect.min, max, theme.text().fade(appearance.opacity));
                }
                ElementKind::SectionParagraph => {
                    let color = theme.subtext().fade(appearance.opacity);
                    let line = rect.height() / 3.0;
                    canvas.fill_rect(rect.min, Vec2::new(rect.max.x, rect.min.y + line), color);
                    canvas.fill_rect(
                        Vec2::new(rect.min.x, rect.min.y + 2.0 * line),
                        Vec2::new(rect.min.x + rect.width() * 0.65, rect.max.y),
                        color,
                    );
                }
                kind => {
                    let accent = theme.accents()[accent_index(kind)];
                    self.draw_card(canvas, id, rect, accent, theme, appearance.opacity);
                }
            }
        }
    }

    fn draw_card<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        id: ElementId,
        rect: Rect,
        accent: Color,
        theme: Theme,
        opacity: f32,
    ) {
        let transform = self.tilt.transform(id).unwrap_or(TiltTransform::IDENTITY);
        let perspective = self.tilt.config().perspective;
        let h = rect.size() * 0.5;

        // Card-local bar from (x0, y0) to (x1, y1), measured from the top-left corner
        let bar = |x0: f32, y0: f32, x1: f32, y1: f32| {
            project_points(
                rect,
                &transform,
                perspective,
                [
                    Vec2::new(x0 - h.x, y0 - h.y),
                    Vec2::new(x1 - h.x, y0 - h.y),
                    Vec2::new(x1 - h.x, y1 - h.y),
                    Vec2::new(x0 - h.x, y1 - h.y),
                ],
            )
        };

        canvas.fill_quad(
            project_quad(rect, &transform, perspective),
            theme.surface().fade(opacity),
        );
        canvas.fill_quad(
            bar(0.0, 0.0, rect.width(), CARD_ACCENT_HEIGHT),
            accent.fade(opacity),
        );

        let title_top = CARD_ACCENT_HEIGHT + CARD_PADDING;
        canvas.fill_quad(
            bar(
                CARD_PADDING,
                title_top,
                CARD_PADDING + (rect.width() - 2.0 * CARD_PADDING) * 0.6,
                title_top + CARD_TITLE_HEIGHT,
            ),
            theme.text().fade(opacity),
        );

        let mut line_top = title_top + CARD_TITLE_HEIGHT + CARD_PADDING;
        while line_top + TEXT_LINE_HEIGHT < rect.height() - CARD_PADDING {
            canvas.fill_quad(
                bar(
                    CARD_PADDING,
                    line_top,
                    rect.width() - CARD_PADDING,
                    line_top + TEXT_LINE_HEIGHT,
                ),
                theme.subtext().fade(opacity * 0.6),
            );
            line_top += TEXT_LINE_HEIGHT * 2.0;
        }

        if transform.glare_opacity > 0.0 {
            canvas.fill_quad(
                glare_quad(rect, &transform, perspective),
                Color::rgba(255, 255, 255, transform.glare_opacity * opacity),
            );
        }
    }
}
