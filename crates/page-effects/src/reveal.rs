//! Scroll-triggered reveal
//!
//! Tracked elements carry the `reveal` class from install onward and gain `active` the
//! first time their top edge rises above `viewport.height - visible_offset`. The class is
//! never removed, so an element reveals at most once.

use crate::element::{Document, ElementId, ElementKind, Viewport, ACTIVE_CLASS, REVEAL_CLASS};
use crate::transition::{ease_out, Tween};

/// Distance (px) above the viewport bottom an element's top must pass to reveal
pub const VISIBLE_OFFSET: f32 = 150.0;

#[derive(Clone, Copy, Debug)]
pub struct RevealParams {
    pub visible_offset: f32,
    /// Fade/slide duration in seconds
    pub duration: f32,
    /// How far below its layout position an unrevealed element sits (px)
    pub travel: f32,
}

impl Default for RevealParams {
    fn default() -> Self {
        Self {
            visible_offset: VISIBLE_OFFSET,
            duration: 1.0,
            travel: 50.0,
        }
    }
}

/// How a tracked element should be drawn right now
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealAppearance {
    pub opacity: f32,
    /// Downward offset from the layout position
    pub offset_y: f32,
}

/// `true` when an element whose top is at `top` (viewport coordinates) should be revealed
pub fn is_visible(top: f32, viewport_height: f32, visible_offset: f32) -> bool {
    top < viewport_height - visible_offset
}

#[derive(Clone, Copy, Debug)]
struct Tracked {
    id: ElementId,
    /// Started on activation, `None` while hidden
    fade: Option<Tween>,
}

#[derive(Clone, Debug)]
pub struct ScrollReveal {
    params: RevealParams,
    tracked: Vec<Tracked>,
}

impl ScrollReveal {
    /// Track every element matching `selector` and mark it with `reveal`
    pub fn install(
        document: &mut Document,
        selector: &[ElementKind],
        params: RevealParams,
    ) -> Self {
        let tracked: Vec<Tracked> = document
            .query(selector)
            .into_iter()
            .map(|id| {
                if let Some(element) = document.get_mut(id) {
                    element.classes.add(REVEAL_CLASS);
                }
                // Already-active elements (re-install after relayout) stay revealed
                let fade = document
                    .has_class(id, ACTIVE_CLASS)
                    .then(|| Tween::finished(params.duration, ease_out));
                Tracked { id, fade }
            })
            .collect();

        log::debug!("Scroll reveal tracking {} elements", tracked.len());

        Self { params, tracked }
    }

    pub fn tracked(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.tracked.iter().map(|t| t.id)
    }

    /// Activate every tracked element that has scrolled into view.
    ///
    /// Returns how many elements became active on this call.
    pub fn reveal_on_scroll(&mut self, document: &mut Document, viewport: &Viewport) -> usize {
        let mut revealed = 0;

        for tracked in &mut self.tracked {
            let Some(element) = document.get_mut(tracked.id) else {
                continue;
            };
            let top = element.rect.min.y - viewport.scroll_y;

            if is_visible(top, viewport.height, self.params.visible_offset)
                && element.classes.add(ACTIVE_CLASS)
            {
                tracked.fade = Some(Tween::new(self.params.duration, ease_out));
                revealed += 1;
            }
        }

        if revealed > 0 {
            log::debug!(
                "Revealed {} elements at scroll {}",
                revealed,
                viewport.scroll_y
            );
        }
        revealed
    }

    /// Advance running reveal animations by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for fade in self.tracked.iter_mut().filter_map(|t| t.fade.as_mut()) {
            fade.advance(dt);
        }
    }

    /// Appearance of a tracked element, `None` for untracked elements
    pub fn appearance(&self, id: ElementId) -> Option<RevealAppearance> {
        let tracked = self.tracked.iter().find(|t| t.id == id)?;

        let progress = tracked.fade.map_or(0.0, |fade| fade.progress());

        Some(RevealAppearance {
            opacity: progress,
            offset_y: self.params.travel * (1.0 - progress),
        })
    }

    /// `true` while any reveal animation is still running
    pub fn is_animating(&self) -> bool {
        self.tracked
            .iter()
            .any(|t| t.fade.is_some_and(|fade| !fade.is_finished()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Rect, REVEAL_SELECTOR};
    use glam::Vec2;

    fn card_at(doc: &mut Document, top: f32) -> ElementId {
        doc.push(
            ElementKind::MethodCard,
            Rect::from_min_size(Vec2::new(0.0, top), Vec2::new(200.0, 100.0)),
        )
    }

    #[test]
    fn test_visibility_threshold() {
        assert!(is_visible(50.0, 800.0, VISIBLE_OFFSET));
        assert!(!is_visible(700.0, 800.0, VISIBLE_OFFSET));
        assert!(!is_visible(650.0, 800.0, VISIBLE_OFFSET));
        assert!(is_visible(649.9, 800.0, VISIBLE_OFFSET));
    }

    #[test]
    fn test_install_marks_reveal() {
        let mut doc = Document::new();
        let card = card_at(&mut doc, 50.0);
        let reveal = ScrollReveal::install(&mut doc, REVEAL_SELECTOR, RevealParams::default());

        assert!(doc.has_class(card, REVEAL_CLASS));
        assert!(!doc.has_class(card, ACTIVE_CLASS));
        assert_eq!(reveal.tracked().count(), 1);
    }

    #[test]
    fn test_reveal_on_load() {
        let mut doc = Document::new();
        let near = card_at(&mut doc, 50.0);
        let far = card_at(&mut doc, 700.0);
        let mut reveal = ScrollReveal::install(&mut doc, REVEAL_SELECTOR, RevealParams::default());

        let viewport = Viewport::new(1200.0, 800.0);
        assert_eq!(reveal.reveal_on_scroll(&mut doc, &viewport), 1);
        assert!(doc.has_class(near, ACTIVE_CLASS));
        assert!(!doc.has_class(far, ACTIVE_CLASS));
    }

    #[test]
    fn test_reveal_is_idempotent_and_one_way() {
        let mut doc = Document::new();
        let card = card_at(&mut doc, 700.0);
        let mut reveal = ScrollReveal::install(&mut doc, REVEAL_SELECTOR, RevealParams::default());
        let mut viewport = Viewport::new(1200.0, 800.0);

        viewport.scroll_by(100.0, 2000.0);
        assert_eq!(reveal.reveal_on_scroll(&mut doc, &viewport), 1);
        assert_eq!(reveal.reveal_on_scroll(&mut doc, &viewport), 0);

        // Scrolling back up never hides it again
        viewport.scroll_by(-100.0, 2000.0);
        assert_eq!(reveal.reveal_on_scroll(&mut doc, &viewport), 0);
        assert!(doc.has_class(card, ACTIVE_CLASS));
        assert_eq!(doc.get(card).unwrap().classes.len(), 2);
    }

    #[test]
    fn test_appearance_animates_after_activation() {
        let mut doc = Document::new();
        let card = card_at(&mut doc, 10.0);
        let mut reveal = ScrollReveal::install(&mut doc, REVEAL_SELECTOR, RevealParams::default());

        let hidden = reveal.appearance(card).unwrap();
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.offset_y, 50.0);

        reveal.reveal_on_scroll(&mut doc, &Viewport::new(1200.0, 800.0));
        assert!(reveal.is_animating());
        reveal.tick(0.5);
        let halfway = reveal.appearance(card).unwrap();
        assert!(halfway.opacity > 0.5 && halfway.opacity < 1.0);

        reveal.tick(10.0);
        let done = reveal.appearance(card).unwrap();
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.offset_y, 0.0);
        assert!(!reveal.is_animating());
    }

    #[test]
    fn test_untracked_elements_have_no_appearance() {
        let mut doc = Document::new();
        let card = card_at(&mut doc, 10.0);
        let headings = [ElementKind::SectionHeading];
        let reveal = ScrollReveal::install(&mut doc, &headings, RevealParams::default());
        assert!(reveal.appearance(card).is_none());
    }
}
