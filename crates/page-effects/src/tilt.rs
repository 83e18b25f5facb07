//! 3D hover tilt for cards
//!
//! `init_tilt` hands the card elements and the tilt configuration to a `TiltCapability`.
//! `TiltEffect` is the built-in capability: it follows the pointer over each card,
//! eases in and out over `speed` ms, and projects the tilted card back onto the screen.

use crate::element::{Document, ElementId, Rect, Viewport, CARD_SELECTOR};
use crate::transition::{ease_out_cubic, lerp_f32, Tween};
use glam::{Mat3, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Max tilt rotation (degrees)
    pub max: f32,
    /// Enter/exit transition length (ms)
    pub speed: f32,
    pub glare: bool,
    /// Max opacity of the glare
    pub max_glare: f32,
    /// Scale while hovered
    pub scale: f32,
    /// Perspective distance (px)
    pub perspective: f32,
    /// Return to rest when the pointer leaves
    pub reset: bool,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max: 15.0,
            speed: 400.0,
            glare: true,
            max_glare: 0.5,
            scale: 1.05,
            perspective: 1000.0,
            reset: true,
        }
    }
}

/// Something that can attach tilt behavior to a set of elements
pub trait TiltCapability {
    fn init(&mut self, elements: &[ElementId], config: TiltConfig);
}

/// Attach the default tilt to every card on the page
pub fn init_tilt<T: TiltCapability + ?Sized>(document: &Document, capability: &mut T) {
    let cards = document.query(CARD_SELECTOR);
    log::debug!("Initializing tilt on {} cards", cards.len());
    capability.init(&cards, TiltConfig::default());
}

/// Visual state of a tilted element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltTransform {
    /// Degrees around the horizontal axis
    pub rotate_x: f32,
    /// Degrees around the vertical axis
    pub rotate_y: f32,
    pub scale: f32,
    pub glare_opacity: f32,
    /// Degrees, 0 = glare toward the top edge, clockwise
    pub glare_angle: f32,
}

impl TiltTransform {
    pub const IDENTITY: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
        glare_opacity: 0.0,
        glare_angle: 0.0,
    };

    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        Self {
            rotate_x: lerp_f32(a.rotate_x, b.rotate_x, t),
            rotate_y: lerp_f32(a.rotate_y, b.rotate_y, t),
            scale: lerp_f32(a.scale, b.scale, t),
            glare_opacity: lerp_f32(a.glare_opacity, b.glare_opacity, t),
            // Angle only matters while glare is visible; follow the target
            glare_angle: b.glare_angle,
        }
    }

    fn rotation(&self) -> Mat3 {
        Mat3::from_rotation_x(self.rotate_x.to_radians())
            * Mat3::from_rotation_y(self.rotate_y.to_radians())
    }
}

impl Default for TiltTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Target transform for a pointer at `pointer` over `rect` (both in viewport coordinates)
pub fn tilt_for_pointer(rect: Rect, pointer: Vec2, config: &TiltConfig) -> TiltTransform {
    let size = rect.size();
    let px = ((pointer.x - rect.min.x) / size.x).clamp(0.0, 1.0);
    let py = ((pointer.y - rect.min.y) / size.y).clamp(0.0, 1.0);

    let tilt_x = config.max - px * config.max * 2.0;
    let tilt_y = py * config.max * 2.0 - config.max;

    let center = rect.center();
    let glare_angle = (pointer.x - center.x)
        .atan2(-(pointer.y - center.y))
        .to_degrees();

    TiltTransform {
        rotate_x: tilt_y,
        rotate_y: tilt_x,
        scale: config.scale,
        glare_opacity: if config.glare {
            py * config.max_glare
        } else {
            0.0
        },
        glare_angle,
    }
}

/// Project points given relative to the card center through the tilt and perspective
pub fn project_points(
    rect: Rect,
    transform: &TiltTransform,
    perspective: f32,
    local: [Vec2; 4],
) -> [Vec2; 4] {
    let center = rect.center();
    let rotation = transform.rotation();

    local.map(|p| {
        let p = rotation * Vec3::new(p.x * transform.scale, p.y * transform.scale, 0.0);
        let w = if perspective > 0.0 {
            perspective / (perspective - p.z)
        } else {
            1.0
        };
        center + Vec2::new(p.x, p.y) * w
    })
}

/// Screen-space corners of `rect` after tilt and perspective (top-left, top-right,
/// bottom-right, bottom-left)
pub fn project_quad(rect: Rect, transform: &TiltTransform, perspective: f32) -> [Vec2; 4] {
    let h = rect.size() * 0.5;
    project_points(
        rect,
        transform,
        perspective,
        [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ],
    )
}

/// Half of the card facing the glare direction, projected like the card
pub fn glare_quad(rect: Rect, transform: &TiltTransform, perspective: f32) -> [Vec2; 4] {
    let h = rect.size() * 0.5;
    let angle = transform.glare_angle.to_radians();
    let direction = Vec2::new(angle.sin(), -angle.cos());

    let local = if direction.y.abs() >= direction.x.abs() {
        let edge = h.y * direction.y.signum();
        [
            Vec2::new(-h.x, edge),
            Vec2::new(h.x, edge),
            Vec2::new(h.x, 0.0),
            Vec2::new(-h.x, 0.0),
        ]
    } else {
        let edge = h.x * direction.x.signum();
        [
            Vec2::new(edge, -h.y),
            Vec2::new(0.0, -h.y),
            Vec2::new(0.0, h.y),
            Vec2::new(edge, h.y),
        ]
    };

    project_points(rect, transform, perspective, local)
}

#[derive(Clone, Copy, Debug)]
struct TiltState {
    id: ElementId,
    current: TiltTransform,
    from: TiltTransform,
    target: TiltTransform,
    /// Restarted on every enter/leave
    ease: Tween,
    hovered: bool,
}

impl TiltState {
    fn retarget(&mut self, target: TiltTransform) {
        self.from = self.current;
        self.target = target;
        self.ease.restart();
    }
}

/// Pointer-driven tilt for the elements it was initialized with
#[derive(Clone, Debug, Default)]
pub struct TiltEffect {
    config: TiltConfig,
    states: Vec<TiltState>,
}

impl TiltEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    /// Feed the latest pointer position (viewport coordinates, `None` when outside the window)
    pub fn pointer_moved(
        &mut self,
        document: &Document,
        viewport: &Viewport,
        pointer: Option<Vec2>,
    ) {
        let config = self.config;

        for state in &mut self.states {
            let Some(rect) = document.client_rect(state.id, viewport) else {
                continue;
            };

            match pointer.filter(|p| rect.contains(*p)) {
                Some(p) => {
                    let target = tilt_for_pointer(rect, p, &config);
                    if state.hovered {
                        state.target = target;
                    } else {
                        state.hovered = true;
                        state.retarget(target);
                    }
                }
                None if state.hovered => {
                    state.hovered = false;
                    if config.reset {
                        state.retarget(TiltTransform::IDENTITY);
                    }
                }
                None => {}
            }
        }
    }

    /// Advance enter/leave transitions by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for state in &mut self.states {
            state.ease.advance(dt);
            state.current = if state.ease.is_finished() {
                state.target
            } else {
                TiltTransform::lerp(&state.from, &state.target, state.ease.progress())
            };
        }
    }

    /// Current transform of a tilted element, `None` if it has no tilt attached
    pub fn transform(&self, id: ElementId) -> Option<TiltTransform> {
        self.states.iter().find(|s| s.id == id).map(|s| s.current)
    }

    pub fn is_hovered(&self, id: ElementId) -> bool {
        self.states.iter().any(|s| s.id == id && s.hovered)
    }

    /// `true` while any element is away from its target
    pub fn is_animating(&self) -> bool {
        self.states.iter().any(|s| s.current != s.target)
    }
}

impl TiltCapability for TiltEffect {
    fn init(&mut self, elements: &[ElementId], config: TiltConfig) {
        self.config = config;
        let speed = config.speed / 1000.0;

        for &id in elements {
            if self.states.iter().any(|s| s.id == id) {
                continue;
            }
            self.states.push(TiltState {
                id,
                current: TiltTransform::IDENTITY,
                from: TiltTransform::IDENTITY,
                target: TiltTransform::IDENTITY,
                ease: Tween::finished(speed, ease_out_cubic),
                hovered: false,
            });
        }
    }
}
