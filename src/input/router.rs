use egui::{Pos2, Rect};

use super::InputEvent;
use crate::element::{ElementId, ElementType};
use crate::surface::DrawingSurface;

/// Marquee boxes smaller than this on both axes count as a plain click
const MIN_MARQUEE_SIZE: f32 = 3.0;

/// What the pointer is doing between press and release
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Recording a freehand stroke
    Drawing,
    /// Dragging the selection
    Moving { last: Pos2 },
    /// Dragging a selection box
    Marquee { start: Pos2, current: Pos2 },
}

/// Something the UI has to act on after routing an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Open the inline editor for this text object
    EditText(ElementId),
}

/// Turns pointer events into surface operations
#[derive(Debug, Default)]
pub struct InputRouter {
    gesture: Gesture,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// The selection box being dragged, in surface coordinates
    pub fn marquee(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::Marquee { start, current } => Some(Rect::from_two_pos(start, current)),
            _ => None,
        }
    }

    pub fn route_event(&mut self, event: &InputEvent, surface: &mut DrawingSurface) -> Option<RouteOutcome> {
        match event {
            InputEvent::PointerDown { location, modifiers } => {
                if !location.is_in_canvas {
                    return None;
                }
                let pos = location.position;

                self.gesture = if surface.drawing_mode() {
                    surface.begin_stroke(pos);
                    Gesture::Drawing
                } else {
                    match surface.select_at(pos, modifiers.shift) {
                        Some(id) if surface.selection().contains(id) && !modifiers.shift => {
                            Gesture::Moving { last: pos }
                        }
                        Some(_) => Gesture::Idle,
                        None => Gesture::Marquee {
                            start: pos,
                            current: pos,
                        },
                    }
                };
                None
            }
            InputEvent::PointerMove { location } => {
                let pos = location.position;
                match &mut self.gesture {
                    Gesture::Drawing => surface.extend_stroke(pos),
                    Gesture::Moving { last } => {
                        surface.translate_selection(pos - *last);
                        *last = pos;
                    }
                    Gesture::Marquee { current, .. } => *current = pos,
                    Gesture::Idle => {}
                }
                None
            }
            InputEvent::PointerUp { location } => {
                match std::mem::take(&mut self.gesture) {
                    Gesture::Drawing => {
                        surface.extend_stroke(location.position);
                        surface.end_stroke();
                    }
                    Gesture::Marquee { start, .. } => {
                        let rect = Rect::from_two_pos(start, location.position);
                        if rect.width() >= MIN_MARQUEE_SIZE || rect.height() >= MIN_MARQUEE_SIZE {
                            surface.select_in_rect(rect);
                        }
                    }
                    Gesture::Moving { .. } | Gesture::Idle => {}
                }
                None
            }
            InputEvent::DoubleClick { location } => {
                if surface.drawing_mode() || !location.is_in_canvas {
                    return None;
                }

                let id = surface.element_at(location.position)?;
                match surface.find_element(id) {
                    Some(ElementType::Text(_)) => Some(RouteOutcome::EditText(id)),
                    _ => None,
                }
            }
        }
    }
}
