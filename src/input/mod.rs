use egui::{Context, Modifiers, PointerButton, Pos2, Rect, Response};

mod router;
pub use router::{Gesture, InputRouter, RouteOutcome};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in surface coordinates
    pub position: Pos2,
    /// Whether this position is within the surface bounds
    pub is_in_canvas: bool,
}

/// Pointer events on the drawing surface
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed over the surface
    PointerDown {
        location: InputLocation,
        modifiers: Modifiers,
    },
    /// Pointer moved while the primary button is held
    PointerMove { location: InputLocation },
    /// Primary button was released
    PointerUp { location: InputLocation },
    /// Primary button was double-clicked over the surface
    DoubleClick { location: InputLocation },
}

impl InputEvent {
    pub fn location(&self) -> InputLocation {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerMove { location }
            | InputEvent::PointerUp { location }
            | InputEvent::DoubleClick { location } => *location,
        }
    }
}

/// Converts raw egui pointer input over the canvas into [`InputEvent`]s
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    pressed: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pointer_pos: None,
            pressed: false,
        }
    }

    /// Update the canvas rectangle (e.g. if the window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Maps a screen position to surface coordinates
    pub fn make_location(&self, screen_pos: Pos2) -> InputLocation {
        InputLocation {
            position: (screen_pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(screen_pos),
        }
    }

    /// Process this frame's pointer input for the canvas widget.
    ///
    /// A press only starts a gesture when the canvas itself is hovered, so widgets
    /// drawn on top of it (like the inline text editor) keep their clicks.
    pub fn process_input(&mut self, ctx: &Context, canvas: &Response) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let pointer = &input.pointer;
            let Some(pos) = pointer.interact_pos() else {
                return;
            };

            if pointer.button_pressed(PointerButton::Primary) && canvas.hovered() {
                self.pressed = true;
                events.push(InputEvent::PointerDown {
                    location: self.make_location(pos),
                    modifiers: input.modifiers,
                });
            } else if self.pressed && Some(pos) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove {
                    location: self.make_location(pos),
                });
            }

            if self.pressed && pointer.button_released(PointerButton::Primary) {
                self.pressed = false;
                events.push(InputEvent::PointerUp {
                    location: self.make_location(pos),
                });
            }

            if canvas.double_clicked() {
                events.push(InputEvent::DoubleClick {
                    location: self.make_location(pos),
                });
            }

            self.last_pointer_pos = Some(pos);
        });

        events
    }
}
