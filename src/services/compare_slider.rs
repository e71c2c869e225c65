/// Horizontal extent of the tracked container, in the same coordinate
/// space as incoming pointer positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub left: f32,
    pub width: f32,
}

/// What a renderer needs to draw one comparison frame: the original as the
/// base layer, the processed image blended above it, and a copy of the
/// original clipped to the left of the reveal boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareFrame {
    /// Opacity of the processed overlay, passed through from the caller.
    pub effect_opacity: f32,
    /// Left percentage of the container showing the unblended original.
    pub original_clip_percent: f32,
    /// Where to draw the drag handle, as a percentage from the left.
    pub handle_percent: f32,
}

/// Pointer-tracked reveal boundary over two stacked image layers.
///
/// `Idle -> Dragging` on pointer-down (the boundary jumps to the pointer
/// immediately), `Dragging -> Dragging` on move, `Dragging -> Idle` on
/// pointer-up or on the pointer leaving the container. Touch input feeds
/// the same three transitions. Reusable indefinitely; there is no terminal
/// state.
#[derive(Debug)]
pub struct CompareSliderController {
    /// Reveal boundary as a percentage from the left edge, in [0, 100].
    reveal_position: f32,
    dragging: bool,
}

impl CompareSliderController {
    pub fn new() -> Self {
        Self {
            reveal_position: 50.0,
            dragging: false,
        }
    }

    pub fn reveal_position(&self) -> f32 {
        self.reveal_position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer or touch down: start dragging and reposition immediately.
    pub fn pointer_down(&mut self, client_x: f32, bounds: ContainerBounds) {
        self.dragging = true;
        self.update_position(client_x, bounds);
    }

    /// Pointer or touch move: reposition only while dragging.
    pub fn pointer_move(&mut self, client_x: f32, bounds: ContainerBounds) {
        if self.dragging {
            self.update_position(client_x, bounds);
        }
    }

    /// Pointer or touch up: stop dragging, keep the boundary where it is.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// The pointer left the tracked area; same effect as a release.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// The rendering contract for the current state. `blend_opacity` is
    /// owned by the caller and passed through untouched.
    pub fn frame(&self, blend_opacity: f32) -> CompareFrame {
        CompareFrame {
            effect_opacity: blend_opacity,
            original_clip_percent: self.reveal_position,
            handle_percent: self.reveal_position,
        }
    }

    fn update_position(&mut self, client_x: f32, bounds: ContainerBounds) {
        if bounds.width <= 0.0 {
            return;
        }
        let x = (client_x - bounds.left).clamp(0.0, bounds.width);
        self.reveal_position = (x / bounds.width) * 100.0;
    }
}

impl Default for CompareSliderController {
    fn default() -> Self {
        Self::new()
    }
}
