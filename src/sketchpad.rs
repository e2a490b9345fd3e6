use egui::Pos2;

use crate::edit::Point;
use crate::history::History;
use crate::preview::{Preview, compute_preview};
use crate::renderer::Renderer;
use crate::surface::RenderSurface;
use crate::tool::ToolState;

/// Pointer lifecycle on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerState {
    /// Hovering or away; moves update the preview
    Idle,
    /// Dragging; moves extend the active edit
    Active,
}

/// Owns the drawing history and the live surface, and turns pointer and
/// button events into history operations.
///
/// Every event that changes anything is followed by exactly one synchronous
/// redraw of the live surface before the method returns.
#[derive(Debug)]
pub struct Sketchpad<S: RenderSurface> {
    history: History,
    tools: ToolState,
    renderer: Renderer,
    surface: S,
    hover: Option<Point>,
}

fn is_valid(point: Pos2) -> bool {
    if point.is_finite() {
        true
    } else {
        log::warn!("Dropping pointer event with non-finite position {:?}", point);
        false
    }
}

impl<S: RenderSurface> Sketchpad<S> {
    pub fn new(surface: S, tools: ToolState) -> Self {
        let mut pad = Self {
            history: History::new(),
            tools,
            renderer: Renderer::new(),
            surface,
            hover: None,
        };
        pad.redraw();
        pad
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn pointer_state(&self) -> PointerState {
        if self.history.is_active() {
            PointerState::Active
        } else {
            PointerState::Idle
        }
    }

    /// The hover overlay currently on the surface, if any
    pub fn preview(&self) -> Option<Preview> {
        match (self.pointer_state(), self.hover) {
            (PointerState::Idle, Some(at)) => Some(compute_preview(at, &self.tools)),
            _ => None,
        }
    }

    /// Increases by one on every redraw of the live surface
    pub fn revision(&self) -> u64 {
        self.renderer.frames()
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        if !is_valid(point) {
            return;
        }
        let edit = self.tools.create_edit(point);
        let kind = edit.kind();
        if let Some(handle) = self.history.begin(edit) {
            log::debug!("Began {} #{} at {:?}", kind, handle.index(), point);
            self.hover = None;
            self.redraw();
        }
    }

    pub fn on_pointer_move(&mut self, point: Point) {
        if !is_valid(point) {
            return;
        }
        match self.pointer_state() {
            PointerState::Active => {
                if self.history.extend(point) {
                    self.redraw();
                }
            }
            PointerState::Idle => {
                self.hover = Some(point);
                self.redraw();
            }
        }
    }

    pub fn on_pointer_up(&mut self) {
        if self.history.end() {
            self.redraw();
        }
    }

    /// Ends any drag and removes the hover preview
    pub fn on_pointer_leave(&mut self) {
        let ended = self.history.end();
        let had_hover = self.hover.take().is_some();
        if ended || had_hover {
            self.redraw();
        }
    }

    pub fn undo(&mut self) {
        if self.history.undo() {
            self.redraw();
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo() {
            self.redraw();
        }
    }

    pub fn clear(&mut self) {
        if self.history.clear() {
            log::info!("Canvas cleared");
            self.redraw();
        }
    }

    /// Change the tool selection and refresh the hover preview to match
    pub fn with_tools<R>(&mut self, change: impl FnOnce(&mut ToolState) -> R) -> R {
        let result = change(&mut self.tools);
        if self.hover.is_some() {
            self.redraw();
        }
        result
    }

    /// Switch to sticker mode, refusing glyphs the live surface has no face for
    pub fn select_sticker(&mut self, glyph: &str) -> bool {
        if !self.surface.can_draw_glyph(glyph) {
            log::warn!("No font face can draw sticker {:?}", glyph);
            return false;
        }
        self.with_tools(|t| t.select_sticker(glyph))
    }

    /// Replays the committed drawing into another surface, scaled so that the
    /// live width maps onto the target width. History is left untouched.
    pub fn export_into(&self, target: &mut dyn RenderSurface) {
        let scale = target.width() as f32 / self.surface.width() as f32;
        log::debug!(
            "Exporting {} edits to {}x{} at scale {}",
            self.history.past().len(),
            target.width(),
            target.height(),
            scale
        );
        Renderer::replay(target, self.history.past(), scale);
    }

    fn redraw(&mut self) {
        let preview = self.preview();
        self.renderer
            .redraw_with_overlay(&mut self.surface, self.history.past(), preview.as_ref());
    }
}
