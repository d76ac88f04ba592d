use std::sync::{Arc, Mutex};

use eframe::egui;

use crate::runtime::SegmentationController;
use crate::segment::{Frame, InputEvent, Mode};

use super::interaction::events::{WheelAction, WheelSlices, key_events};
use super::interaction::transform::ViewTransform;

const MARKER_HALF_SIZE: f32 = 6.0;

pub struct SegmentationApp {
    controller: SegmentationController,
    transform: ViewTransform,
    wheel: WheelSlices,
    texture: Option<egui::TextureHandle>,
    frame: Option<Frame>,
    needs_refresh: bool,
    last_prompt: Option<String>,
    failure: Arc<Mutex<Option<String>>>,
    closing: bool,
}

impl SegmentationApp {
    pub fn new(controller: SegmentationController, failure: Arc<Mutex<Option<String>>>) -> Self {
        let extent = controller.extent();
        Self {
            controller,
            transform: ViewTransform::new(extent.width, extent.height),
            wheel: WheelSlices::default(),
            texture: None,
            frame: None,
            needs_refresh: true,
            last_prompt: None,
            failure,
            closing: false,
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        if self.closing {
            return;
        }
        match self.controller.dispatch(event) {
            Ok(outcome) => {
                for prompt in &outcome.prompts {
                    println!("{prompt}");
                }
                if let Some(prompt) = outcome.prompts.last() {
                    self.last_prompt = prompt.to_string().lines().next().map(str::to_string);
                }
                self.needs_refresh |= outcome.redraw;
            }
            Err(error) => self.fail(error.to_string()),
        }
    }

    fn fail(&mut self, message: String) {
        log::error!("segmentation session failed: {message}");
        eprintln!("{message}");
        if let Ok(mut slot) = self.failure.lock() {
            *slot = Some(message);
        }
        self.closing = true;
    }

    fn refresh(&mut self, ctx: &egui::Context) {
        if !self.needs_refresh || self.closing {
            return;
        }
        self.needs_refresh = false;
        let frame = match self.controller.frame() {
            Ok(frame) => frame,
            Err(error) => return self.fail(error.to_string()),
        };
        let image = egui::ColorImage::from_rgba_unmultiplied([frame.width, frame.height], &frame.rgba);
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("ct-slice", image, egui::TextureOptions::NEAREST));
            }
        }
        self.frame = Some(frame);
        ctx.request_repaint();
    }

    fn status_text(&self) -> String {
        let session = self.controller.session();
        let extent = self.controller.extent();
        let mode = match session.mode {
            Mode::Idle => "viewing",
            Mode::CollectingSeeds => "drawing",
        };
        let mut text = format!(
            "slice {}/{}  |  {mode}  |  regions {}  |  pending seeds {}",
            session.cursor + 1,
            extent.depth,
            session.regions.len(),
            session.seeds.len()
        );
        if let Some(prompt) = &self.last_prompt {
            text.push_str("  |  ");
            text.push_str(prompt);
        }
        text
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let safe_available = egui::vec2(available.x.max(1.0), available.y.max(1.0));
        let (rect, response) = ui.allocate_exact_size(safe_available, egui::Sense::click_and_drag());
        ui.painter().rect_filled(rect, 0.0, egui::Color32::from_gray(16));

        let extent = self.controller.extent();
        let (width, height) = (extent.width, extent.height);
        if !self.transform.fitted && self.frame.is_none() {
            self.transform.fit_to(rect, width, height);
        }

        let input = ui.input(|i| i.clone());
        if response.hovered() {
            for action in self.wheel.actions(&input.events) {
                match action {
                    WheelAction::Slices(delta) => self.dispatch(InputEvent::Scroll { delta }),
                    WheelAction::Zoom(step) => {
                        if let Some(pointer) = response.hover_pos() {
                            self.transform.zoom_step_at(step, rect, pointer, width, height);
                        }
                    }
                }
            }
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            self.transform
                .pan_by_screen_delta(response.drag_delta(), width, height);
        }
        if input.key_pressed(egui::Key::F) && !input.modifiers.command {
            self.transform.fit_to(rect, width, height);
        }

        let canvas = self.transform.canvas_rect(rect);
        if response.clicked_by(egui::PointerButton::Primary) {
            let data = response
                .interact_pointer_pos()
                .and_then(|pointer| self.transform.screen_to_data(canvas, pointer));
            if let Some(data) = data {
                self.dispatch(InputEvent::Click {
                    x: data.x,
                    y: data.y,
                });
            }
        }

        self.refresh(ui.ctx());
        let (Some(frame), Some(texture)) = (&self.frame, &self.texture) else {
            return;
        };
        let painter = ui.painter_at(rect);
        painter.image(
            texture.id(),
            canvas,
            self.transform.src_rect.uv_rect(frame.width, frame.height),
            egui::Color32::WHITE,
        );
        let stroke = egui::Stroke::new(2.0, egui::Color32::RED);
        for seed in &frame.markers {
            let centre = self.transform.voxel_to_screen(canvas, seed.x, seed.y);
            if !canvas.contains(centre) {
                continue;
            }
            painter.line_segment(
                [
                    centre - egui::vec2(MARKER_HALF_SIZE, 0.0),
                    centre + egui::vec2(MARKER_HALF_SIZE, 0.0),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    centre - egui::vec2(0.0, MARKER_HALF_SIZE),
                    centre + egui::vec2(0.0, MARKER_HALF_SIZE),
                ],
                stroke,
            );
        }
    }
}

impl eframe::App for SegmentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in ctx.input(key_events) {
            self.dispatch(event);
        }

        egui::TopBottomPanel::bottom("segmentation-status").show(ctx, |ui| {
            ui.label(self.status_text());
        });
        egui::CentralPanel::default().show(ctx, |ui| self.canvas_ui(ui));

        if self.closing {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
