use eframe::egui;

pub const MIN_MAGNIFICATION: f32 = 1.0 / 16.0;
pub const MAX_MAGNIFICATION: f32 = 32.0;

pub const ZOOM_LEVELS: [f32; 16] = [
    1.0 / 16.0,
    1.0 / 8.0,
    1.0 / 4.0,
    1.0 / 3.0,
    1.0 / 2.0,
    0.75,
    1.0,
    1.5,
    2.0,
    3.0,
    4.0,
    6.0,
    8.0,
    12.0,
    16.0,
    32.0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    In,
    Out,
}

/// Visible part of the slice, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SourceRect {
    pub fn full(image_width: usize, image_height: usize) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: image_width.max(1) as f32,
            height: image_height.max(1) as f32,
        }
    }

    pub fn clamp_to_image(&mut self, image_width: usize, image_height: usize) {
        let image_w = image_width.max(1) as f32;
        let image_h = image_height.max(1) as f32;

        self.width = self.width.clamp(1.0, image_w);
        self.height = self.height.clamp(1.0, image_h);
        self.x = self.x.clamp(0.0, (image_w - self.width).max(0.0));
        self.y = self.y.clamp(0.0, (image_h - self.height).max(0.0));
    }

    pub fn uv_rect(&self, image_width: usize, image_height: usize) -> egui::Rect {
        let image_w = image_width.max(1) as f32;
        let image_h = image_height.max(1) as f32;
        egui::Rect::from_min_max(
            egui::pos2(self.x / image_w, self.y / image_h),
            egui::pos2(
                (self.x + self.width) / image_w,
                (self.y + self.height) / image_h,
            ),
        )
    }
}

/// Pan and zoom of the slice view. Slice changes never touch it, so the
/// framing survives scrolling and recompositing.
#[derive(Debug, Clone)]
pub struct ViewTransform {
    pub magnification: f32,
    pub src_rect: SourceRect,
    pub fitted: bool,
}

impl ViewTransform {
    pub fn new(image_width: usize, image_height: usize) -> Self {
        Self {
            magnification: 1.0,
            src_rect: SourceRect::full(image_width, image_height),
            fitted: false,
        }
    }

    /// Screen area showing `src_rect`, centred in `available`.
    pub fn canvas_rect(&self, available: egui::Rect) -> egui::Rect {
        egui::Rect::from_center_size(
            available.center(),
            egui::vec2(
                self.src_rect.width * self.magnification,
                self.src_rect.height * self.magnification,
            ),
        )
    }

    pub fn fit_to(&mut self, available: egui::Rect, image_width: usize, image_height: usize) {
        let image_w = image_width.max(1) as f32;
        let image_h = image_height.max(1) as f32;
        self.magnification = (available.width() / image_w)
            .min(available.height() / image_h)
            .clamp(MIN_MAGNIFICATION, MAX_MAGNIFICATION);
        self.src_rect = SourceRect::full(image_width, image_height);
        self.fitted = true;
    }

    pub fn screen_to_image(
        &self,
        canvas_rect: egui::Rect,
        screen_pos: egui::Pos2,
    ) -> Option<egui::Pos2> {
        if !canvas_rect.contains(screen_pos) || self.magnification <= 0.0 {
            return None;
        }
        Some(egui::pos2(
            self.src_rect.x + (screen_pos.x - canvas_rect.min.x) / self.magnification,
            self.src_rect.y + (screen_pos.y - canvas_rect.min.y) / self.magnification,
        ))
    }

    pub fn image_to_screen(&self, canvas_rect: egui::Rect, image_pos: egui::Pos2) -> egui::Pos2 {
        egui::pos2(
            canvas_rect.min.x + (image_pos.x - self.src_rect.x) * self.magnification,
            canvas_rect.min.y + (image_pos.y - self.src_rect.y) * self.magnification,
        )
    }

    /// Pointer position in data coordinates, where pixel centres sit on integers.
    pub fn screen_to_data(
        &self,
        canvas_rect: egui::Rect,
        screen_pos: egui::Pos2,
    ) -> Option<egui::Pos2> {
        self.screen_to_image(canvas_rect, screen_pos)
            .map(|image| image - egui::vec2(0.5, 0.5))
    }

    pub fn voxel_to_screen(&self, canvas_rect: egui::Rect, x: usize, y: usize) -> egui::Pos2 {
        self.image_to_screen(canvas_rect, egui::pos2(x as f32 + 0.5, y as f32 + 0.5))
    }

    pub fn zoom_step_at(
        &mut self,
        step: ZoomStep,
        available: egui::Rect,
        pointer_screen: egui::Pos2,
        image_width: usize,
        image_height: usize,
    ) {
        let next = match step {
            ZoomStep::In => zoom_level_up(self.magnification),
            ZoomStep::Out => zoom_level_down(self.magnification),
        };
        self.set_magnification_at(available, pointer_screen, next, image_width, image_height);
    }

    /// Changes magnification while keeping the image point under the pointer
    /// at the same relative position of the visible area.
    pub fn set_magnification_at(
        &mut self,
        available: egui::Rect,
        pointer_screen: egui::Pos2,
        next_magnification: f32,
        image_width: usize,
        image_height: usize,
    ) {
        let image_w = image_width.max(1) as f32;
        let image_h = image_height.max(1) as f32;
        let next_mag = next_magnification.clamp(MIN_MAGNIFICATION, MAX_MAGNIFICATION);

        let anchor = self
            .screen_to_image(self.canvas_rect(available), pointer_screen)
            .unwrap_or(egui::pos2(
                self.src_rect.x + self.src_rect.width * 0.5,
                self.src_rect.y + self.src_rect.height * 0.5,
            ));
        let nx = ((anchor.x - self.src_rect.x) / self.src_rect.width).clamp(0.0, 1.0);
        let ny = ((anchor.y - self.src_rect.y) / self.src_rect.height).clamp(0.0, 1.0);

        let new_width = (available.width() / next_mag).clamp(1.0, image_w);
        let new_height = (available.height() / next_mag).clamp(1.0, image_h);
        self.src_rect = SourceRect {
            x: anchor.x - nx * new_width,
            y: anchor.y - ny * new_height,
            width: new_width,
            height: new_height,
        };
        self.src_rect.clamp_to_image(image_width, image_height);
        self.magnification = next_mag;
        self.fitted = false;
    }

    pub fn pan_by_screen_delta(
        &mut self,
        delta: egui::Vec2,
        image_width: usize,
        image_height: usize,
    ) {
        if self.magnification <= 0.0 {
            return;
        }
        self.src_rect.x -= delta.x / self.magnification;
        self.src_rect.y -= delta.y / self.magnification;
        self.src_rect.clamp_to_image(image_width, image_height);
    }
}

pub fn zoom_level_down(current: f32) -> f32 {
    let mut next = ZOOM_LEVELS[0];
    for level in ZOOM_LEVELS {
        if level < current {
            next = level;
        } else {
            break;
        }
    }
    next
}

pub fn zoom_level_up(current: f32) -> f32 {
    let mut next = ZOOM_LEVELS[ZOOM_LEVELS.len() - 1];
    for level in ZOOM_LEVELS.iter().rev().copied() {
        if level > current {
            next = level;
        } else {
            break;
        }
    }
    next
}
