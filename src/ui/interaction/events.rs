use eframe::egui;

use crate::segment::{InputEvent, Key};

use super::transform::ZoomStep;

pub fn key_for(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::D => Some(Key::ToggleDrawing),
        egui::Key::Enter => Some(Key::CommitRegion),
        egui::Key::Escape => Some(Key::Cancel),
        egui::Key::S => Some(Key::Save),
        _ => None,
    }
}

/// Fresh presses of mapped keys, in arrival order.
pub fn key_events(input: &egui::InputState) -> Vec<InputEvent> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                modifiers,
                ..
            } if !modifiers.command && !modifiers.ctrl => key_for(*key).map(InputEvent::Key),
            _ => None,
        })
        .collect()
}

/// Pixel-precise (touchpad) scrolling needed to move one slice.
pub const POINTS_PER_SLICE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelAction {
    Slices(i32),
    Zoom(ZoomStep),
}

/// Turns raw wheel events into whole slice steps; wheel up moves deeper.
///
/// Line and page units count one slice per notch. Point units are
/// accumulated until they add up to whole slices, so touchpads do not race.
#[derive(Debug, Default)]
pub struct WheelSlices {
    pending: f32,
}

impl WheelSlices {
    pub fn actions(&mut self, events: &[egui::Event]) -> Vec<WheelAction> {
        let mut actions = Vec::new();
        for event in events {
            let egui::Event::MouseWheel {
                unit,
                delta,
                modifiers,
            } = event
            else {
                continue;
            };
            if modifiers.ctrl || modifiers.command {
                if delta.y > 0.0 {
                    actions.push(WheelAction::Zoom(ZoomStep::In));
                } else if delta.y < 0.0 {
                    actions.push(WheelAction::Zoom(ZoomStep::Out));
                }
                continue;
            }
            self.pending += match unit {
                egui::MouseWheelUnit::Point => delta.y / POINTS_PER_SLICE,
                egui::MouseWheelUnit::Line | egui::MouseWheelUnit::Page => delta.y,
            };
            let whole = self.pending.trunc();
            if whole != 0.0 {
                self.pending -= whole;
                actions.push(WheelAction::Slices(whole as i32));
            }
        }
        actions
    }
}
