//! Game controllers and joysticks through gilrs.
//!
//! Devices are indexed in enumeration order. Only the one device the window opens
//! produces events; everything else is ignored. Axis and button indices follow the
//! usual game-controller layout (left stick X/Y, right stick X/Y, triggers; face
//! buttons south/east/west/north, back, guide, start, stick clicks, shoulders, d-pad),
//! and axis values are scaled to `i16` with Y pointing down.

use gilrs::{Axis, Button, EventType, GamepadId, Gilrs, MappingSource};
use s2d_core::{ControllerEvent, Event, JoystickInfo, PlatformError};

pub struct Controllers {
    gilrs: Option<Gilrs>,
    ids: Vec<GamepadId>,
    active: Option<GamepadId>,
}

impl Controllers {
    /// Controller support is optional; without a backend no devices are reported.
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(err) => {
                log::warn!("Controller support unavailable: {err}");
                None
            }
        };
        let ids = gilrs
            .as_ref()
            .map(|g| g.gamepads().map(|(id, _)| id).collect())
            .unwrap_or_default();
        Self {
            gilrs,
            ids,
            active: None,
        }
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_game_controller(&self, index: usize) -> bool {
        let (Some(gilrs), Some(&id)) = (self.gilrs.as_ref(), self.ids.get(index)) else {
            return false;
        };
        gilrs
            .connected_gamepad(id)
            .is_some_and(|pad| pad.mapping_source() != MappingSource::None)
    }

    pub fn open_game_controller(&mut self, index: usize) -> Result<String, PlatformError> {
        let (id, name) = self.connected(index)?;
        self.active = Some(id);
        Ok(name)
    }

    pub fn open_joystick(&mut self, index: usize) -> Result<JoystickInfo, PlatformError> {
        let (id, name) = self.connected(index)?;
        let (axes, buttons) = self
            .gilrs
            .as_ref()
            .and_then(|g| g.connected_gamepad(id))
            .map(|pad| (pad.state().axes().count(), pad.state().buttons().count()))
            .unwrap_or((0, 0));
        self.active = Some(id);
        Ok(JoystickInfo {
            name,
            axes,
            buttons,
        })
    }

    fn connected(&self, index: usize) -> Result<(GamepadId, String), PlatformError> {
        let not_connected = || PlatformError::Device {
            index,
            message: "device is not connected".to_string(),
        };
        let gilrs = self.gilrs.as_ref().ok_or_else(not_connected)?;
        let id = *self.ids.get(index).ok_or_else(not_connected)?;
        let pad = gilrs.connected_gamepad(id).ok_or_else(not_connected)?;
        Ok((id, pad.name().to_string()))
    }

    /// Translate pending gilrs events from the opened device.
    pub fn drain(&mut self, out: &mut Vec<Event>) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };
        while let Some(ev) = gilrs.next_event() {
            if Some(ev.id) != self.active {
                continue;
            }
            let translated = match ev.event {
                EventType::AxisChanged(axis, value, code) => Some(ControllerEvent::Axis {
                    axis: axis_index(axis).unwrap_or(raw_index(code.into_u32())),
                    value: axis_value(value, is_vertical(axis)),
                }),
                EventType::ButtonPressed(button, code) => Some(ControllerEvent::Button {
                    button: button_index(button).unwrap_or(raw_index(code.into_u32())),
                }),
                EventType::Disconnected => {
                    log::warn!("Controller disconnected");
                    self.active = None;
                    None
                }
                _ => None,
            };
            if let Some(event) = translated {
                out.push(Event::Controller(event));
            }
        }
    }
}

impl Default for Controllers {
    fn default() -> Self {
        Self::new()
    }
}

fn axis_index(axis: Axis) -> Option<u8> {
    match axis {
        Axis::LeftStickX => Some(0),
        Axis::LeftStickY => Some(1),
        Axis::RightStickX => Some(2),
        Axis::RightStickY => Some(3),
        Axis::LeftZ => Some(4),
        Axis::RightZ => Some(5),
        _ => None,
    }
}

fn is_vertical(axis: Axis) -> bool {
    matches!(axis, Axis::LeftStickY | Axis::RightStickY | Axis::DPadY)
}

fn button_index(button: Button) -> Option<u8> {
    match button {
        Button::South => Some(0),
        Button::East => Some(1),
        Button::West => Some(2),
        Button::North => Some(3),
        Button::Select => Some(4),
        Button::Mode => Some(5),
        Button::Start => Some(6),
        Button::LeftThumb => Some(7),
        Button::RightThumb => Some(8),
        Button::LeftTrigger => Some(9),
        Button::RightTrigger => Some(10),
        Button::DPadUp => Some(11),
        Button::DPadDown => Some(12),
        Button::DPadLeft => Some(13),
        Button::DPadRight => Some(14),
        _ => None,
    }
}

fn raw_index(code: u32) -> u8 {
    (code & 0xFF) as u8
}

/// `-1.0..=1.0` to the full `i16` range. gilrs reports Y up; the window reports Y down.
fn axis_value(value: f32, vertical: bool) -> i16 {
    let v = if vertical { -value } else { value };
    if v <= -1.0 {
        i16::MIN
    } else {
        (v.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
    }
}
