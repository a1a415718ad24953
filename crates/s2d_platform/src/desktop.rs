//! Desktop `Platform`: winit for the window and input, gilrs for controllers, the
//! wgpu renderer for the surface.
//!
//! The run-loop belongs to `s2d_core::Window`, so the winit event loop is pumped
//! non-blockingly once per iteration instead of being handed control with `run_app`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use s2d_core::{
    Event, InputState, JoystickInfo, Key, MouseClick, NativeWindow, Platform, PlatformError,
    WindowConfig,
};
use s2d_render::WgpuRenderer;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize, Size};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::controller::Controllers;
use crate::keymap::{map_mouse_button, map_physical_key};

/// Window creation has to happen inside an event-loop callback, so requests are
/// parked here until the next pump.
#[derive(Default)]
struct PumpedApp {
    pending: Option<WindowAttributes>,
    created: Option<Result<Arc<Window>, String>>,
    window: Option<Arc<Window>>,
    input: InputState,
    events: Vec<Event>,
}

impl PumpedApp {
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attrs) = self.pending.take() {
            let result = event_loop
                .create_window(attrs)
                .map(Arc::new)
                .map_err(|e| e.to_string());
            self.created = Some(result);
        }
    }

    fn key_input(&mut self, key: Key, state: ElementState, repeat: bool) {
        match state {
            ElementState::Pressed => {
                if self.input.key_down(key) && !repeat {
                    self.events.push(Event::KeyDown(key));
                }
            }
            ElementState::Released => self.input.key_up(key),
        }
    }
}

impl ApplicationHandler for PumpedApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.events.push(Event::Quit),

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.events.push(Event::Resized {
                        width: size.width,
                        height: size.height,
                    });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = map_physical_key(event.physical_key);
                self.key_input(key, event.state, event.repeat);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_position = (position.x, position.y);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(button);
                match state {
                    ElementState::Pressed => {
                        self.input.mouse_down(button);
                        let (x, y) = self.input.mouse_pixel();
                        self.events.push(Event::MouseDown(MouseClick { x, y, button }));
                    }
                    ElementState::Released => self.input.mouse_up(button),
                }
            }

            WindowEvent::Focused(false) => self.input.release_all(),

            _ => {}
        }
    }
}

pub struct DesktopPlatform {
    event_loop: EventLoop<()>,
    app: PumpedApp,
    controllers: Controllers,
    vsync: bool,
    start: Instant,
}

impl DesktopPlatform {
    pub fn new() -> Result<Self, PlatformError> {
        let event_loop = EventLoop::new().map_err(|e| PlatformError::Init(e.to_string()))?;
        Ok(Self {
            event_loop,
            app: PumpedApp::default(),
            controllers: Controllers::new(),
            vsync: true,
            start: Instant::now(),
        })
    }

    fn pump(&mut self) -> bool {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);
        !matches!(status, PumpStatus::Exit(_))
    }
}

fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    // Without high-DPI the requested size is taken as physical pixels, so the
    // drawable matches what was asked for.
    let size: Size = if config.flags.highdpi {
        LogicalSize::new(config.width, config.height).into()
    } else {
        PhysicalSize::new(config.width, config.height).into()
    };
    let mut attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(size)
        .with_resizable(config.flags.resizable)
        .with_decorations(!config.flags.borderless);
    if config.flags.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }
    attrs
}

impl Platform for DesktopPlatform {
    type Surface = WgpuRenderer;

    fn set_vsync_hint(&mut self, enabled: bool) -> Result<(), PlatformError> {
        self.vsync = enabled;
        Ok(())
    }

    fn joystick_count(&self) -> usize {
        self.controllers.count()
    }

    fn is_game_controller(&self, index: usize) -> bool {
        self.controllers.is_game_controller(index)
    }

    fn open_game_controller(&mut self, index: usize) -> Result<String, PlatformError> {
        self.controllers.open_game_controller(index)
    }

    fn open_joystick(&mut self, index: usize) -> Result<JoystickInfo, PlatformError> {
        self.controllers.open_joystick(index)
    }

    fn create_window(
        &mut self,
        config: &WindowConfig,
    ) -> Result<NativeWindow<WgpuRenderer>, PlatformError> {
        self.app.pending = Some(window_attributes(config));
        self.app.created = None;

        // The first pump delivers `resumed`; later ones reach `about_to_wait`.
        let mut attempts = 0;
        while self.app.created.is_none() && attempts < 10 {
            if !self.pump() {
                break;
            }
            attempts += 1;
        }

        let window = match self.app.created.take() {
            Some(Ok(window)) => window,
            Some(Err(message)) => return Err(PlatformError::WindowCreation(message)),
            None => {
                self.app.pending = None;
                return Err(PlatformError::WindowCreation(
                    "event loop never became active".to_string(),
                ));
            }
        };

        let size = window.inner_size();
        log::info!(
            "Window created: {}x{} (drawable {}x{})",
            config.width,
            config.height,
            size.width,
            size.height
        );

        let surface = WgpuRenderer::new(window.clone(), self.vsync)?;
        self.app.window = Some(window);
        self.app.events.clear();
        Ok(NativeWindow {
            surface,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn destroy_window(&mut self, surface: WgpuRenderer) {
        drop(surface);
        self.app.window = None;
        self.app.input.release_all();
        // Let the OS process the close.
        self.pump();
    }

    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }

    fn poll_events(&mut self) -> Vec<Event> {
        if !self.pump() {
            self.app.events.push(Event::Quit);
        }
        self.controllers.drain(&mut self.app.events);
        std::mem::take(&mut self.app.events)
    }

    fn held_keys(&self) -> Vec<Key> {
        self.app.input.held_keys()
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.app.input.mouse_pixel()
    }
}
