//! The window and its run-loop.
//!
//! `Window::show` blocks until the window is closed. Each iteration clears the frame,
//! paces to the fps cap, drains input events into the registered handlers, samples
//! held keys and the mouse, then runs `update` and `render` before presenting.
//! Callbacks get a `Frame`, which borrows the window state and the render backend for
//! the duration of the call.

use std::time::Duration;

use crate::backend::RenderBackend;
use crate::color::Color;
use crate::config::{WindowConfig, WindowFlags};
use crate::diagnostics;
use crate::error::WindowError;
use crate::input::{ControllerEvent, Event, Key, MouseClick};
use crate::platform::Platform;
use crate::time::{FramePacer, FrameTiming};
use crate::viewport::{scale_axis, ViewSpec, ViewportMode};

/// Mouse position sampled once per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MousePosition {
    /// Logical coordinates, in the requested window size.
    pub x: i32,
    pub y: i32,
    /// Drawable coordinates as the platform reported them.
    pub real_x: i32,
    pub real_y: i32,
}

/// Everything about a window that callbacks may read or adjust.
#[derive(Debug)]
pub struct WindowState {
    title: String,
    orig_width: u32,
    orig_height: u32,
    width: u32,
    height: u32,
    viewport: ViewportMode,
    pub background: Color,
    /// Target iterations per second; 0 runs uncapped.
    pub fps_cap: u32,
    vsync: bool,
    close: bool,
    timing: FrameTiming,
    mouse: MousePosition,
    controller: Option<usize>,
}

impl WindowState {
    fn from_config(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            orig_width: config.width,
            orig_height: config.height,
            width: config.width,
            height: config.height,
            viewport: config.viewport,
            background: config.background,
            fps_cap: config.fps_cap,
            vsync: config.vsync,
            close: true,
            timing: FrameTiming::default(),
            mouse: MousePosition::default(),
            controller: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Size the application asked for.
    pub fn requested_size(&self) -> (u32, u32) {
        (self.orig_width, self.orig_height)
    }

    /// Drawable size the platform produced, updated on resize.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn viewport_mode(&self) -> ViewportMode {
        self.viewport
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    pub fn is_closing(&self) -> bool {
        self.close
    }

    /// Ask the loop to stop after the current iteration. Idempotent.
    pub fn close(&mut self) {
        if !self.close {
            log::info!("Closing window");
            self.close = true;
        }
    }

    pub fn frames(&self) -> u64 {
        self.timing.frames
    }

    pub fn elapsed(&self) -> Duration {
        self.timing.elapsed
    }

    pub fn loop_time(&self) -> Duration {
        self.timing.loop_time
    }

    pub fn delay(&self) -> Duration {
        self.timing.delay
    }

    pub fn fps(&self) -> f64 {
        self.timing.fps
    }

    pub fn smoothed_fps(&self) -> f64 {
        self.timing.smoothed_fps
    }

    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    pub fn mouse(&self) -> MousePosition {
        self.mouse
    }

    /// Index of the controller or joystick opened by the last `show`.
    pub fn controller(&self) -> Option<usize> {
        self.controller
    }

    pub fn view_spec(&self) -> ViewSpec {
        ViewSpec {
            orig_width: self.orig_width,
            orig_height: self.orig_height,
            width: self.width,
            height: self.height,
            mode: self.viewport,
        }
    }

    fn sample_mouse(&mut self, (real_x, real_y): (i32, i32)) {
        self.mouse = MousePosition {
            x: scale_axis(real_x, self.orig_width, self.width),
            y: scale_axis(real_y, self.orig_height, self.height),
            real_x,
            real_y,
        };
    }
}

/// What a callback gets to work with during one invocation.
pub struct Frame<'a> {
    window: &'a mut WindowState,
    renderer: &'a mut dyn RenderBackend,
}

impl<'a> Frame<'a> {
    pub fn window(&self) -> &WindowState {
        &*self.window
    }

    pub fn window_mut(&mut self) -> &mut WindowState {
        &mut *self.window
    }

    pub fn renderer(&mut self) -> &mut (dyn RenderBackend + 'a) {
        &mut *self.renderer
    }

    pub fn close(&mut self) {
        self.window.close();
    }
}

type Callback = Box<dyn FnMut(&mut Frame<'_>)>;
type KeyCallback = Box<dyn FnMut(&mut Frame<'_>, Key)>;
type MouseCallback = Box<dyn FnMut(&mut Frame<'_>, MouseClick)>;
type ControllerCallback = Box<dyn FnMut(&mut Frame<'_>, ControllerEvent)>;

#[derive(Default)]
struct Handlers {
    setup: Option<Callback>,
    update: Option<Callback>,
    render: Option<Callback>,
    key: Option<KeyCallback>,
    key_down: Option<KeyCallback>,
    mouse: Option<MouseCallback>,
    controller: Option<ControllerCallback>,
}

fn invoke(
    slot: &mut Option<Callback>,
    window: &mut WindowState,
    renderer: &mut dyn RenderBackend,
) {
    if let Some(callback) = slot.as_mut() {
        callback(&mut Frame { window, renderer });
    }
}

fn invoke_with<T>(
    slot: &mut Option<Box<dyn FnMut(&mut Frame<'_>, T)>>,
    window: &mut WindowState,
    renderer: &mut dyn RenderBackend,
    arg: T,
) {
    if let Some(callback) = slot.as_mut() {
        callback(&mut Frame { window, renderer }, arg);
    }
}

fn reported(err: WindowError) -> WindowError {
    diagnostics::report("Window::show", &err);
    err
}

pub struct Window<P: Platform> {
    platform: P,
    state: WindowState,
    flags: WindowFlags,
    surface: Option<P::Surface>,
    handlers: Handlers,
}

impl<P: Platform> Window<P> {
    /// Describe a window. Nothing native exists until `show`.
    pub fn new(platform: P, config: WindowConfig) -> Self {
        log::info!(
            "Window '{}' configured at {}x{}",
            config.title,
            config.width,
            config.height
        );
        Self {
            platform,
            state: WindowState::from_config(&config),
            flags: config.flags,
            surface: None,
            handlers: Handlers::default(),
        }
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WindowState {
        &mut self.state
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Rendering context, once the window has been shown.
    pub fn surface(&self) -> Option<&P::Surface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut P::Surface> {
        self.surface.as_mut()
    }

    /// Runs once per `show`, after the rendering context exists.
    pub fn on_setup(&mut self, f: impl FnMut(&mut Frame<'_>) + 'static) {
        self.handlers.setup = Some(Box::new(f));
    }

    pub fn on_update(&mut self, f: impl FnMut(&mut Frame<'_>) + 'static) {
        self.handlers.update = Some(Box::new(f));
    }

    pub fn on_render(&mut self, f: impl FnMut(&mut Frame<'_>) + 'static) {
        self.handlers.render = Some(Box::new(f));
    }

    /// Fires once per key press.
    pub fn on_key(&mut self, f: impl FnMut(&mut Frame<'_>, Key) + 'static) {
        self.handlers.key = Some(Box::new(f));
    }

    /// Fires every iteration for every key held down.
    pub fn on_key_down(&mut self, f: impl FnMut(&mut Frame<'_>, Key) + 'static) {
        self.handlers.key_down = Some(Box::new(f));
    }

    pub fn on_mouse(&mut self, f: impl FnMut(&mut Frame<'_>, MouseClick) + 'static) {
        self.handlers.mouse = Some(Box::new(f));
    }

    pub fn on_controller(&mut self, f: impl FnMut(&mut Frame<'_>, ControllerEvent) + 'static) {
        self.handlers.controller = Some(Box::new(f));
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    /// Open the window and run the loop until it is closed.
    pub fn show(&mut self) -> Result<(), WindowError> {
        if self.state.vsync {
            if let Err(err) = self.platform.set_vsync_hint(true) {
                log::warn!("VSync cannot be enabled: {err}");
            }
        }

        self.state.controller = self.open_first_controller();

        if self.surface.is_none() {
            let native = self
                .platform
                .create_window(&self.creation_config())
                .map_err(|err| reported(err.into()))?;
            if (native.width, native.height) != (self.state.orig_width, self.state.orig_height) {
                log::warn!(
                    "Resolution {}x{} unsupported by driver, scaling to {}x{}",
                    self.state.orig_width,
                    self.state.orig_height,
                    native.width,
                    native.height
                );
            }
            self.state.width = native.width;
            self.state.height = native.height;
            self.surface = Some(native.surface);
        }

        let Some(surface) = self.surface.as_mut() else {
            return Err(reported(WindowError::CannotShow("no rendering context")));
        };
        surface
            .initialize(&self.state.view_spec())
            .map_err(|err| reported(err.into()))?;

        self.state.close = false;
        log::info!(
            "Showing '{}' at {}x{}",
            self.state.title,
            self.state.width,
            self.state.height
        );

        invoke(&mut self.handlers.setup, &mut self.state, surface);
        self.run_loop();
        Ok(())
    }

    fn run_loop(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let state = &mut self.state;
        let handlers = &mut self.handlers;
        let platform = &mut self.platform;

        let mut pacer = FramePacer::new(platform.now());

        while !state.close {
            surface.clear(state.background);

            let timing = pacer.tick(platform.now(), state.fps_cap);
            platform.delay(timing.delay);
            pacer.begin_iteration(platform.now());

            for event in platform.poll_events() {
                match event {
                    Event::KeyDown(key) => {
                        invoke_with(&mut handlers.key, state, &mut *surface, key)
                    }
                    Event::MouseDown(click) => {
                        invoke_with(&mut handlers.mouse, state, &mut *surface, click)
                    }
                    Event::Controller(ev) => {
                        invoke_with(&mut handlers.controller, state, &mut *surface, ev)
                    }
                    Event::Resized { width, height } => {
                        state.width = width;
                        state.height = height;
                        surface.set_viewport(&state.view_spec());
                    }
                    Event::Quit => state.close(),
                }
            }

            if handlers.key_down.is_some() {
                for key in platform.held_keys() {
                    invoke_with(&mut handlers.key_down, state, &mut *surface, key);
                }
            }

            state.sample_mouse(platform.mouse_position());
            state.timing = timing;

            invoke(&mut handlers.update, state, &mut *surface);
            invoke(&mut handlers.render, state, &mut *surface);

            surface.present();
        }
    }

    /// Open at most one input device: the first that opens as a game controller, or
    /// the first device lacking controller support, whichever comes first.
    fn open_first_controller(&mut self) -> Option<usize> {
        let count = self.platform.joystick_count();
        if count > 0 {
            log::info!("Joysticks detected: {count}");
        }

        for index in 0..count {
            if self.platform.is_game_controller(index) {
                match self.platform.open_game_controller(index) {
                    Ok(name) => {
                        log::info!("Found a valid controller, named: {name}");
                        return Some(index);
                    }
                    Err(err) => diagnostics::report(
                        "Window::show",
                        format!("Could not open game controller {index}: {err}"),
                    ),
                }
            } else {
                log::warn!(
                    "Joystick {index} is not supported by the game controller interface"
                );
                return match self.platform.open_joystick(index) {
                    Ok(info) => {
                        log::info!(
                            "Opened joystick {index}: {} ({} axes, {} buttons)",
                            info.name,
                            info.axes,
                            info.buttons
                        );
                        Some(index)
                    }
                    Err(err) => {
                        diagnostics::report(
                            "Window::show",
                            format!("Could not open joystick {index}: {err}"),
                        );
                        None
                    }
                };
            }
        }
        None
    }

    fn creation_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.state.title.clone(),
            width: self.state.orig_width,
            height: self.state.orig_height,
            viewport: self.state.viewport,
            fps_cap: self.state.fps_cap,
            vsync: self.state.vsync,
            background: self.state.background,
            flags: self.flags,
        }
    }

    /// Close the window and release the rendering context and native window.
    pub fn free(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.state.close();
        if let Some(surface) = self.surface.take() {
            self.platform.destroy_window(surface);
            log::info!("Window '{}' destroyed", self.state.title);
        }
    }
}

impl<P: Platform> Drop for Window<P> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{PlatformError, RenderError};
    use crate::input::MouseButton;
    use crate::testing::{FakeDevice, FrameScript, RenderCall, ScriptedPlatform};

    fn config(width: u32, height: u32) -> WindowConfig {
        WindowConfig::new("test", width, height)
    }

    fn empty_frames(n: usize) -> Vec<FrameScript> {
        vec![FrameScript::default(); n]
    }

    #[test]
    fn loop_paces_to_the_fps_cap() {
        let platform = ScriptedPlatform::new(empty_frames(10));
        let clock = platform.clock.clone();
        let mut window = Window::new(platform, config(640, 480));
        window.on_update(move |_| clock.set(clock.get() + Duration::from_millis(5)));

        window.show().unwrap();

        let delays = &window.platform().delays;
        assert_eq!(delays.len(), 11);
        assert_relative_eq!(delays[0].as_secs_f64() * 1000.0, 1000.0 / 60.0, epsilon = 1e-3);
        for delay in &delays[1..] {
            assert_relative_eq!(delay.as_secs_f64() * 1000.0, 1000.0 / 60.0 - 5.0, epsilon = 1e-3);
        }
        assert_eq!(window.state().frames(), 11);
    }

    #[test]
    fn overrunning_callbacks_get_no_delay() {
        let platform = ScriptedPlatform::new(empty_frames(3));
        let clock = platform.clock.clone();
        let mut window = Window::new(platform, config(640, 480));
        window.on_update(move |_| clock.set(clock.get() + Duration::from_millis(40)));

        window.show().unwrap();
        assert!(window.platform().delays[1..].iter().all(|d| d.is_zero()));
    }

    #[test]
    fn close_from_update_finishes_the_iteration_then_returns_ok() {
        let platform = ScriptedPlatform::new(empty_frames(100));
        let renders = Rc::new(RefCell::new(0));
        let mut window = Window::new(platform, config(320, 240));

        window.on_update(|frame| {
            if frame.window().frames() == 3 {
                frame.close();
            }
        });
        let counter = renders.clone();
        window.on_render(move |_| *counter.borrow_mut() += 1);

        assert!(window.show().is_ok());
        assert_eq!(*renders.borrow(), 3);
        assert!(window.state().is_closing());
        let surface = window.surface().unwrap();
        assert_eq!(surface.count(|c| *c == RenderCall::Present), 3);
    }

    #[test]
    fn iteration_order_is_clear_events_update_render_present() {
        let platform = ScriptedPlatform::new(vec![FrameScript {
            events: vec![Event::KeyDown(Key::A)],
            held: vec![Key::A],
            mouse: (0, 0),
        }]);
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut window = Window::new(platform, config(320, 240));

        let l = log.clone();
        window.on_key(move |_, key| l.borrow_mut().push(format!("key {key}")));
        let l = log.clone();
        window.on_key_down(move |_, key| l.borrow_mut().push(format!("held {key}")));
        let l = log.clone();
        window.on_update(move |_| l.borrow_mut().push("update".to_string()));
        let l = log.clone();
        window.on_render(move |frame| {
            l.borrow_mut().push("render".to_string());
            frame.close();
        });

        window.show().unwrap();
        assert_eq!(*log.borrow(), vec!["key A", "held A", "update", "render"]);

        let calls = &window.surface().unwrap().calls;
        assert!(matches!(calls[0], RenderCall::Initialize(_)));
        assert_eq!(calls[1], RenderCall::Clear(Color::BLACK));
        assert_eq!(calls.last(), Some(&RenderCall::Present));
    }

    #[test]
    fn events_dispatch_once_each_in_arrival_order() {
        let click = MouseClick {
            x: 10,
            y: 20,
            button: MouseButton::Left,
        };
        let platform = ScriptedPlatform::new(vec![FrameScript::events(vec![
            Event::MouseDown(click),
            Event::Controller(ControllerEvent::Axis {
                axis: 1,
                value: -32768,
            }),
            Event::KeyDown(Key::Space),
            Event::Controller(ControllerEvent::Button { button: 3 }),
        ])]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut window = Window::new(platform, config(320, 240));

        let s = seen.clone();
        window.on_mouse(move |_, c| s.borrow_mut().push(format!("mouse {},{}", c.x, c.y)));
        let s = seen.clone();
        window.on_controller(move |_, ev| s.borrow_mut().push(format!("{ev:?}")));
        let s = seen.clone();
        window.on_key(move |_, key| s.borrow_mut().push(format!("key {key}")));

        window.show().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                "mouse 10,20".to_string(),
                "Axis { axis: 1, value: -32768 }".to_string(),
                "key Space".to_string(),
                "Button { button: 3 }".to_string(),
            ]
        );
    }

    #[test]
    fn held_keys_fire_every_iteration() {
        let held = FrameScript {
            held: vec![Key::Left, Key::Up],
            ..Default::default()
        };
        let platform = ScriptedPlatform::new(vec![held.clone(), held.clone(), held]);
        let count = Rc::new(RefCell::new(0));
        let mut window = Window::new(platform, config(320, 240));
        let c = count.clone();
        window.on_key_down(move |_, _| *c.borrow_mut() += 1);

        window.show().unwrap();
        assert_eq!(*count.borrow(), 6);
    }

    #[test]
    fn quit_event_closes_without_freeing() {
        let platform = ScriptedPlatform::new(vec![FrameScript::events(vec![Event::Quit])]);
        let destroyed = platform.windows_destroyed.clone();
        let mut window = Window::new(platform, config(320, 240));

        window.show().unwrap();
        assert!(window.state().is_closing());
        assert_eq!(destroyed.get(), 0);
        assert!(window.surface().is_some());
    }

    #[test]
    fn mouse_scales_from_drawable_to_logical() {
        let mut platform = ScriptedPlatform::new(vec![
            FrameScript {
                mouse: (1600, 1200),
                ..Default::default()
            },
            FrameScript {
                mouse: (0, 0),
                ..Default::default()
            },
        ]);
        platform.actual_size = Some((1600, 1200));
        let samples = Rc::new(RefCell::new(Vec::new()));
        let mut window = Window::new(platform, config(800, 600));
        let s = samples.clone();
        window.on_update(move |frame| s.borrow_mut().push(frame.window().mouse()));

        window.show().unwrap();
        let samples = samples.borrow();
        assert_eq!((samples[0].x, samples[0].y), (800, 600));
        assert_eq!((samples[0].real_x, samples[0].real_y), (1600, 1200));
        assert_eq!((samples[1].x, samples[1].y), (0, 0));
        assert_eq!(window.state().size(), (1600, 1200));
        assert_eq!(window.state().requested_size(), (800, 600));
    }

    #[test]
    fn mouse_passes_through_when_sizes_match() {
        let platform = ScriptedPlatform::new(vec![FrameScript {
            mouse: (123, 45),
            ..Default::default()
        }]);
        let mut window = Window::new(platform, config(800, 600));
        window.on_update(|frame| frame.close());
        window.show().unwrap();
        let mouse = window.state().mouse();
        assert_eq!((mouse.x, mouse.y), (123, 45));
    }

    #[test]
    fn resize_updates_size_and_viewport() {
        let platform = ScriptedPlatform::new(vec![FrameScript::events(vec![Event::Resized {
            width: 1024,
            height: 768,
        }])]);
        let mut window = Window::new(platform, config(640, 480));
        window.show().unwrap();

        assert_eq!(window.state().size(), (1024, 768));
        let surface = window.surface().unwrap();
        assert!(surface.calls.contains(&RenderCall::SetViewport(ViewSpec {
            orig_width: 640,
            orig_height: 480,
            width: 1024,
            height: 768,
            mode: ViewportMode::Scale,
        })));
    }

    #[test]
    fn first_game_controller_wins() {
        let mut platform = ScriptedPlatform::new(vec![]);
        platform.devices = vec![
            FakeDevice {
                name: "broken pad",
                game_controller: true,
                opens: false,
            },
            FakeDevice {
                name: "good pad",
                game_controller: true,
                opens: true,
            },
            FakeDevice {
                name: "other pad",
                game_controller: true,
                opens: true,
            },
        ];
        let mut window = Window::new(platform, config(320, 240));
        window.show().unwrap();
        assert_eq!(window.state().controller(), Some(1));
        assert_eq!(window.platform().open_attempts, vec![0, 1]);
    }

    #[test]
    fn raw_joystick_ends_the_scan_even_when_it_fails() {
        let mut platform = ScriptedPlatform::new(vec![]);
        platform.devices = vec![
            FakeDevice {
                name: "stick",
                game_controller: false,
                opens: false,
            },
            FakeDevice {
                name: "pad",
                game_controller: true,
                opens: true,
            },
        ];
        let mut window = Window::new(platform, config(320, 240));
        window.show().unwrap();
        assert_eq!(window.state().controller(), None);
        assert_eq!(window.platform().open_attempts, vec![0]);
    }

    #[test]
    fn vsync_failure_is_not_fatal() {
        let mut platform = ScriptedPlatform::new(vec![]);
        platform.fail_vsync = true;
        let mut window = Window::new(platform, config(320, 240));
        assert!(window.show().is_ok());
        assert_eq!(window.platform().vsync_hint, Some(true));
    }

    #[test]
    fn failed_window_creation_never_enters_the_loop() {
        let mut platform = ScriptedPlatform::new(empty_frames(2));
        platform.fail_create = true;
        let ran = Rc::new(RefCell::new(Vec::new()));
        let mut window = Window::new(platform, config(320, 240));
        let r = ran.clone();
        window.on_setup(move |_| r.borrow_mut().push("setup"));
        let r = ran.clone();
        window.on_update(move |_| r.borrow_mut().push("update"));

        let err = window.show().unwrap_err();
        assert!(matches!(
            err,
            WindowError::Platform(PlatformError::WindowCreation(_))
        ));
        assert!(window.state().is_closing());
        assert!(window.surface().is_none());
        assert!(ran.borrow().is_empty());
        assert_eq!(window.state().frames(), 0);
    }

    #[test]
    fn failed_context_initialization_keeps_the_window_closed() {
        let mut platform = ScriptedPlatform::new(empty_frames(2));
        platform.fail_initialize = true;
        let destroyed = platform.windows_destroyed.clone();
        let ran = Rc::new(RefCell::new(0));
        let mut window = Window::new(platform, config(320, 240));
        let r = ran.clone();
        window.on_update(move |_| *r.borrow_mut() += 1);

        let err = window.show().unwrap_err();
        assert!(matches!(err, WindowError::Render(RenderError::Init(_))));
        assert!(window.state().is_closing());
        assert_eq!(*ran.borrow(), 0);

        window.free();
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn setup_runs_once_per_show_before_the_first_frame() {
        let platform = ScriptedPlatform::new(vec![]);
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut window = Window::new(platform, config(320, 240));
        let l = log.clone();
        window.on_setup(move |_| l.borrow_mut().push("setup"));
        let l = log.clone();
        window.on_update(move |_| l.borrow_mut().push("update"));

        window.show().unwrap();
        window.show().unwrap();
        assert_eq!(*log.borrow(), vec!["setup", "update", "setup", "update"]);
        assert_eq!(window.platform().windows_created, 1);
    }

    #[test]
    fn close_is_idempotent() {
        let mut window = Window::new(ScriptedPlatform::new(vec![]), config(320, 240));
        window.close();
        window.close();
        assert!(window.state().is_closing());
    }

    #[test]
    fn free_without_show_destroys_nothing() {
        let platform = ScriptedPlatform::new(vec![]);
        let destroyed = platform.windows_destroyed.clone();
        Window::new(platform, config(320, 240)).free();
        assert_eq!(destroyed.get(), 0);
    }

    #[test]
    fn free_after_show_destroys_exactly_once() {
        let platform = ScriptedPlatform::new(vec![]);
        let destroyed = platform.windows_destroyed.clone();
        let mut window = Window::new(platform, config(320, 240));
        window.show().unwrap();
        window.free();
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn dropping_a_shown_window_releases_it() {
        let platform = ScriptedPlatform::new(vec![]);
        let destroyed = platform.windows_destroyed.clone();
        {
            let mut window = Window::new(platform, config(320, 240));
            window.show().unwrap();
        }
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn uncapped_loop_never_sleeps() {
        let mut cfg = config(320, 240);
        cfg.fps_cap = 0;
        let mut window = Window::new(ScriptedPlatform::new(empty_frames(4)), cfg);
        window.show().unwrap();
        assert!(window.platform().delays.iter().all(|d| d.is_zero()));
    }
}
