//! Demo window exercising every primitive and resource type.
//!
//! Usage: `s2d_demo [config.json]`. Assets are looked up under `assets/`; any that are
//! missing are reported and skipped, the shapes still draw.
//!
//! Keys: Escape quits, Space plays the sound, P/R pause and resume the music,
//! F fades it out. Clicking moves the label to the cursor.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;
use s2d_audio::RodioAudio;
use s2d_core::resources::{
    draw_image, draw_text, free_image, free_music, free_sound, free_text, play_sound,
};
use s2d_core::shapes::{self, Anchor};
use s2d_core::{
    diagnostics, intersects, load_window_config, Color, ControllerEvent, FRect, Image, Key,
    Music, Repeat, Sound, Text, Vertex, Window, WindowConfig,
};
use s2d_platform::DesktopPlatform;
use s2d_render::{FontdueFonts, WgpuRenderer};

const IMAGE_PATH: &str = "assets/image.png";
const FONT_PATH: &str = "assets/font.ttf";
const SOUND_PATH: &str = "assets/sound.wav";
const MUSIC_PATH: &str = "assets/music.ogg";
const FONT_SIZE: u32 = 20;
const PLAYER_SIZE: f32 = 40.0;
const PLAYER_SPEED: f32 = 4.0;

/// Everything the callbacks share. Only the run-loop thread touches it.
struct Demo {
    fonts: FontdueFonts,
    audio: RodioAudio,
    image: Option<Image>,
    label: Option<Text>,
    sound: Option<Sound>,
    music: Option<Music>,
    player: FRect,
    obstacle: FRect,
    angle: f32,
    last_fps_frame: u64,
}

impl Demo {
    fn new(audio: RodioAudio) -> Self {
        Self {
            fonts: FontdueFonts::new(),
            audio,
            image: None,
            label: None,
            sound: None,
            music: None,
            player: FRect::new(60.0, 60.0, PLAYER_SIZE, PLAYER_SIZE),
            obstacle: FRect::new(300.0, 200.0, 120.0, 80.0),
            angle: 0.0,
            last_fps_frame: 0,
        }
    }

    fn steer(&mut self, key: Key) {
        let (dx, dy) = match key {
            Key::Left | Key::A => (-PLAYER_SPEED, 0.0),
            Key::Right | Key::D => (PLAYER_SPEED, 0.0),
            Key::Up | Key::W => (0.0, -PLAYER_SPEED),
            Key::Down | Key::S => (0.0, PLAYER_SPEED),
            _ => return,
        };
        self.player.x += dx;
        self.player.y += dy;
    }

    /// Frees every resource. Textures go through `surface`, which is only present if
    /// the window was shown.
    fn release(&mut self, surface: Option<&mut WgpuRenderer>) {
        if let Some(surface) = surface {
            free_image(self.image.take(), surface);
            free_text(self.label.take(), &mut self.fonts, surface);
        }
        free_sound(self.sound.take(), &mut self.audio);
        free_music(self.music.take(), &mut self.audio);
    }
}

fn window_config() -> Result<WindowConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(load_window_config(Path::new(&path))?),
        None => {
            let mut config = WindowConfig::new("Simple 2D Demo", 640, 480);
            config.background = Color::rgba(0.1, 0.1, 0.15, 1.0);
            config.flags.resizable = true;
            Ok(config)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    diagnostics::set_enabled(true);

    log::info!("Simple 2D demo starting...");

    let config = window_config()?;
    let platform = DesktopPlatform::new()?;
    let demo = Rc::new(RefCell::new(Demo::new(RodioAudio::new()?)));

    let mut window = Window::new(platform, config);

    let state = demo.clone();
    window.on_setup(move |frame| {
        let mut demo = state.borrow_mut();
        let demo = &mut *demo;
        let renderer = frame.renderer();

        demo.image = Image::create(renderer, IMAGE_PATH).ok();
        if let Some(image) = demo.image.as_mut() {
            image.x = 420.0;
            image.y = 40.0;
        }
        demo.label =
            Text::create(&mut demo.fonts, renderer, FONT_PATH, "Hello, Simple 2D", FONT_SIZE).ok();
        if let Some(label) = demo.label.as_mut() {
            label.x = 20.0;
            label.y = 420.0;
            label.color = Color::rgba(1.0, 0.9, 0.3, 1.0);
        }
        demo.sound = Sound::create(&mut demo.audio, SOUND_PATH).ok();
        demo.music = Music::create(&mut demo.audio, MUSIC_PATH).ok();
        if let Some(music) = demo.music.as_ref() {
            music.play(&mut demo.audio, Repeat::Forever);
        }
    });

    let state = demo.clone();
    window.on_update(move |frame| {
        let mut demo = state.borrow_mut();
        let demo = &mut *demo;
        demo.angle = (demo.angle + 1.0) % 360.0;

        // Refresh the label about once a second.
        let frames = frame.window().frames();
        if frames - demo.last_fps_frame >= 60 {
            demo.last_fps_frame = frames;
            let message = format!("{:.1} fps", frame.window().smoothed_fps());
            if let Some(label) = demo.label.as_mut() {
                let _ = label.set_text(&mut demo.fonts, frame.renderer(), &message);
            }
        }
    });

    let state = demo.clone();
    window.on_render(move |frame| {
        let demo = state.borrow();
        let renderer = frame.renderer();

        shapes::draw_triangle(
            renderer,
            Vertex::new(320.0, 50.0, Color::rgba(1.0, 0.0, 0.0, 1.0)),
            Vertex::new(540.0, 430.0, Color::rgba(0.0, 1.0, 0.0, 1.0)),
            Vertex::new(100.0, 430.0, Color::rgba(0.0, 0.0, 1.0, 1.0)),
        );

        let pivot = shapes::rect_rotation_point(260.0, 180.0, 120.0, 120.0, Anchor::Center);
        let spun = [(260.0, 180.0), (380.0, 180.0), (380.0, 300.0), (260.0, 300.0)]
            .map(|(x, y)| shapes::rotate_point(Vec2::new(x, y), demo.angle, pivot));
        shapes::draw_quad(
            renderer,
            [
                Vertex::new(spun[0].x, spun[0].y, Color::rgba(1.0, 0.5, 0.0, 0.8)),
                Vertex::new(spun[1].x, spun[1].y, Color::rgba(1.0, 1.0, 0.0, 0.8)),
                Vertex::new(spun[2].x, spun[2].y, Color::rgba(0.0, 1.0, 1.0, 0.8)),
                Vertex::new(spun[3].x, spun[3].y, Color::rgba(1.0, 0.0, 1.0, 0.8)),
            ],
        );

        let hit = intersects(demo.player, demo.obstacle);
        shapes::draw_rect(renderer, demo.obstacle, Color::rgba(0.4, 0.4, 0.4, 1.0));
        let player_color = if hit {
            Color::rgba(1.0, 0.2, 0.2, 1.0)
        } else {
            Color::rgba(0.2, 0.8, 0.2, 1.0)
        };
        shapes::draw_rect(renderer, demo.player, player_color);

        shapes::draw_line(renderer, 20.0, 20.0, 620.0, 20.0, 4.0, [Color::WHITE; 4]);

        let mouse = frame.window().mouse();
        let renderer = frame.renderer();
        let _ = shapes::draw_circle(
            renderer,
            mouse.x as f32,
            mouse.y as f32,
            12.0,
            32,
            Color::rgba(0.9, 0.9, 1.0, 0.6),
        );

        draw_image(demo.image.as_ref(), renderer);
        draw_text(demo.label.as_ref(), renderer);
    });

    let state = demo.clone();
    window.on_key(move |frame, key| {
        let mut demo = state.borrow_mut();
        let demo = &mut *demo;
        match key {
            Key::Escape => frame.close(),
            Key::Space => play_sound(demo.sound.as_ref(), &mut demo.audio),
            Key::P => Music::pause(&mut demo.audio),
            Key::R => Music::resume(&mut demo.audio),
            Key::F => Music::fade_out(&mut demo.audio, Duration::from_secs(2)),
            _ => {}
        }
    });

    let state = demo.clone();
    window.on_key_down(move |_frame, key| state.borrow_mut().steer(key));

    let state = demo.clone();
    window.on_mouse(move |frame, click| {
        let mouse = frame.window().mouse();
        log::info!(
            "Mouse {:?} at {},{} (logical {},{})",
            click.button,
            click.x,
            click.y,
            mouse.x,
            mouse.y
        );
        if let Some(label) = state.borrow_mut().label.as_mut() {
            label.x = mouse.x as f32;
            label.y = mouse.y as f32;
        }
    });

    let state = demo.clone();
    window.on_controller(move |_frame, event| match event {
        ControllerEvent::Axis { axis, value } => {
            log::info!("Controller axis {axis}: {value}");
        }
        ControllerEvent::Button { button } => {
            log::info!("Controller button {button}");
            let mut demo = state.borrow_mut();
            let demo = &mut *demo;
            play_sound(demo.sound.as_ref(), &mut demo.audio);
        }
    });

    window.show()?;

    demo.borrow_mut().release(window.surface_mut());
    window.free();

    log::info!("Simple 2D demo finished");
    Ok(())
}
