use std::io::{self, IsTerminal};
use std::time::Instant;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use glam::Vec2;
use log::debug;
use ratatui::{
    layout::Rect,
    style::Stylize,
    text::Line,
    DefaultTerminal, Frame,
};

use banjak_config::Settings;
use banjak_core::{
    EffectInstance, FrameScheduler, FrameTick, MotionPreference, PointerTracker, Speed,
    SurfaceWidget,
};
use banjak_effects::EffectKind;

/// Per-mount seed spacing, so remounted effects do not replay the previous
/// mount's randomness.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging();
    let settings = Settings::load()?;

    let terminal = ratatui::init();
    let mouse_captured = execute!(io::stdout(), EnableMouseCapture).is_ok();
    let result = App::new(settings).run(terminal);
    if mouse_captured {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
    ratatui::restore();
    result
}

/// Logging goes through env_logger, but only when stderr is redirected;
/// writing log lines into the live TUI would corrupt it.
fn init_logging() {
    if !io::stderr().is_terminal() {
        env_logger::init();
    }
}

/// The showcase application: one background effect, an optional trail
/// overlay, and the shared scheduler and pointer tracker they mount onto.
struct App {
    running: bool,
    settings: Settings,
    kind: EffectKind,
    speed: Speed,
    motion: MotionPreference,
    base_seed: u64,
    mounts: u64,

    scheduler: FrameScheduler,
    tracker: PointerTracker,
    background: Option<EffectInstance>,
    overlay: Option<EffectInstance>,

    width: u16,
    height: u16,
    started_at: Instant,
    last_elapsed_ms: u64,
}

impl App {
    fn new(settings: Settings) -> Self {
        let kind = settings.effect;
        let speed = settings.speed;
        let motion = settings.motion();
        let base_seed = settings.resolve_seed();
        Self {
            running: false,
            settings,
            kind,
            speed,
            motion,
            base_seed,
            mounts: 0,
            scheduler: FrameScheduler::new(),
            tracker: PointerTracker::new(),
            background: None,
            overlay: None,
            width: 0,
            height: 0,
            started_at: Instant::now(),
            last_elapsed_ms: 0,
        }
    }

    fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.width = size.width;
        self.height = size.height;
        self.mount_background();
        if self.settings.overlay {
            self.toggle_overlay();
        }

        self.running = true;
        self.started_at = Instant::now();
        let interval = self.settings.frame_interval();
        let mut next_frame = Instant::now();

        while self.running {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                    Event::Mouse(mouse) => self.on_mouse_event(mouse),
                    Event::Resize(width, height) => self.on_resize(width, height),
                    _ => {}
                }
            }
            if Instant::now() >= next_frame {
                self.advance_frame();
                terminal.draw(|frame| self.render(frame))?;
                next_frame = Instant::now() + interval;
            }
        }
        Ok(())
    }

    /// Drain the frame scheduler once and release the click queue.
    fn advance_frame(&mut self) {
        let elapsed_ms = self.started_at.elapsed().as_millis() as u64;
        let delta_ms = elapsed_ms.saturating_sub(self.last_elapsed_ms);
        self.last_elapsed_ms = elapsed_ms;
        self.scheduler.run_frame(FrameTick {
            elapsed_ms,
            delta_ms,
        });
        self.tracker.end_frame();
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(bg) = &self.background {
            let surface = bg.surface();
            frame.render_widget(SurfaceWidget(&surface), area);
        }
        if let Some(overlay) = &self.overlay {
            let surface = overlay.surface();
            frame.render_widget(SurfaceWidget(&surface), area);
        }

        if area.height > 0 {
            let motion = if self.motion.is_reduced() { "reduced" } else { "full" };
            let help = Line::from(vec![
                "q".bold().cyan(),
                " quit  ".dark_gray(),
                "n/p".bold().cyan(),
                " effect  ".dark_gray(),
                "o".bold().cyan(),
                " trail  ".dark_gray(),
                "s".bold().cyan(),
                " speed  ".dark_gray(),
                "m".bold().cyan(),
                " motion   ".dark_gray(),
                self.kind.title().bold().white(),
                format!("  [{} · {motion}]", self.speed.label()).dark_gray(),
            ])
            .centered();
            let bottom = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
            frame.render_widget(help, bottom);
        }
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('n')) => self.switch_effect(self.kind.next()),
            (_, KeyCode::Char('p')) => self.switch_effect(self.kind.prev()),
            (_, KeyCode::Char('o')) => self.toggle_overlay(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('m')) => self.toggle_motion(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let pos = Vec2::new(mouse.column as f32, mouse.row as f32);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.tracker.update(pos),
            MouseEventKind::Down(MouseButton::Left) => self.tracker.click(pos),
            _ => {}
        }
    }

    /// Surfaces track the new viewport; effect state is left alone.
    fn on_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if let Some(bg) = &mut self.background {
            bg.resize(width, height);
        }
        if let Some(overlay) = &mut self.overlay {
            overlay.resize(width, height);
        }
    }

    fn next_seed(&mut self) -> u64 {
        self.mounts += 1;
        self.base_seed.wrapping_add(self.mounts.wrapping_mul(SEED_MIX))
    }

    fn mount_background(&mut self) {
        if let Some(mut old) = self.background.take() {
            old.stop(&mut self.scheduler);
        }
        let seed = self.next_seed();
        let mut instance = EffectInstance::new(
            self.settings.build(self.kind),
            self.width,
            self.height,
            seed,
            self.speed,
            self.motion,
        );
        instance.start(&mut self.scheduler, &self.tracker);
        debug!("mounted {}", self.kind.name());
        self.background = Some(instance);
    }

    fn switch_effect(&mut self, kind: EffectKind) {
        self.kind = kind;
        self.mount_background();
    }

    fn toggle_overlay(&mut self) {
        if let Some(mut overlay) = self.overlay.take() {
            overlay.stop(&mut self.scheduler);
            return;
        }
        let seed = self.next_seed();
        let mut instance = EffectInstance::new(
            self.settings.build(EffectKind::Trail),
            self.width,
            self.height,
            seed,
            self.speed,
            self.motion,
        );
        instance.start(&mut self.scheduler, &self.tracker);
        self.overlay = Some(instance);
    }

    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
        if let Some(bg) = &mut self.background {
            bg.set_speed(self.speed);
        }
        if let Some(overlay) = &mut self.overlay {
            overlay.set_speed(self.speed);
        }
    }

    /// Remounts both instances so the new preference takes effect from a
    /// clean initial paint.
    fn toggle_motion(&mut self) {
        self.motion = self.motion.toggle();
        let overlay_was_on = self.overlay.is_some();
        if let Some(mut overlay) = self.overlay.take() {
            overlay.stop(&mut self.scheduler);
        }
        self.mount_background();
        if overlay_was_on {
            self.toggle_overlay();
        }
    }

    fn quit(&mut self) {
        self.running = false;
    }
}
