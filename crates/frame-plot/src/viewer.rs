// File: crates/frame-plot/src/viewer.rs
// Summary: Display backends: interactive winit + softbuffer window (CPU RGBA blit) or PNG file.

use std::ffi::OsString;
use std::num::NonZeroU32;
use std::panic::{self, UnwindSafe};
use std::path::Path;

use chart_core::{Chart, RenderOptions, Theme, ViewState};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

use crate::error::{PlotError, Result};

/// Whether an interactive window can be opened in this environment.
/// X11/Wayland desktops need a server handle; other platforms always have one.
pub fn display_available() -> bool {
    let needs_server = cfg!(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))));
    probe_display(needs_server, |key| std::env::var_os(key))
}

fn probe_display(needs_server: bool, lookup: impl Fn(&str) -> Option<OsString>) -> bool {
    if !needs_server {
        return true;
    }
    ["WAYLAND_DISPLAY", "DISPLAY"]
        .iter()
        .any(|key| lookup(key).is_some_and(|v| !v.is_empty()))
}

/// Render `chart` once and write it to `path`.
pub fn render_png(chart: &Chart, opts: &RenderOptions, path: &Path) -> Result<()> {
    chart.render_to_png(opts, path).map_err(PlotError::render)
}

/// Run a windowing-backend constructor, turning its panic into `NoDisplay`.
/// winit panics instead of returning an error when no backend can connect
/// (e.g. `DISPLAY` names a server that is not running).
fn connect_backend<T>(connect: impl FnOnce() -> T + UnwindSafe) -> Result<T> {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let connected = panic::catch_unwind(connect);
    panic::set_hook(hook);
    connected.map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "windowing backend failed to initialize".to_string());
        PlotError::NoDisplay(reason)
    })
}

/// Interaction state of the window, independent of the windowing backend.
#[derive(Clone, Debug)]
pub struct Viewer {
    chart: Chart,
    home: ViewState,
    view: ViewState,
    opts: RenderOptions,
    cursor: Option<(f64, f64)>,
    dragging: bool,
}

impl Viewer {
    pub fn new(chart: Chart, opts: RenderOptions) -> Self {
        let home = ViewState::from_chart(&chart);
        Self { chart, home, view: home, opts, cursor: None, dragging: false }
    }

    pub fn view(&self) -> ViewState { self.view }

    pub fn options(&self) -> &RenderOptions { &self.opts }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.opts.width = width as i32;
        self.opts.height = height as i32;
    }

    /// Back to the data extents.
    pub fn reset(&mut self) {
        self.view = self.home;
        log::debug!("view reset to {:?}", self.view);
    }

    pub fn toggle_theme(&mut self) {
        self.opts.theme = if self.opts.theme.name == "dark" { Theme::light() } else { Theme::dark() };
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Track the cursor; pans while dragging. Returns true when the view moved.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> bool {
        let prev = self.cursor.replace((x, y));
        match prev {
            Some((px, py)) if self.dragging => {
                self.view.pan_by_pixels(x - px, y - py, self.opts.width, self.opts.height, &self.opts.insets);
                true
            }
            _ => false,
        }
    }

    /// Zoom around the cursor (plot center if the cursor is unknown).
    pub fn zoom(&mut self, scroll: f64) {
        let (cx, cy) = self
            .cursor
            .unwrap_or((self.opts.width as f64 * 0.5, self.opts.height as f64 * 0.5));
        self.view.zoom_at_pixel(scroll, cx, cy, self.opts.width, self.opts.height, &self.opts.insets);
    }

    /// The chart clipped to the current view.
    pub fn current_chart(&self) -> Chart {
        let mut chart = self.chart.clone();
        self.view.apply_to_chart(&mut chart);
        chart
    }

    /// Current view as 0RGB pixels, the layout softbuffer presents.
    pub fn render_0rgb(&self) -> Result<Vec<u32>> {
        let (rgba, _, _, _) = self.current_chart().render_to_rgba8(&self.opts).map_err(PlotError::render)?;
        Ok(rgba
            .chunks_exact(4)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
            .collect())
    }
}

fn scroll_amount(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64 * 0.1,
        MouseScrollDelta::PixelDelta(p) => p.y / 240.0,
    }
}

fn display_err(what: &str) -> impl Fn(softbuffer::SoftBufferError) -> PlotError + '_ {
    move |e| PlotError::Display(format!("{what}: {e}"))
}

/// Open a window showing `chart` and block until it is closed.
/// Fails with `NoDisplay` when no window can be opened; nothing has been
/// shown in that case.
///
/// Wheel zooms around the cursor, left-drag pans, `R`/`Home` resets,
/// `T` toggles light/dark, `S` saves the current view to `save_path`,
/// `Q`/`Escape` closes.
pub fn show_window(chart: Chart, opts: RenderOptions, title: &str, save_path: &Path) -> Result<()> {
    let mut event_loop = connect_backend(EventLoop::new)?;
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(LogicalSize::new(opts.width as f64, opts.height as f64))
        .build(&event_loop)
        .map_err(|e| PlotError::NoDisplay(format!("cannot open window: {e}")))?;

    // Safety: `window` outlives both the context and the surface; all three drop at the end of this function.
    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| PlotError::NoDisplay(format!("softbuffer context: {e}")))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }.map_err(display_err("softbuffer surface"))?;

    let mut viewer = Viewer::new(chart, opts);
    let size = window.inner_size();
    viewer.resize(size.width, size.height);
    let mut failure: Option<PlotError> = None;
    window.request_redraw();

    event_loop.run_return(|event, _, control_flow| {
        control_flow.set_wait();
        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => control_flow.set_exit(),
                WindowEvent::Resized(new_size) => {
                    viewer.resize(new_size.width, new_size.height);
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    if viewer.cursor_moved(position.x, position.y) {
                        window.request_redraw();
                    }
                }
                WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                    viewer.set_dragging(state == ElementState::Pressed);
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    viewer.zoom(scroll_amount(delta));
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => match key {
                    VirtualKeyCode::Escape | VirtualKeyCode::Q => control_flow.set_exit(),
                    VirtualKeyCode::R | VirtualKeyCode::Home => {
                        viewer.reset();
                        window.request_redraw();
                    }
                    VirtualKeyCode::T => {
                        viewer.toggle_theme();
                        window.request_redraw();
                    }
                    VirtualKeyCode::S => {
                        match render_png(&viewer.current_chart(), viewer.options(), save_path) {
                            Ok(()) => log::info!("saved view to {}", save_path.display()),
                            Err(e) => log::error!("save failed: {e}"),
                        }
                    }
                    _ => {}
                },
                _ => {}
            },
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                if let Err(e) = present(&mut surface, &viewer) {
                    failure = Some(e);
                    control_flow.set_exit();
                }
            }
            _ => {}
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn present(surface: &mut softbuffer::Surface, viewer: &Viewer) -> Result<()> {
    let opts = viewer.options();
    // Minimized windows report a zero size; nothing to draw.
    let (Some(w), Some(h)) = (NonZeroU32::new(opts.width.max(0) as u32), NonZeroU32::new(opts.height.max(0) as u32)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(display_err("resize"))?;
    let pixels = viewer.render_0rgb()?;
    let mut frame = surface.buffer_mut().map_err(display_err("frame buffer"))?;
    let n = frame.len().min(pixels.len());
    frame[..n].copy_from_slice(&pixels[..n]);
    frame.present().map_err(display_err("present"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::Series;

    fn viewer() -> Viewer {
        let mut chart = Chart::new();
        chart.add_series(Series::indexed("pitch", [0.0, 1.0, 0.5, -0.5]));
        let mut opts = RenderOptions::default();
        opts.width = 400;
        opts.height = 300;
        opts.draw_labels = false;
        Viewer::new(chart, opts)
    }

    #[test]
    fn probe_requires_non_empty_display_var() {
        let none = |_: &str| None;
        let empty = |_: &str| Some(OsString::new());
        let x11 = |k: &str| (k == "DISPLAY").then(|| OsString::from(":0"));
        let wayland = |k: &str| (k == "WAYLAND_DISPLAY").then(|| OsString::from("wayland-0"));
        assert!(!probe_display(true, none));
        assert!(!probe_display(true, empty));
        assert!(probe_display(true, x11));
        assert!(probe_display(true, wayland));
        assert!(probe_display(false, none));
    }

    #[test]
    fn backend_panic_becomes_no_display() {
        let err = connect_backend(|| -> u32 { panic!("Failed to initialize any backend!") }).unwrap_err();
        assert!(matches!(err, PlotError::NoDisplay(ref r) if r.contains("Failed to initialize any backend")), "{err}");
        assert_eq!(err.stage(), "display");

        let err = connect_backend(|| -> u32 { panic!("X11 status: {}", "XOpenDisplayFailed") }).unwrap_err();
        assert!(err.to_string().starts_with("display: no display available: X11 status: XOpenDisplayFailed"));

        assert_eq!(connect_backend(|| 7u32).unwrap(), 7);
    }

    #[test]
    fn drag_pans_and_reset_restores() {
        let mut v = viewer();
        let home = v.view();
        assert!(!v.cursor_moved(100.0, 100.0));
        v.set_dragging(true);
        assert!(v.cursor_moved(150.0, 100.0));
        assert!(v.view().x_min < home.x_min);
        v.reset();
        assert_eq!(v.view(), home);
    }

    #[test]
    fn wheel_up_narrows_view() {
        let mut v = viewer();
        let before = v.view();
        v.zoom(0.5);
        let after = v.view();
        assert!(after.x_max - after.x_min < before.x_max - before.x_min);
    }

    #[test]
    fn theme_toggle_round_trips() {
        let mut v = viewer();
        v.toggle_theme();
        assert_eq!(v.options().theme.name, "dark");
        v.toggle_theme();
        assert_eq!(v.options().theme.name, "light");
    }

    #[test]
    fn framebuffer_matches_surface_size() {
        let px = viewer().render_0rgb().unwrap();
        assert_eq!(px.len(), 400 * 300);
        // white background, alpha dropped
        assert_eq!(px[0], 0x00ff_ffff);
    }
}
