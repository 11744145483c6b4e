//! Native desktop platform on winit
//!
//! winit normally owns the main loop; here it is pumped with a zero timeout
//! so the game can drain events the same way it would poll any queue.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use super::{Clock, Event, InitError, Key, KeyboardState, Platform, WindowConfig};
use crate::renderer::WgpuCanvas;

/// How many startup pumps to wait for the window to appear
const CREATE_PUMP_ATTEMPTS: u32 = 50;

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::ArrowUp => Some(Key::ArrowUp),
        KeyCode::ArrowDown => Some(Key::ArrowDown),
        _ => None,
    }
}

/// Receives winit callbacks during a pump
struct WindowHandler {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    create_error: Option<String>,
    events: VecDeque<Event>,
    /// winit reported the loop as exited; it keeps saying so on every pump
    exited: bool,
    keyboard: KeyboardState,
    resized: Option<PhysicalSize<u32>>,
}

impl WindowHandler {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: None,
            create_error: None,
            events: VecDeque::new(),
            exited: false,
            keyboard: KeyboardState::new(),
            resized: None,
        }
    }
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_position(LogicalPosition::new(self.config.x, self.config.y))
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);
        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.create_error = Some(e.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.events.push_back(Event::Quit),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = map_key(code) else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => self.keyboard.press(key),
                    ElementState::Released => self.keyboard.release(key),
                }
            }
            // Keys released while unfocused never report a release
            WindowEvent::Focused(false) => self.keyboard.release_all(),
            WindowEvent::Resized(size) => self.resized = Some(size),
            _ => {}
        }
    }
}

/// Pop the next queued event, pumping the loop only when the queue is empty
///
/// The first `Exit` becomes a single `Quit`; after that the loop is never
/// pumped again and the queue drains to `None`.
fn next_event<F>(handler: &mut WindowHandler, pump: F) -> Option<Event>
where
    F: FnOnce(&mut WindowHandler) -> PumpStatus,
{
    if handler.events.is_empty() && !handler.exited {
        if let PumpStatus::Exit(code) = pump(handler) {
            log::debug!("Event loop exited with code {code}");
            handler.exited = true;
            handler.events.push_back(Event::Quit);
        }
    }
    handler.events.pop_front()
}

/// winit window + wgpu canvas
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    handler: WindowHandler,
    canvas: WgpuCanvas,
    started: Instant,
}

impl WinitPlatform {
    /// Bring up the subsystem, the window, then the renderer
    pub fn create(config: &WindowConfig) -> Result<Self, InitError> {
        let started = Instant::now();

        let mut event_loop = EventLoop::new().map_err(|e| InitError::Subsystem(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        // The window can only be created from inside `resumed`
        let mut handler = WindowHandler::new(config.clone());
        for _ in 0..CREATE_PUMP_ATTEMPTS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut handler)
            {
                return Err(InitError::Subsystem(format!(
                    "event loop exited during startup (code {code})"
                )));
            }
            if let Some(err) = handler.create_error.take() {
                return Err(InitError::Window(err));
            }
            if handler.window.is_some() {
                break;
            }
        }
        let window = handler
            .window
            .clone()
            .ok_or_else(|| InitError::Window("no resume event from the event loop".to_string()))?;

        let canvas = pollster::block_on(WgpuCanvas::new(
            window,
            (config.width, config.height),
            config.clear_color,
        ))?;

        log::info!(
            "Window '{}' opened at ({}, {}) {}x{}",
            config.title,
            config.x,
            config.y,
            config.width,
            config.height
        );

        Ok(Self {
            event_loop,
            handler,
            canvas,
            started,
        })
    }
}

impl Clock for WinitPlatform {
    fn ticks(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl Platform for WinitPlatform {
    type Canvas = WgpuCanvas;

    fn poll_event(&mut self) -> Option<Event> {
        let event_loop = &mut self.event_loop;
        let event = next_event(&mut self.handler, |handler| {
            event_loop.pump_app_events(Some(Duration::ZERO), handler)
        });
        if let Some(size) = self.handler.resized.take() {
            self.canvas.resize(size.width, size.height);
        }
        event
    }

    fn keyboard_state(&self) -> KeyboardState {
        self.handler.keyboard.clone()
    }

    fn canvas(&mut self) -> &mut WgpuCanvas {
        &mut self.canvas
    }

    fn shutdown(self) {
        let Self {
            event_loop,
            mut handler,
            canvas,
            ..
        } = self;
        // The surface holds a window reference, so it goes first
        drop(canvas);
        drop(handler.window.take());
        drop(event_loop);
        log::info!("Platform shut down");
    }
}
