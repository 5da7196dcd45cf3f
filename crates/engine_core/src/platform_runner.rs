// crates/engine_core/src/platform_runner.rs

use std::time::Instant;

use thiserror::Error;
use tracing::info;
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Fullscreen, WindowBuilder};

use crate::app::App;
use crate::config_store::Configuration;
use crate::settings::StartupSettings;
use crate::window::WinitWindow;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] OsError),
}

/// Owns the configuration until the window exists, then runs the winit
/// event loop and drives `App::tick` at the loop's rate.
pub struct PlatformRunner {
    config: Configuration,
    title: String,
}

impl PlatformRunner {
    pub fn new(config: Configuration, title: impl Into<String>) -> Self {
        Self {
            config,
            title: title.into(),
        }
    }

    pub fn start(self) -> Result<(), PlatformError> {
        let settings = StartupSettings::from_config(&self.config);
        let (width, height) = settings.resolution;

        let event_loop = EventLoop::new()?;
        let mut builder = WindowBuilder::new()
            .with_title(&self.title)
            .with_inner_size(PhysicalSize::new(width, height));
        if settings.fullscreen {
            builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = builder.build(&event_loop)?;

        // Subscribe before `App::new` so startup rejections show up too.
        let mut config = self.config;
        let diagnostics = config.diagnostics();
        let mut app = App::new(config, WinitWindow::new(window));
        app.window_title = self.title;
        let mut shown_title = String::new();
        let mut last_rejected: Option<String> = None;

        info!("entering event loop");
        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => app.resize(size.width, size.height),
                other => app.poller.handle_event(&other),
            },

            Event::DeviceEvent { event, .. } => app.poller.handle_device_event(&event),

            Event::AboutToWait => {
                if let Some(dt) = app.main_loop.poll(Instant::now()) {
                    app.tick(dt, false);

                    if let Some(err) = diagnostics.try_iter().last() {
                        last_rejected = Some(err.to_string());
                    }

                    // No overlay renderer here, so stats and the latest
                    // rejected setting go into the title bar.
                    let mut title = app.window_title.clone();
                    if let Some(stats) = app.stats.summary() {
                        title.push_str("  ");
                        title.push_str(&stats);
                    }
                    if let Some(rejected) = &last_rejected {
                        title.push_str("  [");
                        title.push_str(rejected);
                        title.push(']');
                    }
                    if title != shown_title {
                        app.window().window.set_title(&title);
                        shown_title = title;
                    }
                }

                match app.main_loop.next_deadline() {
                    Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                    None => elwt.set_control_flow(ControlFlow::Poll),
                }
            }

            _ => {}
        })?;

        Ok(())
    }
}
