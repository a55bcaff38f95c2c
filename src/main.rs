
mod app;
mod config;
mod display;
mod frame;
mod logging;
mod ogl;
mod reader;
mod shaders;
mod triangle;

// ------------------------------------------------------------

use winit::{event::*, event_loop::*};

// ------------------------------------------------------------

fn main() -> !
{
    logging::init_logging(Default::default());
    let (mut app, event_loop) = match app::App::new(config::Config::default())
    {
        Ok(started) => started,
        Err(error) =>
        {
            log::error!("{error}");
            std::process::exit(error.exit_code())
        }
    };
    event_loop.run
    (
        move |event, _, control_flow| match event
        {
            Event::NewEvents(StartCause::Init) =>
                *control_flow = ControlFlow::Poll,
            Event::WindowEvent{event: window_event, ..} =>
                app.on_window_event(&window_event),
            Event::MainEventsCleared => app.refresh(control_flow),
            Event::RedrawRequested(..) => app.draw(),
            _ => {}
        }
    )
}
