
use std::fmt;
use anyhow::Context;
use winit::{event::*, event_loop::*};
use super::
{
    config::Config,
    display::GLWindow,
    frame::{FrameLoop, Key, LoopEvent, LoopState},
    ogl::Program,
    shaders::{self, ShaderSpec, ShaderStage},
    triangle::Mesh
};

// ----------------------------------------------------------------------------------------------------

#[derive(Debug)]
pub enum StartupError
{
    Window(anyhow::Error),
    Resources(anyhow::Error),
    Shaders(anyhow::Error)
}

impl StartupError
{
    pub fn exit_code(&self) -> i32
    {
        match self
        {
            Self::Window(_) | Self::Resources(_) => -1,
            Self::Shaders(_) => 1
        }
    }
}

impl std::error::Error for StartupError {}

impl fmt::Display for StartupError
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Self::Window(error) | Self::Resources(error) | Self::Shaders(error) =>
                write!(formatter, "{error:#}")
        }
    }
}

// ----------------------------------------------------------------------------------------------------

fn loop_event(event: &WindowEvent) -> Option<LoopEvent>
{
    match event
    {
        WindowEvent::CloseRequested => Some(LoopEvent::CloseRequested),
        WindowEvent::KeyboardInput
        {
            input: KeyboardInput
            {
                state: ElementState::Pressed,
                virtual_keycode: Some(keycode),
                ..
            },
            ..
        } => Some
        (
            LoopEvent::KeyPressed
            (
                match keycode
                {
                    VirtualKeyCode::Escape => Key::Escape,
                    _ => Key::Other
                }
            )
        ),
        WindowEvent::Resized(size) => Some(LoopEvent::Resized(*size)),
        WindowEvent::ScaleFactorChanged{new_inner_size, ..} =>
            Some(LoopEvent::Resized(**new_inner_size)),
        _ => None
    }
}

// ----------------------------------------------------------------------------------------------------

// GL objects are declared before the window so they are deleted while its context is alive.
pub struct App
{
    mesh: Mesh,
    program: Program,
    frame_loop: FrameLoop,
    window: GLWindow
}

impl App
{
    pub fn new(config: Config) -> Result<(Self, EventLoop<()>), StartupError>
    {
        let event_loop = EventLoop::new();
        let window = GLWindow::new(&event_loop, &config)
            .map_err(StartupError::Window)?;
        let mesh = Mesh::triangle(window.pointers())
            .context("Failed to upload triangle vertices")
            .map_err(StartupError::Resources)?;
        let program = shaders::create_shader_program
        (
            window.pointers(),
            &[
                ShaderSpec::new(&config.vertex_shader, ShaderStage::Vertex),
                ShaderSpec::new(&config.fragment_shader, ShaderStage::Fragment)
            ],
            config.source_capacity
        ).map_err(StartupError::Shaders)?;
        Ok
        ((
            Self
            {
                mesh,
                program,
                frame_loop: FrameLoop::new(),
                window
            },
            event_loop
        ))
    }

    pub fn on_window_event(&mut self, event: &WindowEvent) -> ()
    {
        if let Some(event) = loop_event(event)
        {
            self.frame_loop.handle(event)
        }
    }

    pub fn refresh(&mut self, control_flow: &mut ControlFlow) -> ()
    {
        match self.frame_loop.begin_frame()
        {
            LoopState::Closed =>
            {
                log::info!("window closed after {} frames", self.frame_loop.frames());
                *control_flow = ControlFlow::Exit
            }
            LoopState::Running =>
            {
                if let Some(viewport) = self.frame_loop.take_viewport()
                {
                    self.window.set_viewport(&viewport)
                }
                self.window.request_redraw()
            }
        }
    }

    pub fn draw(&mut self) -> ()
    {
        self.window.clear();
        self.program.activate();
        self.mesh.draw();
        if let Err(error) = self.window.swap_buffers()
        {
            log::error!("{error:#}")
        }
    }
}

// ----------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests
{
    use super::*;
    use winit::dpi::PhysicalSize;

    #[allow(deprecated)]
    fn key_event(state: ElementState, keycode: VirtualKeyCode) -> WindowEvent<'static>
    {
        WindowEvent::KeyboardInput
        {
            device_id: unsafe{DeviceId::dummy()},
            input: KeyboardInput
            {
                scancode: 0,
                state,
                virtual_keycode: Some(keycode),
                modifiers: ModifiersState::empty()
            },
            is_synthetic: false
        }
    }

    #[test]
    fn window_failures_exit_with_minus_one()
    {
        let error = StartupError::Window(anyhow::anyhow!("no display"));
        assert_eq!(error.exit_code(), -1);
        assert_eq!(StartupError::Resources(anyhow::anyhow!("no buffer")).exit_code(), -1);
    }

    #[test]
    fn missing_shader_exits_with_one()
    {
        let spec = ShaderSpec::new("shaders/missing.vert", ShaderStage::Vertex);
        let error = StartupError::Shaders(shaders::load_source(&spec, 8192).unwrap_err());
        assert_eq!(error.exit_code(), 1);
        assert!(error.to_string().starts_with("Failed to load shader source of vertex shader"));
    }

    #[test]
    fn close_and_resize_events_translate()
    {
        assert_eq!(loop_event(&WindowEvent::CloseRequested), Some(LoopEvent::CloseRequested));
        assert_eq!
        (
            loop_event(&WindowEvent::Resized(PhysicalSize::new(300, 200))),
            Some(LoopEvent::Resized(PhysicalSize::new(300, 200)))
        );
        assert_eq!(loop_event(&WindowEvent::Focused(true)), None);
    }

    #[test]
    fn escape_press_translates_to_escape()
    {
        assert_eq!
        (
            loop_event(&key_event(ElementState::Pressed, VirtualKeyCode::Escape)),
            Some(LoopEvent::KeyPressed(Key::Escape))
        );
    }

    #[test]
    fn escape_release_is_ignored()
    {
        assert_eq!(loop_event(&key_event(ElementState::Released, VirtualKeyCode::Escape)), None);
    }

    #[test]
    fn other_key_press_translates_to_other()
    {
        assert_eq!
        (
            loop_event(&key_event(ElementState::Pressed, VirtualKeyCode::Space)),
            Some(LoopEvent::KeyPressed(Key::Other))
        );
    }

    #[test]
    fn scale_factor_change_resizes_to_new_inner_size()
    {
        let mut new_inner_size = PhysicalSize::new(1600, 1200);
        let event = WindowEvent::ScaleFactorChanged
        {
            scale_factor: 2.0,
            new_inner_size: &mut new_inner_size
        };
        assert_eq!(loop_event(&event), Some(LoopEvent::Resized(PhysicalSize::new(1600, 1200))));
    }

    #[test]
    fn escape_press_closes_the_loop_on_next_frame()
    {
        let mut frame_loop = FrameLoop::new();
        frame_loop.begin_frame();
        if let Some(event) = loop_event(&key_event(ElementState::Pressed, VirtualKeyCode::Escape))
        {
            frame_loop.handle(event)
        }
        assert_eq!(frame_loop.begin_frame(), LoopState::Closed);
    }
}
