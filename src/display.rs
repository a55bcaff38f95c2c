
use std::{ffi::CString, num::NonZeroU32};
use anyhow::{Context, anyhow};
use glutin::
{
    config::{Config as GlutinConfig, ConfigTemplateBuilder},
    display::GetGlDisplay,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    prelude::*,
    surface::{Surface, WindowSurface}
};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasRawWindowHandle;
use winit::{window::*, event_loop::*};
use super::{config::Config, frame::Viewport, ogl::*};

// ------------------------------------------------------------

fn pick_config(configs: Box<dyn Iterator<Item = GlutinConfig> + '_>) -> GlutinConfig
{
    configs
        .reduce
        (
            |best, config| match config.num_samples() > best.num_samples()
            {
                true => config,
                false => best
            }
        )
        .expect("glutin only calls the picker with a non-empty set")
}

// ------------------------------------------------------------

pub struct GLWindow
{
    pointers: FunctionPointers,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window
}

impl GLWindow
{
    pub fn new
    (
        event_loop: &EventLoopWindowTarget<()>,
        config: &Config
    ) -> anyhow::Result<Self>
    {
        let builder = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(config.size)
            .with_resizable(true);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_builder(Some(builder))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|error| anyhow!("Could not create OpenGL window: {error}"))?;
        let window = window.context("Could not create OpenGL window")?;
        let display = gl_config.display();
        let (major, minor) = config.gl_version;
        let attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(window.raw_window_handle()));
        let not_current = unsafe{display.create_context(&gl_config, &attributes)}
            .with_context(|| format!("Could not create an OpenGL {major}.{minor} core context"))?;
        let surface_attributes = window.build_surface_attributes(Default::default());
        let surface = unsafe{display.create_window_surface(&gl_config, &surface_attributes)}
            .context("Could not create window surface")?;
        let context = not_current.make_current(&surface)
            .context("Could not make OpenGL context current")?;
        let pointers = FunctionPointers::load
        (
            |symbol| CString::new(symbol)
                .map(|symbol| display.get_proc_address(&symbol))
                .unwrap_or(std::ptr::null())
        ).context("Failed to load OpenGL functions")?;
        log::info!
        (
            "OpenGL {} on {} ({})",
            pointers.get_string(VERSION).unwrap_or_default(),
            pointers.get_string(RENDERER).unwrap_or_default(),
            pointers.get_string(VENDOR).unwrap_or_default()
        );
        let [red, green, blue, alpha] = config.clear_color;
        unsafe{pointers.ClearColor(red, green, blue, alpha)}
        let gl_window = Self{pointers, surface, context, window};
        gl_window.set_viewport(&config.size.into());
        Ok(gl_window)
    }

    pub fn pointers(&self) -> &FunctionPointers
    {
        &self.pointers
    }

    pub fn request_redraw(&self) -> ()
    {
        self.window.request_redraw()
    }

    // also resizes the surface, which EGL based platforms need
    pub fn set_viewport(&self, viewport: &Viewport) -> ()
    {
        let [width, height] = viewport.size;
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height))
        {
            self.surface.resize(&self.context, width, height)
        }
        unsafe
        {
            self.pointers.Viewport
            (
                viewport.origin[0],
                viewport.origin[1],
                width as _,
                height as _
            )
        }
    }

    pub fn clear(&self) -> ()
    {
        unsafe{self.pointers.Clear(COLOR_BUFFER_BIT)}
    }

    pub fn swap_buffers(&self) -> anyhow::Result<()>
    {
        self.surface.swap_buffers(&self.context)
            .context("Could not swap buffers")
    }
}
