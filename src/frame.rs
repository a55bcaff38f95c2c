
use winit::dpi::PhysicalSize;

// ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState
{
    Running,
    Closed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key
{
    Escape,
    Other
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent
{
    CloseRequested,
    KeyPressed(Key),
    Resized(PhysicalSize<u32>)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport
{
    pub origin: [i32; 2],
    pub size: [u32; 2]
}

impl From<PhysicalSize<u32>> for Viewport
{
    fn from(size: PhysicalSize<u32>) -> Self
    {
        Self
        {
            origin: [0; 2],
            size: [size.width, size.height]
        }
    }
}

// ------------------------------------------------------------

/// Window-independent half of the render loop. Events set flags; the state only
/// changes when the next frame begins.
#[derive(Debug)]
pub struct FrameLoop
{
    state: LoopState,
    should_close: bool,
    pending_viewport: Option<Viewport>,
    frames: u64
}

impl FrameLoop
{
    pub fn new() -> Self
    {
        Self
        {
            state: LoopState::Running,
            should_close: false,
            pending_viewport: None,
            frames: 0
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState
    {
        self.state
    }

    #[cfg(test)]
    pub fn should_close(&self) -> bool
    {
        self.should_close
    }

    pub fn frames(&self) -> u64
    {
        self.frames
    }

    pub fn handle(&mut self, event: LoopEvent) -> ()
    {
        match event
        {
            LoopEvent::CloseRequested | LoopEvent::KeyPressed(Key::Escape) =>
            {
                log::debug!("close requested by {event:?}");
                self.should_close = true
            }
            LoopEvent::KeyPressed(Key::Other) => {}
            LoopEvent::Resized(size) =>
            {
                log::debug!("framebuffer resized to {}x{}", size.width, size.height);
                self.pending_viewport = Some(size.into())
            }
        }
    }

    pub fn begin_frame(&mut self) -> LoopState
    {
        if self.state == LoopState::Running
        {
            match self.should_close
            {
                true => self.state = LoopState::Closed,
                false => self.frames += 1
            }
        }
        self.state
    }

    pub fn take_viewport(&mut self) -> Option<Viewport>
    {
        self.pending_viewport.take()
    }
}

// ------------------------------------------------------------
