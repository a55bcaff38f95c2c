
use std::path::PathBuf;
use winit::dpi::PhysicalSize;

// ------------------------------------------------------------

pub const SOURCE_CAPACITY: usize = 8192;

// ------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config
{
    pub title: String,
    pub size: PhysicalSize<u32>,
    pub gl_version: (u8, u8),
    pub clear_color: [f32; 4],
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub source_capacity: usize
}

impl Default for Config
{
    fn default() -> Self
    {
        Self
        {
            title: String::from("LearnOpenGL"),
            size: PhysicalSize::new(800, 600),
            gl_version: (3, 3),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            vertex_shader: PathBuf::from("shaders/triangle.vert"),
            fragment_shader: PathBuf::from("shaders/triangle.frag"),
            source_capacity: SOURCE_CAPACITY
        }
    }
}

// ------------------------------------------------------------

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn defaults_match_the_tutorial_window()
    {
        let config = Config::default();
        assert_eq!(config.title, "LearnOpenGL");
        assert_eq!(config.size, PhysicalSize::new(800, 600));
        assert_eq!(config.gl_version, (3, 3));
        assert_eq!(config.source_capacity, 8192);
    }

    #[test]
    fn defaults_point_at_bundled_shaders()
    {
        let config = Config::default();
        assert_eq!(config.vertex_shader, PathBuf::from("shaders/triangle.vert"));
        assert_eq!(config.fragment_shader, PathBuf::from("shaders/triangle.frag"));
    }
}
