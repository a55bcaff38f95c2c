
use super::ogl::*;

// ------------------------------------------------------------

/// One triangle in normalized device coordinates.
pub const TRIANGLE_VERTICES: [[GLfloat; 3]; 3] =
[
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
    [0.0, 0.5, 0.0]
];

const POSITION_LOCATION: GLuint = 0;

// ------------------------------------------------------------

pub struct Mesh
{
    pointers: FunctionPointers,
    vao: VertexArrayObject,
    #[allow(dead_code)]
    vbo: Buffer,
    vertex_count: GLsizei
}

impl Mesh
{
    pub fn triangle(pointers: &FunctionPointers) -> Result<Self>
    {
        let vao = VertexArrayObject::new(pointers);
        vao.bind();
        let vbo = TRIANGLE_VERTICES.to_attribute(pointers, POSITION_LOCATION)?;
        unsafe{pointers.BindVertexArray(0)}
        log::debug!("uploaded {} vertices into buffer {}", TRIANGLE_VERTICES.len(), *vbo);
        Ok
        (
            Self
            {
                pointers: pointers.clone(),
                vao,
                vbo,
                vertex_count: TRIANGLE_VERTICES.len() as _
            }
        )
    }

    pub fn draw(&self) -> ()
    {
        self.vao.bind();
        unsafe{self.pointers.DrawArrays(TRIANGLES, 0, self.vertex_count)}
    }
}

// ------------------------------------------------------------

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn triangle_is_fixed()
    {
        assert_eq!
        (
            TRIANGLE_VERTICES,
            [[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.0, 0.5, 0.0]]
        );
    }

    #[test]
    fn triangle_is_nine_packed_floats()
    {
        let flattened: Vec<GLfloat> = TRIANGLE_VERTICES.iter().flatten().copied().collect();
        assert_eq!(flattened.len(), 9);
        assert_eq!(std::mem::size_of_val(&TRIANGLE_VERTICES), 9 * std::mem::size_of::<GLfloat>());
    }

    #[test]
    fn triangle_uploads_as_attribute()
    {
        fn uploadable<A: Attribute>(_: &A) -> () {}
        uploadable(&TRIANGLE_VERTICES);
    }

    #[test]
    fn triangle_lies_in_clip_space()
    {
        assert!
        (
            TRIANGLE_VERTICES.iter()
                .flatten()
                .all(|coordinate| (-1.0..=1.0).contains(coordinate))
        );
    }
}
