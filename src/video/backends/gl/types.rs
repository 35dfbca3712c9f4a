use gl::types::*;

use super::super::super::assets::prelude::*;

impl From<VertexFormat> for GLenum {
    fn from(format: VertexFormat) -> Self {
        match format {
            VertexFormat::Float => gl::FLOAT,
        }
    }
}
