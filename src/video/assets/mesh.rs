//! Vertex records and the layout that binds their fields to program attributes.

pub const MAX_VERTEX_ATTRIBUTES: usize = 8;

/// The data type of each component of a vertex attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VertexFormat {
    Float,
}

impl VertexFormat {
    /// Size in bytes of a single component.
    pub fn size(self) -> u8 {
        match self {
            VertexFormat::Float => 4,
        }
    }
}

/// The vertex attributes consumed by the textured program.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum VertexAttribute {
    Position,
    Color,
    Texcoord,
}

impl VertexAttribute {
    pub const ALL: [VertexAttribute; 3] = [
        VertexAttribute::Position,
        VertexAttribute::Color,
        VertexAttribute::Texcoord,
    ];

    /// The identifier of this attribute in shader source.
    pub fn name(self) -> &'static str {
        match self {
            VertexAttribute::Position => "position",
            VertexAttribute::Color => "vertexColor",
            VertexAttribute::Texcoord => "vertexUV",
        }
    }
}

/// Describes how one attribute is read out of an interleaved record.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VertexAttributeDesc {
    pub attribute: VertexAttribute,
    /// The data type of each component of this element.
    pub format: VertexFormat,
    /// The number of components per generic vertex element.
    pub size: u8,
    /// Whether fixed-point data values should be normalized.
    pub normalized: bool,
    /// Byte offset of this element from the start of the record.
    pub offset: u8,
}

/// The layout of an interleaved vertex record.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct VertexLayout {
    stride: u8,
    len: u8,
    elements: [Option<VertexAttributeDesc>; MAX_VERTEX_ATTRIBUTES],
}

impl VertexLayout {
    /// Creates a new an empty `VertexLayoutBuilder`.
    #[inline]
    pub fn build() -> VertexLayoutBuilder {
        VertexLayoutBuilder::new()
    }

    /// Stride of single vertex structure.
    #[inline]
    pub fn stride(&self) -> u8 {
        self.stride
    }

    /// Relative element offset from the layout.
    pub fn offset(&self, attribute: VertexAttribute) -> Option<u8> {
        self.element(attribute).map(|v| v.offset)
    }

    /// Returns the description of `attribute` if the record carries it.
    pub fn element(&self, attribute: VertexAttribute) -> Option<VertexAttributeDesc> {
        self.iter().find(|v| v.attribute == attribute)
    }

    /// Iterates the elements in declaration order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = VertexAttributeDesc> + 'a {
        self.elements[..self.len as usize].iter().filter_map(|v| *v)
    }
}

#[derive(Default)]
pub struct VertexLayoutBuilder {
    layout: VertexLayout,
}

impl VertexLayoutBuilder {
    #[inline]
    pub fn new() -> Self {
        VertexLayoutBuilder::default()
    }

    /// Appends an element after the previous ones. Declaring the same attribute
    /// twice replaces its description but keeps its position.
    pub fn with(
        &mut self,
        attribute: VertexAttribute,
        format: VertexFormat,
        size: u8,
        normalized: bool,
    ) -> &mut Self {
        let desc = VertexAttributeDesc {
            attribute,
            format,
            size,
            normalized,
            offset: 0,
        };

        let len = self.layout.len as usize;
        match self.layout.elements[..len]
            .iter()
            .position(|v| v.map(|v| v.attribute) == Some(attribute))
        {
            Some(i) => self.layout.elements[i] = Some(desc),
            None => {
                assert!(len < MAX_VERTEX_ATTRIBUTES, "Out of layout bounds.");
                self.layout.elements[len] = Some(desc);
                self.layout.len += 1;
            }
        }

        self
    }

    /// Packs the elements tightly in declaration order and computes the stride.
    pub fn finish(&mut self) -> VertexLayout {
        let mut stride = 0;
        for v in self.layout.elements[..self.layout.len as usize].iter_mut() {
            if let Some(ref mut v) = *v {
                v.offset = stride;
                stride += v.size * v.format.size();
            }
        }

        self.layout.stride = stride;
        self.layout
    }
}

#[macro_export]
macro_rules! impl_vertex {
    ($name: ident { $($field: ident => [$attribute: tt; $format: tt; $size: tt; $normalized: tt],)* }) => (
        #[repr(C)]
        #[derive(Debug, Copy, Clone, PartialEq)]
        pub struct $name {
            $(pub $field: impl_vertex_field!{$format, $size}, )*
        }

        impl $name {
            pub fn new($($field: impl_vertex_field!{$format, $size}, ) *) -> Self {
                $name {
                    $($field,)*
                }
            }

            pub fn layout() -> $crate::video::assets::mesh::VertexLayout {
                let mut builder = $crate::video::assets::mesh::VertexLayoutBuilder::new();

                $( builder.with(
                    $crate::video::assets::mesh::VertexAttribute::$attribute,
                    $crate::video::assets::mesh::VertexFormat::$format,
                    $size,
                    $normalized); ) *

                builder.finish()
            }

            pub fn as_bytes(values: &[Self]) -> &[u8] {
                let len = values.len() * ::std::mem::size_of::<Self>();
                unsafe { ::std::slice::from_raw_parts(values.as_ptr() as *const u8, len) }
            }
        }
    )
}

#[macro_export]
macro_rules! impl_vertex_field {
    (Float, 2) => ([f32; 2]);
    (Float, 4) => ([f32; 4]);
}

impl_vertex! {
    TexturedVertex {
        position => [Position; Float; 2; false],
        color => [Color; Float; 4; false],
        texcoord => [Texcoord; Float; 2; false],
    }
}

impl TexturedVertex {
    /// An equilateral triangle centered on the origin, with one red, green and
    /// blue corner.
    pub const TRIANGLE: [TexturedVertex; 3] = [
        TexturedVertex {
            position: [0.0, 0.5],
            color: [1.0, 0.0, 0.0, 1.0],
            texcoord: [0.5, 1.0],
        },
        TexturedVertex {
            position: [-0.433, -0.25],
            color: [0.0, 1.0, 0.0, 1.0],
            texcoord: [0.0, 0.0],
        },
        TexturedVertex {
            position: [0.433, -0.25],
            color: [0.0, 0.0, 1.0, 1.0],
            texcoord: [1.0, 0.0],
        },
    ];
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic() {
        let layout = VertexLayout::build()
            .with(VertexAttribute::Position, VertexFormat::Float, 3, true)
            .with(VertexAttribute::Texcoord, VertexFormat::Float, 2, true)
            .finish();

        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.offset(VertexAttribute::Position), Some(0));
        assert_eq!(layout.offset(VertexAttribute::Texcoord), Some(12));
        assert_eq!(layout.offset(VertexAttribute::Color), None);

        let element = layout.element(VertexAttribute::Position).unwrap();
        assert_eq!(element.format, VertexFormat::Float);
        assert_eq!(element.size, 3);
        assert_eq!(element.normalized, true);
    }

    #[test]
    fn rewrite() {
        let layout = VertexLayout::build()
            .with(VertexAttribute::Position, VertexFormat::Float, 1, false)
            .with(VertexAttribute::Color, VertexFormat::Float, 4, true)
            .with(VertexAttribute::Position, VertexFormat::Float, 2, false)
            .finish();

        assert_eq!(layout.stride(), 24);
        assert_eq!(layout.offset(VertexAttribute::Position), Some(0));
        assert_eq!(layout.offset(VertexAttribute::Color), Some(8));
        assert_eq!(layout.iter().count(), 2);
    }

    #[test]
    fn representation() {
        let layout = TexturedVertex::layout();
        assert_eq!(
            layout.stride() as usize,
            ::std::mem::size_of::<TexturedVertex>()
        );

        let bytes = TexturedVertex::as_bytes(&TexturedVertex::TRIANGLE);
        assert_eq!(bytes.len(), 3 * 32);
    }
}
