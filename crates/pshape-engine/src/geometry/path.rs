use super::{Vertex, VertexAttribs, VertexCode};

/// Vertex records plus the codes describing how to walk them.
///
/// Authoring only appends. The one bulk operation, [`set_path`](Self::set_path),
/// replaces the contents wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStore {
    vertices: Vec<Vertex>,
    codes: Vec<VertexCode>,
    attribs: VertexAttribs,
}

impl Default for PathStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PathStore {
    pub fn new() -> Self {
        Self { vertices: Vec::new(), codes: Vec::new(), attribs: VertexAttribs::empty() }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn codes(&self) -> &[VertexCode] {
        &self.codes
    }

    #[inline]
    pub fn attribs(&self) -> VertexAttribs {
        self.attribs
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn code_count(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.codes.is_empty()
    }

    #[inline]
    pub fn is_3d(&self) -> bool {
        self.attribs.contains(VertexAttribs::POSITION_3D)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Vertex> {
        self.vertices.get_mut(index)
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// Raw bytes of the vertex records, for upload to a vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub(crate) fn insert_attribs(&mut self, attribs: VertexAttribs) {
        self.attribs.insert(attribs);
    }

    /// Appends `code` together with the vertices it consumes.
    ///
    /// `verts.len()` must equal `code.stride()`.
    pub fn push(&mut self, code: VertexCode, verts: &[Vertex]) {
        debug_assert_eq!(verts.len(), code.stride(), "{code:?} consumes {} vertices", code.stride());
        for v in verts {
            self.track(v);
        }
        self.vertices.extend_from_slice(verts);
        self.codes.push(code);
    }

    #[inline]
    pub fn push_break(&mut self) {
        self.codes.push(VertexCode::Break);
    }

    /// Drops a `Break` left as the last code, i.e. a contour that received
    /// no vertices. Returns whether one was removed.
    pub(crate) fn pop_trailing_break(&mut self) -> bool {
        if self.codes.last() == Some(&VertexCode::Break) {
            self.codes.pop();
            return true;
        }
        false
    }

    /// Replaces the path with the first `vertex_count` vertices and the first
    /// `code_count` codes of the given slices.
    ///
    /// Returns `false` and leaves the store untouched if either slice is
    /// shorter than requested. A `code_count` of zero means "every vertex is
    /// a plain vertex".
    pub fn set_path(
        &mut self,
        vertex_count: usize,
        vertices: &[Vertex],
        code_count: usize,
        codes: &[VertexCode],
    ) -> bool {
        if vertices.len() < vertex_count || codes.len() < code_count {
            return false;
        }

        self.vertices.clear();
        self.vertices.extend_from_slice(&vertices[..vertex_count]);
        self.codes.clear();
        self.codes.extend_from_slice(&codes[..code_count]);

        self.attribs.remove(VertexAttribs::POSITION_3D);
        if self.vertices.iter().any(|v| v.z() != 0.0) {
            self.attribs.insert(VertexAttribs::POSITION_3D);
        }
        true
    }

    /// Walks the path as segments.
    ///
    /// Without codes each vertex is yielded as a plain vertex. With codes,
    /// iteration stops early if a code needs more vertices than remain.
    pub fn segments(&self) -> Segments<'_> {
        Segments { store: self, code: 0, vertex: 0 }
    }

    fn track(&mut self, v: &Vertex) {
        if v.z() != 0.0 {
            self.attribs.insert(VertexAttribs::POSITION_3D);
        }
    }
}

/// One decoded path step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathSegment<'a> {
    Vertex(&'a Vertex),
    Quadratic(&'a Vertex, &'a Vertex),
    Bezier(&'a Vertex, &'a Vertex, &'a Vertex),
    Curve(&'a Vertex),
    Break,
}

/// Iterator returned by [`PathStore::segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    store: &'a PathStore,
    code: usize,
    vertex: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = PathSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let store: &'a PathStore = self.store;
        let verts = &store.vertices;

        if store.codes.is_empty() {
            let v = verts.get(self.vertex)?;
            self.vertex += 1;
            return Some(PathSegment::Vertex(v));
        }

        let code = *store.codes.get(self.code)?;
        let start = self.vertex;
        let end = start + code.stride();
        if end > verts.len() {
            // Truncated path: stop rather than read past the records.
            self.code = store.codes.len();
            return None;
        }
        self.code += 1;
        self.vertex = end;

        let v = &verts[start..end];
        Some(match code {
            VertexCode::Vertex => PathSegment::Vertex(&v[0]),
            VertexCode::Quadratic => PathSegment::Quadratic(&v[0], &v[1]),
            VertexCode::Bezier => PathSegment::Bezier(&v[0], &v[1], &v[2]),
            VertexCode::Curve => PathSegment::Curve(&v[0]),
            VertexCode::Break => PathSegment::Break,
        })
    }
}
