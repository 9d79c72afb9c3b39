//! Mesh library blob (`dat0` + `str0` + `idx0`)
//!
//! All meshes share one vertex array; a mesh is a named contiguous range of
//! it, drawn as a triangle list.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use bytemuck::{Pod, Zeroable};

use super::chunk::{read_chunk, write_chunk};
use super::{AssetError, AssetResult};

/// Vertex as stored on disk and uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// RGBA8, unorm
    pub color: [u8; 4],
}

const _: () = assert!(std::mem::size_of::<MeshVertex>() == 28);

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct IndexEntry {
    name_begin: u32,
    name_end: u32,
    vertex_begin: u32,
    vertex_end: u32,
}

/// Vertex range of one mesh inside the library's vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshHandle {
    pub start: u32,
    pub count: u32,
}

impl MeshHandle {
    pub fn range(&self) -> std::ops::Range<u32> {
        self.start..self.start + self.count
    }
}

/// Named meshes over one shared vertex array.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    vertices: Vec<MeshVertex>,
    meshes: HashMap<String, MeshHandle>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> AssetResult<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        let library = Self::from_reader(&mut reader)?;
        log::info!(
            "Loaded {} meshes ({} vertices) from {}",
            library.meshes.len(),
            library.vertices.len(),
            path.display()
        );
        Ok(library)
    }

    pub fn from_reader<R: Read>(reader: &mut R) -> AssetResult<Self> {
        let vertices: Vec<MeshVertex> = read_chunk(reader, b"dat0")?;
        let strings: Vec<u8> = read_chunk(reader, b"str0")?;
        let index: Vec<IndexEntry> = read_chunk(reader, b"idx0")?;

        let mut meshes = HashMap::with_capacity(index.len());
        for (i, entry) in index.iter().enumerate() {
            if entry.name_begin > entry.name_end || entry.name_end as usize > strings.len() {
                return Err(AssetError::NameOutOfRange {
                    index: i,
                    begin: entry.name_begin,
                    end: entry.name_end,
                    len: strings.len(),
                });
            }
            let name = String::from_utf8_lossy(
                &strings[entry.name_begin as usize..entry.name_end as usize],
            )
            .into_owned();

            if entry.vertex_begin > entry.vertex_end || entry.vertex_end as usize > vertices.len() {
                return Err(AssetError::VertexRangeOutOfRange {
                    name,
                    begin: entry.vertex_begin,
                    end: entry.vertex_end,
                    len: vertices.len(),
                });
            }

            let handle = MeshHandle {
                start: entry.vertex_begin,
                count: entry.vertex_end - entry.vertex_begin,
            };
            if meshes.insert(name.clone(), handle).is_some() {
                return Err(AssetError::DuplicateMesh(name));
            }
        }

        Ok(Self { vertices, meshes })
    }

    /// Append a mesh's vertices and register it under `name`.
    pub fn insert(&mut self, name: impl Into<String>, vertices: &[MeshVertex]) -> AssetResult<MeshHandle> {
        let name = name.into();
        if self.meshes.contains_key(&name) {
            return Err(AssetError::DuplicateMesh(name));
        }
        let handle = MeshHandle {
            start: self.vertices.len() as u32,
            count: vertices.len() as u32,
        };
        self.vertices.extend_from_slice(vertices);
        self.meshes.insert(name, handle);
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> AssetResult<MeshHandle> {
        self.meshes
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::MeshNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Serialize in the layout [`MeshLibrary::from_reader`] reads. Meshes are
    /// written in vertex order.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> AssetResult<()> {
        let mut named: Vec<_> = self.meshes.iter().collect();
        named.sort_by_key(|(_, handle)| handle.start);

        let mut strings = Vec::new();
        let mut index = Vec::with_capacity(named.len());
        for (name, handle) in named {
            let name_begin = strings.len() as u32;
            strings.extend_from_slice(name.as_bytes());
            index.push(IndexEntry {
                name_begin,
                name_end: strings.len() as u32,
                vertex_begin: handle.start,
                vertex_end: handle.start + handle.count,
            });
        }

        write_chunk(writer, b"dat0", &self.vertices)?;
        write_chunk(writer, b"str0", &strings)?;
        write_chunk(writer, b"idx0", &index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(color: u8) -> [MeshVertex; 3] {
        let v = |x: f32| MeshVertex {
            position: [x, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            color: [color, color, color, 255],
        };
        [v(0.0), v(1.0), v(2.0)]
    }

    #[test]
    fn lookup_by_name() {
        let mut library = MeshLibrary::new();
        library.insert("Base", &triangle(10)).unwrap();
        let tip = library.insert("Tip", &triangle(20)).unwrap();
        assert_eq!(tip, MeshHandle { start: 3, count: 3 });
        assert_eq!(library.get("Tip").unwrap().range(), 3..6);
        assert!(matches!(
            library.get("Teapot"),
            Err(AssetError::MeshNotFound(name)) if name == "Teapot"
        ));
    }

    #[test]
    fn reload_from_blob() {
        let mut library = MeshLibrary::new();
        library.insert("Stand", &triangle(1)).unwrap();
        library.insert("Balloon1", &triangle(2)).unwrap();

        let mut blob = Vec::new();
        library.write_to(&mut blob).unwrap();
        let loaded = MeshLibrary::from_reader(&mut blob.as_slice()).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("Balloon1").unwrap(), library.get("Balloon1").unwrap());
        assert_eq!(loaded.vertices(), library.vertices());
    }

    #[test]
    fn vertex_range_past_end_fails() {
        let mut blob = Vec::new();
        write_chunk(&mut blob, b"dat0", &triangle(0)).unwrap();
        write_chunk(&mut blob, b"str0", b"Tri".as_slice()).unwrap();
        let entry = IndexEntry {
            name_begin: 0,
            name_end: 3,
            vertex_begin: 0,
            vertex_end: 4,
        };
        write_chunk(&mut blob, b"idx0", &[entry]).unwrap();

        let err = MeshLibrary::from_reader(&mut blob.as_slice()).unwrap_err();
        assert!(matches!(err, AssetError::VertexRangeOutOfRange { end: 4, len: 3, .. }));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut library = MeshLibrary::new();
        library.insert("Link1", &triangle(0)).unwrap();
        assert!(matches!(
            library.insert("Link1", &triangle(0)),
            Err(AssetError::DuplicateMesh(_))
        ));
    }
}
