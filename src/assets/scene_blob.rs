//! Scene description blob (`str0` + `scn0`)

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

use super::chunk::{read_chunk, write_chunk};
use super::{AssetError, AssetResult};

/// On-disk scene record, 48 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SceneEntry {
    pub name_begin: u32,
    pub name_end: u32,
    pub position: [f32; 3],
    /// x, y, z, w
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<SceneEntry>() == 48);

/// One object placement from a scene blob. The name doubles as the mesh
/// name.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRecord {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl SceneRecord {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Parse a scene blob. Every record is checked against the string table
/// before any record is returned.
pub fn parse_scene<R: Read>(reader: &mut R) -> AssetResult<Vec<SceneRecord>> {
    let strings: Vec<u8> = read_chunk(reader, b"str0")?;
    let entries: Vec<SceneEntry> = read_chunk(reader, b"scn0")?;

    for (index, entry) in entries.iter().enumerate() {
        if entry.name_begin > entry.name_end || entry.name_end as usize > strings.len() {
            return Err(AssetError::NameOutOfRange {
                index,
                begin: entry.name_begin,
                end: entry.name_end,
                len: strings.len(),
            });
        }
    }

    Ok(entries
        .iter()
        .map(|entry| SceneRecord {
            name: String::from_utf8_lossy(
                &strings[entry.name_begin as usize..entry.name_end as usize],
            )
            .into_owned(),
            position: Vec3::from_array(entry.position),
            rotation: Quat::from_array(entry.rotation),
            scale: Vec3::from_array(entry.scale),
        })
        .collect())
}

/// Load and parse a scene blob from disk.
pub fn read_scene_file(path: &Path) -> AssetResult<Vec<SceneRecord>> {
    let mut reader = BufReader::new(File::open(path)?);
    let records = parse_scene(&mut reader)?;
    log::info!("Loaded {} scene records from {}", records.len(), path.display());
    Ok(records)
}

/// Serialize records in the layout [`parse_scene`] reads.
pub fn write_scene<W: Write>(writer: &mut W, records: &[SceneRecord]) -> AssetResult<()> {
    let mut strings = Vec::new();
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let name_begin = strings.len() as u32;
        strings.extend_from_slice(record.name.as_bytes());
        entries.push(SceneEntry {
            name_begin,
            name_end: strings.len() as u32,
            position: record.position.to_array(),
            rotation: record.rotation.to_array(),
            scale: record.scale.to_array(),
        });
    }
    write_chunk(writer, b"str0", &strings)?;
    write_chunk(writer, b"scn0", &entries)
}
