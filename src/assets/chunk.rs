//! Tagged binary chunks
//!
//! A chunk is a 4-byte ASCII magic, a little-endian `u32` byte length and
//! that many bytes of tightly packed records.

use std::io::{Read, Write};

use bytemuck::Pod;

use super::{AssetError, AssetResult};

/// Read one chunk of `T` records, checking its magic against `magic`.
pub fn read_chunk<T: Pod, R: Read>(reader: &mut R, magic: &[u8; 4]) -> AssetResult<Vec<T>> {
    let mut header = [0u8; 8];
    read_exact(reader, &mut header, magic)?;

    let found = [header[0], header[1], header[2], header[3]];
    if &found != magic {
        return Err(AssetError::ChunkMagic {
            expected: tag_str(magic),
            found: tag_str(&found),
        });
    }

    let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
    let record = std::mem::size_of::<T>();
    if size % record != 0 {
        return Err(AssetError::RaggedChunk {
            magic: tag_str(magic),
            size,
            record,
        });
    }

    let mut data = vec![T::zeroed(); size / record];
    read_exact(reader, bytemuck::cast_slice_mut(&mut data), magic)?;
    Ok(data)
}

/// Write `data` as one chunk tagged `magic`.
pub fn write_chunk<T: Pod, W: Write>(writer: &mut W, magic: &[u8; 4], data: &[T]) -> AssetResult<()> {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    let size = u32::try_from(bytes.len()).map_err(|_| AssetError::ChunkTooLarge {
        magic: tag_str(magic),
        size: bytes.len(),
    })?;
    writer.write_all(magic)?;
    writer.write_all(&size.to_le_bytes())?;
    writer.write_all(bytes)?;
    Ok(())
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], magic: &[u8; 4]) -> AssetResult<()> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        std::io::ErrorKind::UnexpectedEof => AssetError::Truncated(tag_str(magic)),
        _ => AssetError::Io(err),
    })
}

fn tag_str(magic: &[u8; 4]) -> String {
    String::from_utf8_lossy(magic).into_owned()
}
