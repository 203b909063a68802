use voxel_medium_core::{Rgb, Voxel};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Size in bytes of one padded vector: `f32 x, y, z, 0`.
pub const VECTOR_RECORD_SIZE: usize = 16;
/// Size in bytes of one voxel: the `sigma_a`, `sigma_s`, and `emission` vectors.
pub const VOXEL_RECORD_SIZE: usize = 3 * VECTOR_RECORD_SIZE;

/// A cell value with a fixed-size little-endian encoding in a binary grid body.
pub trait BinaryRecord: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    fn write_record(&self, writer: impl Write) -> io::Result<()>;

    fn read_record(reader: impl Read) -> io::Result<Self>;
}

/// A single padded vector. This is the majorant body record.
impl BinaryRecord for Rgb {
    const SIZE: usize = VECTOR_RECORD_SIZE;

    fn write_record(&self, mut writer: impl Write) -> io::Result<()> {
        writer.write_f32::<LittleEndian>(self.r())?;
        writer.write_f32::<LittleEndian>(self.g())?;
        writer.write_f32::<LittleEndian>(self.b())?;
        writer.write_f32::<LittleEndian>(0.0)
    }

    fn read_record(mut reader: impl Read) -> io::Result<Self> {
        let r = reader.read_f32::<LittleEndian>()?;
        let g = reader.read_f32::<LittleEndian>()?;
        let b = reader.read_f32::<LittleEndian>()?;
        // Padding.
        reader.read_f32::<LittleEndian>()?;

        Ok(Rgb::new(r, g, b))
    }
}

/// Three padded vectors. This is the voxel grid body record.
impl BinaryRecord for Voxel {
    const SIZE: usize = VOXEL_RECORD_SIZE;

    fn write_record(&self, mut writer: impl Write) -> io::Result<()> {
        self.sigma_a.write_record(&mut writer)?;
        self.sigma_s.write_record(&mut writer)?;
        self.emission.write_record(&mut writer)
    }

    fn read_record(mut reader: impl Read) -> io::Result<Self> {
        Ok(Voxel {
            sigma_a: Rgb::read_record(&mut reader)?,
            sigma_s: Rgb::read_record(&mut reader)?,
            emission: Rgb::read_record(&mut reader)?,
        })
    }
}
