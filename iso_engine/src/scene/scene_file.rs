/// Binary scene file codec.
///
/// Layout, all fields native-endian, every string prefixed by a `usize` byte count:
///
/// ```text
/// [u8; 8]  signature        "SCENE001" | "SCENE002"
/// vec3     bg_color         3 x f32
/// usize    alias count      <= 1000
///   key    string           <= 1024 bytes
///   value  string           <= 2048 bytes
/// usize    object count     <= 10000
///   id     string           <= 1024 bytes
///   path   string           <= 2048 bytes
///   vec3   position, rotation, scale
///   SCENE002 only:
///   u8     has_collision, is_affected_by_physics, is_static
///   f32    mass
///   vec3   collision_shape_size
/// ```
///
/// The codec is pure: it never touches the scene, so a file is fully decoded and
/// validated before anything is applied.

use std::io::{self, Read, Write};
use glam::Vec3;
use crate::error::{Error, Result};
use super::config::SceneFormat;
use super::scene_object::PhysicsProperties;

pub const MAX_ALIAS_COUNT: usize = 1000;
pub const MAX_ALIAS_KEY_LEN: usize = 1024;
pub const MAX_ALIAS_VALUE_LEN: usize = 2048;
pub const MAX_OBJECT_COUNT: usize = 10000;
pub const MAX_OBJECT_ID_LEN: usize = 1024;
pub const MAX_MODEL_PATH_LEN: usize = 2048;

/// Serialized state of one scene object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub id: String,
    pub model_path: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Default values when read from a `SCENE001` file
    pub physics: PhysicsProperties,
}

/// Decoded scene file
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFile {
    pub format: SceneFormat,
    pub bg_color: Vec3,
    pub aliases: Vec<(String, String)>,
    pub objects: Vec<ObjectRecord>,
}

impl SceneFile {
    /// Encode into `writer`
    ///
    /// # Errors
    ///
    /// `InvalidResource` if a count or string exceeds the format bounds (the file
    /// could not be read back); nothing is written in that case. `Io` if the
    /// writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.check_bounds()?;

        writer.write_all(self.format.signature())?;
        write_vec3(writer, self.bg_color)?;

        write_count(writer, self.aliases.len())?;
        for (key, value) in &self.aliases {
            write_string(writer, key)?;
            write_string(writer, value)?;
        }

        write_count(writer, self.objects.len())?;
        for record in &self.objects {
            write_string(writer, &record.id)?;
            write_string(writer, &record.model_path)?;
            write_vec3(writer, record.position)?;
            write_vec3(writer, record.rotation)?;
            write_vec3(writer, record.scale)?;

            if self.format == SceneFormat::V2 {
                let physics = &record.physics;
                writer.write_all(&[
                    physics.has_collision as u8,
                    physics.is_affected_by_physics as u8,
                    physics.is_static as u8,
                ])?;
                writer.write_all(&physics.mass.to_ne_bytes())?;
                write_vec3(writer, physics.collision_shape_size)?;
            }
        }

        Ok(())
    }

    /// Decode from `reader`
    ///
    /// # Errors
    ///
    /// `CorruptSceneFile` on an unknown signature, a count or length over its bound,
    /// a truncated stream or a string that is not UTF-8; `Io` on any other read error.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut signature = [0u8; 8];
        read_exact(reader, &mut signature, "signature")?;
        let format = SceneFormat::from_signature(&signature).ok_or_else(|| Error::CorruptSceneFile(
            format!("invalid signature {:?}", String::from_utf8_lossy(&signature))
        ))?;

        let bg_color = read_vec3(reader, "background color")?;

        let alias_count = read_count(reader, "alias count")?;
        check_bound(alias_count, MAX_ALIAS_COUNT, "alias count")?;
        let mut aliases = Vec::with_capacity(alias_count);
        for _ in 0..alias_count {
            let key = read_string(reader, MAX_ALIAS_KEY_LEN, "alias key")?;
            let value = read_string(reader, MAX_ALIAS_VALUE_LEN, "alias value")?;
            aliases.push((key, value));
        }

        let object_count = read_count(reader, "object count")?;
        check_bound(object_count, MAX_OBJECT_COUNT, "object count")?;
        let mut objects = Vec::with_capacity(object_count);
        for _ in 0..object_count {
            let id = read_string(reader, MAX_OBJECT_ID_LEN, "object id")?;
            let model_path = read_string(reader, MAX_MODEL_PATH_LEN, "model path")?;
            let position = read_vec3(reader, "position")?;
            let rotation = read_vec3(reader, "rotation")?;
            let scale = read_vec3(reader, "scale")?;

            let physics = match format {
                SceneFormat::V1 => PhysicsProperties::default(),
                SceneFormat::V2 => read_physics(reader)?,
            };

            objects.push(ObjectRecord { id, model_path, position, rotation, scale, physics });
        }

        Ok(Self { format, bg_color, aliases, objects })
    }

    fn check_bounds(&self) -> Result<()> {
        check_write_bound(self.aliases.len(), MAX_ALIAS_COUNT, "alias count")?;
        check_write_bound(self.objects.len(), MAX_OBJECT_COUNT, "object count")?;
        for (key, value) in &self.aliases {
            check_write_bound(key.len(), MAX_ALIAS_KEY_LEN, "alias key")?;
            check_write_bound(value.len(), MAX_ALIAS_VALUE_LEN, "alias value")?;
        }
        for record in &self.objects {
            check_write_bound(record.id.len(), MAX_OBJECT_ID_LEN, "object id")?;
            check_write_bound(record.model_path.len(), MAX_MODEL_PATH_LEN, "model path")?;
        }
        Ok(())
    }
}

// ===== ENCODING HELPERS =====

fn check_write_bound(value: usize, max: usize, what: &str) -> Result<()> {
    if value > max {
        return Err(Error::InvalidResource(format!("{} {} exceeds limit {}", what, value, max)));
    }
    Ok(())
}

fn write_count<W: Write>(writer: &mut W, count: usize) -> Result<()> {
    writer.write_all(&count.to_ne_bytes())?;
    Ok(())
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    write_count(writer, value.len())?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn write_vec3<W: Write>(writer: &mut W, value: Vec3) -> Result<()> {
    writer.write_all(bytemuck::bytes_of(&value))?;
    Ok(())
}

// ===== DECODING HELPERS =====

fn check_bound(value: usize, max: usize, what: &str) -> Result<()> {
    if value > max {
        return Err(Error::CorruptSceneFile(format!("{} {} exceeds limit {}", what, value, max)));
    }
    Ok(())
}

/// `read_exact` with a premature end of stream reported as corruption
fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|error| match error.kind() {
        io::ErrorKind::UnexpectedEof => Error::CorruptSceneFile(format!("truncated while reading {}", what)),
        _ => Error::from(error),
    })
}

fn read_count<R: Read>(reader: &mut R, what: &str) -> Result<usize> {
    let mut bytes = [0u8; std::mem::size_of::<usize>()];
    read_exact(reader, &mut bytes, what)?;
    Ok(usize::from_ne_bytes(bytes))
}

fn read_string<R: Read>(reader: &mut R, max: usize, what: &str) -> Result<String> {
    let len = read_count(reader, what)?;
    check_bound(len, max, what)?;
    let mut bytes = vec![0u8; len];
    read_exact(reader, &mut bytes, what)?;
    String::from_utf8(bytes)
        .map_err(|_| Error::CorruptSceneFile(format!("{} is not valid UTF-8", what)))
}

fn read_vec3<R: Read>(reader: &mut R, what: &str) -> Result<Vec3> {
    let mut bytes = [0u8; std::mem::size_of::<Vec3>()];
    read_exact(reader, &mut bytes, what)?;
    Ok(bytemuck::pod_read_unaligned(&bytes))
}

fn read_physics<R: Read>(reader: &mut R) -> Result<PhysicsProperties> {
    let mut flags = [0u8; 3];
    read_exact(reader, &mut flags, "physics flags")?;
    let mut mass = [0u8; 4];
    read_exact(reader, &mut mass, "mass")?;
    let collision_shape_size = read_vec3(reader, "collision shape size")?;

    Ok(PhysicsProperties {
        has_collision: flags[0] != 0,
        is_affected_by_physics: flags[1] != 0,
        is_static: flags[2] != 0,
        mass: f32::from_ne_bytes(mass),
        collision_shape_size,
    })
}

#[cfg(test)]
#[path = "scene_file_tests.rs"]
mod tests;
