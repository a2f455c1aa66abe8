//! VTU export.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use config::constants::{HEX_CORNERS, VTK_HEXAHEDRON, VTU_FILE_VERSION};

use super::{DataFormat, ValueType};
use crate::error::{SynthError, SynthResult};
use crate::mesh::HexMesh;

/// Values per line for scalar and index arrays in ascii output.
const ASCII_LINE_WIDTH: usize = 12;

/// Borrowed payload of one `DataArray`.
enum Payload<'a> {
    Float64(&'a [f64]),
    Int64(&'a [i64]),
    UInt8(&'a [u8]),
}

impl Payload<'_> {
    fn value_type(&self) -> ValueType {
        match self {
            Payload::Float64(_) => ValueType::Float64,
            Payload::Int64(_) => ValueType::Int64,
            Payload::UInt8(_) => ValueType::UInt8,
        }
    }

    fn write_ascii<W: Write>(&self, out: &mut W, per_line: usize) -> io::Result<()> {
        match self {
            Payload::Float64(values) => write_lines(out, *values, per_line),
            Payload::Int64(values) => write_lines(out, *values, per_line),
            Payload::UInt8(values) => write_lines(out, *values, per_line),
        }
    }

    fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            Payload::Float64(values) => values.iter().flat_map(|v| v.to_le_bytes()).collect(),
            Payload::Int64(values) => values.iter().flat_map(|v| v.to_le_bytes()).collect(),
            Payload::UInt8(values) => values.to_vec(),
        }
    }
}

fn write_lines<W: Write, T: std::fmt::Display>(
    out: &mut W,
    values: &[T],
    per_line: usize,
) -> io::Result<()> {
    for line in values.chunks(per_line.max(1)) {
        write!(out, "          ")?;
        for (i, value) in line.iter().enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            write!(out, "{value}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Base64 of a UInt32 byte-count header followed by the raw bytes.
fn encode_binary(payload: &Payload<'_>) -> io::Result<String> {
    let data = payload.to_le_bytes();
    let header = u32::try_from(data.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("array of {} bytes exceeds the UInt32 header", data.len()),
        )
    })?;
    let mut block = Vec::with_capacity(4 + data.len());
    block.extend_from_slice(&header.to_le_bytes());
    block.extend_from_slice(&data);
    Ok(STANDARD.encode(block))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Sibling path the file is staged at before the final rename.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".partial");
    path.with_file_name(name)
}

/// Serializes a [`HexMesh`] to a VTU file.
///
/// Files are staged next to the destination and renamed into place, so an
/// existing file is replaced whole or left untouched.
///
/// # Example
///
/// ```rust,no_run
/// use synthmesh::shapes::Shape;
/// use synthmesh::vtu::{DataFormat, VtuWriter};
///
/// let mesh = Shape::RadialSphere.generate().unwrap();
/// VtuWriter::new()
///     .with_format(DataFormat::Binary)
///     .write(&mesh, "radial_sphere.vtu")
///     .unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VtuWriter {
    format: DataFormat,
}

impl VtuWriter {
    /// Creates a writer producing ascii payloads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payload encoding.
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Writes `mesh` to `path`, replacing any existing file.
    pub fn write(&self, mesh: &HexMesh, path: impl AsRef<Path>) -> SynthResult<()> {
        let path = path.as_ref();
        let staging = staging_path(path);

        let outcome = self
            .write_file(mesh, &staging)
            .and_then(|()| fs::rename(&staging, path));
        if let Err(source) = outcome {
            // May not exist if creation itself failed.
            let _ = fs::remove_file(&staging);
            return Err(SynthError::io(path, source));
        }

        log::info!(
            "wrote {} ({} points, {} cells, {})",
            path.display(),
            mesh.point_count(),
            mesh.cell_count(),
            self.format
        );
        Ok(())
    }

    fn write_file(&self, mesh: &HexMesh, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(mesh, &mut out)?;
        let file = out.into_inner().map_err(|err| err.into_error())?;
        file.sync_all()
    }

    /// Writes the complete document to any byte sink.
    pub fn write_to<W: Write>(&self, mesh: &HexMesh, out: &mut W) -> io::Result<()> {
        let fields = mesh.fields();

        writeln!(out, r#"<?xml version="1.0"?>"#)?;
        writeln!(
            out,
            r#"<VTKFile type="UnstructuredGrid" version="{VTU_FILE_VERSION}" byte_order="LittleEndian" header_type="UInt32">"#
        )?;
        writeln!(out, "  <UnstructuredGrid>")?;
        writeln!(
            out,
            r#"    <Piece NumberOfPoints="{}" NumberOfCells="{}">"#,
            mesh.point_count(),
            mesh.cell_count()
        )?;

        writeln!(
            out,
            r#"      <PointData Scalars="{}" Vectors="{}">"#,
            escape_attr(fields.active_scalar()),
            escape_attr(fields.active_vector())
        )?;
        for array in fields.arrays() {
            let components = array.kind().components();
            let per_line = if components > 1 { components } else { ASCII_LINE_WIDTH };
            self.write_array(
                out,
                &array.name,
                components,
                per_line,
                Payload::Float64(&array.values.components()),
            )?;
        }
        writeln!(out, "      </PointData>")?;

        writeln!(out, "      <Points>")?;
        let coords: Vec<f64> = mesh.points().iter().flat_map(|p| p.to_array()).collect();
        self.write_array(out, "Points", 3, 3, Payload::Float64(&coords))?;
        writeln!(out, "      </Points>")?;

        writeln!(out, "      <Cells>")?;
        let connectivity = mesh.connectivity();
        let offsets = mesh.offsets();
        let types = vec![VTK_HEXAHEDRON; mesh.cell_count()];
        self.write_array(
            out,
            "connectivity",
            1,
            HEX_CORNERS,
            Payload::Int64(&connectivity),
        )?;
        self.write_array(out, "offsets", 1, ASCII_LINE_WIDTH, Payload::Int64(&offsets))?;
        self.write_array(out, "types", 1, ASCII_LINE_WIDTH, Payload::UInt8(&types))?;
        writeln!(out, "      </Cells>")?;

        writeln!(out, "    </Piece>")?;
        writeln!(out, "  </UnstructuredGrid>")?;
        writeln!(out, "</VTKFile>")?;
        Ok(())
    }

    fn write_array<W: Write>(
        &self,
        out: &mut W,
        name: &str,
        components: usize,
        per_line: usize,
        payload: Payload<'_>,
    ) -> io::Result<()> {
        writeln!(
            out,
            r#"        <DataArray type="{}" Name="{}" NumberOfComponents="{}" format="{}">"#,
            payload.value_type().as_str(),
            escape_attr(name),
            components,
            self.format
        )?;
        match self.format {
            DataFormat::Ascii => payload.write_ascii(out, per_line)?,
            DataFormat::Binary => writeln!(out, "          {}", encode_binary(&payload)?)?,
        }
        writeln!(out, "        </DataArray>")
    }
}
