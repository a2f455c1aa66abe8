//! VTU import.
//!
//! Reads back the single-piece hexahedral documents produced by
//! [`VtuWriter`](super::VtuWriter), in either payload encoding. The scanner
//! understands the small XML subset VTK writers emit: elements, quoted
//! attributes, comments and processing instructions.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use config::constants::{HEX_CORNERS, VTK_HEXAHEDRON};
use glam::DVec3;

use super::{DataFormat, ValueType};
use crate::error::{SynthError, SynthResult};
use crate::fields::{FieldArray, FieldKind, FieldSet};
use crate::mesh::HexMesh;
use crate::topology::HexCell;

/// Reads a VTU file from disk.
pub fn read_vtu(path: impl AsRef<Path>) -> SynthResult<HexMesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SynthError::io(path, source))?;
    let mesh = parse_vtu(&text)?;
    log::debug!(
        "read {} ({} points, {} cells)",
        path.display(),
        mesh.point_count(),
        mesh.cell_count()
    );
    Ok(mesh)
}

/// Parses a VTU document held in memory.
pub fn parse_vtu(text: &str) -> SynthResult<HexMesh> {
    let mut scanner = TagScanner::new(text);
    let mut document = Document::default();
    let mut section = Section::Other;

    while let Some(tag) = scanner.next_tag()? {
        match (tag.kind, tag.name) {
            (TagKind::Open | TagKind::Empty, "VTKFile") => {
                check_header(&tag)?;
                document.seen_header = true;
            }
            (TagKind::Open | TagKind::Empty, "Piece") => {
                if document.counts.is_some() {
                    return Err(SynthError::malformed("multiple pieces are not supported"));
                }
                document.counts = Some((
                    tag.count("NumberOfPoints")?,
                    tag.count("NumberOfCells")?,
                ));
            }
            (TagKind::Open | TagKind::Empty, "PointData") => {
                document.active = Some((
                    tag.required("Scalars")?.to_string(),
                    tag.required("Vectors")?.to_string(),
                ));
                if tag.kind == TagKind::Open {
                    section = Section::PointData;
                }
            }
            (TagKind::Open, "Points") => section = Section::Points,
            (TagKind::Open, "Cells") => section = Section::Cells,
            (TagKind::Close, "PointData" | "Points" | "Cells") => section = Section::Other,
            (TagKind::Open, "AppendedData") => {
                return Err(SynthError::malformed("appended data is not supported"));
            }
            (TagKind::Open | TagKind::Empty, "DataArray") => {
                let payload = if tag.kind == TagKind::Open {
                    scanner.take_until_close("DataArray")?
                } else {
                    ""
                };
                let array = RawArray::decode(&tag, payload)?;
                document.place(section, array)?;
            }
            _ => {}
        }
    }

    document.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    PointData,
    Points,
    Cells,
    Other,
}

fn check_header(tag: &Tag<'_>) -> SynthResult<()> {
    let kind = tag.required("type")?;
    if kind != "UnstructuredGrid" {
        return Err(SynthError::malformed(format!(
            "expected an UnstructuredGrid file, found '{kind}'"
        )));
    }
    if let Some(order) = tag.attr("byte_order") {
        if order != "LittleEndian" {
            return Err(SynthError::malformed(format!("unsupported byte order '{order}'")));
        }
    }
    if let Some(header) = tag.attr("header_type") {
        if header != "UInt32" {
            return Err(SynthError::malformed(format!(
                "unsupported header type '{header}'"
            )));
        }
    }
    if tag.attr("compressor").is_some() {
        return Err(SynthError::malformed("compressed payloads are not supported"));
    }
    Ok(())
}

/// Everything collected while scanning, checked together at the end.
#[derive(Default)]
struct Document {
    seen_header: bool,
    counts: Option<(usize, usize)>,
    active: Option<(String, String)>,
    fields: Vec<FieldArray>,
    points: Option<Vec<DVec3>>,
    connectivity: Option<Vec<i64>>,
    offsets: Option<Vec<i64>>,
    types: Option<Vec<i64>>,
}

impl Document {
    fn place(&mut self, section: Section, array: RawArray) -> SynthResult<()> {
        match section {
            Section::PointData => {
                let kind = FieldKind::from_components(array.components).ok_or_else(|| {
                    SynthError::malformed(format!(
                        "field '{}' has {} components",
                        array.name, array.components
                    ))
                })?;
                let values = array.numbers.floats(&array.name)?;
                self.fields.push(match kind {
                    FieldKind::Scalar => FieldArray::scalar(&array.name, values),
                    FieldKind::Vector => FieldArray::vector(&array.name, to_vectors(&values)?),
                });
            }
            Section::Points => {
                if array.components != 3 {
                    return Err(SynthError::malformed("points must have 3 components"));
                }
                let values = array.numbers.floats(&array.name)?;
                self.points = Some(to_vectors(&values)?);
            }
            Section::Cells => {
                let slot = match array.name.as_str() {
                    "connectivity" => &mut self.connectivity,
                    "offsets" => &mut self.offsets,
                    "types" => &mut self.types,
                    _ => return Ok(()),
                };
                *slot = Some(array.numbers.integers(&array.name)?);
            }
            Section::Other => {}
        }
        Ok(())
    }

    fn finish(self) -> SynthResult<HexMesh> {
        if !self.seen_header {
            return Err(SynthError::malformed("missing VTKFile element"));
        }
        let (point_count, cell_count) = self
            .counts
            .ok_or_else(|| SynthError::malformed("missing Piece element"))?;
        let (active_scalar, active_vector) = self
            .active
            .ok_or_else(|| SynthError::malformed("missing PointData active arrays"))?;

        let points = self
            .points
            .ok_or_else(|| SynthError::malformed("missing Points array"))?;
        if points.len() != point_count {
            return Err(SynthError::malformed(format!(
                "NumberOfPoints is {point_count} but {} points were read",
                points.len()
            )));
        }

        let types = required_cells(self.types, "types", cell_count)?;
        if let Some(other) = types.iter().find(|&&t| t != i64::from(VTK_HEXAHEDRON)) {
            return Err(SynthError::malformed(format!(
                "unsupported cell type {other}, only hexahedra ({VTK_HEXAHEDRON}) are read"
            )));
        }

        let offsets = required_cells(self.offsets, "offsets", cell_count)?;
        if let Some((i, offset)) = offsets
            .iter()
            .enumerate()
            .find(|&(i, &offset)| offset != ((i + 1) * HEX_CORNERS) as i64)
        {
            return Err(SynthError::malformed(format!(
                "offset {offset} of cell {i} does not close an 8-corner cell"
            )));
        }

        let connectivity = self
            .connectivity
            .ok_or_else(|| SynthError::malformed("missing connectivity array"))?;
        if connectivity.len() != cell_count * HEX_CORNERS {
            return Err(SynthError::malformed(format!(
                "connectivity has {} entries, expected {}",
                connectivity.len(),
                cell_count * HEX_CORNERS
            )));
        }
        let cells = connectivity
            .chunks_exact(HEX_CORNERS)
            .map(to_cell)
            .collect::<SynthResult<Vec<_>>>()?;

        HexMesh::new(
            points,
            cells,
            FieldSet::new(self.fields, active_scalar, active_vector),
        )
    }
}

fn required_cells(array: Option<Vec<i64>>, name: &str, cell_count: usize) -> SynthResult<Vec<i64>> {
    let values = array.ok_or_else(|| SynthError::malformed(format!("missing {name} array")))?;
    if values.len() != cell_count {
        return Err(SynthError::malformed(format!(
            "{name} has {} entries but NumberOfCells is {cell_count}",
            values.len()
        )));
    }
    Ok(values)
}

fn to_cell(corners: &[i64]) -> SynthResult<HexCell> {
    let mut cell = [0u32; HEX_CORNERS];
    for (slot, &corner) in cell.iter_mut().zip(corners) {
        *slot = u32::try_from(corner)
            .map_err(|_| SynthError::malformed(format!("invalid point index {corner}")))?;
    }
    Ok(HexCell(cell))
}

fn to_vectors(values: &[f64]) -> SynthResult<Vec<DVec3>> {
    if values.len() % 3 != 0 {
        return Err(SynthError::malformed(format!(
            "{} values do not form 3-component tuples",
            values.len()
        )));
    }
    Ok(values.chunks_exact(3).map(DVec3::from_slice).collect())
}

/// Decoded numeric payload.
enum Numbers {
    Floats(Vec<f64>),
    Integers(Vec<i64>),
}

impl Numbers {
    fn floats(self, name: &str) -> SynthResult<Vec<f64>> {
        match self {
            Numbers::Floats(values) => Ok(values),
            Numbers::Integers(_) => Err(SynthError::malformed(format!(
                "array '{name}' must be floating point"
            ))),
        }
    }

    fn integers(self, name: &str) -> SynthResult<Vec<i64>> {
        match self {
            Numbers::Integers(values) => Ok(values),
            Numbers::Floats(_) => Err(SynthError::malformed(format!(
                "array '{name}' must be integral"
            ))),
        }
    }
}

struct RawArray {
    name: String,
    components: usize,
    numbers: Numbers,
}

impl RawArray {
    fn decode(tag: &Tag<'_>, payload: &str) -> SynthResult<Self> {
        let name = tag.attr("Name").unwrap_or_default().to_string();
        let type_name = tag.required("type")?;
        let value_type = ValueType::parse(type_name)
            .ok_or_else(|| SynthError::malformed(format!("unsupported type '{type_name}'")))?;
        let components = match tag.attr("NumberOfComponents") {
            Some(_) => tag.count("NumberOfComponents")?,
            None => 1,
        };
        let format = tag
            .attr("format")
            .unwrap_or("ascii")
            .parse::<DataFormat>()
            .map_err(SynthError::malformed)?;

        let numbers = match format {
            DataFormat::Ascii => parse_ascii(payload, value_type, &name)?,
            DataFormat::Binary => parse_binary(payload, value_type, &name)?,
        };

        Ok(Self {
            name,
            components,
            numbers,
        })
    }
}

fn parse_ascii(payload: &str, value_type: ValueType, name: &str) -> SynthResult<Numbers> {
    let bad = |token: &str| SynthError::malformed(format!("invalid value '{token}' in '{name}'"));
    let tokens = payload.split_whitespace();
    if value_type.is_float() {
        tokens
            .map(|t| t.parse::<f64>().map_err(|_| bad(t)))
            .collect::<SynthResult<_>>()
            .map(Numbers::Floats)
    } else {
        tokens
            .map(|t| t.parse::<i64>().map_err(|_| bad(t)))
            .collect::<SynthResult<_>>()
            .map(Numbers::Integers)
    }
}

fn parse_binary(payload: &str, value_type: ValueType, name: &str) -> SynthResult<Numbers> {
    let encoded: String = payload.split_whitespace().collect();
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|err| SynthError::malformed(format!("invalid base64 in '{name}': {err}")))?;
    if bytes.len() < 4 {
        return Err(SynthError::malformed(format!("'{name}' is missing its size header")));
    }
    let (header, body) = bytes.split_at(4);
    let declared = u32::from_le_bytes(fixed(header)) as usize;
    let size = value_type.size();
    if declared > body.len() || declared % size != 0 {
        return Err(SynthError::malformed(format!(
            "'{name}' declares {declared} bytes but holds {}",
            body.len()
        )));
    }

    let chunks = body[..declared].chunks_exact(size);
    let numbers = match value_type {
        ValueType::Float64 => Numbers::Floats(
            chunks
                .map(|c| f64::from_le_bytes(fixed(c)))
                .collect(),
        ),
        ValueType::Float32 => Numbers::Floats(
            chunks
                .map(|c| f64::from(f32::from_le_bytes(fixed(c))))
                .collect(),
        ),
        ValueType::Int64 => Numbers::Integers(chunks.map(|c| i64::from_le_bytes(fixed(c))).collect()),
        ValueType::Int32 => Numbers::Integers(
            chunks
                .map(|c| i64::from(i32::from_le_bytes(fixed(c))))
                .collect(),
        ),
        ValueType::UInt32 => Numbers::Integers(
            chunks
                .map(|c| i64::from(u32::from_le_bytes(fixed(c))))
                .collect(),
        ),
        ValueType::UInt64 => Numbers::Integers(
            chunks
                .map(|c| u64::from_le_bytes(fixed(c)))
                .map(|v| i64::try_from(v).unwrap_or(i64::MAX))
                .collect(),
        ),
        ValueType::UInt8 => Numbers::Integers(chunks.map(|c| i64::from(c[0])).collect()),
    };
    Ok(numbers)
}

/// Copies an exact-size chunk into an array.
fn fixed<const N: usize>(chunk: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(chunk);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
    Empty,
}

#[derive(Debug)]
struct Tag<'a> {
    kind: TagKind,
    name: &'a str,
    attrs: Vec<(&'a str, String)>,
}

impl<'a> Tag<'a> {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    fn required(&self, key: &str) -> SynthResult<&str> {
        self.attr(key).ok_or_else(|| {
            SynthError::malformed(format!("<{}> is missing attribute '{key}'", self.name))
        })
    }

    fn count(&self, key: &str) -> SynthResult<usize> {
        let raw = self.required(key)?;
        raw.trim().parse().map_err(|_| {
            SynthError::malformed(format!("<{}> has invalid {key} '{raw}'", self.name))
        })
    }

    fn parse(inner: &'a str) -> SynthResult<Self> {
        let (kind, body) = if let Some(body) = inner.strip_prefix('/') {
            (TagKind::Close, body)
        } else if let Some(body) = inner.strip_suffix('/') {
            (TagKind::Empty, body)
        } else {
            (TagKind::Open, inner)
        };
        let body = body.trim();
        let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
        let name = &body[..name_end];
        if name.is_empty() {
            return Err(SynthError::malformed("empty tag name"));
        }

        let mut attrs = Vec::new();
        let mut rest = body[name_end..].trim_start();
        while !rest.is_empty() {
            let unterminated =
                || SynthError::malformed(format!("malformed attribute in <{name}>"));
            let eq = rest.find('=').ok_or_else(unterminated)?;
            let key = rest[..eq].trim();
            let value_part = rest[eq + 1..].trim_start();
            let quote = value_part
                .chars()
                .next()
                .filter(|c| *c == '"' || *c == '\'')
                .ok_or_else(unterminated)?;
            let close = value_part[1..].find(quote).ok_or_else(unterminated)?;
            attrs.push((key, unescape(&value_part[1..1 + close])));
            rest = value_part[close + 2..].trim_start();
        }

        Ok(Self { kind, name, attrs })
    }
}

fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Forward-only cursor over the tags of a document.
struct TagScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn next_tag(&mut self) -> SynthResult<Option<Tag<'a>>> {
        let text = self.text;
        loop {
            let Some(offset) = text[self.pos..].find('<') else {
                return Ok(None);
            };
            let start = self.pos + offset;
            let rest = &text[start..];

            if rest.starts_with("<!--") {
                let end = rest
                    .find("-->")
                    .ok_or_else(|| SynthError::malformed("unterminated comment"))?;
                self.pos = start + end + 3;
                continue;
            }

            let end = rest
                .find('>')
                .ok_or_else(|| SynthError::malformed("unterminated tag"))?;
            self.pos = start + end + 1;
            let inner = &rest[1..end];
            if inner.starts_with('?') || inner.starts_with('!') {
                continue;
            }
            return Tag::parse(inner).map(Some);
        }
    }

    /// Returns the text up to the closing tag of `name`, leaving the
    /// closing tag itself to be scanned next.
    fn take_until_close(&mut self, name: &str) -> SynthResult<&'a str> {
        let text = self.text;
        let closing = format!("</{name}");
        let offset = text[self.pos..]
            .find(&closing)
            .ok_or_else(|| SynthError::malformed(format!("unterminated <{name}>")))?;
        let payload = &text[self.pos..self.pos + offset];
        self.pos += offset;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_CUBE: &str = r#"<?xml version="1.0"?>
<!-- unit cube -->
<VTKFile type="UnstructuredGrid" version="1.0" byte_order="LittleEndian">
  <UnstructuredGrid>
    <Piece NumberOfPoints="8" NumberOfCells="1">
      <PointData Scalars="Heat" Vectors="Flow">
        <DataArray type="Float64" Name="Flow" NumberOfComponents="3" format="ascii">
          0 0 1 0 0 1 0 0 1 0 0 1 0 0 1 0 0 1 0 0 1 0 0 1
        </DataArray>
        <DataArray type="Float64" Name="Heat" format="ascii">
          1 2 3 4 5 6 7 8
        </DataArray>
      </PointData>
      <Points>
        <DataArray type="Float32" Name="Points" NumberOfComponents="3" format="ascii">
          0 0 0 1 0 0 0 1 0 1 1 0 0 0 1 1 0 1 0 1 1 1 1 1
        </DataArray>
      </Points>
      <Cells>
        <DataArray type="Int64" Name="connectivity" format="ascii">0 1 3 2 4 5 7 6</DataArray>
        <DataArray type="Int64" Name="offsets" format="ascii">OFFSET</DataArray>
        <DataArray type="UInt8" Name="types" format="ascii">TYPE</DataArray>
      </Cells>
    </Piece>
  </UnstructuredGrid>
</VTKFile>
"#;

    fn cube(offset: &str, cell_type: &str) -> String {
        ONE_CUBE.replace("OFFSET", offset).replace("TYPE", cell_type)
    }

    #[test]
    fn test_parse_handwritten_cube() {
        let mesh = parse_vtu(&cube("8", "12")).unwrap();
        assert_eq!(mesh.point_count(), 8);
        assert_eq!(mesh.cells(), &[HexCell([0, 1, 3, 2, 4, 5, 7, 6])]);
        assert_eq!(mesh.fields().active_scalar(), "Heat");
        let heat = mesh.fields().get("Heat").unwrap().as_scalar().unwrap();
        assert_eq!(heat[7], 8.0);
        assert_eq!(mesh.points()[7], DVec3::ONE);
    }

    #[test]
    fn test_rejects_non_hexahedral_cells() {
        let err = parse_vtu(&cube("8", "10")).unwrap_err();
        assert!(err.to_string().contains("unsupported cell type 10"));
    }

    #[test]
    fn test_rejects_bad_offsets() {
        assert!(matches!(
            parse_vtu(&cube("4", "12")),
            Err(SynthError::Malformed { .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_dataset_type() {
        let text = cube("8", "12").replace("type=\"UnstructuredGrid\"", "type=\"PolyData\"");
        assert!(matches!(parse_vtu(&text), Err(SynthError::Malformed { .. })));
    }

    #[test]
    fn test_rejects_missing_active_designation() {
        let text = cube("8", "12").replace(r#" Scalars="Heat" Vectors="Flow""#, "");
        assert!(matches!(parse_vtu(&text), Err(SynthError::Malformed { .. })));
    }

    #[test]
    fn test_short_field_is_a_mismatch() {
        let text = cube("8", "12").replace("1 2 3 4 5 6 7 8", "1 2 3");
        assert!(matches!(
            parse_vtu(&text),
            Err(SynthError::FieldMismatch { expected: 8, actual: 3, .. })
        ));
    }

    #[test]
    fn test_binary_payload() {
        let mut block = 2u32.to_le_bytes().to_vec();
        block.extend_from_slice(&[12, 12]);
        let tag = Tag::parse(r#"DataArray type="UInt8" Name="types" format="binary""#).unwrap();
        let array = RawArray::decode(&tag, &STANDARD.encode(block)).unwrap();
        assert_eq!(array.numbers.integers(&array.name).unwrap(), vec![12, 12]);
    }

    #[test]
    fn test_binary_payload_too_short() {
        let mut block = 16u32.to_le_bytes().to_vec();
        block.extend_from_slice(&1.0f64.to_le_bytes());
        let tag = Tag::parse(r#"DataArray type="Float64" Name="p" format="binary""#).unwrap();
        assert!(RawArray::decode(&tag, &STANDARD.encode(block)).is_err());
    }

    #[test]
    fn test_tag_attributes() {
        let tag = Tag::parse(r#"DataArray Name='a&amp;b' type="Int64" /"#).unwrap();
        assert_eq!(tag.kind, TagKind::Empty);
        assert_eq!(tag.attr("Name"), Some("a&b"));
        assert_eq!(tag.attr("type"), Some("Int64"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_vtu("/nonexistent/mesh.vtu").unwrap_err();
        assert!(matches!(err, SynthError::Io { .. }));
    }
}
