//! # Point Fields
//!
//! Named scalar and vector arrays attached to mesh points, plus the
//! [`FieldSample`] record each shape evaluates at a single point.

use glam::DVec3;

use crate::error::{SynthError, SynthResult};

/// Number of components per point of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Vector,
}

impl FieldKind {
    /// Components per point (1 or 3).
    #[inline]
    pub fn components(self) -> usize {
        match self {
            FieldKind::Scalar => 1,
            FieldKind::Vector => 3,
        }
    }

    /// Kind matching a VTK `NumberOfComponents` value, if supported.
    pub fn from_components(components: usize) -> Option<Self> {
        match components {
            1 => Some(FieldKind::Scalar),
            3 => Some(FieldKind::Vector),
            _ => None,
        }
    }
}

/// Declaration of one array in a sample layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar,
        }
    }

    pub const fn vector(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Vector,
        }
    }
}

/// One field value at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Scalar(f64),
    Vector(DVec3),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Scalar(_) => FieldKind::Scalar,
            FieldValue::Vector(_) => FieldKind::Vector,
        }
    }
}

/// Every field of a shape evaluated at a single point.
///
/// `LAYOUT` lists the arrays in file order; `value(slot)` returns the value
/// for `LAYOUT[slot]`. The active names must appear in the layout with the
/// matching kind.
pub trait FieldSample {
    const LAYOUT: &'static [FieldSpec];
    const ACTIVE_SCALAR: &'static str;
    const ACTIVE_VECTOR: &'static str;

    fn value(&self, slot: usize) -> FieldValue;
}

/// Per-point values of one array.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValues {
    Scalar(Vec<f64>),
    Vector(Vec<DVec3>),
}

impl FieldValues {
    /// Empty storage of the given kind.
    pub fn with_capacity(kind: FieldKind, capacity: usize) -> Self {
        match kind {
            FieldKind::Scalar => FieldValues::Scalar(Vec::with_capacity(capacity)),
            FieldKind::Vector => FieldValues::Vector(Vec::with_capacity(capacity)),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValues::Scalar(_) => FieldKind::Scalar,
            FieldValues::Vector(_) => FieldKind::Vector,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FieldValues::Scalar(values) => values.len(),
            FieldValues::Vector(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened components, `[x0, y0, z0, x1, ...]` for vectors.
    pub fn components(&self) -> Vec<f64> {
        match self {
            FieldValues::Scalar(values) => values.clone(),
            FieldValues::Vector(values) => values.iter().flat_map(|v| v.to_array()).collect(),
        }
    }

    /// Appends one value; fails when its kind differs from the storage.
    fn push(&mut self, value: FieldValue) -> Result<(), FieldKind> {
        match (self, value) {
            (FieldValues::Scalar(values), FieldValue::Scalar(v)) => values.push(v),
            (FieldValues::Vector(values), FieldValue::Vector(v)) => values.push(v),
            (_, other) => return Err(other.kind()),
        }
        Ok(())
    }
}

/// A named per-point array.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldArray {
    pub name: String,
    pub values: FieldValues,
}

impl FieldArray {
    pub fn scalar(name: &str, data: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            values: FieldValues::Scalar(data),
        }
    }

    pub fn vector(name: &str, data: Vec<DVec3>) -> Self {
        Self {
            name: name.to_string(),
            values: FieldValues::Vector(data),
        }
    }

    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.values.kind()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Scalar data, if this is a scalar array.
    pub fn as_scalar(&self) -> Option<&[f64]> {
        match &self.values {
            FieldValues::Scalar(values) => Some(values),
            FieldValues::Vector(_) => None,
        }
    }

    /// Vector data, if this is a vector array.
    pub fn as_vector(&self) -> Option<&[DVec3]> {
        match &self.values {
            FieldValues::Vector(values) => Some(values),
            FieldValues::Scalar(_) => None,
        }
    }
}

/// Ordered point arrays with the active scalar/vector designation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    arrays: Vec<FieldArray>,
    active_scalar: String,
    active_vector: String,
}

impl FieldSet {
    /// Creates a field set; the active names are checked when the mesh is
    /// assembled.
    pub fn new(
        arrays: Vec<FieldArray>,
        active_scalar: impl Into<String>,
        active_vector: impl Into<String>,
    ) -> Self {
        Self {
            arrays,
            active_scalar: active_scalar.into(),
            active_vector: active_vector.into(),
        }
    }

    /// Scatters per-point samples into one named array per layout slot.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use synthmesh::fields::{FieldSample, FieldSet, FieldSpec, FieldValue};
    ///
    /// struct Probe(f64);
    ///
    /// impl FieldSample for Probe {
    ///     const LAYOUT: &'static [FieldSpec] = &[FieldSpec::vector("Flow"), FieldSpec::scalar("Heat")];
    ///     const ACTIVE_SCALAR: &'static str = "Heat";
    ///     const ACTIVE_VECTOR: &'static str = "Flow";
    ///
    ///     fn value(&self, slot: usize) -> FieldValue {
    ///         match slot {
    ///             0 => FieldValue::Vector(DVec3::splat(self.0)),
    ///             _ => FieldValue::Scalar(self.0),
    ///         }
    ///     }
    /// }
    ///
    /// let set = FieldSet::from_samples(&[Probe(1.0), Probe(2.0)]).unwrap();
    /// assert_eq!(set.get("Heat").unwrap().as_scalar(), Some(&[1.0, 2.0][..]));
    /// ```
    pub fn from_samples<S: FieldSample>(samples: &[S]) -> SynthResult<Self> {
        let mut columns: Vec<FieldValues> = S::LAYOUT
            .iter()
            .map(|spec| FieldValues::with_capacity(spec.kind, samples.len()))
            .collect();

        for sample in samples {
            for (slot, (column, spec)) in columns.iter_mut().zip(S::LAYOUT).enumerate() {
                column.push(sample.value(slot)).map_err(|actual| {
                    SynthError::invalid_topology(format!(
                        "field '{}' declared {:?} but sampled {:?}",
                        spec.name, spec.kind, actual
                    ))
                })?;
            }
        }

        let arrays = S::LAYOUT
            .iter()
            .zip(columns)
            .map(|(spec, values)| FieldArray {
                name: spec.name.to_string(),
                values,
            })
            .collect();

        Ok(Self::new(arrays, S::ACTIVE_SCALAR, S::ACTIVE_VECTOR))
    }

    #[inline]
    pub fn arrays(&self) -> &[FieldArray] {
        &self.arrays
    }

    /// Looks up an array by name.
    pub fn get(&self, name: &str) -> Option<&FieldArray> {
        self.arrays.iter().find(|array| array.name == name)
    }

    #[inline]
    pub fn active_scalar(&self) -> &str {
        &self.active_scalar
    }

    #[inline]
    pub fn active_vector(&self) -> &str {
        &self.active_vector
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mislabelled;

    impl FieldSample for Mislabelled {
        const LAYOUT: &'static [FieldSpec] = &[FieldSpec::scalar("Stress")];
        const ACTIVE_SCALAR: &'static str = "Stress";
        const ACTIVE_VECTOR: &'static str = "Stress";

        fn value(&self, _slot: usize) -> FieldValue {
            FieldValue::Vector(DVec3::ZERO)
        }
    }

    #[test]
    fn test_kind_components() {
        assert_eq!(FieldKind::Scalar.components(), 1);
        assert_eq!(FieldKind::Vector.components(), 3);
        assert_eq!(FieldKind::from_components(3), Some(FieldKind::Vector));
        assert_eq!(FieldKind::from_components(2), None);
    }

    #[test]
    fn test_vector_components_interleave() {
        let values = FieldValues::Vector(vec![DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 5.0, 6.0)]);
        assert_eq!(values.components(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let result = FieldSet::from_samples(&[Mislabelled]);
        match result {
            Err(err @ SynthError::InvalidTopology { .. }) => {
                assert!(err.to_string().contains("declared"));
            }
            other => panic!("expected a kind mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let set = FieldSet::new(
            vec![
                FieldArray::vector("Velocity", vec![DVec3::X]),
                FieldArray::scalar("Pressure", vec![1.5]),
            ],
            "Pressure",
            "Velocity",
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("Velocity").map(FieldArray::kind), Some(FieldKind::Vector));
        assert!(set.get("Missing").is_none());
    }
}
