//! Xform (transform) schema.
//!
//! Layout under the object's `.xform` compound:
//! - `.inherits`: bool scalar, one sample per `set`
//! - `.ops`: u8 scalar, one encoded op per element, written once
//! - `.vals`: f64 scalar of every op channel, stored only once a channel leaves its default
//! - `isNotConstantIdentity`: bool scalar, present once `.vals` exists
//! - `.childBnds`: box scalar, stored only once a bound is non-empty

use tracing::debug;

use super::{XformOp, XformOpType};
use crate::abc::{
    ICompoundProperty, IObject, IScalarProperty, OCompoundProperty, ODefaultedScalarProperty,
    ErrorPolicy, ErrorSink, OObject, OScalarProperty, PropertyArgs, TimeSamplingArg,
};
use crate::core::{MetaData, SampleSelector, TimeSampling};
use crate::util::{BBox3d, DMat4, DVec3, Error, Result, ResultExt};

pub const XFORM_SCHEMA: &str = "AbcGeom_Xform_v3";
pub const XFORM_SCHEMA_TITLE: &str = "AbcGeom_Xform_v3:.xform";

const SCHEMA_PROP: &str = ".xform";
const INHERITS_PROP: &str = ".inherits";
const OPS_PROP: &str = ".ops";
const VALS_PROP: &str = ".vals";
const CHILD_BOUNDS_PROP: &str = ".childBnds";
const NOT_CONSTANT_IDENTITY_PROP: &str = "isNotConstantIdentity";

/// One transform sample: an ordered op stack plus the inherits flag.
#[derive(Clone, Debug, PartialEq)]
pub struct XformSample {
    ops: Vec<XformOp>,
    inherits: bool,
    child_bounds: BBox3d,
}

impl Default for XformSample {
    fn default() -> Self {
        Self { ops: Vec::new(), inherits: true, child_bounds: BBox3d::EMPTY }
    }
}

impl XformSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// No ops, inherits the parent transform.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: XformOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn with_op(mut self, op: XformOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn with_inherits(mut self, inherits: bool) -> Self {
        self.inherits = inherits;
        self
    }

    pub fn with_child_bounds(mut self, bounds: BBox3d) -> Self {
        self.child_bounds = bounds;
        self
    }

    pub fn ops(&self) -> &[XformOp] {
        &self.ops
    }

    pub fn op_mut(&mut self, index: usize) -> Option<&mut XformOp> {
        self.ops.get_mut(index)
    }

    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    pub fn inherits(&self) -> bool {
        self.inherits
    }

    pub fn set_inherits(&mut self, inherits: bool) {
        self.inherits = inherits;
    }

    pub fn child_bounds(&self) -> BBox3d {
        self.child_bounds
    }

    pub fn set_child_bounds(&mut self, bounds: BBox3d) {
        self.child_bounds = bounds;
    }

    /// Total channels across all ops.
    pub fn num_channels(&self) -> usize {
        self.ops.iter().map(XformOp::num_channels).sum()
    }

    /// Channels of every op, flattened in op order.
    pub fn channels(&self) -> Vec<f64> {
        self.ops.iter().flat_map(|op| op.values().iter().copied()).collect()
    }

    fn default_channels(&self) -> Vec<f64> {
        self.ops
            .iter()
            .flat_map(|op| {
                let ty = op.op_type();
                (0..ty.num_channels()).map(move |i| ty.default_channel(i))
            })
            .collect()
    }

    /// Same op count and op types in the same order.
    pub fn same_topology(&self, other: &XformSample) -> bool {
        self.ops.len() == other.ops.len()
            && self.ops.iter().zip(&other.ops).all(|(a, b)| a.op_type() == b.op_type())
    }

    /// Local matrix; the first op is outermost.
    pub fn matrix(&self) -> DMat4 {
        self.ops.iter().fold(DMat4::IDENTITY, |m, op| m * op.to_matrix())
    }

    pub fn translation(&self) -> DVec3 {
        self.matrix().w_axis.truncate()
    }
}

/// Transform writer.
///
/// ```ignore
/// let mut xf = OXform::new(&archive.top(), "root", 0)?;
/// xf.set(&XformSample::new().with_op(XformOp::translate(DVec3::X)))?;
/// ```
pub struct OXform {
    object: OObject,
    schema: OCompoundProperty,
    args: PropertyArgs,
    inherits: OScalarProperty<bool>,
    child_bounds: ODefaultedScalarProperty<BBox3d>,
    // Frozen by the first `set`.
    topology: Option<Vec<XformOpType>>,
    vals: Option<ODefaultedScalarProperty<f64>>,
    not_constant_identity: Option<OScalarProperty<bool>>,
    num_samples: usize,
    sink: ErrorSink,
}

impl OXform {
    /// Create child `name` under `parent`.
    pub fn new(parent: &OObject, name: &str, args: impl Into<PropertyArgs>) -> Result<Self> {
        let mut args = args.into();
        let meta_data = MetaData::new()
            .with(MetaData::SCHEMA_KEY, XFORM_SCHEMA)
            .with(MetaData::SCHEMA_OBJ_TITLE_KEY, XFORM_SCHEMA_TITLE);
        let object = parent.add_child(name, meta_data)?;

        // Register the sampling once so every channel shares the index.
        let index = object
            .archive()
            .resolve_time_sampling(std::mem::take(&mut args.time_sampling))
            .op("xform")?;
        args.time_sampling = TimeSamplingArg::Index(index);
        // Channels fail fast; the caller's policy applies once per sample.
        let property_args = PropertyArgs {
            error_policy: ErrorPolicy::Abort,
            time_sampling: args.time_sampling.clone(),
            meta_data: MetaData::new(),
        };

        let mut schema_meta = args.meta_data.clone();
        schema_meta.set(MetaData::SCHEMA_KEY, XFORM_SCHEMA);
        let schema = object.properties()?.add_compound(SCHEMA_PROP, schema_meta)?;
        let inherits = schema.add_scalar::<bool>(INHERITS_PROP, property_args.clone())?;
        let child_bounds = ODefaultedScalarProperty::new(
            schema.clone(),
            CHILD_BOUNDS_PROP,
            vec![BBox3d::EMPTY],
            property_args.clone().with_interpretation("box"),
        );
        debug!(xform = %object.full_name(), time_sampling = index, "created xform");

        Ok(Self {
            object,
            schema,
            args: property_args,
            inherits,
            child_bounds,
            topology: None,
            vals: None,
            not_constant_identity: None,
            num_samples: 0,
            sink: ErrorSink::new(args.error_policy),
        })
    }

    pub fn object(&self) -> &OObject {
        &self.object
    }

    pub fn name(&self) -> &str {
        self.object.name()
    }

    /// Write one sample. The first call freezes the op topology.
    ///
    /// Failures follow the xform's error policy and never advance the count.
    pub fn set(&mut self, sample: &XformSample) -> Result<()> {
        let result = self.try_set(sample);
        self.sink.handle("set", self.object.full_name(), result)
    }

    fn try_set(&mut self, sample: &XformSample) -> Result<()> {
        self.object.archive().with(|_| Ok(()))?;
        match &self.topology {
            Some(topology) => self.check_topology(topology, sample)?,
            None => self.freeze_topology(sample)?,
        }

        self.inherits.set(&sample.inherits)?;
        if let Some(vals) = &mut self.vals {
            vals.set_slice(&sample.channels())?;
            if vals.is_materialized() && self.not_constant_identity.is_none() {
                let mut flag = self.schema.add_scalar::<bool>(
                    NOT_CONSTANT_IDENTITY_PROP,
                    PropertyArgs { time_sampling: TimeSamplingArg::Index(0), ..self.args.clone() },
                )?;
                flag.set(&true)?;
                self.not_constant_identity = Some(flag);
            }
        }
        let bounds =
            if sample.child_bounds.is_empty() { BBox3d::EMPTY } else { sample.child_bounds };
        self.child_bounds.set(&bounds)?;

        self.num_samples += 1;
        Ok(())
    }

    /// Repeat the previous sample on every channel.
    pub fn set_from_previous(&mut self) -> Result<()> {
        let result = self.try_set_from_previous();
        self.sink.handle("set_from_previous", self.object.full_name(), result)
    }

    fn try_set_from_previous(&mut self) -> Result<()> {
        self.object.archive().with(|_| Ok(()))?;
        if self.num_samples == 0 {
            return Err(Error::NoPreviousSample(self.object.full_name().to_string()));
        }
        self.inherits.set_from_previous()?;
        if let Some(vals) = &mut self.vals {
            vals.set_from_previous()?;
        }
        self.child_bounds.set_from_previous()?;
        self.num_samples += 1;
        Ok(())
    }

    /// Retime every channel, including ones not yet stored.
    pub fn set_time_sampling(&mut self, ts: impl Into<TimeSamplingArg>) -> Result<()> {
        let result = self.try_set_time_sampling(ts.into());
        self.sink.handle("set_time_sampling", self.object.full_name(), result)
    }

    fn try_set_time_sampling(&mut self, ts: TimeSamplingArg) -> Result<()> {
        let index = self.object.archive().resolve_time_sampling(ts)?;
        self.inherits.set_time_sampling(index)?;
        if let Some(vals) = &mut self.vals {
            vals.set_time_sampling(index)?;
        }
        self.child_bounds.set_time_sampling(index)?;
        self.args.time_sampling = TimeSamplingArg::Index(index);
        Ok(())
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Op types fixed by the first sample.
    pub fn topology(&self) -> Option<&[XformOpType]> {
        self.topology.as_deref()
    }

    /// True while no channel has left its default.
    pub fn is_constant_identity(&self) -> bool {
        self.not_constant_identity.is_none()
    }

    /// Errors collected under [`ErrorPolicy::Collect`].
    pub fn errors(&self) -> &[Error] {
        self.sink.errors()
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        self.sink.take()
    }

    fn check_topology(&self, topology: &[XformOpType], sample: &XformSample) -> Result<()> {
        let matches = topology.len() == sample.ops.len()
            && topology.iter().zip(&sample.ops).all(|(ty, op)| *ty == op.op_type());
        if matches {
            return Ok(());
        }
        Err(Error::TopologyMismatch(format!(
            "'{}' was written with {} ops {:?}, got {} ops {:?}",
            self.object.full_name(),
            topology.len(),
            topology,
            sample.ops.len(),
            sample.ops.iter().map(XformOp::op_type).collect::<Vec<_>>()
        )))
    }

    fn freeze_topology(&mut self, sample: &XformSample) -> Result<()> {
        let num_channels = sample.num_channels();
        if u8::try_from(num_channels).is_err() || u8::try_from(sample.ops.len()).is_err() {
            return Err(Error::invalid(format!(
                "xform '{}' has {} channels in {} ops, at most 255 fit",
                self.object.full_name(),
                num_channels,
                sample.ops.len()
            )));
        }

        if !sample.ops.is_empty() {
            let codes: Vec<u8> = sample.ops.iter().map(XformOp::encode).collect();
            let mut ops = self.schema.add_scalar_n::<u8>(OPS_PROP, codes.len(), self.args.clone())?;
            ops.set_slice(&codes)?;
            self.vals = Some(ODefaultedScalarProperty::new(
                self.schema.clone(),
                VALS_PROP,
                sample.default_channels(),
                self.args.clone(),
            ));
        }
        self.topology = Some(sample.ops.iter().map(XformOp::op_type).collect());
        debug!(
            xform = %self.object.full_name(),
            ops = sample.ops.len(),
            channels = num_channels,
            "froze xform topology"
        );
        Ok(())
    }
}

/// Transform reader.
pub struct IXform<'a> {
    object: IObject<'a>,
    schema: ICompoundProperty<'a>,
    inherits: IScalarProperty<'a, bool>,
    ops: Vec<XformOp>,
    vals: Option<IScalarProperty<'a, f64>>,
    child_bounds: Option<IScalarProperty<'a, BBox3d>>,
}

impl<'a> IXform<'a> {
    pub fn new(object: IObject<'a>) -> Result<Self> {
        if !object.matches_schema(XFORM_SCHEMA) {
            return Err(Error::TypeMismatch {
                expected: XFORM_SCHEMA.into(),
                actual: object.header().schema().unwrap_or("<none>").into(),
            });
        }
        let schema = object.properties()?.compound(SCHEMA_PROP).op("xform")?;
        let inherits = schema.scalar::<bool>(INHERITS_PROP).op("xform")?;

        let ops = match schema.property_header_by_name(OPS_PROP) {
            Some(header) => {
                let count = usize::from(header.data_type.extent);
                let codes = schema.scalar_n::<u8>(OPS_PROP, count)?.get_slice(0usize)?;
                codes.into_iter().map(XformOp::decode).collect::<Result<Vec<_>>>()?
            }
            None => Vec::new(),
        };
        let num_channels: usize = ops.iter().map(XformOp::num_channels).sum();

        let vals = match schema.property_header_by_name(VALS_PROP) {
            Some(header) if usize::from(header.data_type.extent) != num_channels => {
                return Err(Error::InvalidStructure(format!(
                    "'{}' stores {} channels, ops need {}",
                    object.full_name(),
                    header.data_type.extent,
                    num_channels
                )));
            }
            Some(_) => Some(schema.scalar_n::<f64>(VALS_PROP, num_channels)?),
            None => None,
        };
        let child_bounds = if schema.has_property(CHILD_BOUNDS_PROP) {
            Some(schema.scalar::<BBox3d>(CHILD_BOUNDS_PROP)?)
        } else {
            None
        };

        Ok(Self { object, schema, inherits, ops, vals, child_bounds })
    }

    pub fn object(&self) -> IObject<'a> {
        self.object
    }

    pub fn name(&self) -> &'a str {
        self.object.name()
    }

    pub fn num_samples(&self) -> usize {
        self.inherits.num_samples()
    }

    pub fn time_sampling(&self) -> &'a TimeSampling {
        self.inherits.time_sampling()
    }

    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    pub fn is_constant(&self) -> bool {
        self.inherits.is_constant()
            && self.vals.as_ref().map_or(true, |v| v.is_constant())
            && self.child_bounds.as_ref().map_or(true, |b| b.is_constant())
    }

    /// No channel ever left its default.
    pub fn is_constant_identity(&self) -> bool {
        !self.schema.has_property(NOT_CONSTANT_IDENTITY_PROP)
    }

    fn index(&self, sel: SampleSelector) -> Result<usize> {
        let num_samples = self.num_samples();
        let index = sel.resolve(self.time_sampling(), num_samples);
        if index >= num_samples {
            return Err(Error::SampleOutOfBounds { index, count: num_samples });
        }
        Ok(index)
    }

    pub fn get(&self, sel: impl Into<SampleSelector>) -> Result<XformSample> {
        let index = self.index(sel.into()).op("xform get")?;
        let mut ops = self.ops.clone();
        if let Some(vals) = &self.vals {
            let channels = vals.get_slice(index)?;
            let mut rest = channels.as_slice();
            for op in &mut ops {
                let (head, tail) = rest.split_at(op.num_channels());
                op.load_channels(head)?;
                rest = tail;
            }
        }
        Ok(XformSample {
            ops,
            inherits: self.inherits.get(index)?,
            child_bounds: self.read_child_bounds(index)?,
        })
    }

    pub fn child_bounds(&self, sel: impl Into<SampleSelector>) -> Result<BBox3d> {
        let index = self.index(sel.into()).op("xform child_bounds")?;
        self.read_child_bounds(index)
    }

    fn read_child_bounds(&self, index: usize) -> Result<BBox3d> {
        match &self.child_bounds {
            Some(bounds) => bounds.get(index),
            None => Ok(BBox3d::EMPTY),
        }
    }

    /// Whether the bound channel carries the box interpretation.
    pub fn child_bounds_interpretation(&self) -> Option<&'a str> {
        self.child_bounds
            .as_ref()
            .and_then(|b| b.header().meta_data.get(MetaData::INTERPRETATION_KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_order() {
        let sample = XformSample::new()
            .with_op(XformOp::translate(DVec3::new(10.0, 0.0, 0.0)))
            .with_op(XformOp::scale(DVec3::splat(2.0)));
        let p = sample.matrix().transform_point3(DVec3::new(1.0, 0.0, 0.0));
        assert!((p - DVec3::new(12.0, 0.0, 0.0)).length() < 1e-12);
        assert_eq!(sample.translation(), DVec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotation_degrees() {
        let sample = XformSample::new().with_op(XformOp::rotate_z(90.0));
        let p = sample.matrix().transform_point3(DVec3::X);
        assert!((p - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_channels_and_defaults() {
        let sample = XformSample::new()
            .with_op(XformOp::translate(DVec3::new(1.0, 2.0, 3.0)))
            .with_op(XformOp::scale(DVec3::splat(2.0)))
            .with_op(XformOp::rotate_x(45.0));
        assert_eq!(sample.num_channels(), 7);
        assert_eq!(sample.channels(), vec![1.0, 2.0, 3.0, 2.0, 2.0, 2.0, 45.0]);
        assert_eq!(sample.default_channels(), vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_same_topology() {
        let a = XformSample::new().with_op(XformOp::translate(DVec3::X));
        let b = XformSample::new().with_op(XformOp::translate(DVec3::Y)).with_inherits(false);
        let c = XformSample::new().with_op(XformOp::scale(DVec3::X));
        assert!(a.same_topology(&b));
        assert!(!a.same_topology(&c));
        assert!(!a.same_topology(&XformSample::identity()));
    }

    #[test]
    fn test_identity_sample() {
        let sample = XformSample::identity();
        assert!(sample.inherits());
        assert!(sample.child_bounds().is_empty());
        assert_eq!(sample.matrix(), DMat4::IDENTITY);
    }
}
