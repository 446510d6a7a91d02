//! Transform operations.
//!
//! An op is encoded in one byte, type in the high nibble and a free-form hint
//! in the low nibble. Its values ("channels") are stored flat, op after op, in
//! the schema's `.vals` property.

use crate::util::{DMat4, DQuat, DVec3, Error, Result};

/// Kind of transform operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum XformOpType {
    Scale = 0,
    Translate = 1,
    /// Axis (3 channels) plus angle in degrees.
    Rotate = 2,
    Matrix = 3,
    RotateX = 4,
    RotateY = 5,
    RotateZ = 6,
}

impl XformOpType {
    pub const fn num_channels(self) -> usize {
        match self {
            Self::Scale | Self::Translate => 3,
            Self::Rotate => 4,
            Self::Matrix => 16,
            Self::RotateX | Self::RotateY | Self::RotateZ => 1,
        }
    }

    pub const fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::Scale,
            1 => Self::Translate,
            2 => Self::Rotate,
            3 => Self::Matrix,
            4 => Self::RotateX,
            5 => Self::RotateY,
            6 => Self::RotateZ,
            _ => return None,
        })
    }

    /// Value a channel has when the op does nothing.
    pub const fn default_channel(self, index: usize) -> f64 {
        match self {
            Self::Scale => 1.0,
            Self::Matrix if index % 5 == 0 => 1.0,
            _ => 0.0,
        }
    }
}

/// One operation with its channel values.
#[derive(Clone, Debug, PartialEq)]
pub struct XformOp {
    op_type: XformOpType,
    hint: u8,
    values: Vec<f64>,
}

impl XformOp {
    /// Op with all channels at their defaults.
    pub fn new(op_type: XformOpType) -> Self {
        let values = (0..op_type.num_channels()).map(|i| op_type.default_channel(i)).collect();
        Self { op_type, hint: 0, values }
    }

    fn with_values(op_type: XformOpType, values: &[f64]) -> Self {
        Self { op_type, hint: 0, values: values.to_vec() }
    }

    pub fn scale(v: DVec3) -> Self {
        Self::with_values(XformOpType::Scale, &v.to_array())
    }

    pub fn translate(v: DVec3) -> Self {
        Self::with_values(XformOpType::Translate, &v.to_array())
    }

    /// Rotation about `axis` by `degrees`.
    pub fn rotate(axis: DVec3, degrees: f64) -> Self {
        Self::with_values(XformOpType::Rotate, &[axis.x, axis.y, axis.z, degrees])
    }

    pub fn rotate_x(degrees: f64) -> Self {
        Self::with_values(XformOpType::RotateX, &[degrees])
    }

    pub fn rotate_y(degrees: f64) -> Self {
        Self::with_values(XformOpType::RotateY, &[degrees])
    }

    pub fn rotate_z(degrees: f64) -> Self {
        Self::with_values(XformOpType::RotateZ, &[degrees])
    }

    /// Column-major, translation in the last column.
    pub fn matrix(m: DMat4) -> Self {
        Self::with_values(XformOpType::Matrix, &m.to_cols_array())
    }

    /// Set the low-nibble hint; higher bits are dropped.
    pub fn with_hint(mut self, hint: u8) -> Self {
        self.hint = hint & 0x0f;
        self
    }

    pub fn op_type(&self) -> XformOpType {
        self.op_type
    }

    pub fn hint(&self) -> u8 {
        self.hint
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn num_channels(&self) -> usize {
        self.values.len()
    }

    pub fn channel(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn set_channel(&mut self, index: usize, value: f64) -> Result<()> {
        let slot = self.values.get_mut(index).ok_or_else(|| {
            Error::invalid(format!("{:?} has no channel {index}", self.op_type))
        })?;
        *slot = value;
        Ok(())
    }

    pub fn encode(&self) -> u8 {
        ((self.op_type as u8) << 4) | self.hint
    }

    /// Op of the encoded type and hint, channels at their defaults.
    pub fn decode(code: u8) -> Result<Self> {
        let op_type = XformOpType::from_u8(code >> 4)
            .ok_or_else(|| Error::invalid(format!("unknown xform op code {code:#04x}")))?;
        Ok(Self::new(op_type).with_hint(code & 0x0f))
    }

    /// Replace all channels from a flat slice of the right length.
    pub(crate) fn load_channels(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.values.len() {
            return Err(Error::invalid(format!(
                "{:?} takes {} channels, got {}",
                self.op_type,
                self.values.len(),
                values.len()
            )));
        }
        self.values.copy_from_slice(values);
        Ok(())
    }

    /// Local matrix of this op, column-vector convention.
    pub fn to_matrix(&self) -> DMat4 {
        let v = &self.values;
        match self.op_type {
            XformOpType::Scale => DMat4::from_scale(DVec3::new(v[0], v[1], v[2])),
            XformOpType::Translate => DMat4::from_translation(DVec3::new(v[0], v[1], v[2])),
            XformOpType::Rotate => {
                let axis = DVec3::new(v[0], v[1], v[2]).normalize_or_zero();
                if axis == DVec3::ZERO {
                    DMat4::IDENTITY
                } else {
                    DMat4::from_quat(DQuat::from_axis_angle(axis, v[3].to_radians()))
                }
            }
            XformOpType::Matrix => {
                let mut cols = [0.0; 16];
                cols.copy_from_slice(v);
                DMat4::from_cols_array(&cols)
            }
            XformOpType::RotateX => DMat4::from_rotation_x(v[0].to_radians()),
            XformOpType::RotateY => DMat4::from_rotation_y(v[0].to_radians()),
            XformOpType::RotateZ => DMat4::from_rotation_z(v[0].to_radians()),
        }
    }
}
