//! Rust types that can be stored as property samples.

use bytemuck::Pod;
use half::f16;

use crate::util::{
    BBox3d, Bool, DMat4, DQuat, DVec3, DataType, Error, Mat4, PlainOldDataType, Result, Vec2, Vec3,
};

/// A value type with a fixed Alembic data type.
///
/// `encode`/`decode` work on runs of values so arrays and extent-multiplied
/// scalars share one code path.
pub trait SampleValue: Clone + Send + 'static {
    const POD: PlainOldDataType;
    /// Components per value.
    const EXTENT: u8;

    fn data_type() -> DataType {
        DataType::new(Self::POD, Self::EXTENT)
    }

    /// Reject values the encoding cannot carry back unchanged.
    fn validate(_values: &[Self]) -> Result<()> {
        Ok(())
    }

    fn encode(values: &[Self], out: &mut Vec<u8>);

    fn decode(bytes: &[u8]) -> Result<Vec<Self>>;
}

fn decode_pod<T: Pod>(bytes: &[u8]) -> Result<Vec<T>> {
    let size = std::mem::size_of::<T>();
    if bytes.len() % size != 0 {
        return Err(Error::invalid(format!(
            "sample of {} bytes is not a multiple of the {size} byte element",
            bytes.len()
        )));
    }
    Ok(bytemuck::pod_collect_to_vec::<u8, T>(bytes))
}

macro_rules! pod_sample_value {
    ($($ty:ty => $pod:ident, $extent:expr;)*) => {$(
        impl SampleValue for $ty {
            const POD: PlainOldDataType = PlainOldDataType::$pod;
            const EXTENT: u8 = $extent;

            fn encode(values: &[Self], out: &mut Vec<u8>) {
                out.extend_from_slice(bytemuck::cast_slice(values));
            }

            fn decode(bytes: &[u8]) -> Result<Vec<Self>> {
                decode_pod(bytes)
            }
        }
    )*};
}

pod_sample_value! {
    Bool => Boolean, 1;
    u8 => Uint8, 1;
    i8 => Int8, 1;
    u16 => Uint16, 1;
    i16 => Int16, 1;
    u32 => Uint32, 1;
    i32 => Int32, 1;
    u64 => Uint64, 1;
    i64 => Int64, 1;
    f16 => Float16, 1;
    f32 => Float32, 1;
    f64 => Float64, 1;
    Vec2 => Float32, 2;
    Vec3 => Float32, 3;
    Mat4 => Float32, 16;
    DVec3 => Float64, 3;
    DQuat => Float64, 4;
    DMat4 => Float64, 16;
    BBox3d => Float64, 6;
}

impl SampleValue for bool {
    const POD: PlainOldDataType = PlainOldDataType::Boolean;
    const EXTENT: u8 = 1;

    fn encode(values: &[Self], out: &mut Vec<u8>) {
        out.extend(values.iter().map(|&v| v as u8));
    }

    fn decode(bytes: &[u8]) -> Result<Vec<Self>> {
        Ok(bytes.iter().map(|&b| b != 0).collect())
    }
}

/// Strings are stored null-terminated and back to back.
impl SampleValue for String {
    const POD: PlainOldDataType = PlainOldDataType::String;
    const EXTENT: u8 = 1;

    fn validate(values: &[Self]) -> Result<()> {
        match values.iter().position(|s| s.contains('\0')) {
            Some(i) => Err(Error::invalid(format!("string {i} contains a NUL byte"))),
            None => Ok(()),
        }
    }

    fn encode(values: &[Self], out: &mut Vec<u8>) {
        for s in values {
            out.extend_from_slice(s.as_bytes());
            out.push(0);
        }
    }

    fn decode(bytes: &[u8]) -> Result<Vec<Self>> {
        bytes
            .split_inclusive(|&b| b == 0)
            .map(|piece| -> Result<String> {
                let text = piece
                    .strip_suffix(&[0])
                    .ok_or_else(|| Error::invalid("unterminated string sample"))?;
                Ok(String::from_utf8(text.to_vec())?)
            })
            .collect()
    }
}

/// Bytes of one value list, ready for [`SampleKey`](crate::core::SampleKey).
pub(crate) fn encode_values<T: SampleValue>(values: &[T]) -> Vec<u8> {
    let mut out = Vec::new();
    T::encode(values, &mut out);
    out
}

/// Check a stored data type against what `T` expects.
pub(crate) fn check_data_type<T: SampleValue>(actual: DataType, multiplier: usize) -> Result<()> {
    let expected = T::data_type()
        .with_multiplier(multiplier)
        .ok_or_else(|| Error::invalid(format!("extent multiplier {multiplier} too large")))?;
    if actual != expected {
        return Err(Error::TypeMismatch { expected: expected.to_string(), actual: actual.to_string() });
    }
    Ok(())
}
