//! Number array codec adapter.

use crate::{BytePolicy, ConvertError, DataType, Value};

/// Narrow number array elements to bytes under `policy`.
pub(crate) fn to_bytes(items: &[Value], policy: BytePolicy) -> Result<Vec<u8>, ConvertError> {
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let byte = match (item, policy) {
            (Value::Number(n), BytePolicy::Strict) => strict(index, *n)?,
            (Value::Number(n), _) => wrap(*n),
            (other, BytePolicy::Strict) => {
                return Err(ConvertError::mismatch(DataType::NumberArray, other));
            }
            (_, _) => 0,
        };
        out.push(byte);
    }
    Ok(out)
}

/// Widen bytes to an array of numbers in `0..=255`.
pub(crate) fn from_bytes(bytes: &[u8]) -> Value {
    Value::Array(bytes.iter().map(|&b| Value::Number(f64::from(b))).collect())
}

/// Truncate toward zero, then reduce modulo 256. Non-finite values map to 0.
fn wrap(n: f64) -> u8 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(256.0) as u8
}

fn strict(index: usize, value: f64) -> Result<u8, ConvertError> {
    if value.fract() == 0.0 && (0.0..=255.0).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ConvertError::ByteOutOfRange { index, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(ns: &[f64]) -> Vec<Value> {
        ns.iter().copied().map(Value::Number).collect()
    }

    #[test]
    fn wrap_matches_typed_array_narrowing() {
        let items = numbers(&[0.0, 255.0, 256.0, -1.0, 1.9, -1.9, 513.0, f64::NAN, f64::INFINITY]);
        let bytes = to_bytes(&items, BytePolicy::Wrap).unwrap();
        assert_eq!(bytes, vec![0, 255, 0, 255, 1, 255, 1, 0, 0]);
    }

    #[test]
    fn wrap_zeroes_non_numbers() {
        let items = vec![Value::Number(7.0), Value::from("x"), Value::Null];
        assert_eq!(to_bytes(&items, BytePolicy::Wrap).unwrap(), vec![7, 0, 0]);
    }

    #[test]
    fn strict_rejects_out_of_range() {
        let err = to_bytes(&numbers(&[1.0, 2.5]), BytePolicy::Strict).unwrap_err();
        assert!(matches!(err, ConvertError::ByteOutOfRange { index: 1, value } if value == 2.5));

        let err = to_bytes(&numbers(&[256.0]), BytePolicy::Strict).unwrap_err();
        assert!(matches!(err, ConvertError::ByteOutOfRange { index: 0, .. }));

        let items = vec![Value::Number(1.0), Value::Bool(true)];
        let err = to_bytes(&items, BytePolicy::Strict).unwrap_err();
        assert!(matches!(err, ConvertError::TypeMismatch { found: "boolean", .. }));
    }

    #[test]
    fn widen() {
        let Value::Array(items) = from_bytes(&[0, 128, 255]) else {
            panic!("expected array");
        };
        assert!(matches!(items[..], [Value::Number(a), Value::Number(b), Value::Number(c)]
            if a == 0.0 && b == 128.0 && c == 255.0));
    }
}
