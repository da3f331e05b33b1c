//! Values read from attributes.

use std::fmt;

use crate::util::NativeKind;

/// Value of an attribute, converted to its native representation.
///
/// Numeric attributes are always held as a vector: a scalar dataspace
/// yields a one-element vector.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Int(Vec<i64>),
    UInt(Vec<u64>),
    Float(Vec<f64>),
    Text(String),
}

impl AttrValue {
    /// Native kind of the held value.
    pub fn kind(&self) -> NativeKind {
        match self {
            Self::Int(_) => NativeKind::Int,
            Self::UInt(_) => NativeKind::UInt,
            Self::Float(_) => NativeKind::Float,
            Self::Text(_) => NativeKind::Text,
        }
    }

    /// Number of elements. Text counts as one.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::UInt(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Text(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Element `index` as a non-negative integer.
    ///
    /// Floats convert only when integral; text never converts.
    pub fn integer_at(&self, index: usize) -> Option<u64> {
        match self {
            Self::Int(v) => v.get(index).and_then(|&x| u64::try_from(x).ok()),
            Self::UInt(v) => v.get(index).copied(),
            Self::Float(v) => v
                .get(index)
                .filter(|x| x.fract() == 0.0 && **x >= 0.0 && **x <= u64::MAX as f64)
                .map(|&x| x as u64),
            Self::Text(_) => None,
        }
    }

    /// All elements as non-negative integers, `None` if any fails to convert.
    pub fn to_integers(&self) -> Option<Vec<u64>> {
        (0..self.len()).map(|i| self.integer_at(i)).collect()
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, v: &[T]) -> fmt::Result {
            if let [single] = v {
                return write!(f, "{}", single);
            }
            write!(f, "[")?;
            for (i, x) in v.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x)?;
            }
            write!(f, "]")
        }
        match self {
            Self::Int(v) => join(f, v),
            Self::UInt(v) => join(f, v),
            Self::Float(v) => join(f, v),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversion() {
        assert_eq!(AttrValue::Int(vec![10, 10]).integer_at(0), Some(10));
        assert_eq!(AttrValue::Int(vec![-1]).integer_at(0), None);
        assert_eq!(AttrValue::UInt(vec![7]).integer_at(1), None);
        assert_eq!(AttrValue::Float(vec![10.0]).integer_at(0), Some(10));
        assert_eq!(AttrValue::Float(vec![10.5]).integer_at(0), None);
        assert_eq!(AttrValue::Text("10".into()).integer_at(0), None);
        assert_eq!(AttrValue::Int(vec![3, 4]).to_integers(), Some(vec![3, 4]));
        assert_eq!(AttrValue::Int(vec![3, -4]).to_integers(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(AttrValue::Text("0.2".into()).to_string(), "0.2");
        assert_eq!(AttrValue::Float(vec![0.2]).to_string(), "0.2");
        assert_eq!(AttrValue::Int(vec![10, 10]).to_string(), "[10, 10]");
        assert_eq!(AttrValue::UInt(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_kind_and_len() {
        let v = AttrValue::Text("abc".into());
        assert_eq!(v.kind(), NativeKind::Text);
        assert_eq!(v.len(), 1);
        assert_eq!(v.as_text(), Some("abc"));
        assert!(AttrValue::Float(vec![]).is_empty());
    }
}
