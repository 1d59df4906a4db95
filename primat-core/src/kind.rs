//! Element kind tags

/// Primitive value family a matrix specializes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ElementKind {
    /// `bool`
    Boolean = 0,
    /// `char`
    Char = 1,
    /// 8-bit signed integer
    Byte = 2,
    /// 16-bit signed integer
    Short = 3,
    /// 32-bit signed integer
    Int = 4,
    /// 64-bit signed integer
    Long = 5,
    /// 32-bit floating point
    Float = 6,
    /// 64-bit floating point
    Double = 7,
    /// Nullable generic values
    Object = 8,
}

impl ElementKind {
    /// Whether the kind supports add/subtract/multiply
    pub const fn is_numeric(self) -> bool {
        !matches!(
            self,
            ElementKind::Boolean | ElementKind::Char | ElementKind::Object
        )
    }

    /// Whether arithmetic on this kind wraps on overflow
    pub const fn wraps_on_overflow(self) -> bool {
        matches!(
            self,
            ElementKind::Byte | ElementKind::Short | ElementKind::Int | ElementKind::Long
        )
    }

    /// Get the size in bytes of one primitive value, `None` for objects
    pub const fn size_bytes(self) -> Option<usize> {
        match self {
            ElementKind::Boolean | ElementKind::Byte => Some(1),
            ElementKind::Short => Some(2),
            ElementKind::Char | ElementKind::Int | ElementKind::Float => Some(4),
            ElementKind::Long | ElementKind::Double => Some(8),
            ElementKind::Object => None,
        }
    }
}

impl core::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ElementKind::Boolean => "boolean",
            ElementKind::Char => "char",
            ElementKind::Byte => "byte",
            ElementKind::Short => "short",
            ElementKind::Int => "int",
            ElementKind::Long => "long",
            ElementKind::Float => "float",
            ElementKind::Double => "double",
            ElementKind::Object => "object",
        };
        write!(f, "{name}")
    }
}
