use std::fmt;

use crate::error::AbiError;

/// A named tuple component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

/// An ABI type descriptor.
///
/// Parsed from the human-readable signature form (`uint256`, `bytes32[4]`,
/// `tuple(uint256 a, address b)[]`) and immutable afterwards, so a parsed
/// tree can be shared read-only between callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Bool,
    /// Unsigned integer with a bit width of 8..=256, multiple of 8.
    Uint(usize),
    /// Signed (two's complement) integer, same widths as `Uint`.
    Int(usize),
    Address,
    /// `bytesN`, 1..=32 bytes, right-padded in the encoding.
    FixedBytes(usize),
    Bytes,
    String,
    /// `T[n]`.
    FixedArray(Box<Type>, usize),
    /// `T[]`.
    Array(Box<Type>),
    Tuple(Vec<Param>),
}

impl Type {
    /// Parses a canonical type signature by recursive descent.
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        let s = signature.trim();
        if s.is_empty() {
            return Err(AbiError::malformed(signature, "empty type"));
        }

        // Array suffixes bind last: the trailing group is the outermost.
        if let Some(stripped) = s.strip_suffix(']') {
            let open = stripped
                .rfind('[')
                .ok_or_else(|| AbiError::malformed(signature, "unbalanced brackets"))?;
            let elem = Self::parse_with_context(&stripped[..open], signature)?;
            let len = &stripped[open + 1..];
            return if len.is_empty() {
                Ok(Type::Array(Box::new(elem)))
            } else {
                let len: usize = len.parse().map_err(|_| {
                    AbiError::malformed(signature, format!("invalid array length {len:?}"))
                })?;
                if len == 0 {
                    return Err(AbiError::malformed(signature, "zero-length fixed array"));
                }
                Ok(Type::FixedArray(Box::new(elem), len))
            };
        }

        if let Some(inner) = s.strip_prefix("tuple(") {
            let inner = inner
                .strip_suffix(')')
                .ok_or_else(|| AbiError::malformed(signature, "unbalanced parentheses"))?;
            return Ok(Type::Tuple(parse_components(inner, signature)?));
        }

        match s {
            "bool" => return Ok(Type::Bool),
            "address" => return Ok(Type::Address),
            "bytes" => return Ok(Type::Bytes),
            "string" => return Ok(Type::String),
            "uint" => return Ok(Type::Uint(256)),
            "int" => return Ok(Type::Int(256)),
            _ => {}
        }

        if let Some(width) = s.strip_prefix("uint") {
            return Ok(Type::Uint(parse_bits(width, signature)?));
        }
        if let Some(width) = s.strip_prefix("int") {
            return Ok(Type::Int(parse_bits(width, signature)?));
        }
        if let Some(len) = s.strip_prefix("bytes") {
            let len: usize = len.parse().map_err(|_| {
                AbiError::malformed(signature, format!("invalid bytes length {len:?}"))
            })?;
            if !(1..=32).contains(&len) {
                return Err(AbiError::malformed(signature, "bytesN length must be 1..=32"));
            }
            return Ok(Type::FixedBytes(len));
        }

        Err(AbiError::malformed(signature, format!("unknown type keyword {s:?}")))
    }

    fn parse_with_context(s: &str, original: &str) -> Result<Self, AbiError> {
        Self::parse(s).map_err(|e| match e {
            AbiError::MalformedType { reason, .. } => AbiError::malformed(original, reason),
            other => other,
        })
    }

    /// Whether the encoded size depends on the value.
    ///
    /// Dynamic elements occupy a 32-byte offset slot in their parent's head;
    /// static elements encode in place.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Type::Bytes | Type::String | Type::Array(_) => true,
            Type::FixedArray(elem, _) => elem.is_dynamic(),
            Type::Tuple(params) => params.iter().any(|p| p.ty.is_dynamic()),
            _ => false,
        }
    }

    /// Bytes a value of this type occupies in its parent's head region.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            32
        } else {
            self.static_size()
        }
    }

    /// Encoded size of a static type. For dynamic types this is the size of
    /// the offset word.
    fn static_size(&self) -> usize {
        match self {
            Type::FixedArray(elem, len) => len * elem.static_size(),
            Type::Tuple(params) => params.iter().map(|p| p.ty.static_size()).sum(),
            _ => 32,
        }
    }

    /// The canonical signature form used for selector and event-id hashing:
    /// names dropped, tuples rendered as parenthesized component lists.
    pub fn canonical(&self) -> String {
        match self {
            Type::FixedArray(elem, len) => format!("{}[{len}]", elem.canonical()),
            Type::Array(elem) => format!("{}[]", elem.canonical()),
            Type::Tuple(params) => {
                let inner: Vec<String> = params.iter().map(|p| p.ty.canonical()).collect();
                format!("({})", inner.join(","))
            }
            _ => self.to_string(),
        }
    }
}

fn parse_bits(width: &str, signature: &str) -> Result<usize, AbiError> {
    let bits: usize = width
        .parse()
        .map_err(|_| AbiError::malformed(signature, format!("invalid bit width {width:?}")))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::malformed(
            signature,
            "bit width must be 8..=256 and a multiple of 8",
        ));
    }
    Ok(bits)
}

/// Splits `tuple(...)` contents at top-level commas and parses each
/// `type [name]` component.
fn parse_components(inner: &str, signature: &str) -> Result<Vec<Param>, AbiError> {
    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    let mut components = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| AbiError::malformed(signature, "unbalanced brackets"))?;
            }
            ',' if depth == 0 => {
                components.push(parse_component(&inner[start..i], signature)?);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(AbiError::malformed(signature, "unbalanced brackets"));
    }
    components.push(parse_component(&inner[start..], signature)?);
    Ok(components)
}

fn parse_component(component: &str, signature: &str) -> Result<Param, AbiError> {
    let component = component.trim();
    if component.is_empty() {
        return Err(AbiError::malformed(signature, "empty tuple component"));
    }

    // An optional field name follows the type after a top-level space.
    let mut depth = 0usize;
    let mut split = None;
    for (i, c) in component.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ' ' if depth == 0 => split = Some(i),
            _ => {}
        }
    }

    match split {
        Some(i) => Ok(Param {
            name: component[i + 1..].trim().to_string(),
            ty: Type::parse_with_context(&component[..i], signature)?,
        }),
        None => Ok(Param {
            name: String::new(),
            ty: Type::parse_with_context(component, signature)?,
        }),
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::Uint(bits) => write!(f, "uint{bits}"),
            Type::Int(bits) => write!(f, "int{bits}"),
            Type::Address => f.write_str("address"),
            Type::FixedBytes(len) => write!(f, "bytes{len}"),
            Type::Bytes => f.write_str("bytes"),
            Type::String => f.write_str("string"),
            Type::FixedArray(elem, len) => write!(f, "{elem}[{len}]"),
            Type::Array(elem) => write!(f, "{elem}[]"),
            Type::Tuple(params) => {
                f.write_str("tuple(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if p.name.is_empty() {
                        write!(f, "{}", p.ty)?;
                    } else {
                        write!(f, "{} {}", p.ty, p.name)?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_elementary_types() {
        assert_eq!(Type::parse("bool").unwrap(), Type::Bool);
        assert_eq!(Type::parse("address").unwrap(), Type::Address);
        assert_eq!(Type::parse("bytes").unwrap(), Type::Bytes);
        assert_eq!(Type::parse("string").unwrap(), Type::String);
        assert_eq!(Type::parse("uint256").unwrap(), Type::Uint(256));
        assert_eq!(Type::parse("uint8").unwrap(), Type::Uint(8));
        assert_eq!(Type::parse("int64").unwrap(), Type::Int(64));
        assert_eq!(Type::parse("bytes32").unwrap(), Type::FixedBytes(32));
        assert_eq!(Type::parse("bytes1").unwrap(), Type::FixedBytes(1));
    }

    #[test]
    fn uint_and_int_alias_to_256_bits() {
        assert_eq!(Type::parse("uint").unwrap(), Type::Uint(256));
        assert_eq!(Type::parse("int").unwrap(), Type::Int(256));
    }

    #[test]
    fn parse_arrays() {
        assert_eq!(
            Type::parse("uint256[]").unwrap(),
            Type::Array(Box::new(Type::Uint(256)))
        );
        assert_eq!(
            Type::parse("bytes32[4]").unwrap(),
            Type::FixedArray(Box::new(Type::FixedBytes(32)), 4)
        );
        // The trailing suffix is the outermost array.
        assert_eq!(
            Type::parse("uint256[3][]").unwrap(),
            Type::Array(Box::new(Type::FixedArray(Box::new(Type::Uint(256)), 3)))
        );
    }

    #[test]
    fn parse_tuples_with_names() {
        let ty = Type::parse("tuple(uint256 a, address b)").unwrap();
        let Type::Tuple(params) = &ty else { panic!("not a tuple") };
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "a");
        assert_eq!(params[0].ty, Type::Uint(256));
        assert_eq!(params[1].name, "b");
        assert_eq!(params[1].ty, Type::Address);
    }

    #[test]
    fn parse_nested_tuple_array() {
        let ty = Type::parse("tuple(uint8[2] pair, tuple(string s) inner)[]").unwrap();
        let Type::Array(elem) = &ty else { panic!("not an array") };
        let Type::Tuple(params) = elem.as_ref() else { panic!("not a tuple") };
        assert_eq!(params[0].ty, Type::FixedArray(Box::new(Type::Uint(8)), 2));
        let Type::Tuple(inner) = &params[1].ty else { panic!("not a tuple") };
        assert_eq!(inner[0].ty, Type::String);
    }

    #[test]
    fn reject_malformed_types() {
        for bad in [
            "", "uint7", "uint0", "uint264", "int12", "bytes0", "bytes33", "bytes-1",
            "uint256[", "uint256[2", "tuple(uint256", "tuple(uint256))", "notatype",
            "uint256[x]", "uint256[0]", "tuple(,)",
        ] {
            let err = Type::parse(bad);
            assert!(
                matches!(err, Err(AbiError::MalformedType { .. })),
                "expected malformed-type error for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn dynamic_classification() {
        assert!(!Type::parse("uint256").unwrap().is_dynamic());
        assert!(!Type::parse("bytes32").unwrap().is_dynamic());
        assert!(!Type::parse("uint256[4]").unwrap().is_dynamic());
        assert!(!Type::parse("tuple(uint256,address)").unwrap().is_dynamic());

        assert!(Type::parse("bytes").unwrap().is_dynamic());
        assert!(Type::parse("string").unwrap().is_dynamic());
        assert!(Type::parse("uint256[]").unwrap().is_dynamic());
        assert!(Type::parse("string[4]").unwrap().is_dynamic());
        assert!(Type::parse("tuple(uint256,bytes)").unwrap().is_dynamic());
    }

    #[test]
    fn head_sizes() {
        assert_eq!(Type::parse("uint256").unwrap().head_size(), 32);
        assert_eq!(Type::parse("uint256[4]").unwrap().head_size(), 128);
        assert_eq!(Type::parse("tuple(uint256,address)").unwrap().head_size(), 64);
        // Dynamic types occupy one offset word.
        assert_eq!(Type::parse("bytes").unwrap().head_size(), 32);
        assert_eq!(Type::parse("string[4]").unwrap().head_size(), 32);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for sig in [
            "bool",
            "uint256",
            "bytes32[4]",
            "uint256[3][]",
            "tuple(uint256 a,address b)",
            "tuple(uint8[2] pair,tuple(string s) inner)[]",
        ] {
            let ty = Type::parse(sig).unwrap();
            assert_eq!(ty.to_string(), sig);
            assert_eq!(Type::parse(&ty.to_string()).unwrap(), ty);
        }
    }

    #[test]
    fn canonical_drops_names_and_tuple_keyword() {
        let ty = Type::parse("tuple(uint256 amount, address to)[2]").unwrap();
        assert_eq!(ty.canonical(), "(uint256,address)[2]");
    }
}
