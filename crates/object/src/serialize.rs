use crate::error::ConversionError;
use crate::object::Object;

/// Serializes a native value to its PDF literal syntax.
///
/// Examples:
///
/// ```
/// use vellum_object::{serialize, Object};
///
/// assert_eq!(serialize(&Object::Boolean(true)).unwrap(), "true");
/// assert_eq!(serialize(&Object::Name("Symbol".into())).unwrap(), "/Symbol");
/// assert_eq!(serialize(&Object::string_literal("foo")).unwrap(), "<666f6f>");
/// ```
///
/// Strings always render in the hex bracket form regardless of their
/// [`StringFormat`](crate::StringFormat) tag. References render as their
/// indirection token, never as the referenced body, so recursion depth is
/// bounded by the nesting of the value itself.
pub fn serialize(object: &Object) -> Result<String, ConversionError> {
    match object {
        Object::Null => Ok("null".to_string()),
        Object::Boolean(value) => Ok(value.to_string()),
        Object::Integer(value) => Ok(value.to_string()),
        Object::Real(value) if value.is_finite() => Ok(value.to_string()),
        Object::Real(value) => Err(ConversionError::UnsupportedReal(*value)),
        Object::String(content, _) => {
            let mut out = String::with_capacity(content.len() * 2 + 2);
            out.push('<');
            for byte in content {
                out.push_str(&format!("{byte:02x}"));
            }
            out.push('>');
            Ok(out)
        }
        Object::Name(atom) => serialize_name(atom),
        Object::Array(items) => {
            let items = items.iter().map(serialize).collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[{}]", items.join(" ")))
        }
        Object::Dictionary(dict) => {
            let mut out = String::from("<< ");
            for (key, value) in dict.iter() {
                out.push_str(&serialize_name(key)?);
                out.push(' ');
                out.push_str(&serialize(value)?);
                out.push('\n');
            }
            out.push_str(">>");
            Ok(out)
        }
        Object::Reference(id) => Ok(format!("{id} 0 R")),
    }
}

// Dictionary keys go through the same coercion as standalone names, so a
// whitespace-bearing key fails exactly like a whitespace-bearing name.
fn serialize_name(atom: &str) -> Result<String, ConversionError> {
    if atom.contains(char::is_whitespace) {
        return Err(ConversionError::NameWithWhitespace(atom.to_string()));
    }
    Ok(format!("/{atom}"))
}
