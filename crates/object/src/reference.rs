use crate::error::ConversionError;
use crate::object::{ObjId, Object};
use crate::serialize::serialize;

/// An indirect PDF object: a numbered, mutable cell holding a value and an
/// optional raw stream payload.
///
/// The id is the object's identity and never changes; `data` is public and
/// replaceable because graph import registers empty placeholders first and
/// fills them in after their children exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    id: ObjId,
    pub data: Object,
    stream: Option<Vec<u8>>,
}

impl Reference {
    pub fn new(id: ObjId, data: Object) -> Self {
        Self { id, data, stream: None }
    }

    pub fn id(&self) -> ObjId {
        self.id
    }

    pub fn stream(&self) -> Option<&[u8]> {
        self.stream.as_deref()
    }

    /// Attaches the raw payload rendered between `stream`/`endstream`.
    pub fn set_stream(&mut self, content: Vec<u8>) {
        self.stream = Some(content);
    }

    /// The short indirection token used wherever this object is referenced.
    pub fn token(&self) -> String {
        format!("{} 0 R", self.id)
    }

    /// The defining encoding: the full `N 0 obj ... endobj` body.
    ///
    /// When a stream payload is present its byte length is merged into the
    /// dictionary as `Length` before serialization. Byte output, since stream
    /// payloads are arbitrary binary.
    pub fn render(&self) -> Result<Vec<u8>, ConversionError> {
        let mut out = format!("{} 0 obj\n", self.id).into_bytes();
        match &self.stream {
            Some(payload) => {
                let body = match &self.data {
                    Object::Dictionary(dict) => {
                        let mut dict = dict.clone();
                        dict.set("Length", payload.len() as i64);
                        serialize(&Object::Dictionary(dict))?
                    }
                    data => serialize(data)?,
                };
                out.extend_from_slice(body.as_bytes());
                out.extend_from_slice(b"\nstream\n");
                out.extend_from_slice(payload);
                out.extend_from_slice(b"\nendstream\nendobj\n");
            }
            None => {
                out.extend_from_slice(serialize(&self.data)?.as_bytes());
                out.extend_from_slice(b"\nendobj\n");
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary;

    #[test]
    fn token_is_id_plus_generation_marker() {
        let reference = Reference::new(ObjId::new(7), Object::Null);
        assert_eq!(reference.token(), "7 0 R");
    }

    #[test]
    fn render_wraps_the_serialized_data() {
        let reference = Reference::new(ObjId::new(1), Object::Boolean(true));
        assert_eq!(reference.render().unwrap(), b"1 0 obj\ntrue\nendobj\n".to_vec());
    }

    #[test]
    fn render_appends_stream_payload_with_length() {
        let mut reference = Reference::new(
            ObjId::new(5),
            Object::Dictionary(dictionary! { "Filter" => "FlateDecode" }),
        );
        reference.set_stream(b"abcd".to_vec());
        assert_eq!(
            reference.render().unwrap(),
            b"5 0 obj\n<< /Filter /FlateDecode\n/Length 4\n>>\nstream\nabcd\nendstream\nendobj\n"
                .to_vec()
        );
    }

    #[test]
    fn data_is_replaceable_after_registration() {
        let mut reference = Reference::new(ObjId::new(2), Object::Null);
        reference.data = Object::Integer(10);
        assert_eq!(reference.data.as_i64(), Some(10));
    }
}
