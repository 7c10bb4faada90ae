use std::collections::HashMap;

use lopdf::Object as SourceObject;
use vellum_object::{Dictionary, ObjId, Object, StringFormat};

use crate::error::StoreError;
use crate::store::ObjectStore;

/// One import session: walks a parsed source document and rebuilds an
/// equivalent object graph inside the destination store.
///
/// `id_map` memoizes every source id already visited (including ids whose
/// subgraph is still being imported). It is what keeps cyclic and shared
/// references finite, and it must span a whole session, never a single call.
pub(crate) struct GraphImporter<'a> {
    source: &'a lopdf::Document,
    store: &'a mut ObjectStore,
    id_map: HashMap<lopdf::ObjectId, ObjId>,
}

impl<'a> GraphImporter<'a> {
    pub(crate) fn new(source: &'a lopdf::Document, store: &'a mut ObjectStore) -> Self {
        Self { source, store, id_map: HashMap::new() }
    }

    pub(crate) fn store_mut(&mut self) -> &mut ObjectStore {
        self.store
    }

    /// Imports a trailer entry, reifying an inline value as its own object so
    /// the result is always an id. `None` when the trailer lacks the entry.
    pub(crate) fn import_trailer_entry(&mut self, key: &[u8]) -> Result<Option<ObjId>, StoreError> {
        let source = self.source;
        let Ok(entry) = source.trailer.get(key) else {
            return Ok(None);
        };
        let id = match self.import(entry)? {
            Object::Reference(id) => id,
            inline => self.store.add_object(inline),
        };
        Ok(Some(id))
    }

    /// Recursively remaps one source value into the destination value model.
    ///
    /// Primitives copy over; source strings are retagged as literal to mark
    /// their provenance. Streams and indirect references come back as
    /// `Object::Reference` into the destination store, never inlined.
    fn import(&mut self, object: &'a SourceObject) -> Result<Object, StoreError> {
        let imported = match object {
            SourceObject::Null => Object::Null,
            SourceObject::Boolean(value) => Object::Boolean(*value),
            SourceObject::Integer(value) => Object::Integer(*value),
            SourceObject::Real(value) => Object::Real((*value).into()),
            SourceObject::String(content, _) => {
                Object::String(content.clone(), StringFormat::Literal)
            }
            SourceObject::Name(atom) => Object::Name(String::from_utf8_lossy(atom).into_owned()),
            SourceObject::Array(items) => Object::Array(
                items.iter().map(|item| self.import(item)).collect::<Result<_, _>>()?,
            ),
            SourceObject::Dictionary(dict) => Object::Dictionary(self.import_dictionary(dict)?),
            SourceObject::Stream(stream) => {
                // A stream is always reified as its own top-level object.
                let dict = self.import_dictionary(&stream.dict)?;
                let id = self.store.add_object(Object::Dictionary(dict));
                if let Some(reference) = self.store.get_mut(id) {
                    reference.set_stream(stream.content.clone());
                }
                Object::Reference(id)
            }
            SourceObject::Reference(sid) => self.import_reference(*sid)?,
        };
        Ok(imported)
    }

    fn import_dictionary(&mut self, dict: &'a lopdf::Dictionary) -> Result<Dictionary, StoreError> {
        let mut imported = Dictionary::new();
        for (key, value) in dict.iter() {
            imported.set(String::from_utf8_lossy(key).into_owned(), self.import(value)?);
        }
        Ok(imported)
    }

    /// Imports the object behind a source indirect reference.
    ///
    /// A null placeholder is registered and memoized under the source id
    /// before the source object is resolved, so any path through the subgraph
    /// that leads back to `sid` lands on the placeholder instead of recursing
    /// forever. Afterwards the placeholder's data is filled in. When the
    /// import produced its own object (the stream case) the memo is repointed
    /// at that object instead, and the placeholder stays behind as an
    /// unreferenced null.
    fn import_reference(&mut self, sid: lopdf::ObjectId) -> Result<Object, StoreError> {
        if let Some(&id) = self.id_map.get(&sid) {
            return Ok(Object::Reference(id));
        }

        let placeholder = self.store.add_object(Object::Null);
        self.id_map.insert(sid, placeholder);

        let source = self.source;
        match source.get_object(sid) {
            Ok(resolved) => match self.import(resolved)? {
                Object::Reference(id) => {
                    self.id_map.insert(sid, id);
                    Ok(Object::Reference(id))
                }
                data => {
                    if let Some(reference) = self.store.get_mut(placeholder) {
                        reference.data = data;
                    }
                    Ok(Object::Reference(placeholder))
                }
            },
            Err(_) => {
                log::warn!("template object {} {} is missing, importing as null", sid.0, sid.1);
                Ok(Object::Reference(placeholder))
            }
        }
    }
}
