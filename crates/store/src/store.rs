use std::collections::HashMap;
use std::path::Path;

use vellum_object::{Dictionary, ObjId, Object, Reference, dictionary};

use crate::error::StoreError;
use crate::import::GraphImporter;

/// The registry of indirect objects behind one PDF document.
///
/// Objects are numbered from 1 by a monotonically increasing counter.
/// Enumeration follows insertion order, which coincides with numeric order
/// only as long as ids are never supplied explicitly.
#[derive(Debug)]
pub struct ObjectStore {
    objects: HashMap<ObjId, Reference>,
    order: Vec<ObjId>,
    max_id: u32,
    info: ObjId,
    root: ObjId,
}

impl ObjectStore {
    /// Creates a store seeded with the required document roots: an empty info
    /// dictionary, a `Pages` tree and the `Catalog` pointing at it.
    pub fn new() -> Self {
        Self::with_info(Dictionary::new())
    }

    /// Creates a store whose info dictionary starts with the supplied entries.
    pub fn with_info(info: Dictionary) -> Self {
        let mut store = Self::empty();
        store.info = store.seed_info(info);
        store.root = store.seed_root();
        store
    }

    /// Rebuilds the object graph of an existing document inside a new store.
    ///
    /// The file is parsed by lopdf; the trailer's `Info` and `Root` graphs are
    /// then imported with identity-preserving reference remapping. Fresh roots
    /// are synthesized for whichever trailer entry is absent.
    pub fn from_template(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::TemplateNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        let document = lopdf::Document::load_mem(&bytes)?;
        Self::from_document(&document)
    }

    /// Imports an already-parsed document. One memo session spans both trailer
    /// graphs, so objects shared between `Info` and `Root` import exactly once.
    pub fn from_document(document: &lopdf::Document) -> Result<Self, StoreError> {
        let mut store = Self::empty();
        let mut importer = GraphImporter::new(document, &mut store);

        let info = match importer.import_trailer_entry(b"Info")? {
            Some(id) => id,
            None => importer.store_mut().seed_info(Dictionary::new()),
        };
        let root = match importer.import_trailer_entry(b"Root")? {
            Some(id) => id,
            None => importer.store_mut().seed_root(),
        };

        store.info = info;
        store.root = root;
        log::debug!("imported {} objects from template", store.len());
        Ok(store)
    }

    /// Registers `data` under the next sequential id and returns that id.
    pub fn add_object(&mut self, data: Object) -> ObjId {
        let id = ObjId::new(self.max_id + 1);
        self.push(Reference::new(id, data))
    }

    /// Registers a caller-built reference as-is and returns its id.
    ///
    /// Registering an id that is already present overwrites the stored object
    /// while keeping its original position in the enumeration order; outside
    /// the import back-fill path that is a usage error. The allocation
    /// counter always stays above the highest id ever stored.
    pub fn push(&mut self, reference: Reference) -> ObjId {
        let id = reference.id();
        self.max_id = self.max_id.max(id.get());
        if self.objects.insert(id, reference).is_none() {
            self.order.push(id);
        }
        id
    }

    /// Looks up an object by id. An unknown id is an expected miss, not an
    /// error.
    pub fn get(&self, id: ObjId) -> Option<&Reference> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjId) -> Option<&mut Reference> {
        self.objects.get_mut(&id)
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.order.iter().map(|id| &self.objects[id])
    }

    /// The document information dictionary.
    pub fn info(&self) -> &Reference {
        &self.objects[&self.info]
    }

    /// The document catalog.
    pub fn root(&self) -> &Reference {
        &self.objects[&self.root]
    }

    /// The catalog's page tree, when the catalog has one.
    pub fn pages(&self) -> Option<&Reference> {
        let pages = self.root().data.as_dict()?.get("Pages")?.as_reference()?;
        self.get(pages)
    }

    fn empty() -> Self {
        Self {
            objects: HashMap::new(),
            order: Vec::new(),
            max_id: 0,
            info: ObjId::new(0),
            root: ObjId::new(0),
        }
    }

    pub(crate) fn seed_info(&mut self, info: Dictionary) -> ObjId {
        self.add_object(Object::Dictionary(info))
    }

    pub(crate) fn seed_root(&mut self) -> ObjId {
        let pages = self.add_object(Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => 0,
            "Kids" => Vec::<Object>::new(),
        }));
        self.add_object(Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages,
        }))
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_required_roots_including_seeded_info() {
        let store = ObjectStore::with_info(dictionary! { "Test" => 3 });
        assert_eq!(store.len(), 3);
        assert_eq!(store.info().data.as_dict().unwrap().get("Test").unwrap().as_i64(), Some(3));

        let pages = store.pages().expect("catalog should point at a page tree");
        assert_eq!(pages.data.as_dict().unwrap().get("Count").unwrap().as_i64(), Some(0));
        assert_eq!(
            store.root().data.as_dict().unwrap().get("Pages"),
            Some(&Object::Reference(pages.id()))
        );
    }

    #[test]
    fn default_info_is_an_empty_dictionary() {
        let store = ObjectStore::new();
        assert_eq!(store.len(), 3);
        assert!(store.info().data.as_dict().unwrap().is_empty());
    }

    #[test]
    fn add_object_appends_and_numbers_sequentially() {
        let mut store = ObjectStore::new();
        let before = store.len();
        let id = store.add_object(Object::string_literal("blah"));
        assert_eq!(store.len(), before + 1);
        assert_eq!(id.get(), 4);
    }

    #[test]
    fn push_registers_a_prebuilt_reference() {
        let mut store = ObjectStore::new();
        let id = store.push(Reference::new(ObjId::new(123), Object::string_literal("blah")));
        assert_eq!(id, ObjId::new(123));
        assert_eq!(store.get(id).map(Reference::id), Some(id));
        assert_eq!(store.get(id).unwrap().data, Object::string_literal("blah"));
    }

    #[test]
    fn allocation_continues_above_explicitly_pushed_ids() {
        let mut store = ObjectStore::new();
        store.push(Reference::new(ObjId::new(123), Object::Null));
        assert_eq!(store.add_object(Object::Null).get(), 124);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut store = ObjectStore::new();
        for id in [10_u32, 11, 12] {
            store.push(Reference::new(ObjId::new(id), Object::Integer(id.into())));
        }
        let ids: Vec<u32> = store.iter().map(|reference| reference.id().get()).collect();
        assert_eq!(ids[ids.len() - 3..], [10, 11, 12]);
    }

    #[test]
    fn lookup_of_an_unknown_id_is_a_miss() {
        let store = ObjectStore::new();
        assert!(store.get(ObjId::new(999)).is_none());
    }

    #[test]
    fn missing_template_file_is_rejected() {
        let err = ObjectStore::from_template("no/such/template.pdf").unwrap_err();
        assert!(matches!(err, StoreError::TemplateNotFound(_)));
    }
}
