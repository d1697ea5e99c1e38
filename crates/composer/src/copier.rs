//! Deep copying of object graphs between two `lopdf` documents.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page tree depth when resolving inherited attributes.
const MAX_TREE_DEPTH: usize = 64;

/// Copies objects from `source` into `target`, tracking the ids it assigns.
///
/// The id map is owned by the caller so that several copy passes from the
/// same source (one per placed page) share fonts, images and resources.
/// Pages the caller intends to place must be pre-registered in the map;
/// references to any other page, page tree node or catalog are dropped to
/// `null` so they don't drag unrelated pages into the target. The same goes
/// for annotations whose `/P` names an unplaced page, which a form field
/// would otherwise pull in through its `/Kids`.
pub(crate) struct ObjectCopier<'a> {
    source: &'a Document,
    target: &'a mut Document,
    id_map: &'a mut HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    pub(crate) fn new(
        source: &'a Document,
        target: &'a mut Document,
        id_map: &'a mut HashMap<ObjectId, ObjectId>,
    ) -> Self {
        Self { source, target, id_map }
    }

    /// Copies the page `page_id` into the target under `new_id`, parented to
    /// `parent_id`.
    ///
    /// Inherited attributes are resolved and written onto the copy. The
    /// source `/Parent` link is never followed.
    pub(crate) fn copy_page(
        &mut self,
        page_id: ObjectId,
        new_id: ObjectId,
        parent_id: ObjectId,
    ) -> Result<(), lopdf::Error> {
        let mut page = self.source.get_dictionary(page_id)?.clone();
        for key in INHERITABLE_ATTRIBUTES {
            if !page.has(key)
                && let Some(value) = self.inherited_attribute(&page, key)
            {
                page.set(key, value);
            }
        }
        page.remove(b"Parent");

        let mut page = self.remap_dictionary(page);
        page.set("Parent", Object::Reference(parent_id));
        self.target.objects.insert(new_id, Object::Dictionary(page));
        log::debug!("Copied page {:?} to {:?}", page_id, new_id);
        Ok(())
    }

    /// Walks up the page tree from `page` looking for `key`.
    fn inherited_attribute(&self, page: &Dictionary, key: &[u8]) -> Option<Object> {
        let mut parent_id = page.get(b"Parent").and_then(Object::as_reference).ok()?;
        for _ in 0..MAX_TREE_DEPTH {
            let node = self.source.get_dictionary(parent_id).ok()?;
            if let Ok(value) = node.get(key) {
                return Some(value.clone());
            }
            parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        }
        None
    }

    /// Deep copies the object `source_id`, returning its id in the target.
    ///
    /// Returns `None` when the reference must become `null`: the object is
    /// missing from the source, it is a page, page tree node or catalog that
    /// was not pre-registered, or it is an annotation of such a page.
    fn copy_object(&mut self, source_id: ObjectId) -> Option<ObjectId> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Some(*target_id);
        }

        let source = self.source;
        let obj = match source.get_object(source_id) {
            Ok(obj) => obj,
            Err(_) => {
                log::debug!("Dangling reference {:?} copied as null", source_id);
                return None;
            }
        };
        if is_document_structure(obj) {
            return None;
        }
        if self.annotates_unplaced_page(obj) {
            log::debug!("Annotation {:?} of an unplaced page copied as null", source_id);
            return None;
        }

        // Register the new id before recursing so cycles resolve to it.
        let new_id = self.target.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let new_obj = self.remap_references(obj.clone());
        self.target.objects.insert(new_id, new_obj);
        Some(new_id)
    }

    fn annotates_unplaced_page(&self, obj: &Object) -> bool {
        let Some(page_id) = obj
            .as_dict()
            .and_then(|dict| dict.get(b"P"))
            .and_then(Object::as_reference)
            .ok()
        else {
            return false;
        };
        !self.id_map.contains_key(&page_id)
            && self.source.get_object(page_id).is_ok_and(is_document_structure)
    }

    fn remap_references(&mut self, obj: Object) -> Object {
        match obj {
            Object::Reference(id) => match self.copy_object(id) {
                Some(new_id) => Object::Reference(new_id),
                None => Object::Null,
            },
            Object::Array(arr) => {
                Object::Array(arr.into_iter().map(|o| self.remap_references(o)).collect())
            }
            Object::Dictionary(dict) => Object::Dictionary(self.remap_dictionary(dict)),
            Object::Stream(mut stream) => {
                stream.dict = self.remap_dictionary(stream.dict);
                Object::Stream(stream)
            }
            _ => obj,
        }
    }

    fn remap_dictionary(&mut self, mut dict: Dictionary) -> Dictionary {
        for (_, value) in dict.iter_mut() {
            let original = std::mem::replace(value, Object::Null);
            *value = self.remap_references(original);
        }
        dict
    }
}

fn is_document_structure(obj: &Object) -> bool {
    let Ok(dict) = obj.as_dict() else {
        return false;
    };
    matches!(
        dict.get(b"Type").and_then(Object::as_name),
        Ok(b"Page" | b"Pages" | b"Catalog")
    )
}
