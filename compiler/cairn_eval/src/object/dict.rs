//! Dict operations.
//!
//! Dicts keep insertion order. Keys are string objects compared by content;
//! setting an existing key overwrites its value where it sits.

use super::{DictNode, Obj, ObjType, Object};
use crate::workspace::Workspace;

/// Walks a dict without holding a borrow of the workspace.
#[derive(Copy, Clone, Debug)]
pub struct DictCursor {
    next: Option<Obj>,
    remaining: u32,
}

impl DictCursor {
    pub fn new(wk: &Workspace, dict: Obj) -> Self {
        let head = wk.dict_node(dict);
        DictCursor {
            next: (head.len > 0).then_some(dict),
            remaining: head.len,
        }
    }

    pub fn next(&mut self, wk: &Workspace) -> Option<(Obj, Obj)> {
        if self.remaining == 0 {
            return None;
        }
        let node = wk.dict_node(self.next?);
        self.remaining -= 1;
        self.next = node.next;
        Some((node.key, node.val))
    }
}

impl Workspace {
    #[track_caller]
    pub(crate) fn dict_node(&self, o: Obj) -> &DictNode {
        match self.obj(o) {
            Object::Dict(d) => d,
            other => super::type_mismatch(o, ObjType::Dict, other.obj_type()),
        }
    }

    #[track_caller]
    fn dict_node_mut(&mut self, o: Obj) -> &mut DictNode {
        match self.obj_mut(o) {
            Object::Dict(d) => d,
            other => super::type_mismatch(o, ObjType::Dict, other.obj_type()),
        }
    }

    pub fn make_dict(&mut self) -> Obj {
        let o = self.make_obj(Object::Dict(DictNode {
            key: Obj::NULL,
            val: Obj::NULL,
            next: None,
            tail: Obj::NULL,
            len: 0,
        }));
        self.dict_node_mut(o).tail = o;
        o
    }

    pub fn dict_len(&self, dict: Obj) -> u32 {
        self.dict_node(dict).len
    }

    fn dict_find_node(&self, dict: Obj, key: &str) -> Option<Obj> {
        let head = self.dict_node(dict);
        let mut cur = (head.len > 0).then_some(dict);
        for _ in 0..head.len {
            let id = cur?;
            let node = self.dict_node(id);
            if self.str(node.key) == key {
                return Some(id);
            }
            cur = node.next;
        }
        None
    }

    /// Value stored under `key`.
    pub fn dict_get(&self, dict: Obj, key: &str) -> Option<Obj> {
        self.dict_find_node(dict, key).map(|n| self.dict_node(n).val)
    }

    pub fn dict_contains(&self, dict: Obj, key: &str) -> bool {
        self.dict_find_node(dict, key).is_some()
    }

    /// Insert or overwrite. `key` must be a string object.
    pub fn dict_set(&mut self, dict: Obj, key: Obj, val: Obj) {
        let name = self.str(key).to_owned();
        if let Some(node) = self.dict_find_node(dict, &name) {
            self.dict_node_mut(node).val = val;
            return;
        }
        self.dict_push(dict, key, val);
    }

    /// Insert under a string key, allocating the key object.
    pub fn dict_set_str(&mut self, dict: Obj, key: &str, val: Obj) {
        if let Some(node) = self.dict_find_node(dict, key) {
            self.dict_node_mut(node).val = val;
            return;
        }
        let key = self.make_str(key);
        self.dict_push(dict, key, val);
    }

    /// Append without checking for an existing key.
    fn dict_push(&mut self, dict: Obj, key: Obj, val: Obj) {
        let head = *self.dict_node(dict);
        if head.len == 0 {
            let node = self.dict_node_mut(dict);
            node.key = key;
            node.val = val;
            node.len = 1;
            node.tail = dict;
            return;
        }

        let new = self.make_obj(Object::Dict(DictNode {
            key,
            val,
            next: None,
            tail: Obj::NULL,
            len: 1,
        }));
        self.dict_node_mut(new).tail = new;
        self.dict_node_mut(head.tail).next = Some(new);

        let head = self.dict_node_mut(dict);
        head.tail = new;
        head.len += 1;
    }

    pub fn dict_entries(&self, dict: Obj) -> Vec<(Obj, Obj)> {
        let mut out = Vec::with_capacity(self.dict_len(dict) as usize);
        let mut cur = DictCursor::new(self, dict);
        while let Some(kv) = cur.next(self) {
            out.push(kv);
        }
        out
    }

    /// Shallow copy.
    pub fn dict_dup(&mut self, dict: Obj) -> Obj {
        let dup = self.make_dict();
        for (k, v) in self.dict_entries(dict) {
            self.dict_push(dup, k, v);
        }
        dup
    }

    /// Copy every entry of `other` into `dict`, overwriting shared keys.
    pub fn dict_merge_nodup(&mut self, dict: Obj, other: Obj) {
        for (k, v) in self.dict_entries(other) {
            self.dict_set(dict, k, v);
        }
    }

    /// New dict holding `dict`'s entries updated with `other`'s.
    pub fn dict_merge(&mut self, dict: Obj, other: Obj) -> Obj {
        let merged = self.dict_dup(dict);
        self.dict_merge_nodup(merged, other);
        merged
    }

    /// Array of `dict`'s keys in insertion order.
    pub fn dict_keys(&mut self, dict: Obj) -> Obj {
        let keys: Vec<Obj> = self.dict_entries(dict).into_iter().map(|(k, _)| k).collect();
        self.make_array_from(&keys)
    }

    /// Remove `key`, rebuilding the list in place.
    pub fn dict_del(&mut self, dict: Obj, key: &str) {
        let entries = self.dict_entries(dict);
        *self.dict_node_mut(dict) = DictNode {
            key: Obj::NULL,
            val: Obj::NULL,
            next: None,
            tail: dict,
            len: 0,
        };
        for (k, v) in entries {
            if self.str(k) != key {
                self.dict_push(dict, k, v);
            }
        }
    }
}
