//! Array operations.
//!
//! An empty array is a single head node with `len == 0` and `tail` pointing
//! at itself. Pushing links a new node after the tail. Arrays are mutated
//! in place, so values bound to variables are duplicated on assignment.

use smallvec::{smallvec, SmallVec};

use super::{ArrayNode, Obj, ObjType, Object};
use crate::workspace::Workspace;

/// Walks an array without borrowing the workspace between steps, so the
/// caller may evaluate code while iterating.
#[derive(Copy, Clone, Debug)]
pub struct ArrayCursor {
    next: Option<Obj>,
    remaining: u32,
}

impl ArrayCursor {
    pub fn new(wk: &Workspace, arr: Obj) -> Self {
        let head = wk.array_node(arr);
        ArrayCursor {
            next: (head.len > 0).then_some(arr),
            remaining: head.len,
        }
    }

    pub fn next(&mut self, wk: &Workspace) -> Option<Obj> {
        if self.remaining == 0 {
            return None;
        }
        let node = wk.array_node(self.next?);
        self.remaining -= 1;
        self.next = node.next;
        Some(node.val)
    }
}

impl Workspace {
    #[track_caller]
    pub(crate) fn array_node(&self, o: Obj) -> &ArrayNode {
        match self.obj(o) {
            Object::Array(a) => a,
            other => super::type_mismatch(o, ObjType::Array, other.obj_type()),
        }
    }

    #[track_caller]
    fn array_node_mut(&mut self, o: Obj) -> &mut ArrayNode {
        match self.obj_mut(o) {
            Object::Array(a) => a,
            other => super::type_mismatch(o, ObjType::Array, other.obj_type()),
        }
    }

    pub fn make_array(&mut self) -> Obj {
        let o = self.make_obj(Object::Array(ArrayNode {
            val: Obj::NULL,
            next: None,
            tail: Obj::NULL,
            len: 0,
        }));
        self.array_node_mut(o).tail = o;
        o
    }

    /// New array holding `vals` in order.
    pub fn make_array_from(&mut self, vals: &[Obj]) -> Obj {
        let arr = self.make_array();
        for &v in vals {
            self.array_push(arr, v);
        }
        arr
    }

    pub fn array_len(&self, arr: Obj) -> u32 {
        self.array_node(arr).len
    }

    pub fn array_push(&mut self, arr: Obj, val: Obj) {
        let head = *self.array_node(arr);
        if head.len == 0 {
            let node = self.array_node_mut(arr);
            node.val = val;
            node.len = 1;
            node.tail = arr;
            return;
        }

        let new = self.make_obj(Object::Array(ArrayNode {
            val,
            next: None,
            tail: Obj::NULL,
            len: 1,
        }));
        self.array_node_mut(new).tail = new;
        self.array_node_mut(head.tail).next = Some(new);

        let head = self.array_node_mut(arr);
        head.tail = new;
        head.len += 1;
    }

    /// Append every element of `other` to `arr`, sharing nothing with it.
    pub fn array_extend(&mut self, arr: Obj, other: Obj) {
        let dup = self.array_dup(other);
        self.array_extend_nodup(arr, dup);
    }

    /// Link `other`'s nodes onto the end of `arr`.
    ///
    /// `other` must not be used afterwards: its nodes now belong to `arr`.
    pub fn array_extend_nodup(&mut self, arr: Obj, other: Obj) {
        let rhs = *self.array_node(other);
        if rhs.len == 0 {
            return;
        }

        let lhs = *self.array_node(arr);
        if lhs.len == 0 {
            let tail = if rhs.tail == other { arr } else { rhs.tail };
            *self.array_node_mut(arr) = ArrayNode {
                val: rhs.val,
                next: rhs.next,
                tail,
                len: rhs.len,
            };
            return;
        }

        self.array_node_mut(lhs.tail).next = Some(other);
        let head = self.array_node_mut(arr);
        head.tail = rhs.tail;
        head.len += rhs.len;
    }

    /// Shallow copy: a new list whose elements are the same handles.
    pub fn array_dup(&mut self, arr: Obj) -> Obj {
        let dup = self.make_array();
        let mut cur = ArrayCursor::new(self, arr);
        while let Some(v) = cur.next(self) {
            self.array_push(dup, v);
        }
        dup
    }

    /// Element at `i`.
    ///
    /// # Panics
    /// If `i` is out of bounds.
    pub fn array_index(&self, arr: Obj, i: u32) -> Obj {
        let len = self.array_len(arr);
        assert!(i < len, "array index {i} out of bounds (len {len})");
        let mut cur = ArrayCursor::new(self, arr);
        let mut val = Obj::NULL;
        for _ in 0..=i {
            if let Some(v) = cur.next(self) {
                val = v;
            }
        }
        val
    }

    pub fn array_to_vec(&self, arr: Obj) -> Vec<Obj> {
        let mut out = Vec::with_capacity(self.array_len(arr) as usize);
        let mut cur = ArrayCursor::new(self, arr);
        while let Some(v) = cur.next(self) {
            out.push(v);
        }
        out
    }

    /// Elements with nested arrays flattened, depth first.
    pub fn array_flat(&self, arr: Obj) -> Vec<Obj> {
        let mut out = Vec::new();
        let mut stack: SmallVec<[ArrayCursor; 4]> = smallvec![ArrayCursor::new(self, arr)];
        while let Some(cur) = stack.last_mut() {
            match cur.next(self) {
                Some(v) if self.obj_type(v) == ObjType::Array => stack.push(ArrayCursor::new(self, v)),
                Some(v) => out.push(v),
                None => {
                    stack.pop();
                }
            }
        }
        out
    }

    /// Whether any element, searching nested arrays too, equals `val`.
    pub fn array_in(&self, arr: Obj, val: Obj) -> bool {
        let mut cur = ArrayCursor::new(self, arr);
        while let Some(v) = cur.next(self) {
            if self.obj_type(v) == ObjType::Array && self.obj_type(val) != ObjType::Array {
                if self.array_in(v, val) {
                    return true;
                }
            } else if self.obj_equal(v, val) {
                return true;
            }
        }
        false
    }

    pub fn array_index_of(&self, arr: Obj, val: Obj) -> Option<u32> {
        self.array_to_vec(arr)
            .into_iter()
            .position(|v| self.obj_equal(v, val))
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Whether `arr`, flattened, contains the disabler.
    pub fn array_contains_disabler(&self, arr: Obj) -> bool {
        self.array_flat(arr).contains(&Obj::DISABLER)
    }

    /// Remove the element at `i`, rebuilding the list in place.
    pub fn array_del(&mut self, arr: Obj, i: u32) {
        let mut vals = self.array_to_vec(arr);
        if (i as usize) < vals.len() {
            vals.remove(i as usize);
        }
        *self.array_node_mut(arr) = ArrayNode {
            val: Obj::NULL,
            next: None,
            tail: arr,
            len: 0,
        };
        for v in vals {
            self.array_push(arr, v);
        }
    }

    /// Join an array of strings with `sep` into a new string object.
    ///
    /// Returns `None` if an element is not a string.
    pub fn array_join(&mut self, arr: Obj, sep: &str) -> Option<Obj> {
        let mut joined = String::new();
        for (i, v) in self.array_flat(arr).into_iter().enumerate() {
            if self.obj_type(v) != ObjType::String {
                return None;
            }
            if i > 0 {
                joined.push_str(sep);
            }
            joined.push_str(self.str(v));
        }
        Some(self.make_str(&joined))
    }

    /// New array with the string elements of `arr` sorted.
    pub fn array_sort_strings(&mut self, arr: Obj) -> Obj {
        let mut vals = self.array_to_vec(arr);
        vals.sort_by(|a, b| self.obj_to_s(*a).cmp(&self.obj_to_s(*b)));
        self.make_array_from(&vals)
    }
}
