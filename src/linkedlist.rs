use std::{
    fmt::{self, Debug, Display},
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ptr,
};

/*
 * Links are raw pointers produced by Box::into_raw. A non-null link is
 * owned by exactly one node (or by the list head), and is freed with
 * Box::from_raw once unlinked. No Box is held while a node is linked,
 * the list's tail pointer aliases the last node.
 */
type Link<T> = *mut Node<T>;

/*
 * A single element of the list : a value and the owned remainder of the chain.
 */
pub struct Node<T> {
    pub value: T,
    next: Link<T>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Node {
            value,
            next: ptr::null_mut(),
        }
    }

    /*
     * Build a node owning an already linked chain, e.g.
     * Node::with_next(1, Node::with_next(2, Node::new(3)))
     */
    pub fn with_next(value: T, next: Node<T>) -> Self {
        Node {
            value,
            next: Box::into_raw(Box::new(next)),
        }
    }

    pub fn next(&self) -> Option<&Node<T>> {
        // SAFETY: a non-null link points to a live node owned by self.
        unsafe { self.next.as_ref() }
    }

    pub fn into_value(self) -> T {
        let mut node = ManuallyDrop::new(self);
        node.drop_successors();
        // SAFETY: node is never dropped, so value is moved out exactly once.
        unsafe { ptr::read(&node.value) }
    }

    // Free the chain node by node, dropping it recursively could overflow the stack
    fn drop_successors(&mut self) {
        let mut curr = mem::replace(&mut self.next, ptr::null_mut());
        while !curr.is_null() {
            // SAFETY: curr was owned by the node we just unlinked it from.
            let mut node = unsafe { Box::from_raw(curr) };
            curr = mem::replace(&mut node.next, ptr::null_mut());
        }
    }
}

impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        self.drop_successors();
    }
}

impl<T: Debug> Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("next", &self.next().map(|next| &next.value))
            .finish()
    }
}

/*
 * Singly linked list keeping track of its tail and length,
 * so that append, tail and size are O(1).
 */
pub struct LinkedList<T> {
    head: Link<T>,
    // Non-owning, null iff the list is empty
    tail: Link<T>,
    length: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        LinkedList {
            head: ptr::null_mut(),
            tail: ptr::null_mut(),
            length: 0,
            _owns: PhantomData,
        }
    }

    /*
     * Adopt a chain built by hand. The chain is walked once to
     * recover the tail and the length.
     */
    pub fn from_chain(head: Node<T>) -> Self {
        let head = Box::into_raw(Box::new(head));
        let mut tail = head;
        let mut length = 1;
        // SAFETY: every link of the chain is either null or an owned node.
        unsafe {
            while !(*tail).next.is_null() {
                tail = (*tail).next;
                length += 1;
            }
        }

        LinkedList {
            head,
            tail,
            length,
            _owns: PhantomData,
        }
    }

    pub fn head(&self) -> Option<&Node<T>> {
        // SAFETY: head is null or the first node, owned by self.
        unsafe { self.head.as_ref() }
    }

    pub fn tail(&self) -> Option<&Node<T>> {
        // SAFETY: tail is null iff the list is empty, otherwise it is the
        // last node reachable from head, which self owns.
        unsafe { self.tail.as_ref() }
    }

    pub fn size(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn append(&mut self, value: T) -> &Node<T> {
        let node = Box::into_raw(Box::new(Node::new(value)));

        if self.tail.is_null() {
            self.head = node;
        } else {
            // SAFETY: a non-null tail is the last node of the chain, its link is null.
            unsafe {
                (*self.tail).next = node;
            }
        }

        self.tail = node;
        self.length += 1;
        // SAFETY: node is now the last node of the chain, owned by self.
        unsafe { &*node }
    }

    pub fn prepend(&mut self, value: T) -> &Node<T> {
        let node = Box::into_raw(Box::new(Node {
            value,
            next: self.head,
        }));

        if self.tail.is_null() {
            self.tail = node;
        }

        self.head = node;
        self.length += 1;
        // SAFETY: node is now the head of the chain, owned by self.
        unsafe { &*node }
    }

    /*
     * Pointer to the node at <index>, which must be below length.
     */
    fn node_ptr(&self, index: usize) -> Link<T> {
        let mut curr = self.head;
        for _ in 0..index {
            // SAFETY: index < length, so the first <index> links are non-null.
            curr = unsafe { (*curr).next };
        }
        curr
    }

    pub fn at(&self, index: usize) -> Option<&Node<T>> {
        if index >= self.length {
            return None;
        }
        // SAFETY: node_ptr returns a live node for any index below length.
        unsafe { self.node_ptr(index).as_ref() }
    }

    /*
     * Remove the last node. The list is singly linked, so finding
     * the new tail takes a walk from the head.
     */
    pub fn pop(&mut self) -> Option<Node<T>> {
        let last = self.length.checked_sub(1)?;
        self.remove_at(last)
    }

    /*
     * Insert value so that it ends up at position <index>.
     * Valid positions are 0..=size, anything else leaves the list untouched.
     */
    pub fn insert_at(&mut self, value: T, index: usize) -> Option<&Node<T>> {
        if index > self.length {
            return None;
        }
        if index == 0 {
            return Some(self.prepend(value));
        }
        if index == self.length {
            return Some(self.append(value));
        }

        // Splice between <index - 1> and its successor, the tail never moves here
        let before = self.node_ptr(index - 1);
        // SAFETY: 0 < index < length, so before and its successor are live nodes.
        let node = unsafe {
            let node = Box::into_raw(Box::new(Node {
                value,
                next: (*before).next,
            }));
            (*before).next = node;
            node
        };
        self.length += 1;
        // SAFETY: node was just linked into the chain owned by self.
        Some(unsafe { &*node })
    }

    /*
     * Remove the node at position <index>, valid positions are 0..size.
     * The returned node is detached from the chain.
     */
    pub fn remove_at(&mut self, index: usize) -> Option<Node<T>> {
        if index >= self.length {
            return None;
        }

        let before = if index == 0 {
            ptr::null_mut()
        } else {
            self.node_ptr(index - 1)
        };

        // SAFETY: index < length, so the removed node is live, and so is
        // before when it is non-null.
        let removed = unsafe {
            let removed = if before.is_null() {
                self.head
            } else {
                (*before).next
            };
            let next = mem::replace(&mut (*removed).next, ptr::null_mut());
            if before.is_null() {
                self.head = next;
            } else {
                (*before).next = next;
            }
            removed
        };

        if removed == self.tail {
            self.tail = before;
        }
        self.length -= 1;
        // SAFETY: removed came from Box::into_raw and nothing links to it anymore.
        Some(*unsafe { Box::from_raw(removed) })
    }
}

impl<T: PartialEq> LinkedList<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /*
     * Index of the first node holding <value>
     */
    pub fn find(&self, value: &T) -> Option<usize> {
        let mut curr = self.head();
        let mut index = 0;
        while let Some(node) = curr {
            if node.value == *value {
                return Some(index);
            }
            index += 1;
            curr = node.next();
        }
        None
    }
}

/*
 * ( v1 ) ->  ( v2 ) -> null
 */
impl<T: Display> Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut curr = self.head();
        while let Some(node) = curr {
            write!(f, " ( {} ) -> ", node.value)?;
            curr = node.next();
        }
        write!(f, "null")
    }
}

impl<T: Debug> Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = f.debug_list();
        let mut curr = self.head();
        while let Some(node) = curr {
            entries.entry(&node.value);
            curr = node.next();
        }
        entries.finish()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        if !self.head.is_null() {
            // SAFETY: head is owned by self, dropping it frees the rest of the chain.
            drop(unsafe { Box::from_raw(self.head) });
        }
    }
}
