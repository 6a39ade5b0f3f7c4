//! Minimal host DOM node.
//!
//! The engine only needs a handful of things from the host document: nested
//! nodes, inline styles, CSS classes, page positions and event listeners.
//! `DomNode` is a cheap `Rc` handle, so clones refer to the same node.

use crate::core::geo::Point;
use crate::input::{EventHub, NativeEvent, NativeEventKind, Subscription};
use crate::prelude::HashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct NodeData {
    tag: String,
    classes: Vec<String>,
    style: HashMap<String, String>,
    children: Vec<DomNode>,
    parent: Weak<RefCell<NodeData>>,
    /// Offset of the node's top-left corner from its parent's
    offset: Point,
    listeners: EventHub<NativeEventKind, NativeEvent>,
}

#[derive(Clone)]
pub struct DomNode(Rc<RefCell<NodeData>>);

impl DomNode {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            tag: tag.to_string(),
            classes: Vec::new(),
            style: HashMap::default(),
            children: Vec::new(),
            parent: Weak::new(),
            offset: Point::default(),
            listeners: EventHub::new(),
        })))
    }

    /// Creates a node with inline styles and appends it to `parent`
    pub fn create(tag: &str, style: &[(&str, &str)], parent: &DomNode) -> Self {
        let node = Self::new(tag);
        for (name, value) in style {
            node.set_style(name, value);
        }
        parent.append_child(&node);
        node
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn ptr_eq(&self, other: &DomNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn add_class(&self, class: &str) {
        let mut data = self.0.borrow_mut();
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn set_style(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .style
            .insert(name.to_string(), value.to_string());
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.0.borrow().style.get(name).cloned()
    }

    /// Appends `child`, detaching it from any previous parent first
    pub fn append_child(&self, child: &DomNode) {
        child.remove();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    /// Detaches the node from its parent, if it has one
    pub fn remove(&self) {
        let parent = self.0.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    pub fn parent(&self) -> Option<DomNode> {
        self.0.borrow().parent.upgrade().map(DomNode)
    }

    pub fn children(&self) -> Vec<DomNode> {
        self.0.borrow().children.clone()
    }

    pub fn child(&self, index: usize) -> Option<DomNode> {
        self.0.borrow().children.get(index).cloned()
    }

    pub fn set_offset(&self, offset: Point) {
        self.0.borrow_mut().offset = offset;
    }

    /// Position of the node's top-left corner in page coordinates
    pub fn page_position(&self) -> Point {
        let mut position = self.0.borrow().offset;
        let mut parent = self.parent();
        while let Some(node) = parent {
            position = position.add(&node.0.borrow().offset);
            parent = node.parent();
        }
        position
    }

    pub fn on<F>(&self, kind: NativeEventKind, callback: F) -> Subscription
    where
        F: Fn(&NativeEvent) + 'static,
    {
        let listeners = self.0.borrow().listeners.clone();
        listeners.subscribe(kind, callback)
    }

    /// Delivers an event to this node and then to its ancestors.
    ///
    /// Returns the number of listeners called.
    pub fn dispatch(&self, event: &NativeEvent) -> usize {
        let mut called = 0;
        let mut current = Some(self.clone());
        while let Some(node) = current {
            let listeners = node.0.borrow().listeners.clone();
            called += listeners.emit(&event.kind, event);
            current = node.parent();
        }
        called
    }
}

impl std::fmt::Debug for DomNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("DomNode")
            .field("tag", &data.tag)
            .field("classes", &data.classes)
            .field("children", &data.children.len())
            .finish()
    }
}
