use crate::{
    constants::{TOOLBAR_CLASS, WIDGET_Z_INDEX},
    traits::DivHost,
    ui::dom::DomNode,
    Result,
};

/// Toolbar widget that can be mounted over the map surface
#[derive(Debug, Clone)]
pub struct Toolbar {
    dom_node: DomNode,
    append_to_map: bool,
}

impl Toolbar {
    pub fn new(append_to_map: bool) -> Self {
        Self {
            dom_node: DomNode::new("div"),
            append_to_map,
        }
    }

    pub fn dom_node(&self) -> &DomNode {
        &self.dom_node
    }

    pub fn append_to_map(&self) -> bool {
        self.append_to_map
    }

    /// Styles the toolbar node and mounts it on `map` when asked to
    pub fn post_create(&self, map: &dyn DivHost) -> Result<()> {
        self.dom_node.add_class(TOOLBAR_CLASS);
        self.dom_node
            .set_style("z-index", &WIDGET_Z_INDEX.to_string());
        if self.append_to_map {
            map.append_div(&self.dom_node)?;
        }
        Ok(())
    }
}
