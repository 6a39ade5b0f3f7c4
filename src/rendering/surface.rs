use crate::core::config::{Renderer, RendererProfile};
use crate::features::group::Group;
use crate::ui::dom::DomNode;

/// Drawing surface holding the single top-level feature group.
///
/// The group transform itself lives in the engine's view state.
#[derive(Debug)]
pub struct Surface {
    raw_node: DomNode,
    width: f64,
    height: f64,
    renderer: RendererProfile,
    group: Group,
}

impl Surface {
    /// Creates a surface node inside `parent`
    pub fn create(parent: &DomNode, width: f64, height: f64, renderer: RendererProfile) -> Self {
        let tag = match renderer.renderer {
            Renderer::Svg => "svg",
            Renderer::Vml => "v:group",
            Renderer::Canvas => "canvas",
            Renderer::Silverlight => "object",
        };
        let css_width = format!("{}px", width);
        let css_height = format!("{}px", height);
        let raw_node = DomNode::create(
            tag,
            &[("width", css_width.as_str()), ("height", css_height.as_str())],
            parent,
        );
        raw_node.set_style("position", "absolute");

        Self {
            raw_node,
            width,
            height,
            renderer,
            group: Group::new(),
        }
    }

    pub fn raw_node(&self) -> &DomNode {
        &self.raw_node
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn renderer(&self) -> RendererProfile {
        self.renderer
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut Group {
        &mut self.group
    }

    /// Detaches the surface node from the page
    pub fn destroy(self) {
        self.raw_node.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BrowserEngine;

    #[test]
    fn test_surface_node() {
        let parent = DomNode::new("div");
        let surface = Surface::create(&parent, 800.0, 600.0, RendererProfile::default());

        assert_eq!(surface.raw_node().tag(), "svg");
        assert_eq!(surface.raw_node().style("position").as_deref(), Some("absolute"));
        assert_eq!(surface.raw_node().style("width").as_deref(), Some("800px"));
        assert_eq!(parent.children().len(), 1);

        surface.destroy();
        assert!(parent.children().is_empty());
    }

    #[test]
    fn test_vml_node() {
        let parent = DomNode::new("div");
        let profile = RendererProfile::new(Renderer::Vml, BrowserEngine::Trident);
        let surface = Surface::create(&parent, 10.0, 10.0, profile);
        assert_eq!(surface.raw_node().tag(), "v:group");
        assert!(surface.group().is_empty());
    }
}
