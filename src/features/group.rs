use crate::features::placemark::{FeatureType, Placemark};

/// Node of a feature tree
#[derive(Debug)]
pub enum FeatureNode {
    Placemark(Placemark),
    Group(Group),
}

/// Container of placemarks and nested groups.
///
/// Children are owned, so the tree cannot contain cycles.
#[derive(Debug, Default)]
pub struct Group {
    pub feature_type: Option<FeatureType>,
    pub children: Vec<FeatureNode>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_type(feature_type: Option<FeatureType>) -> Self {
        Self {
            feature_type,
            children: Vec::new(),
        }
    }

    pub fn add_placemark(&mut self, placemark: Placemark) -> &mut Placemark {
        self.children.push(FeatureNode::Placemark(placemark));
        match self.children.last_mut() {
            Some(FeatureNode::Placemark(p)) => p,
            _ => unreachable!("a placemark was just pushed"),
        }
    }

    /// Creates an empty child group and returns it
    pub fn create_group(&mut self, feature_type: Option<FeatureType>) -> &mut Group {
        self.children
            .push(FeatureNode::Group(Group::for_type(feature_type)));
        match self.children.last_mut() {
            Some(FeatureNode::Group(g)) => g,
            _ => unreachable!("a group was just pushed"),
        }
    }

    /// Every placemark in the subtree, depth first
    pub fn placemarks(&self) -> Vec<&Placemark> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Placemark>) {
        for child in &self.children {
            match child {
                FeatureNode::Placemark(p) => out.push(p),
                FeatureNode::Group(g) => g.collect(out),
            }
        }
    }

    pub fn placemark_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                FeatureNode::Placemark(_) => 1,
                FeatureNode::Group(g) => g.placemark_count(),
            })
            .sum()
    }

    pub fn find_placemark(&self, id: &str) -> Option<&Placemark> {
        self.children.iter().find_map(|child| match child {
            FeatureNode::Placemark(p) if p.id == id => Some(p),
            FeatureNode::Placemark(_) => None,
            FeatureNode::Group(g) => g.find_placemark(id),
        })
    }

    pub fn find_placemark_mut(&mut self, id: &str) -> Option<&mut Placemark> {
        self.children.iter_mut().find_map(|child| match child {
            FeatureNode::Placemark(p) if p.id == id => Some(p),
            FeatureNode::Placemark(_) => None,
            FeatureNode::Group(g) => g.find_placemark_mut(id),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use crate::features::placemark::Geometry;

    fn point(id: &str) -> Placemark {
        Placemark::new(id, Geometry::Point(Point::new(0.0, 0.0)))
    }

    #[test]
    fn test_nested_groups() {
        let mut root = Group::new();
        root.add_placemark(point("a"));
        let lines = root.create_group(Some(FeatureType::Line));
        lines.add_placemark(point("b"));
        lines.create_group(None).add_placemark(point("c"));

        assert_eq!(root.placemark_count(), 3);
        let ids: Vec<_> = root.placemarks().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(root.find_placemark("c").is_some());
        assert!(root.find_placemark("z").is_none());
    }

    #[test]
    fn test_find_mut() {
        let mut root = Group::new();
        root.create_group(None).add_placemark(point("deep"));
        root.find_placemark_mut("deep").unwrap().invalid = true;
        assert!(root.find_placemark("deep").unwrap().invalid);
    }
}
