pub mod dom;
pub mod toolbar;

pub use dom::DomNode;
pub use toolbar::Toolbar;
