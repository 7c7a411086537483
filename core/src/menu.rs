use crate::dom::Element;

pub const OPEN_CLASS: &str = "open";

/// Header hamburger link that slides the left menu in and out.
#[derive(Clone, Debug)]
pub struct MenuToggle {
    menu: Element,
}

impl MenuToggle {
    pub fn new(menu: Element) -> Self { Self { menu } }

    pub fn on_click(&self) { self.menu.toggle_class(OPEN_CLASS); }

    pub fn is_open(&self) -> bool { self.menu.has_class(OPEN_CLASS) }
}
