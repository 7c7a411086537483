use crate::dom::{Body, Element, ESCAPE_KEY};

/// A dialog shown on top of the shared page overlay.
#[derive(Clone, Debug)]
pub struct Modal {
    overlay: Element,
    dialog: Element,
    body: Body,
}

impl Modal {
    pub fn new(overlay: Element, dialog: Element, body: Body) -> Self {
        Self { overlay, dialog, body }
    }

    pub fn dialog(&self) -> &Element { &self.dialog }
    pub fn is_open(&self) -> bool { self.dialog.is_visible() }

    pub fn open(&self) {
        self.overlay.show();
        self.dialog.show();
        self.body.lock_scroll();
    }

    pub fn close(&self) {
        self.overlay.hide();
        self.dialog.hide();
        self.body.unlock_scroll();
    }
}

/// All modals on a page. Overlay clicks, header close links and Escape close
/// whichever modals are open.
#[derive(Clone, Debug, Default)]
pub struct ModalSet {
    modals: Vec<Modal>,
}

impl ModalSet {
    pub fn new(modals: Vec<Modal>) -> Self { Self { modals } }

    pub fn push(&mut self, modal: Modal) { self.modals.push(modal); }

    pub fn any_open(&self) -> bool { self.modals.iter().any(Modal::is_open) }

    /// Returns how many modals were closed.
    pub fn close_open(&self) -> usize {
        let mut closed = 0;
        for modal in self.modals.iter().filter(|m| m.is_open()) {
            modal.close();
            closed += 1;
        }
        closed
    }

    pub fn on_overlay_click(&self) -> usize { self.close_open() }
    pub fn on_close_click(&self) -> usize { self.close_open() }

    pub fn on_keydown(&self, key: u32) -> usize {
        if key == ESCAPE_KEY && self.any_open() {
            return self.close_open();
        }
        0
    }
}
