//! Social share links: popup windows for share services and the
//! "email this" modal for email links.

use crate::dom::Element;
use crate::modal::Modal;

pub const SHARE_WINDOW_NAME: &str = "SocialShareWindow";
pub const POPUP_WIDTH: i32 = 600;
pub const POPUP_HEIGHT: i32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupGeometry {
    pub width: i32,
    pub height: i32,
    pub left: i32,
    pub top: i32,
}

impl PopupGeometry {
    /// Popup centred on a screen of the given size. Offsets go negative on
    /// screens smaller than the popup.
    pub fn centered(screen_width: i32, screen_height: i32) -> Self {
        Self {
            width: POPUP_WIDTH,
            height: POPUP_HEIGHT,
            left: screen_width / 2 - POPUP_WIDTH / 2,
            top: screen_height / 2 - POPUP_HEIGHT / 2,
        }
    }

    /// Feature string for `window.open`.
    pub fn window_features(&self) -> String {
        format!(
            "height={}, width={}, left={}, top={}, menubar=no,location=no,resizable=yes,scrollbars=yes,status=no",
            self.height, self.width, self.left, self.top
        )
    }
}

/// Post card fields copied into the "email this" modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCard {
    pub thumbnail: String,
    pub category: String,
    pub title: String,
    pub date: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareLink {
    Email,
    Service { href: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAction {
    EmailModalOpened,
    Popup { url: String, name: &'static str, features: String },
}

/// Elements inside the "email this" modal.
#[derive(Clone, Debug)]
pub struct EmailThis {
    pub modal: Modal,
    pub thumbnail: Element,
    pub category: Element,
    pub title: Element,
    pub date: Element,
    pub author: Element,
}

impl EmailThis {
    pub fn fill(&self, card: &PostCard) {
        self.thumbnail.set_attr("src", card.thumbnail.as_str());
        self.category.set_text(card.category.as_str());
        self.title.set_text(card.title.as_str());
        self.date.set_text(card.date.as_str());
        self.author.set_text(card.author.as_str());
    }
}

pub struct ShareButtons {
    email: EmailThis,
    screen_width: i32,
    screen_height: i32,
}

impl ShareButtons {
    pub fn new(email: EmailThis, screen_width: i32, screen_height: i32) -> Self {
        Self { email, screen_width, screen_height }
    }

    /// Handle a click on a share link belonging to `card`. Default navigation
    /// is always suppressed; the returned action says what to do instead.
    pub fn on_click(&self, link: &ShareLink, card: &PostCard) -> ShareAction {
        match link {
            ShareLink::Email => {
                self.email.fill(card);
                self.email.modal.open();
                ShareAction::EmailModalOpened
            }
            ShareLink::Service { href } => {
                let geometry = PopupGeometry::centered(self.screen_width, self.screen_height);
                tracing::debug!(url = %href, left = geometry.left, top = geometry.top, "opening share popup");
                ShareAction::Popup { url: href.clone(), name: SHARE_WINDOW_NAME, features: geometry.window_features() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Body;

    fn email_this() -> EmailThis {
        EmailThis {
            modal: Modal::new(Element::new("overlay"), Element::new("email_this_modal"), Body::new()),
            thumbnail: Element::new("email_this_thumbnail"),
            category: Element::new("email_this_category"),
            title: Element::new("email_this_title"),
            date: Element::new("email_this_date"),
            author: Element::new("email_this_author"),
        }
    }

    #[test]
    fn centred_on_full_hd() {
        let g = PopupGeometry::centered(1920, 1080);
        assert_eq!((g.left, g.top), (660, 340));
        assert_eq!(
            g.window_features(),
            "height=400, width=600, left=660, top=340, menubar=no,location=no,resizable=yes,scrollbars=yes,status=no"
        );
    }

    #[test]
    fn small_screen_goes_negative() {
        let g = PopupGeometry::centered(320, 240);
        assert_eq!((g.left, g.top), (-140, -80));
    }

    #[test]
    fn service_link_opens_popup() {
        let buttons = ShareButtons::new(email_this(), 1280, 800);
        let action = buttons.on_click(&ShareLink::Service { href: "https://twitter.com/share?u=x".into() }, &PostCard::default());
        match action {
            ShareAction::Popup { url, name, features } => {
                assert_eq!(url, "https://twitter.com/share?u=x");
                assert_eq!(name, "SocialShareWindow");
                assert!(features.contains("left=340, top=200"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn email_link_fills_and_opens_modal() {
        let email = email_this();
        let buttons = ShareButtons::new(email.clone(), 1280, 800);
        let card = PostCard {
            thumbnail: "/img/a.jpg".into(),
            category: "News".into(),
            title: "Alpha Widget".into(),
            date: "June 1".into(),
            author: "Ann".into(),
        };
        assert_eq!(buttons.on_click(&ShareLink::Email, &card), ShareAction::EmailModalOpened);
        assert!(email.modal.is_open());
        assert_eq!(email.thumbnail.attr("src").as_deref(), Some("/img/a.jpg"));
        assert_eq!(email.title.text(), "Alpha Widget");
        assert_eq!(email.author.text(), "Ann");
    }
}
