//! Responsive category navigation.
//!
//! The open/closed menu state is page-local. Since pages are rendered on the
//! server it rides along in the page URL as `menu=open`; every control in the
//! menu is a link to the page in its next state.

use percent_encoding::utf8_percent_encode;
use url::form_urlencoded;

use crate::api_client::SEGMENT;
use crate::models::Category;
use crate::views::escape;

pub const MENU_PARAM: &str = "menu";
const LOGO: &str = "/images/health-food-trivia-avocado-logo.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ToggleButton,
    FollowLink,
    DismissBackdrop,
}

impl MenuState {
    pub fn apply(self, action: MenuAction) -> MenuState {
        match (self, action) {
            (MenuState::Closed, MenuAction::ToggleButton) => MenuState::Open,
            (MenuState::Open, MenuAction::ToggleButton) => MenuState::Closed,
            (_, MenuAction::FollowLink) | (_, MenuAction::DismissBackdrop) => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    /// Reads the state from a page's query pairs. Anything other than
    /// `menu=open` is closed.
    pub fn from_query(pairs: &[(String, String)]) -> MenuState {
        let open = pairs.iter().any(|(k, v)| k == MENU_PARAM && v == "open");
        if open {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }
}

/// Link to a category's quiz listing.
pub fn category_href(prefix: &str, name: &str) -> String {
    format!("/{}/{}", prefix, utf8_percent_encode(name, SEGMENT))
}

pub struct Navigation<'a> {
    pub categories: &'a [Category],
    pub state: MenuState,
    pub path: &'a str,
    pub query: &'a [(String, String)],
    pub brand: &'a str,
    pub route_prefix: &'a str,
    pub breakpoint_px: u32,
}

impl Navigation<'_> {
    /// URL of the current page once `action` has been applied to the menu.
    pub fn href_after(&self, action: MenuAction) -> String {
        let next = self.state.apply(action);
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.query.iter().filter(|(k, _)| k != MENU_PARAM) {
            serializer.append_pair(k, v);
        }
        if next.is_open() {
            serializer.append_pair(MENU_PARAM, "open");
        }

        let query = serializer.finish();
        if query.is_empty() {
            self.path.to_string()
        } else {
            format!("{}?{}", self.path, query)
        }
    }

    pub fn render(&self) -> String {
        let mut html = String::new();
        html.push_str(&self.breakpoint_style());
        html.push_str("<header class=\"site-header\">");
        html.push_str(&format!(
            "<a href=\"/\" class=\"brand\"><h1><img src=\"{}\" alt=\"{} Logo\" width=\"110\" height=\"108\"><span>{}</span></h1></a>",
            LOGO,
            escape(self.brand),
            escape(self.brand)
        ));

        let (label, open_class) = if self.state.is_open() {
            ("Close menu", " is-open")
        } else {
            ("Open menu", "")
        };
        html.push_str(&format!(
            "<a class=\"nav-toggle{}\" href=\"{}\" aria-label=\"{}\" aria-expanded=\"{}\"><span></span><span></span><span></span></a>",
            open_class,
            escape(&self.href_after(MenuAction::ToggleButton)),
            label,
            self.state.is_open()
        ));

        html.push_str("<nav class=\"nav-inline\">");
        html.push_str(&self.links());
        html.push_str("</nav>");

        if self.state.is_open() {
            html.push_str(&format!(
                "<a class=\"nav-backdrop\" href=\"{}\" aria-label=\"Close menu\"></a>",
                escape(&self.href_after(MenuAction::DismissBackdrop))
            ));
            html.push_str("<div class=\"nav-overlay\"><nav>");
            html.push_str(&self.links());
            html.push_str("</nav></div>");
        }

        html.push_str("</header>");
        html
    }

    fn links(&self) -> String {
        self.categories
            .iter()
            .map(|c| {
                format!(
                    "<a class=\"nav-link\" href=\"{}\">{}</a>",
                    escape(&category_href(self.route_prefix, &c.name)),
                    escape(&c.name)
                )
            })
            .collect()
    }

    fn breakpoint_style(&self) -> String {
        let bp = self.breakpoint_px;
        format!(
            "<style>@media (min-width: {}px) {{ .nav-toggle, .nav-backdrop, .nav-overlay {{ display: none !important; }} }}\
             @media (max-width: {}px) {{ .nav-inline {{ display: none !important; }} }}</style>",
            bp,
            bp.saturating_sub(1)
        )
    }
}
