use crate::object_kind::{KindDescriptor, Links, ObjectKind};

/// Fixed UI glyphs the renderer needs besides per-kind icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiIcon {
    /// Clickable "+" of an expandable node.
    Expander,
    /// Inert glyph taking the expander's place.
    Spacer,
    /// Loading indicator, rendered hidden.
    Throbber,
    /// Icon of synthetic group containers.
    Group,
    /// Icon of the "New" action under an indexes container.
    NewIndex,
}

/// Localized fixed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiText {
    FilterPlaceholder,
    ClearFilter,
    NewIndex,
}

/// Icon, link and label lookup. Every value is treated as an opaque,
/// already escaped markup fragment.
pub trait Presentation {
    fn descriptor(&self, kind: ObjectKind) -> KindDescriptor;

    fn icon(&self, icon: UiIcon) -> String;

    fn text(&self, text: UiText) -> String;

    /// Links of the "New" action node placed under indexes containers.
    fn new_index_links(&self) -> Links;

    /// Base URL of the navigation endpoint, query string included.
    fn navigation_url(&self) -> String;

    /// Cache-busting/profiling flag appended to expander links.
    fn profiling_token(&self) -> String {
        "XDEBUG_PROFILE".to_string()
    }
}

/// English labels and the stock page layout of the admin application.
#[derive(Debug, Clone)]
pub struct DefaultPresentation {
    server: u32,
    token: String,
    image_path: String,
}

impl DefaultPresentation {
    pub fn new(server: u32, token: impl Into<String>) -> Self {
        Self {
            server,
            token: token.into(),
            image_path: "themes/original/img".to_string(),
        }
    }

    pub fn with_image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = image_path.into();
        self
    }

    fn image(&self, file: &str, alt: &str) -> String {
        format!(
            "<img src='{}/{}' title='{}' alt='{}' class='icon' />",
            self.image_path, file, alt, alt
        )
    }

    /// `page?server=N&amp;<query>&amp;token=T`
    fn url(&self, page: &str, query: &str) -> String {
        format!(
            "{}?server={}&amp;{}&amp;token={}",
            page, self.server, query, self.token
        )
    }
}

impl Default for DefaultPresentation {
    fn default() -> Self {
        Self::new(1, "")
    }
}

impl Presentation for DefaultPresentation {
    fn descriptor(&self, kind: ObjectKind) -> KindDescriptor {
        match kind {
            ObjectKind::Databases => KindDescriptor {
                label: "Databases".to_string(),
                container_icon: String::new(),
                container_links: Links::none(),
                item_icon: self.image("s_db.png", ""),
                item_links: Links {
                    text: Some(self.url("db_structure.php", "db={1}")),
                    icon: Some(self.url("db_operations.php", "db={1}")),
                },
            },
            ObjectKind::Tables => KindDescriptor {
                label: "Tables".to_string(),
                container_icon: self.image("b_browse.png", "Tables"),
                container_links: Links::both(self.url("db_structure.php", "db={1}")),
                item_icon: self.image("b_browse.png", ""),
                item_links: Links {
                    text: Some(self.url("sql.php", "db={1}&amp;table={2}&amp;pos=0")),
                    icon: Some(self.url("tbl_structure.php", "db={1}&amp;table={2}")),
                },
            },
            ObjectKind::Views => KindDescriptor {
                label: "Views".to_string(),
                container_icon: self.image("b_views.png", "Views"),
                container_links: Links::both(self.url("db_structure.php", "db={1}")),
                item_icon: self.image("b_views.png", ""),
                item_links: Links {
                    text: Some(self.url("sql.php", "db={1}&amp;table={2}&amp;pos=0")),
                    icon: Some(self.url("tbl_structure.php", "db={1}&amp;table={2}")),
                },
            },
            ObjectKind::Functions => KindDescriptor {
                label: "Functions".to_string(),
                container_icon: self.image("b_routines.png", "Functions"),
                container_links: Links::both(self.url("db_routines.php", "db={1}")),
                item_icon: self.image("b_routines.png", ""),
                item_links: Links {
                    text: Some(self.url(
                        "db_routines.php",
                        "db={1}&amp;item_name={2}&amp;item_type=FUNCTION&amp;edit_item=1",
                    )),
                    icon: Some(self.url(
                        "db_routines.php",
                        "db={1}&amp;item_name={2}&amp;item_type=FUNCTION&amp;export_item=1",
                    )),
                },
            },
            ObjectKind::Procedures => KindDescriptor {
                label: "Procedures".to_string(),
                container_icon: self.image("b_routines.png", "Procedures"),
                container_links: Links::both(self.url("db_routines.php", "db={1}")),
                item_icon: self.image("b_routines.png", ""),
                item_links: Links {
                    text: Some(self.url(
                        "db_routines.php",
                        "db={1}&amp;item_name={2}&amp;item_type=PROCEDURE&amp;edit_item=1",
                    )),
                    icon: Some(self.url(
                        "db_routines.php",
                        "db={1}&amp;item_name={2}&amp;item_type=PROCEDURE&amp;export_item=1",
                    )),
                },
            },
            ObjectKind::Triggers => KindDescriptor {
                label: "Triggers".to_string(),
                container_icon: self.image("b_triggers.png", "Triggers"),
                container_links: Links::both(self.url("db_triggers.php", "db={1}")),
                item_icon: self.image("b_triggers.png", ""),
                item_links: Links {
                    text: Some(self.url("db_triggers.php", "db={1}&amp;item_name={2}&amp;edit_item=1")),
                    icon: Some(self.url("db_triggers.php", "db={1}&amp;item_name={2}&amp;export_item=1")),
                },
            },
            ObjectKind::Events => KindDescriptor {
                label: "Events".to_string(),
                container_icon: self.image("b_events.png", "Events"),
                container_links: Links::both(self.url("db_events.php", "db={1}")),
                item_icon: self.image("b_events.png", ""),
                item_links: Links {
                    text: Some(self.url("db_events.php", "db={1}&amp;item_name={2}&amp;edit_item=1")),
                    icon: Some(self.url("db_events.php", "db={1}&amp;item_name={2}&amp;export_item=1")),
                },
            },
            ObjectKind::Columns => KindDescriptor {
                label: "Columns".to_string(),
                container_icon: self.image("s_vars.png", "Columns"),
                container_links: Links::both(self.url("tbl_structure.php", "db={1}&amp;table={2}")),
                item_icon: self.image("b_props.png", ""),
                item_links: Links::both(self.url(
                    "tbl_alter.php",
                    "db={1}&amp;table={2}&amp;field={3}&amp;change_column=1",
                )),
            },
            ObjectKind::Indexes => KindDescriptor {
                label: "Indexes".to_string(),
                container_icon: self.image("b_index.png", "Indexes"),
                container_links: Links::both(self.url("tbl_structure.php", "db={1}&amp;table={2}")),
                item_icon: self.image("b_index.png", ""),
                item_links: Links::both(self.url(
                    "tbl_indexes.php",
                    "db={1}&amp;table={2}&amp;index={3}",
                )),
            },
        }
    }

    fn icon(&self, icon: UiIcon) -> String {
        match icon {
            UiIcon::Expander => self.image("b_plus.png", "Expand/Collapse"),
            UiIcon::Spacer => self.image("null.png", ""),
            UiIcon::Throbber => self.image("ajax_clock_small.gif", "Loading"),
            UiIcon::Group => self.image("b_group.png", "Groups"),
            UiIcon::NewIndex => self.image("b_index_add.png", ""),
        }
    }

    fn text(&self, text: UiText) -> String {
        match text {
            UiText::FilterPlaceholder => "filter tables by name".to_string(),
            UiText::ClearFilter => "Clear Fast Filter".to_string(),
            UiText::NewIndex => "New".to_string(),
        }
    }

    fn new_index_links(&self) -> Links {
        Links::both(self.url(
            "tbl_indexes.php",
            "create_index=1&amp;added_fields=2&amp;db={1}&amp;table={2}",
        ))
    }

    fn navigation_url(&self) -> String {
        format!(
            "navigation.php?server={}&amp;token={}",
            self.server, self.token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_label() {
        let presentation = DefaultPresentation::new(1, "abc");
        for kind in ObjectKind::ALL {
            assert!(!presentation.descriptor(kind).label.is_empty());
        }
    }

    #[test]
    fn test_item_links_carry_server_and_token() {
        let presentation = DefaultPresentation::new(3, "tok");
        let links = presentation.descriptor(ObjectKind::Procedures).item_links;
        let text = links.text.unwrap();

        assert!(text.starts_with("db_routines.php?server=3&amp;"));
        assert!(text.ends_with("&amp;token=tok"));
        assert!(text.contains("db={1}&amp;item_name={2}"));
    }

    #[test]
    fn test_image_path_override() {
        let presentation = DefaultPresentation::default().with_image_path("img");
        assert!(presentation.icon(UiIcon::Group).contains("src='img/b_group.png'"));
    }
}
