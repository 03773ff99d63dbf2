/// Tab groups keyed by stable identifiers
use crate::view::{Element, Node};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub label: String,
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One row of tab buttons and the panels they switch between.
/// Exactly one tab is active at any time.
#[derive(Debug, Clone)]
pub struct TabGroup {
    class: &'static str,
    tabs: Vec<Tab>,
    default: usize,
    active: usize,
}

impl TabGroup {
    /// The first tab is the default
    pub fn new(class: &'static str, tabs: Vec<Tab>) -> Self {
        Self {
            class,
            tabs,
            default: 0,
            active: 0,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// Make `id` the active tab; unknown ids leave the group unchanged
    pub fn activate(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }

    /// Activate `id` when known, otherwise the default tab
    pub fn select(mut self, id: Option<&str>) -> Self {
        let known = id.map(|id| self.activate(id)).unwrap_or(false);
        if !known {
            self.active = self.default;
        }
        self
    }

    pub fn active_id(&self) -> &str {
        self.tabs
            .get(self.active)
            .map(|t| t.id.as_str())
            .unwrap_or_default()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id() == id
    }

    pub fn content_class(&self) -> String {
        format!("{}-content", self.class)
    }

    pub fn panel_id(&self, id: &str) -> String {
        format!("{}-{}", self.content_class(), id)
    }

    /// Button row; `href` gives the link that activates each tab
    pub fn buttons<F>(&self, href: F) -> Node
    where
        F: Fn(&Tab) -> String,
    {
        let buttons = self.tabs.iter().enumerate().map(|(idx, tab)| {
            let class = if idx == self.active {
                format!("{} active", self.class)
            } else {
                self.class.to_string()
            };
            let mut button = Element::new("a")
                .class(class)
                .attr("href", href(tab))
                .text(tab.label.clone());
            if idx == self.default {
                button = button.id(format!("{}-default", self.class));
            }
            button
        });
        Element::new("div").class("tab-buttons").children(buttons).into()
    }

    /// Content panel for `id`, shown only when that tab is active
    pub fn panel<I, N>(&self, id: &str, children: I) -> Node
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        let display = if self.is_active(id) { "block" } else { "none" };
        Element::new("div")
            .class(self.content_class())
            .id(self.panel_id(id))
            .attr("style", format!("display: {}", display))
            .children(children)
            .into()
    }
}
