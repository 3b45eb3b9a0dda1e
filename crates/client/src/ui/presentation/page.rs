//! In-memory page model
//!
//! A page is a fixed set of regions. Each region always holds exactly one
//! child element; rendering swaps that child out, so stale content can never
//! pile up. Status templates are declared on the page up front and cloned
//! into the content region on demand.

use std::collections::HashMap;

use livequiz_protocol::ClientMessage;

use super::templates::default_templates;

pub const CONTENT_REGION: &str = "livequiz_content_div";
pub const BUZZ_REGION: &str = "livequiz_buzz_div";
pub const PLAYER_INFO_REGION: &str = "livequiz_player_div";

/// What an interactive element does when the user activates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Send this command as-is
    Send(ClientMessage),
    /// Ask the server for a new player name; needs the name as input
    ChangeName,
}

/// A node of the presentation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub class: Option<String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
    pub action: Option<UiAction>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            class: None,
            text: None,
            children: Vec::new(),
            action: None,
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::new("h2").with_text(text)
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new("p").with_text(text)
    }

    pub fn list_item(text: impl Into<String>) -> Self {
        Self::new("li").with_text(text)
    }

    pub fn button(label: impl Into<String>, action: UiAction) -> Self {
        Self::new("button").with_text(label).with_action(action)
    }

    /// An empty board cell.
    pub fn placeholder() -> Self {
        Self::div().with_class("empty")
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_action(mut self, action: UiAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn is_placeholder(&self) -> bool {
        self.class.as_deref() == Some("empty") && self.children.is_empty() && self.text.is_none()
    }

    /// Depth-first search by id, including this element.
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// All text in document order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(text) = &self.text {
            out.push(text);
        }
        for child in &self.children {
            child.collect_texts(out);
        }
    }

    /// All actions in document order.
    pub fn actions(&self) -> Vec<&UiAction> {
        let mut out = Vec::new();
        self.collect_actions(&mut out);
        out
    }

    fn collect_actions<'a>(&'a self, out: &mut Vec<&'a UiAction>) {
        if let Some(action) = &self.action {
            out.push(action);
        }
        for child in &self.children {
            child.collect_actions(out);
        }
    }
}

/// A named slot of the page holding exactly one child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: &'static str,
    child: Element,
}

impl Region {
    pub fn new(id: &'static str, initial: Element) -> Self {
        Self { id, child: initial }
    }

    pub fn child(&self) -> &Element {
        &self.child
    }

    pub fn child_mut(&mut self) -> &mut Element {
        &mut self.child
    }

    /// Swap in a new child, returning the previous one.
    pub fn replace(&mut self, element: Element) -> Element {
        tracing::trace!(region = self.id, tag = %element.tag, "Region replaced");
        std::mem::replace(&mut self.child, element)
    }
}

/// The rendered page of one client.
#[derive(Debug, Clone)]
pub struct Page {
    pub content: Region,
    pub buzz: Region,
    /// Only players have a player-info region
    pub player_info: Option<Region>,
    templates: HashMap<String, Element>,
}

impl Page {
    /// A page with the content and buzz regions and the standard templates.
    pub fn new() -> Self {
        Self {
            content: Region::new(
                CONTENT_REGION,
                Element::paragraph("Connecting to the quiz..."),
            ),
            buzz: Region::new(BUZZ_REGION, Element::div()),
            player_info: None,
            templates: default_templates(),
        }
    }

    pub fn with_player_info(mut self) -> Self {
        self.player_info = Some(Region::new(PLAYER_INFO_REGION, Element::div()));
        self
    }

    pub fn template(&self, key: &str) -> Option<&Element> {
        self.templates.get(key)
    }

    pub fn remove_template(&mut self, key: &str) -> Option<Element> {
        self.templates.remove(key)
    }

    /// Regions in display order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        [Some(&self.content), Some(&self.buzz), self.player_info.as_ref()]
            .into_iter()
            .flatten()
    }

    /// Every action on the page in display order.
    pub fn actions(&self) -> Vec<UiAction> {
        self.regions()
            .flat_map(|region| region.child().actions())
            .cloned()
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
