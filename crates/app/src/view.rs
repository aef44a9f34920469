//! View tree: typed element descriptors built from the store.
//!
//! Front ends turn a [`Fragment`] into real DOM nodes or terminal text.
//! Text is always carried as [`Node::Text`], never as markup, so a plant
//! named `<b>Basil</b>` is shown literally.

use irrigo_domain::environment::Environment;
use irrigo_domain::id::{ChannelIndex, PlantId};
use irrigo_domain::network::ControllerStatus;
use irrigo_domain::plant::Plant;

/// Element types the plant list is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Div,
    Span,
    Button,
}

impl ElementKind {
    /// HTML tag name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Span => "span",
            Self::Button => "button",
        }
    }
}

/// A user gesture bound to a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run the pump on a channel.
    Water(ChannelIndex),
    /// Remove a plant by id.
    Delete(PlantId),
}

impl Action {
    pub const WATER: &'static str = "water";
    pub const DELETE: &'static str = "delete";

    /// Action name, used as the `data-action` attribute.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Water(_) => Self::WATER,
            Self::Delete(_) => Self::DELETE,
        }
    }

    /// Bound key, used as the `data-target` attribute.
    #[must_use]
    pub fn target(self) -> String {
        match self {
            Self::Water(channel) => channel.to_string(),
            Self::Delete(id) => id.to_string(),
        }
    }

    /// Rebuild an action from its `name`/`target` attribute pair.
    #[must_use]
    pub fn from_attributes(name: &str, target: &str) -> Option<Self> {
        match name {
            Self::WATER => target.parse().ok().map(Self::Water),
            Self::DELETE => target.parse().ok().map(Self::Delete),
            _ => None,
        }
    }
}

/// A node of the view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element(element) => element.text_content(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub classes: Vec<&'static str>,
    pub action: Option<Action>,
    pub children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            action: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn div() -> Self {
        Self::new(ElementKind::Div)
    }

    #[must_use]
    pub fn span() -> Self {
        Self::new(ElementKind::Span)
    }

    #[must_use]
    pub fn button(action: Action) -> Self {
        let mut button = Self::new(ElementKind::Button);
        button.action = Some(action);
        button
    }

    #[must_use]
    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    /// Space-separated `class` attribute value.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    #[must_use]
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Depth-first search for the first descendant element carrying `class`.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            Node::Element(element) if element.has_class(class) => Some(element),
            Node::Element(element) => element.find_by_class(class),
            Node::Text(_) => None,
        })
    }

    /// Every action bound within this subtree, in document order.
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.action.into_iter().collect();
        for child in &self.children {
            if let Node::Element(element) = child {
                actions.extend(element.actions());
            }
        }
        actions
    }
}

impl From<Node> for Fragment {
    fn from(node: Node) -> Self {
        Self(vec![node])
    }
}

/// An ordered list of sibling nodes, the unit mounted into a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(Vec<Node>);

impl Fragment {
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Node> for Fragment {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build one row per plant, in server order.
#[must_use]
pub fn plant_list(plants: &[Plant]) -> Fragment {
    plants.iter().map(plant_row).collect()
}

/// Build the row for a single plant.
#[must_use]
pub fn plant_row(plant: &Plant) -> Node {
    let status = plant.status();

    let mut name = Element::div().class("p-name").text(plant.name.clone());
    if let (Some(tag), Some(class)) = (status.tag(), status.css_class()) {
        name = name
            .text(" ")
            .child(Element::span().class("tag").class(class).text(tag));
    }

    let meta = Element::div().class("p-meta").text(format!(
        "CH:{} | {} | TH:{}%",
        plant.channel,
        plant.sensor_kind().label(),
        plant.threshold
    ));

    let actions = Element::div()
        .class("actions")
        .child(Element::button(Action::Water(plant.channel)).text("WATER"))
        .child(
            Element::button(Action::Delete(plant.id))
                .class("btn-del")
                .text("RM"),
        );

    Element::div()
        .class("plant-row")
        .child(
            Element::div()
                .class("p-info")
                .child(name)
                .child(meta)
                .child(actions),
        )
        .child(
            Element::div()
                .class("p-val")
                .text(format!("{}%", plant.moisture)),
        )
        .into()
}

/// Placeholder for a reading the controller could not provide.
pub const UNAVAILABLE: &str = "--";

/// Environment readings formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentReadout {
    pub vpd: String,
    pub temp: String,
    pub hum: String,
}

impl EnvironmentReadout {
    #[must_use]
    pub fn from_environment(env: &Environment) -> Self {
        fn fixed(value: Option<f64>, decimals: usize) -> String {
            value
                .filter(|v| v.is_finite())
                .map_or_else(|| UNAVAILABLE.to_string(), |v| format!("{v:.decimals$}"))
        }

        Self {
            vpd: fixed(env.vpd, 2),
            temp: fixed(env.temp, 1),
            hum: fixed(env.hum, 0),
        }
    }
}

/// One-line summary of the controller's network state and uptime.
#[must_use]
pub fn status_line(status: &ControllerStatus) -> String {
    let mode = if status.wifi_connected { "WiFi" } else { "AP" };
    let mut line = format!(
        "{mode}: {}",
        status.ssid.as_deref().unwrap_or(UNAVAILABLE)
    );
    if let Some(ip) = status.ip.as_deref() {
        line.push_str(&format!(" ({ip})"));
    }
    if let Some(uptime) = status.uptime {
        line.push_str(&format!(" | Up: {}", format_uptime(uptime)));
    }
    if status.dnd {
        line.push_str(" | DND");
    }
    line
}

fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours:02}h {minutes:02}m")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else {
        format!("{minutes}m")
    }
}
