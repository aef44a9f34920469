//! DOM side of the [`Dashboard`] port.
//!
//! The stat cards and status line are Leptos signals. The plant list is a
//! plain `#plant-list` element whose children are rebuilt from the view tree
//! with `web-sys` on every poll; row buttons carry `data-action` /
//! `data-target` attributes and are handled by one delegated click listener.

use irrigo_app::ports::{Dashboard, LinkStatus, ListContainer};
use irrigo_app::view::{Action, EnvironmentReadout, Fragment, Node as ViewNode};
use irrigo_domain::error::RenderError;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

/// `id` of the element the plant rows are mounted into.
pub const PLANT_LIST_ID: &str = "plant-list";
const ACTION_ATTR: &str = "data-action";
const TARGET_ATTR: &str = "data-target";

fn js_error(target: &'static str) -> impl Fn(JsValue) -> RenderError {
    move |err| RenderError {
        target,
        reason: format!("{err:?}"),
    }
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

/// Pushes poll results into the page.
#[derive(Clone, Copy)]
pub struct DomDashboard {
    readout: WriteSignal<EnvironmentReadout>,
    status: WriteSignal<String>,
    link: WriteSignal<LinkStatus>,
}

impl DomDashboard {
    pub fn new(
        readout: WriteSignal<EnvironmentReadout>,
        status: WriteSignal<String>,
        link: WriteSignal<LinkStatus>,
    ) -> Self {
        Self {
            readout,
            status,
            link,
        }
    }
}

impl Dashboard for DomDashboard {
    type List = DomList;

    fn show_environment(&self, readout: &EnvironmentReadout) {
        self.readout.set(readout.clone());
    }

    fn show_status(&self, line: &str) {
        self.status.set(line.to_string());
    }

    fn plant_list(&self) -> Option<Self::List> {
        let document = document()?;
        let container = document.get_element_by_id(PLANT_LIST_ID)?;
        Some(DomList {
            document,
            container,
        })
    }

    fn show_link(&self, status: LinkStatus) {
        self.link.set(status);
    }
}

/// The live `#plant-list` element.
pub struct DomList {
    document: Document,
    container: Element,
}

impl DomList {
    fn build(&self, node: &ViewNode) -> Result<web_sys::Node, JsValue> {
        match node {
            ViewNode::Text(text) => Ok(self.document.create_text_node(text).into()),
            ViewNode::Element(element) => {
                let el = self.document.create_element(element.kind.tag())?;
                if !element.classes.is_empty() {
                    el.set_class_name(&element.class_name());
                }
                if let Some(action) = element.action {
                    el.set_attribute("type", "button")?;
                    el.set_attribute(ACTION_ATTR, action.name())?;
                    el.set_attribute(TARGET_ATTR, &action.target())?;
                }
                for child in &element.children {
                    el.append_child(&self.build(child)?)?;
                }
                Ok(el.into())
            }
        }
    }
}

impl ListContainer for DomList {
    fn replace_children(&mut self, fragment: Fragment) -> Result<(), RenderError> {
        let on_error = js_error(PLANT_LIST_ID);
        // Build off-document first so a failure leaves the old rows in place.
        let staged = self.document.create_document_fragment();
        for node in fragment.nodes() {
            let built = self.build(node).map_err(&on_error)?;
            staged.append_child(&built).map_err(&on_error)?;
        }
        self.container.set_text_content(None);
        self.container.append_child(&staged).map_err(&on_error)?;
        Ok(())
    }
}

/// Find the row action for a click anywhere inside a row button.
fn action_for(event: &web_sys::Event) -> Option<Action> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest("[data-action]").ok()??;
    let name = button.get_attribute(ACTION_ATTR)?;
    let target = button.get_attribute(TARGET_ATTR)?;
    let action = Action::from_attributes(&name, &target);
    if action.is_none() {
        tracing::warn!(%name, %target, "unrecognized row action");
    }
    action
}

/// Install the document-wide click listener for row buttons.
///
/// Call once; the listener lives for the rest of the page.
///
/// # Errors
///
/// Returns [`RenderError`] when there is no document or the listener cannot
/// be attached.
pub fn install_click_delegate(on_action: impl Fn(Action) + 'static) -> Result<(), RenderError> {
    let document = document().ok_or_else(|| RenderError {
        target: "document",
        reason: "no window".to_string(),
    })?;

    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        if let Some(action) = action_for(&event) {
            on_action(action);
        }
    });
    document
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(js_error("document"))?;
    handler.forget();
    Ok(())
}
