use super::js_error;
use crate::domain::{
    chart::{ElementSize, ScreenPosition},
    errors::{OverlayError, OverlayResult},
    logging::{LogComponent, Logger, get_logger},
    overlay::{LabelContent, LabelLayout, VisualFactory, VisualHandle},
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Class every label element carries; the page styles `.float.up` / `.float.down`
pub const LABEL_BASE_CLASS: &str = "float";

/// Builds label `div`s and appends them to the page body
pub struct DomLabelFactory {
    document: Document,
    container: HtmlElement,
}

impl DomLabelFactory {
    pub fn new(document: Document, container: HtmlElement) -> Self {
        Self { document, container }
    }

    pub fn for_body() -> OverlayResult<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| OverlayError::Dom("document not available".into()))?;
        let body = document.body().ok_or_else(|| OverlayError::Dom("document body not available".into()))?;
        Ok(Self::new(document, body))
    }

    fn element(&self, tag: &str) -> OverlayResult<Element> {
        self.document.create_element(tag).map_err(|e| js_error(tag, e))
    }

    fn icon(&self, content: &LabelContent) -> OverlayResult<Element> {
        let icon = self.element("span")?;
        icon.set_inner_html(&content.icon.svg());
        Ok(icon)
    }
}

impl VisualFactory for DomLabelFactory {
    type Handle = DomLabel;

    fn create(&mut self, content: &LabelContent) -> OverlayResult<DomLabel> {
        let element: HtmlElement = self
            .element("div")?
            .dyn_into()
            .map_err(|_| OverlayError::Dom("div is not an HtmlElement".into()))?;
        element
            .class_list()
            .add_2(LABEL_BASE_CLASS, content.style.css_class())
            .map_err(|e| js_error("classList", e))?;
        element.style().set_property("position", "absolute").map_err(|e| js_error("position", e))?;

        // text goes in as a text node, never as markup
        let text = self.document.create_text_node(&content.text);
        let icon = self.icon(content)?;
        let separator = self.element("br")?;
        let parts: [&web_sys::Node; 3] = match content.layout {
            LabelLayout::IconThenText => [&icon, &separator, &text],
            LabelLayout::TextThenIcon => [&text, &separator, &icon],
        };
        for part in parts {
            element.append_child(part).map_err(|e| js_error("appendChild", e))?;
        }

        self.container.append_child(&element).map_err(|e| js_error("append label", e))?;
        Ok(DomLabel { element })
    }
}

pub struct DomLabel {
    element: HtmlElement,
}

impl DomLabel {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl VisualHandle for DomLabel {
    fn size(&self) -> ElementSize {
        ElementSize::new(self.element.client_width() as f64, self.element.client_height() as f64)
    }

    fn set_position(&mut self, position: ScreenPosition) {
        let style = self.element.style();
        let applied = style
            .set_property("top", &format!("{}px", position.top))
            .and_then(|_| style.set_property("left", &format!("{}px", position.left)));
        if let Err(e) = applied {
            get_logger().warn(LogComponent::Infrastructure("DomLabels"), &format!("position not applied: {:?}", e));
        }
    }

    /// `visibility` rather than `display` so hidden labels keep their size.
    fn set_visible(&mut self, visible: bool) {
        let style = self.element.style();
        let result = if visible {
            style.remove_property("visibility").map(|_| ())
        } else {
            style.set_property("visibility", "hidden")
        };
        if let Err(e) = result {
            get_logger().warn(LogComponent::Infrastructure("DomLabels"), &format!("visibility not applied: {:?}", e));
        }
    }

    fn destroy(self) {
        self.element.remove();
    }
}
