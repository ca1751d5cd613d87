//! In-memory backend. Projects through a [`Viewport`] and records what a
//! browser would have drawn, so the overlay can run without a page.

use crate::domain::{
    chart::{ChartConfig, ChartSurface, ElementSize, PricePrecision, ScreenPosition, Viewport},
    errors::{OverlayError, OverlayResult},
    market_data::{Bar, Price, SeriesMarker, UnixSeconds},
    overlay::{LabelContent, VisualFactory, VisualHandle},
};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

/// Price line handle issued by the headless surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessPriceLine(u32);

#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    viewport: Viewport,
    bars: Vec<Bar>,
    markers: Vec<SeriesMarker>,
    price_lines: Vec<(HeadlessPriceLine, Price)>,
    next_line: u32,
    precision: PricePrecision,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport, ..Default::default() }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Pan/zoom the view; callers re-layout labels afterwards.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn markers(&self) -> &[SeriesMarker] {
        &self.markers
    }

    pub fn price_lines(&self) -> Vec<Price> {
        self.price_lines.iter().map(|(_, price)| *price).collect()
    }

    pub fn precision(&self) -> PricePrecision {
        self.precision
    }

    /// Axis label as the browser formatter would render it
    pub fn format_price(&self, price: Price) -> String {
        self.precision.format(price.value())
    }
}

impl ChartSurface for HeadlessSurface {
    type PriceLine = HeadlessPriceLine;

    fn create(config: &ChartConfig) -> OverlayResult<Self> {
        let mut surface = Self::new(Viewport::default());
        surface.precision = config.price_precision;
        Ok(surface)
    }

    fn price_to_coordinate(&self, price: Price) -> Option<f64> {
        self.viewport.price_to_y(price.value())
    }

    fn time_to_coordinate(&self, time: UnixSeconds) -> Option<f64> {
        self.viewport.time_to_x(time.value())
    }

    fn set_data(&mut self, bars: &[Bar]) -> OverlayResult<()> {
        self.bars = bars.to_vec();
        Ok(())
    }

    /// Same rules as the browser library: equal time updates the last bar,
    /// later time appends, anything else is rejected.
    fn update_bar(&mut self, bar: &Bar) -> OverlayResult<()> {
        match self.bars.last().map(|last| bar.time.compare(&last.time)) {
            None | Some(Some(Ordering::Greater)) => self.bars.push(bar.clone()),
            Some(Some(Ordering::Equal)) => {
                let last = self.bars.len() - 1;
                self.bars[last] = bar.clone();
            }
            Some(Some(Ordering::Less)) => {
                return Err(OverlayError::Surface("cannot update a bar older than the latest".into()));
            }
            Some(None) => return Err(OverlayError::Surface("bar time format differs from the series".into())),
        }
        Ok(())
    }

    fn set_markers(&mut self, markers: &[SeriesMarker]) -> OverlayResult<()> {
        self.markers = markers.to_vec();
        Ok(())
    }

    fn set_price_precision(&mut self, precision: PricePrecision) -> OverlayResult<()> {
        self.precision = precision;
        Ok(())
    }

    fn create_price_line(&mut self, price: Price) -> OverlayResult<HeadlessPriceLine> {
        let line = HeadlessPriceLine(self.next_line);
        self.next_line += 1;
        self.price_lines.push((line, price));
        Ok(line)
    }

    fn remove_price_line(&mut self, line: HeadlessPriceLine) {
        self.price_lines.retain(|(id, _)| *id != line);
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width.max(0.0) as u32, height.max(0.0) as u32);
    }

    fn destroy(self) {}
}

/// What a headless label element currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessElement {
    pub content: LabelContent,
    pub size: ElementSize,
    pub position: Option<ScreenPosition>,
    pub visible: bool,
    pub attached: bool,
}

impl HeadlessElement {
    pub fn css_classes(&self) -> [&'static str; 2] {
        [crate::infrastructure::dom_labels::LABEL_BASE_CLASS, self.content.style.css_class()]
    }
}

/// Records every element it creates; clones share the same record.
#[derive(Debug, Clone)]
pub struct HeadlessLabelFactory {
    elements: Rc<RefCell<Vec<HeadlessElement>>>,
    element_size: ElementSize,
}

impl HeadlessLabelFactory {
    pub fn new(element_size: ElementSize) -> Self {
        Self { elements: Rc::new(RefCell::new(Vec::new())), element_size }
    }

    pub fn elements(&self) -> Vec<HeadlessElement> {
        self.elements.borrow().clone()
    }

    pub fn attached(&self) -> Vec<HeadlessElement> {
        self.elements.borrow().iter().filter(|e| e.attached).cloned().collect()
    }
}

impl Default for HeadlessLabelFactory {
    fn default() -> Self {
        Self::new(ElementSize::new(40.0, 20.0))
    }
}

impl VisualFactory for HeadlessLabelFactory {
    type Handle = HeadlessLabel;

    fn create(&mut self, content: &LabelContent) -> OverlayResult<HeadlessLabel> {
        let mut elements = self.elements.borrow_mut();
        elements.push(HeadlessElement {
            content: content.clone(),
            size: self.element_size,
            position: None,
            visible: true,
            attached: true,
        });
        Ok(HeadlessLabel { index: elements.len() - 1, elements: Rc::clone(&self.elements) })
    }
}

#[derive(Debug)]
pub struct HeadlessLabel {
    index: usize,
    elements: Rc<RefCell<Vec<HeadlessElement>>>,
}

impl HeadlessLabel {
    fn with<R>(&self, f: impl FnOnce(&mut HeadlessElement) -> R) -> R {
        f(&mut self.elements.borrow_mut()[self.index])
    }
}

impl VisualHandle for HeadlessLabel {
    fn size(&self) -> ElementSize {
        self.with(|e| e.size)
    }

    fn set_position(&mut self, position: ScreenPosition) {
        self.with(|e| e.position = Some(position));
    }

    fn set_visible(&mut self, visible: bool) {
        self.with(|e| e.visible = visible);
    }

    fn destroy(self) {
        self.with(|e| e.attached = false);
    }
}
