use crate::domain::{
    chart::{ChartConfig, ChartSurface, PricePrecision},
    errors::{OverlayError, OverlayResult},
    logging::{LogComponent, Logger, get_logger},
    market_data::{Bar, Price, RawBar, RawMarker, SeriesMarker, Timestamp},
    overlay::{
        DiagnosticSink, Label, LabelContent, LabelDirection, LabelId, LoggerSink, VisualFactory,
        VisualHandle, place_label,
    },
};
use crate::{log_debug, log_trace, log_warn};
use std::collections::HashMap;

/// The single horizontal reference line
#[derive(Debug)]
struct PriceLine<L> {
    price: Price,
    handle: L,
}

/// Overlay layer: owns the live labels and the price line, and keeps labels
/// glued to their (price, time) anchors as the chart view changes.
pub struct ChartOverlay<S: ChartSurface, F: VisualFactory> {
    surface: S,
    factory: F,
    labels: HashMap<LabelId, Label<F::Handle>>,
    price_line: Option<PriceLine<S::PriceLine>>,
    precision: PricePrecision,
    sink: Box<dyn DiagnosticSink>,
}

impl<S: ChartSurface, F: VisualFactory> ChartOverlay<S, F> {
    /// Build the chart surface from `config` and an empty overlay on top of it.
    pub fn initialize_chart(config: &ChartConfig, factory: F) -> OverlayResult<Self> {
        let surface = S::create(config)?;
        get_logger().info(LogComponent::Application("Overlay"), "chart surface created");
        Ok(Self::with_surface(surface, factory, config.price_precision))
    }

    pub fn with_surface(surface: S, factory: F, precision: PricePrecision) -> Self {
        Self {
            surface,
            factory,
            labels: HashMap::new(),
            price_line: None,
            precision,
            sink: Box::new(LoggerSink),
        }
    }

    pub fn set_diagnostic_sink(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn precision(&self) -> PricePrecision {
        self.precision
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn has_label(&self, id: &LabelId) -> bool {
        self.labels.contains_key(id)
    }

    pub fn label(&self, id: &LabelId) -> Option<&Label<F::Handle>> {
        self.labels.get(id)
    }

    pub fn price_line(&self) -> Option<Price> {
        self.price_line.as_ref().map(|line| line.price)
    }

    /// Replace the whole bar series. No validation.
    pub fn set_initial_data(&mut self, bars: &[Bar]) -> OverlayResult<()> {
        self.surface.set_data(bars)?;
        log_debug!(LogComponent::Application("Overlay"), "series replaced with {} bars", bars.len());
        self.reposition_all();
        Ok(())
    }

    /// Merge one host bar (time in ms) and re-layout labels, since the time
    /// axis may have shifted.
    pub fn append_bar(&mut self, raw: RawBar) -> OverlayResult<Bar> {
        let bar = raw.into_bar();
        self.surface.update_bar(&bar)?;
        self.reposition_all();
        Ok(bar)
    }

    /// Change displayed price decimals. Stored values are untouched.
    pub fn set_precision(&mut self, precision: PricePrecision) -> OverlayResult<()> {
        self.surface.set_price_precision(precision)?;
        self.precision = precision;
        self.sink.echo(&format!("Precision change: {}", precision));
        Ok(())
    }

    /// Replace the chart's native markers wholesale. Overlay labels are not
    /// affected.
    pub fn set_markers(&mut self, raw: Vec<RawMarker>) -> OverlayResult<Vec<SeriesMarker>> {
        if let Ok(payload) = serde_json::to_string(&raw) {
            self.sink.echo(&payload);
        }
        let markers: Vec<SeriesMarker> = raw.into_iter().map(RawMarker::into_marker).collect();
        self.surface.set_markers(&markers)?;
        Ok(markers)
    }

    /// Always ends with exactly one price line, at `price`. The new line is
    /// created before the old one is dropped so a failure keeps the old line.
    pub fn update_price_line(&mut self, price: Price) -> OverlayResult<()> {
        let handle = self.surface.create_price_line(price)?;
        if let Some(previous) = self.price_line.replace(PriceLine { price, handle }) {
            self.surface.remove_price_line(previous.handle);
        }
        Ok(())
    }

    /// Create a label and place it against the current view. An id that is
    /// already live is replaced.
    pub fn add_label(
        &mut self,
        id: LabelId,
        price: Price,
        timestamp: Timestamp,
        text: &str,
        direction: LabelDirection,
    ) -> OverlayResult<()> {
        let content = LabelContent::for_direction(direction, text);
        let handle = self.factory.create(&content)?;
        let mut label = Label {
            id: id.clone(),
            price,
            time: timestamp.to_chart_seconds(),
            direction,
            text: content.text,
            handle,
        };
        place(&self.surface, &mut label);

        if let Some(previous) = self.labels.insert(id, label) {
            log_warn!(LogComponent::Application("Overlay"), "label {} replaced", previous.id);
            previous.handle.destroy();
        }
        Ok(())
    }

    pub fn remove_label(&mut self, id: &LabelId) -> OverlayResult<()> {
        let label = self.labels.remove(id).ok_or_else(|| OverlayError::LabelNotFound(id.clone()))?;
        label.handle.destroy();
        Ok(())
    }

    pub fn remove_all_labels(&mut self) {
        for (_, label) in self.labels.drain() {
            label.handle.destroy();
        }
    }

    /// Full linear re-layout; labels are expected to number in the tens.
    pub fn reposition_all(&mut self) {
        for label in self.labels.values_mut() {
            place(&self.surface, label);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width, height);
        self.reposition_all();
    }

    /// Remove labels, the price line and the chart itself.
    pub fn dispose(mut self) {
        self.remove_all_labels();
        if let Some(line) = self.price_line.take() {
            self.surface.remove_price_line(line.handle);
        }
        self.surface.destroy();
        get_logger().info(LogComponent::Application("Overlay"), "chart surface removed");
    }
}

/// Labels whose anchor has no coordinate in the current view are hidden
/// until it comes back.
fn place<S: ChartSurface, H: VisualHandle>(surface: &S, label: &mut Label<H>) {
    match place_label(surface, label.price, label.time, label.direction, label.handle.size()) {
        Ok(position) => {
            label.handle.set_position(position);
            label.handle.set_visible(true);
        }
        Err(err) => {
            log_trace!(LogComponent::Application("Overlay"), "hiding label {}: {}", label.id, err);
            label.handle.set_visible(false);
        }
    }
}
