use super::label::LabelContent;
use crate::domain::chart::{ElementSize, ScreenPosition};
use crate::domain::errors::OverlayResult;
use crate::domain::logging::{LogComponent, Logger, get_logger};

/// A rendered label element owned by the overlay
pub trait VisualHandle {
    /// Current rendered size, used for centring and the sell-side lift
    fn size(&self) -> ElementSize;

    fn set_position(&mut self, position: ScreenPosition);

    fn set_visible(&mut self, visible: bool);

    /// Detach the element from the page
    fn destroy(self);
}

/// Rendering backend that builds label elements
pub trait VisualFactory {
    type Handle: VisualHandle;

    fn create(&mut self, content: &LabelContent) -> OverlayResult<Self::Handle>;
}

/// Fire-and-forget channel for diagnostic echoes back to the host
pub trait DiagnosticSink {
    fn echo(&self, message: &str);
}

/// Default sink: echoes go to the structured logger
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggerSink;

impl DiagnosticSink for LoggerSink {
    fn echo(&self, message: &str) {
        get_logger().debug(LogComponent::Domain("HostEcho"), message);
    }
}
