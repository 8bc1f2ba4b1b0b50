//! Capture settings view state
//!
//! The view is rendered from an application model into two slider groups
//! (inbound, outbound) of two sliders each (request, response). Submit is
//! enabled only while the form differs from the stored settings.

use studio_core::prelude::*;
use studio_core::{AppModel, CaptureConfig, CaptureDirection, Control, ControlSet, ControlSettings};

/// Translation prefix of the capture control titles
pub const CAPTURE_FIELDS_PATH: &str = "templates.apps.parts.capture.fields";

/// Translation key of the capture section title
pub const CAPTURE_TITLE_KEY: &str = "templates.apps.parts.capture.title";

pub const INBOUND_GROUP: &str = "inboundGroup";
pub const OUTBOUND_GROUP: &str = "outboundGroup";
pub const INBOUND_REQUEST: &str = "inboundRequest";
pub const INBOUND_RESPONSE: &str = "inboundResponse";
pub const OUTBOUND_REQUEST: &str = "outboundRequest";
pub const OUTBOUND_RESPONSE: &str = "outboundResponse";

/// State of the capture settings form
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureViewState {
    /// Rendered controls, holding the current (possibly edited) values
    pub controls: ControlSet,

    /// Capture settings the form was rendered from
    pub stored: CaptureConfig,

    /// Whether the submit button is disabled (form equals stored settings)
    pub submit_disabled: bool,
}

impl CaptureViewState {
    /// Render the form from an application's effective capture settings
    pub fn render(app: &AppModel) -> Result<Self> {
        let stored = app.capture();
        let controls = ControlSet::new(capture_controls(&stored))?
            .with_settings(&ControlSettings::new(CAPTURE_FIELDS_PATH));

        Ok(Self {
            controls,
            stored,
            submit_disabled: true,
        })
    }

    /// Capture settings currently shown in the form
    pub fn current(&self) -> CaptureConfig {
        let values = self.controls.form_values();
        CaptureConfig::new(
            CaptureDirection::new(
                values.get_bool(INBOUND_REQUEST),
                values.get_bool(INBOUND_RESPONSE),
            ),
            CaptureDirection::new(
                values.get_bool(OUTBOUND_REQUEST),
                values.get_bool(OUTBOUND_RESPONSE),
            ),
        )
    }

    /// Whether the form differs from the stored settings
    pub fn is_dirty(&self) -> bool {
        self.current() != self.stored
    }

    /// Recompute the submit state after a change
    pub fn refresh_submit(&mut self) {
        self.submit_disabled = !self.is_dirty();
    }
}

fn capture_controls(capture: &CaptureConfig) -> Vec<Control> {
    vec![
        Control::group(
            INBOUND_GROUP,
            vec![
                Control::slider(INBOUND_REQUEST, capture.inbound.request),
                Control::slider(INBOUND_RESPONSE, capture.inbound.response),
            ],
        ),
        Control::group(
            OUTBOUND_GROUP,
            vec![
                Control::slider(OUTBOUND_REQUEST, capture.outbound.request),
                Control::slider(OUTBOUND_RESPONSE, capture.outbound.response),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_flag_sets() -> impl Iterator<Item = [bool; 4]> {
        (0u8..16).map(|bits| {
            [
                bits & 0b1000 != 0,
                bits & 0b0100 != 0,
                bits & 0b0010 != 0,
                bits & 0b0001 != 0,
            ]
        })
    }

    #[test]
    fn test_render_structure() {
        let view = CaptureViewState::render(&AppModel::new("a1", "One")).unwrap();

        let groups: Vec<_> = view.controls.controls().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(groups, vec![INBOUND_GROUP, OUTBOUND_GROUP]);
        assert_eq!(view.controls.controls()[0].partial(), "form/GroupControl");

        let leaves: Vec<_> = view.controls.leaves().map(|c| c.name.as_str()).collect();
        assert_eq!(
            leaves,
            vec![INBOUND_REQUEST, INBOUND_RESPONSE, OUTBOUND_REQUEST, OUTBOUND_RESPONSE]
        );
        let slider = view.controls.find(OUTBOUND_RESPONSE).unwrap();
        assert_eq!(slider.partial(), "form/SliderControl");
        assert_eq!(
            slider.title.as_deref(),
            Some("templates.apps.parts.capture.fields.outboundResponse")
        );
        assert!(slider.hint.is_none());
        assert!(view.submit_disabled);
    }

    #[test]
    fn test_render_reflects_every_combination() {
        for flags in all_flag_sets() {
            let mut app = AppModel::new("a1", "One");
            app.content.capture = Some(CaptureConfig::from_flags(flags));

            let view = CaptureViewState::render(&app).unwrap();

            assert_eq!(view.current().flags(), flags, "flags {:?}", flags);
            assert!(!view.is_dirty());
        }
    }

    #[test]
    fn test_missing_capture_renders_all_off() {
        let view = CaptureViewState::render(&AppModel::new("a1", "One")).unwrap();
        assert_eq!(view.current().flags(), [false; 4]);
    }

    #[test]
    fn test_refresh_submit_tracks_dirty_state() {
        let mut view = CaptureViewState::render(&AppModel::new("a1", "One")).unwrap();

        view.controls.toggle(INBOUND_REQUEST).unwrap();
        view.refresh_submit();
        assert!(!view.submit_disabled);

        view.controls.toggle(INBOUND_REQUEST).unwrap();
        view.refresh_submit();
        assert!(view.submit_disabled);
    }
}
