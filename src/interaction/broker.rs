use crate::{
    data::{
        district::{District, DistrictId},
        outcome::Outcome,
    },
    foundation::core::Point,
};

/// Tooltip content for one hovered district.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TooltipPayload {
    /// District key.
    pub id: DistrictId,
    /// Inside the mita.
    pub mita: bool,
    /// "Inside mita" or "Outside mita".
    pub treatment_label: &'static str,
    /// Absolute distance to the boundary in km.
    pub distance: Option<f64>,
    /// Outcome the value belongs to.
    pub outcome: Outcome,
    /// Active outcome in plotted units; `None` when the value is missing.
    pub value: Option<f64>,
    /// Display string; "n/a" when missing.
    pub formatted_value: String,
}

impl TooltipPayload {
    /// Tooltip for `d` under the active `outcome`.
    pub fn from_district(d: &District, outcome: Outcome) -> Self {
        let raw = d.outcomes.get(outcome);
        let value = outcome
            .accepts(raw)
            .then(|| raw.map(|v| v * outcome.display_factor()))
            .flatten();
        Self {
            id: d.id,
            mita: d.mita,
            treatment_label: treatment_label(d.mita),
            distance: d.distance.map(f64::abs),
            outcome,
            value,
            formatted_value: value
                .map_or_else(|| "n/a".to_owned(), |v| outcome.format_value(v)),
        }
    }
}

/// Treatment label for a district's side.
pub fn treatment_label(mita: bool) -> &'static str {
    if mita { "Inside mita" } else { "Outside mita" }
}

/// Hover event delivered to the tooltip collaborator. Both fields are `None` on leave.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct HoverEvent {
    /// Tooltip content; `None` on leave.
    pub payload: Option<TooltipPayload>,
    /// Pointer in surface coordinates; `None` on leave.
    pub pointer: Option<Point>,
}

impl HoverEvent {
    /// A leave event.
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}

/// Single-writer, single-reader hover channel.
///
/// The render pass writes; the overlay reads the latest event. Unread events are
/// superseded, never queued.
#[derive(Debug, Default)]
pub struct InteractionBroker {
    latest: HoverEvent,
    pending: bool,
}

impl InteractionBroker {
    /// Empty broker; the first read sees nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a hover on `d`.
    pub fn hover(&mut self, d: &District, outcome: Outcome, pointer: Point) -> &HoverEvent {
        self.publish(HoverEvent {
            payload: Some(TooltipPayload::from_district(d, outcome)),
            pointer: Some(pointer),
        })
    }

    /// Publish a leave.
    pub fn leave(&mut self) -> &HoverEvent {
        self.publish(HoverEvent::default())
    }

    /// Last published event, whether or not it was read.
    pub fn current(&self) -> &HoverEvent {
        &self.latest
    }

    /// Take the event if one arrived since the last read.
    pub fn poll(&mut self) -> Option<HoverEvent> {
        std::mem::take(&mut self.pending).then(|| self.latest.clone())
    }

    fn publish(&mut self, event: HoverEvent) -> &HoverEvent {
        if self.latest != event {
            tracing::trace!(id = ?event.payload.as_ref().map(|p| p.id), "hover");
        }
        self.latest = event;
        self.pending = true;
        &self.latest
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/broker.rs"]
mod tests;
