use crate::host::element::{ControlKind, ElementId, Host, Scene};
use crate::host::error::HostError;
use crate::text::extract::TextExtractor;
use crate::zones::model::{BrowserLayout, ZoneItem};

// ============================================================================
// Zone refresh/move strategies
// ============================================================================
//
// Two structurally different host screens present the same two-zone UX, so
// refresh and move are swappable behind one trait while navigation and key
// handling stay identical.

pub trait ZoneSource {
    /// Rebuild both item lists from the live scene. Always a full rebuild,
    /// never a patch.
    fn refresh(&self, host: &dyn Host, extractor: &TextExtractor) -> (Vec<ZoneItem>, Vec<ZoneItem>);

    /// Perform the host-specific "move this item to the other zone" action.
    fn move_item(&self, host: &mut dyn Host, item: &ZoneItem) -> Result<(), HostError>;
}

pub fn source_for(layout: &BrowserLayout) -> Box<dyn ZoneSource> {
    match layout {
        BrowserLayout::DividerList { container, divider_id } => Box::new(DividerListSource {
            container: *container,
            divider_id: *divider_id,
        }),
        BrowserLayout::PairedLists { top, bottom } => Box::new(PairedListsSource {
            top: *top,
            bottom: *bottom,
        }),
    }
}

/// Cards label by their card-name extractor; everything else by the general
/// label extraction.
fn item_label(host: &dyn Host, extractor: &TextExtractor, el: ElementId) -> String {
    let scene: &dyn Scene = host;
    if scene.has_control(el, ControlKind::Card) || scene.field(el, "card_name").is_some() {
        extractor.card_name(scene, el)
    } else {
        extractor.get_text(scene, el)
    }
}

fn live_children(host: &dyn Host, container: ElementId) -> Vec<ElementId> {
    host.children(container)
        .into_iter()
        .filter(|el| host.alive(*el) && host.is_active(*el))
        .collect()
}

// ------------------------------------------------------------------
// Divider-based layout
// ------------------------------------------------------------------

struct DividerListSource {
    container: ElementId,
    divider_id: u64,
}

impl ZoneSource for DividerListSource {
    fn refresh(&self, host: &dyn Host, extractor: &TextExtractor) -> (Vec<ZoneItem>, Vec<ZoneItem>) {
        let mut top = Vec::new();
        let mut bottom = Vec::new();
        let mut past_divider = false;

        for el in live_children(host, self.container) {
            if el.0 == self.divider_id {
                past_divider = true;
                continue;
            }
            let item = ZoneItem { element: el, label: item_label(host, extractor, el) };
            if past_divider {
                bottom.push(item);
            } else {
                top.push(item);
            }
        }
        (top, bottom)
    }

    fn move_item(&self, host: &mut dyn Host, item: &ZoneItem) -> Result<(), HostError> {
        // The host moves the clicked entry across the divider itself.
        host.click(item.element)
    }
}

// ------------------------------------------------------------------
// Paired-lists layout
// ------------------------------------------------------------------

struct PairedListsSource {
    top: ElementId,
    bottom: ElementId,
}

impl ZoneSource for PairedListsSource {
    fn refresh(&self, host: &dyn Host, extractor: &TextExtractor) -> (Vec<ZoneItem>, Vec<ZoneItem>) {
        let collect = |container: ElementId| -> Vec<ZoneItem> {
            live_children(host, container)
                .into_iter()
                .map(|el| ZoneItem { element: el, label: item_label(host, extractor, el) })
                .collect()
        };
        (collect(self.top), collect(self.bottom))
    }

    fn move_item(&self, host: &mut dyn Host, item: &ZoneItem) -> Result<(), HostError> {
        // This layout has no click affordance for moving; simulate the drag
        // the host expects.
        host.drag_release(item.element)
    }
}
