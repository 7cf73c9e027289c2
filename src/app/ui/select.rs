use ratatui::prelude::*;

use super::super::LoaderApp;
use super::put_line;
use crate::loaders::{BucketSelection, BundleName, WizardStore};
use crate::wizard::SelectStepProps;

pub fn draw_select_step(frame: &mut Frame, area: Rect, app: &LoaderApp, props: &SelectStepProps) {
    if area.height < 4 || area.width < 20 {
        return;
    }

    let mut y = area.y;
    put_line(
        frame,
        area,
        &mut y,
        format!("Loader type: {}", props.loader_type.display_name()),
        app.theme.muted_style(),
    );
    y += 1;

    put_line(frame, area, &mut y, "Bundles", app.theme.heading_style());
    for (idx, bundle) in BundleName::ALL.iter().enumerate() {
        let checked = if props.plugin_bundles.contains(bundle) { "[x]" } else { "[ ]" };
        let line = format!(
            "{checked} {:<12} {}",
            bundle.display_name(),
            bundle.plugins().join(", ")
        );
        let style = if idx == app.select_cursor {
            app.theme.cursor_style()
        } else {
            app.theme.style()
        };
        put_line(frame, area, &mut y, line, style);
    }
    y += 1;

    put_line(frame, area, &mut y, "Bucket", app.theme.heading_style());
    if props.buckets.is_empty() {
        put_line(frame, area, &mut y, "No buckets available", app.theme.muted_style());
    }

    let selection = app.wizard.store().state().data_loading.steps.selection.as_ref();
    for (idx, bucket) in props.buckets.iter().enumerate() {
        let chosen = selection == Some(&BucketSelection::from(bucket));
        let marker = if chosen { "(*)" } else { "( )" };
        let line = format!("{marker} {} / {}", bucket.organization, bucket.name);
        let style = if BundleName::ALL.len() + idx == app.select_cursor {
            app.theme.cursor_style()
        } else if chosen {
            app.theme.secondary_style()
        } else {
            app.theme.style()
        };
        put_line(frame, area, &mut y, line, style);
    }
}
