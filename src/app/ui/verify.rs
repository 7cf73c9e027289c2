use ratatui::prelude::*;

use super::super::LoaderApp;
use super::{configured_marker, put_line};
use crate::wizard::VerifyStepProps;

pub fn draw_verify_step(frame: &mut Frame, area: Rect, app: &LoaderApp, props: &VerifyStepProps) {
    if area.height < 6 || area.width < 30 {
        return;
    }

    let bold = app.theme.heading_style();
    let mut y = area.y;

    put_line(frame, area, &mut y, "Destination", bold);
    put_line(frame, area, &mut y, format!("  Organization  {}", props.org), app.theme.style());
    put_line(frame, area, &mut y, format!("  Bucket        {}", props.bucket), app.theme.style());
    put_line(frame, area, &mut y, format!("  Bucket ID     {}", props.selected_bucket), app.theme.style());
    put_line(frame, area, &mut y, format!("  User          {}", props.username), app.theme.style());
    y += 1;

    put_line(frame, area, &mut y, "Plugins", bold);
    let loaders = props.data_loaders;
    if loaders.telegraf_plugins.is_empty() {
        put_line(frame, area, &mut y, "  No plugins selected", app.theme.muted_style());
    }
    for plugin in &loaders.telegraf_plugins {
        let style = if plugin.active {
            app.theme.cursor_style()
        } else {
            app.theme.plugin_style(plugin.configured)
        };
        put_line(
            frame,
            area,
            &mut y,
            format!("  {} {}", configured_marker(plugin.configured), plugin.name),
            style,
        );
    }
    y += 1;

    put_line(frame, area, &mut y, "Start Telegraf", bold);
    put_line(
        frame,
        area,
        &mut y,
        "  export INFLUX_TOKEN=<your token>",
        app.theme.secondary_style(),
    );
    put_line(
        frame,
        area,
        &mut y,
        format!("  telegraf --config {}/<config id>", props.step.links.telegrafs),
        app.theme.secondary_style(),
    );
    y += 1;

    let (status, style) = if loaders.all_configured() {
        ("Listening for data. Press Enter to finish.", app.theme.success_style())
    } else {
        ("Some plugins still need configuration (< to go back).", app.theme.error_style())
    };
    put_line(frame, area, &mut y, status, style);
    put_line(
        frame,
        area,
        &mut y,
        format!("Step {} of 3", props.step_index + 1),
        app.theme.muted_style(),
    );
}
