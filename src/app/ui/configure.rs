use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::super::LoaderApp;
use super::{configured_marker, put_line};
use crate::loaders::{ConfigValue, bundles};
use crate::vim::VimMode;
use crate::wizard::ConfigureStepProps;

pub fn draw_configure_step(frame: &mut Frame, area: Rect, app: &LoaderApp, props: &ConfigureStepProps) {
    if area.height < 6 || area.width < 30 {
        return;
    }

    let mut y = area.y;
    put_line(
        frame,
        area,
        &mut y,
        format!("Bucket: {}   Org: {}   User: {}", props.bucket, props.org, props.username),
        app.theme.muted_style(),
    );

    let body = Rect::new(area.x, y + 1, area.width, area.height.saturating_sub(2));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(body);

    draw_plugin_list(frame, chunks[0], app, props);
    draw_plugin_fields(frame, chunks[1], app);
}

fn draw_plugin_list(frame: &mut Frame, area: Rect, app: &LoaderApp, props: &ConfigureStepProps) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Plugins ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let focused = app.focused_plugin().map(|p| p.name.as_str());
    for (idx, plugin) in props.data_loaders.telegraf_plugins.iter().enumerate() {
        if idx as u16 >= inner.height {
            break;
        }
        let line = format!(" {} {}", configured_marker(plugin.configured), plugin.name);
        let style = if Some(plugin.name.as_str()) == focused {
            app.theme.cursor_style()
        } else {
            app.theme.plugin_style(plugin.configured)
        };
        frame.render_widget(
            Paragraph::new(line).style(style),
            Rect::new(inner.x, inner.y + idx as u16, inner.width, 1),
        );
    }
}

fn draw_plugin_fields(frame: &mut Frame, area: Rect, app: &LoaderApp) {
    let Some(plugin) = app.focused_plugin() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(format!(" {} ", plugin.name));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    if plugin.config.is_empty() {
        put_line(frame, inner, &mut y, "No configuration required", app.theme.success_style());
        return;
    }

    for (idx, (field, value)) in plugin.config.iter().enumerate() {
        let editing = app
            .edit
            .as_ref()
            .filter(|e| e.plugin == plugin.name && &e.field == field)
            .is_some()
            && app.vim_mode == VimMode::Insert;

        let shown = if editing {
            edit_display(app)
        } else {
            display_value(field, value)
        };

        let style = if idx == app.field_cursor {
            app.theme.cursor_style()
        } else {
            app.theme.style()
        };
        put_line(frame, inner, &mut y, format!("{field:<10} {shown}"), style);
    }

    y += 1;
    put_line(
        frame,
        inner,
        &mut y,
        "i: edit/add  r: replace last  d: remove last  s: save",
        app.theme.muted_style(),
    );
}

fn display_value(field: &str, value: &ConfigValue) -> String {
    match value {
        ConfigValue::Text(s) if s.is_empty() => "(empty)".to_string(),
        ConfigValue::Text(s) if bundles::is_secret_field(field) => "*".repeat(s.chars().count()),
        ConfigValue::Text(s) => s.clone(),
        ConfigValue::List(items) if items.is_empty() => "[]".to_string(),
        ConfigValue::List(items) => format!("[{}]", items.join(", ")),
    }
}

/// Edit buffer with a bar at the cursor
fn edit_display(app: &LoaderApp) -> String {
    let text = app.edit_buffer.display();
    let cursor = app.edit_buffer.cursor();
    let before: String = text.chars().take(cursor).collect();
    let after: String = text.chars().skip(cursor).collect();
    format!("{before}|{after}")
}
