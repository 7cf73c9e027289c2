mod configure;
mod select;
mod verify;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::LoaderApp;
use crate::loaders::{CollectorsStep, ConfiguredState, NotificationKind, WizardStore};
use crate::ui::{Layout as ScreenLayout, center_rect};
use crate::vim::VimMode;
use crate::wizard::{StepView, WIZARD_TITLE};

/// Main draw function: host page, then the wizard overlay when visible
pub fn draw(frame: &mut Frame, app: &mut LoaderApp) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    let layout = ScreenLayout::new(area);

    draw_header(frame, layout.header, app);
    draw_host_page(frame, layout.content, app);

    if app.wizard.is_visible() {
        draw_wizard_overlay(frame, layout.content, app);
    }

    draw_message(frame, layout.message, app);
    draw_status_bar(frame, layout.status, app);

    if app.show_help {
        draw_help(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &LoaderApp) {
    let hostname = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "localhost".to_string());

    let title = format!(" {} (v{}) ", app.config.general.title, env!("CARGO_PKG_VERSION"));
    frame.render_widget(
        Paragraph::new(title).style(app.theme.heading_style()),
        area,
    );

    let user = &app.wizard.store().state().me.name;
    let right = Line::from(vec![
        Span::styled(user.as_str(), app.theme.secondary_style()),
        Span::styled("@", app.theme.muted_style()),
        Span::styled(hostname, app.theme.muted_style()),
        Span::raw(" "),
    ]);
    frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
}

fn draw_host_page(frame: &mut Frame, area: Rect, app: &LoaderApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Buckets ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.config.buckets.is_empty() {
        frame.render_widget(
            Paragraph::new("No buckets configured. Press o to open the wizard anyway.")
                .style(app.theme.muted_style()),
            Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), 1),
        );
        return;
    }

    for (idx, bucket) in app.config.buckets.iter().enumerate() {
        if idx as u16 >= inner.height {
            break;
        }
        let is_selected = idx == app.bucket_cursor && !app.wizard.is_visible();
        let line = format!(" {:<24} {:<16} {}", bucket.name, bucket.organization, bucket.id);
        let style = if is_selected {
            app.theme.cursor_style()
        } else {
            app.theme.style()
        };
        frame.render_widget(
            Paragraph::new(line).style(style),
            Rect::new(inner.x, inner.y + idx as u16, inner.width, 1),
        );
    }
}

fn draw_wizard_overlay(frame: &mut Frame, content: Rect, app: &mut LoaderApp) {
    let area = ScreenLayout::overlay(content);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.primary_style())
        .title(format!(" {WIZARD_TITLE} "))
        .title_style(app.theme.heading_style());
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    if inner.height < 4 {
        return;
    }

    draw_progress(frame, Rect::new(inner.x, inner.y, inner.width, 1), app);
    let body = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);

    let mut boundary = std::mem::take(&mut app.boundary);
    let app_ref: &LoaderApp = app;
    let result = boundary.guard(|| draw_step(frame, body, app_ref));
    app.boundary = boundary;

    if let Err(e) = result {
        draw_view_failed(frame, body, app, &e.to_string());
    }
}

/// Step breadcrumb: Select > Configure > Verify
fn draw_progress(frame: &mut Frame, area: Rect, app: &LoaderApp) {
    let current = app.wizard.current_step();
    let mut spans = vec![Span::raw(" ")];
    for step in [CollectorsStep::Select, CollectorsStep::Configure, CollectorsStep::Verify] {
        if step != CollectorsStep::Select {
            spans.push(Span::styled("  >  ", app.theme.muted_style()));
        }
        let style = if step.index() == current {
            app.theme.primary_style().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if step.index() < current {
            app.theme.secondary_style()
        } else {
            app.theme.muted_style()
        };
        spans.push(Span::styled(step.short_name(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_step(frame: &mut Frame, area: Rect, app: &LoaderApp) {
    match app.wizard.view() {
        StepView::Select(props) => select::draw_select_step(frame, area, app, &props),
        StepView::Configure(props) => configure::draw_configure_step(frame, area, app, &props),
        StepView::Verify(props) => verify::draw_verify_step(frame, area, app, &props),
        StepView::Empty => {}
    }
}

fn draw_view_failed(frame: &mut Frame, area: Rect, app: &LoaderApp, error: &str) {
    let text = vec![
        Line::from(Span::styled(
            "Something went wrong while drawing this step.",
            app.theme.error_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error, app.theme.style())),
        Line::from(""),
        Line::from(Span::styled("Press Esc to close the wizard.", app.theme.muted_style())),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}

/// Render one indented line at `*y` and advance it. Lines past the bottom are dropped.
pub(crate) fn put_line(frame: &mut Frame, area: Rect, y: &mut u16, text: impl Into<String>, style: Style) {
    if *y < area.y + area.height {
        frame.render_widget(
            Paragraph::new(text.into()).style(style),
            Rect::new(area.x + 2, *y, area.width.saturating_sub(4), 1),
        );
    }
    *y += 1;
}

/// Marker for a plugin's configuration state
pub(crate) fn configured_marker(state: ConfiguredState) -> &'static str {
    match state {
        ConfiguredState::Configured => "[x]",
        ConfiguredState::Unconfigured => "[ ]",
        ConfiguredState::InvalidConfig => "[!]",
    }
}

fn draw_message(frame: &mut Frame, area: Rect, app: &LoaderApp) {
    let (title, text, is_error) = if let Some(msg) = &app.message {
        let title = if msg.is_error { " Error " } else { " Info " };
        (title, msg.text.clone(), msg.is_error)
    } else if let Some(posted) = app.wizard.store().state().latest_notification() {
        let n = &posted.notification;
        let title = match n.kind {
            NotificationKind::Success => " Success ",
            NotificationKind::Info => " Info ",
            NotificationKind::Error => " Error ",
        };
        let text = format!("{}  {}", posted.at.format("%H:%M:%S"), n.message);
        (title, text, n.kind == NotificationKind::Error)
    } else {
        return;
    };

    let border_style = if is_error {
        app.theme.error_style()
    } else {
        app.theme.secondary_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(border_style.add_modifier(Modifier::BOLD));

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &LoaderApp) {
    frame.render_widget(Clear, area);

    let mode_name = app.vim_mode.display_name();
    let mode_span = Span::styled(format!(" {mode_name} "), app.theme.mode_style(app.vim_mode));

    let after_mode = if app.vim_mode == VimMode::Command {
        Span::styled(format!(":{}", app.command_buffer.content()), app.theme.style())
    } else {
        Span::styled(app.status_bar.left_hint.clone(), app.theme.muted_style())
    };

    frame.render_widget(
        Paragraph::new(Line::from(vec![mode_span, Span::raw(" "), after_mode])),
        Rect::new(area.x, area.y, area.width * 2 / 3, 1),
    );

    let right_text = if app.wizard.is_visible() {
        format!("step {}  {}", app.wizard.current_step(), app.status_bar.right_hint)
    } else {
        app.status_bar.right_hint.clone()
    };

    frame.render_widget(
        Paragraph::new(right_text)
            .style(app.theme.muted_style())
            .alignment(Alignment::Right),
        Rect::new(area.x + area.width / 3, area.y, area.width - area.width / 3, 1),
    );
}

fn draw_help(frame: &mut Frame, app: &LoaderApp) {
    let width = 60.min(frame.area().width.saturating_sub(4));
    let height = 22.min(frame.area().height.saturating_sub(4));
    let area = center_rect(frame.area(), width, height);

    let help_text = [
        "",
        "Buckets page:",
        "  j/k            Move between buckets",
        "  Enter          Load data into bucket",
        "  o              Open wizard (first bucket)",
        "",
        "Wizard:",
        "  > / <          Next / previous step",
        "  Space          Toggle plugin bundle",
        "  [ / ]          Previous / next plugin",
        "  i  r  d  s     Edit, replace, delete, save",
        "  Esc            Close wizard",
        "",
        "Commands: :open :next :back :step N :type T",
        "          :notify MSG :finish :dismiss :q",
        "",
        "Press q or Esc to close",
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Help ");

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    for (i, line) in help_text.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(*line).style(app.theme.style()),
            Rect::new(inner.x, inner.y + i as u16, inner.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::WizardConfig;
    use crate::loaders::{Action, BundleName};
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> LoaderApp {
        let config = WizardConfig::parse(
            r#"
[user]
name = "ada"

[[buckets]]
organization = "acme"
organization_id = "o1"
name = "metrics"
id = "b1"
"#,
        )
        .unwrap();
        LoaderApp::new(config).unwrap()
    }

    fn render(app: &mut LoaderApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn host_page_lists_buckets() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("metrics"));
        assert!(!screen.contains(WIZARD_TITLE));
    }

    #[test]
    fn overlay_shows_each_step() {
        let mut app = app();
        app.open_wizard(None);
        let screen = render(&mut app);
        assert!(screen.contains(WIZARD_TITLE));
        assert!(screen.contains("Kubernetes"));

        app.wizard.store_mut().dispatch(Action::AddPluginBundle(BundleName::Redis));
        app.wizard.set_current_step(1);
        let screen = render(&mut app);
        assert!(screen.contains("redis"));
        assert!(screen.contains("servers"));

        app.wizard.set_current_step(2);
        let screen = render(&mut app);
        assert!(screen.contains("Bucket ID     b1"));
        assert!(screen.contains("still need configuration"));
        assert!(app.boundary.failure().is_none());
    }

    #[test]
    fn out_of_range_step_draws_empty_body() {
        let mut app = app();
        app.open_wizard(None);
        app.wizard.set_current_step(9);
        let screen = render(&mut app);
        assert!(screen.contains(WIZARD_TITLE));
        assert!(!screen.contains("Bundles"));
        assert!(app.boundary.failure().is_none());
    }

    #[test]
    fn failed_step_view_shows_panel_until_dismissed() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let mut app = app();
        app.open_wizard(None);
        let tripped = app.boundary.guard(|| -> u8 { panic!("select view exploded") });
        assert!(tripped.is_err());

        let screen = render(&mut app);
        assert!(screen.contains("Something went wrong"));
        assert!(screen.contains("select view exploded"));
        assert!(!screen.contains("Bundles"));

        // Step keys are ignored while the view is failed
        app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('>'), KeyModifiers::NONE));
        let loaders = &app.wizard.store().state().data_loading.data_loaders;
        assert!(loaders.plugin_bundles.is_empty());
        assert_eq!(app.wizard.current_step(), 0);

        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!app.wizard.is_visible());
        assert!(app.boundary.failure().is_none());

        app.open_wizard(None);
        let screen = render(&mut app);
        assert!(screen.contains("Bundles"));
        assert!(!screen.contains("Something went wrong"));
    }
}
