use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Screen split shared by the host page and the wizard overlay
pub struct Layout {
    pub header: Rect,
    pub content: Rect,
    pub message: Rect,
    pub status: Rect,
}

impl Layout {
    pub fn new(area: Rect) -> Self {
        // Message panel space is always reserved so content does not jump
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Header
                Constraint::Min(10),    // Content
                Constraint::Length(3),  // Message panel
                Constraint::Length(1),  // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
            message: chunks[2],
            status: chunks[3],
        }
    }

    /// Area of a modal overlay inside `content`, leaving a small margin
    pub fn overlay(content: Rect) -> Rect {
        let width = content.width.saturating_sub(8).max(40).min(content.width);
        let height = content.height.saturating_sub(2).max(10).min(content.height);
        center_rect(content, width, height)
    }
}

pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = if area.width > width {
        area.x + (area.width - width) / 2
    } else {
        area.x
    };

    let y = if area.height > height {
        area.y + (area.height - height) / 2
    } else {
        area.y
    };

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(center_rect(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(center_rect(area, 50, 50), area);
    }

    #[test]
    fn overlay_stays_inside_content() {
        let content = Rect::new(0, 1, 100, 30);
        let overlay = Layout::overlay(content);
        assert_eq!(overlay.width, 92);
        assert_eq!(overlay.height, 28);
        assert!(overlay.x >= content.x && overlay.right() <= content.right());
        assert!(overlay.y >= content.y && overlay.bottom() <= content.bottom());
    }
}
