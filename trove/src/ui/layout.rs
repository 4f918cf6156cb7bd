//! Layout calculations for the treasure-hunt TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout for the game screen.
pub struct AppLayout {
    pub title_area: Rect,
    pub log_area: Rect,
    pub map_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Split the frame: title, a 55/45 log/map split, status, hotkeys.
    pub fn calculate(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(vertical[1]);

        Self {
            title_area: vertical[0],
            log_area: main[0],
            map_area: main[1],
            status_bar: vertical[2],
            hotkey_bar: vertical[3],
        }
    }
}

/// Layout for the login screen: a centered entry box above a short log.
pub struct LoginLayout {
    pub entry_area: Rect,
    pub log_area: Rect,
}

impl LoginLayout {
    pub fn calculate(area: Rect) -> Self {
        let boxed = centered_rect_fixed(46, 10, area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(3)])
            .split(boxed);

        Self {
            entry_area: parts[0],
            log_area: parts[1],
        }
    }
}

/// A fixed-size rectangle centered in the given area, clamped to fit.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect_fixed(100, 100, area);
        assert_eq!((rect.width, rect.height), (20, 5));
    }

    #[test]
    fn test_app_layout_covers_the_frame() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = AppLayout::calculate(area);
        assert_eq!(layout.title_area.height, 1);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.hotkey_bar.height, 1);
        assert_eq!(
            layout.log_area.width + layout.map_area.width,
            area.width
        );
    }
}
