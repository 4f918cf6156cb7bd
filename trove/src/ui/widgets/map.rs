//! Map panel: the hunter marker, the active landmark, and the travelled
//! path.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Widget,
    },
};

use trove_core::{segments, Landmark, Waypoint, PATH_MARGIN};

use crate::ui::theme::GameTheme;

// The fixed field the waypoints were plotted on, with headroom for the
// path margin.
const FIELD_WIDTH: f64 = 660.0;
const FIELD_HEIGHT: f64 = 360.0;

/// Widget for the expedition map.
pub struct MapWidget<'a> {
    hunter: Option<Waypoint>,
    landmark: Option<Landmark>,
    waypoints: &'a [Waypoint],
    theme: &'a GameTheme,
}

impl<'a> MapWidget<'a> {
    pub fn new(waypoints: &'a [Waypoint], theme: &'a GameTheme) -> Self {
        Self {
            hunter: None,
            landmark: None,
            waypoints,
            theme,
        }
    }

    pub fn hunter(mut self, hunter: Option<Waypoint>) -> Self {
        self.hunter = hunter;
        self
    }

    pub fn landmark(mut self, landmark: Option<Landmark>) -> Self {
        self.landmark = landmark;
        self
    }
}

// Waypoint space grows downward, the canvas upward.
fn flip(y: f64) -> f64 {
    FIELD_HEIGHT - y
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Map ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, FIELD_WIDTH])
            .y_bounds([0.0, FIELD_HEIGHT])
            .paint(|ctx| {
                for seg in segments(self.waypoints) {
                    ctx.draw(&CanvasLine {
                        x1: seg.x,
                        y1: flip(seg.y),
                        x2: seg.end_x,
                        y2: flip(seg.end_y),
                        color: self.theme.path_color,
                    });
                }

                if let Some(hunter) = self.hunter {
                    if let Some(landmark) = self.landmark {
                        // Label above the marker so both stay readable.
                        ctx.print(
                            hunter.x,
                            flip(hunter.y) + 2.0 * PATH_MARGIN,
                            TextLine::styled(landmark.label(), self.theme.landmark_style()),
                        );
                    }
                    ctx.print(
                        hunter.x,
                        flip(hunter.y),
                        TextLine::styled("@", self.theme.hunter_style()),
                    );
                }
            })
            .render(area, buf);
    }
}
