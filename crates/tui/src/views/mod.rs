pub mod dashboard;
pub mod login;
pub mod onboarding;
pub mod settings;

use ratatui::prelude::*;

/// A rect of at most `width` x `height`, centered inside `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
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
    fn centered_clamps_to_the_available_area() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered(area, 40, 20);
        assert_eq!(rect, area);
        let rect = centered(area, 4, 2);
        assert_eq!(rect, Rect::new(3, 1, 4, 2));
    }
}
