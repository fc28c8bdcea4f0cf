//! Pointer query and capture-box geometry.

use anyhow::Result;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

use crate::config::Region;

/// Gets the current cursor position in screen coordinates.
pub fn get_cursor_position() -> Result<(i32, i32)> {
    let mut pt = POINT::default();
    unsafe {
        GetCursorPos(&mut pt)?;
    }
    Ok((pt.x, pt.y))
}

/// Builds the capture box centered on a point.
///
/// The box keeps the configured fixed dimensions; only the origin depends
/// on where the pointer was. No screen-bounds check: calibrating near an
/// edge may produce a partially off-screen region, which capture tolerates.
pub fn region_at(x: i32, y: i32, width: u32, height: u32) -> Region {
    Region {
        x: x - (width as i32) / 2,
        y: y - (height as i32) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_centered_on_point() {
        let region = region_at(400, 300, 80, 20);
        assert_eq!(region, Region { x: 360, y: 290, width: 80, height: 20 });
    }

    #[test]
    fn test_region_keeps_fixed_dimensions() {
        let region = region_at(12, 7, 150, 40);
        assert_eq!(region.width, 150);
        assert_eq!(region.height, 40);
        assert_eq!(region.x, 12 - 75);
        assert_eq!(region.y, 7 - 20);
    }

    #[test]
    fn test_region_near_origin_may_go_negative() {
        // Accepted edge case: no bounds clamping
        let region = region_at(10, 5, 150, 40);
        assert!(region.x < 0);
        assert!(region.y < 0);
    }
}
