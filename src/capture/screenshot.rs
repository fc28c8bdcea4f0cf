//! Screen capture of a fixed rectangle via GDI.
//!
//! The marketplace runs fullscreen, so capture goes through the screen DC
//! rather than a window handle: BitBlt the region into a memory bitmap,
//! read the pixels out with GetDIBits, convert BGRA to RGBA.

use anyhow::{anyhow, Result};
use chrono::Local;
use image::{ImageBuffer, Rgba};
use std::path::PathBuf;

use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, SRCCOPY,
};

use crate::config::{LotTier, Region};

/// Captures the pixel contents of a screen rectangle.
///
/// Regions calibrated near a screen edge may extend past the desktop;
/// the out-of-bounds pixels come back black, which is an accepted edge
/// case (OCR simply finds no digits there).
pub fn grab_region(region: &Region) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    let width = region.width as i32;
    let height = region.height as i32;
    if width <= 0 || height <= 0 {
        return Err(anyhow!("Invalid capture region: {:?}", region));
    }

    unsafe {
        let hdc_screen = GetDC(None);
        let hdc_mem = CreateCompatibleDC(hdc_screen);
        let hbm = CreateCompatibleBitmap(hdc_screen, width, height);
        let old = SelectObject(hdc_mem, hbm.into());

        let blt_result = BitBlt(
            hdc_mem,
            0,
            0,
            width,
            height,
            hdc_screen,
            region.x,
            region.y,
            SRCCOPY,
        );

        // Top-down 32-bit DIB: negative height, BGRA byte order.
        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut pixels = vec![0u8; (width * height * 4) as usize];
        let lines = GetDIBits(
            hdc_mem,
            hbm,
            0,
            height as u32,
            Some(pixels.as_mut_ptr() as *mut _),
            &mut bmi,
            DIB_RGB_COLORS,
        );

        SelectObject(hdc_mem, old);
        let _ = DeleteObject(hbm.into());
        let _ = DeleteDC(hdc_mem);
        ReleaseDC(None, hdc_screen);

        blt_result?;
        if lines == 0 {
            return Err(anyhow!("GetDIBits returned no scanlines"));
        }

        // BGRA -> RGBA
        let mut img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::new(region.width, region.height);
        for y in 0..region.height {
            for x in 0..region.width {
                let offset = ((y * region.width + x) * 4) as usize;
                let b = pixels[offset];
                let g = pixels[offset + 1];
                let r = pixels[offset + 2];
                img.put_pixel(x, y, Rgba([r, g, b, 255]));
            }
        }

        Ok(img)
    }
}

/// Saves a captured crop under captures/ for OCR troubleshooting.
///
/// Returns the path of the written PNG.
pub fn save_debug_capture(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    tier: LotTier,
) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S%.3f");
    let filename = format!("price_{}_{}.png", tier, timestamp);
    let path = crate::paths::get_captures_dir().join(filename);
    img.save(&path)?;
    Ok(path)
}
