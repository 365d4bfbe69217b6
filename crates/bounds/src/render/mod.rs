pub mod font;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use crate::types::{BoundsResult, Rect};

pub use font::draw_text;

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

pub const TEXT_SCALE: u32 = 2;
const TEXT_X: i32 = 10;
const FIRST_LINE_Y: i32 = 16;
const SECOND_LINE_Y: i32 = 46;

pub const CONTOUR_NOT_FOUND: &str = "No white region found";
pub const DIRECT_NOT_FOUND: &str = "No white pixels";

/// Draw a two pixel wide outline around `rect`, growing outwards so the
/// enclosed foreground stays visible.
pub fn draw_rect(image: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    if rect.is_empty() {
        return;
    }
    let inner = imageproc::rect::Rect::at(rect.x, rect.y).of_size(rect.width, rect.height);
    let outer = imageproc::rect::Rect::at(rect.x - 1, rect.y - 1).of_size(rect.width + 2, rect.height + 2);
    draw_hollow_rect_mut(image, outer, color);
    draw_hollow_rect_mut(image, inner, color);
}

/// Overlay for the contour strategy: rectangle, its origin and size, and the total area.
pub fn draw_contour_summary(image: &mut RgbImage, result: &BoundsResult) {
    if !result.found() {
        draw_text(image, TEXT_X, FIRST_LINE_Y, CONTOUR_NOT_FOUND, TEXT_SCALE, RED);
        return;
    }
    let r = result.bounding_rect;
    draw_rect(image, r, GREEN);
    let rect_info = format!("Rect: [{},{}] {}x{}", r.x, r.y, r.width, r.height);
    let area_info = format!("Area: {}", result.support_count);
    draw_text(image, TEXT_X, FIRST_LINE_Y, &rect_info, TEXT_SCALE, WHITE);
    draw_text(image, TEXT_X, SECOND_LINE_Y, &area_info, TEXT_SCALE, WHITE);
}

/// Overlay for the direct scan: rectangle, pixel count and rectangle size.
pub fn draw_direct_summary(image: &mut RgbImage, result: &BoundsResult) {
    if !result.found() {
        draw_text(image, TEXT_X, FIRST_LINE_Y, DIRECT_NOT_FOUND, TEXT_SCALE, RED);
        return;
    }
    let r = result.bounding_rect;
    draw_rect(image, r, GREEN);
    let info = format!("Pixels: {} Rect: {}x{}", result.support_count, r.width, r.height);
    draw_text(image, TEXT_X, FIRST_LINE_Y, &info, TEXT_SCALE, WHITE);
}

/// "Frame: N" label for the original-frame surface.
pub fn draw_frame_counter(image: &mut RgbImage, frame_number: u64) {
    draw_text(image, TEXT_X, FIRST_LINE_Y, &format!("Frame: {frame_number}"), TEXT_SCALE, GREEN);
}
