// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic photos and edge maps shared by the scan tests.

use doccam_core::GridPoint;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Black frame with a filled white axis-aligned rectangle.
pub fn framed_rectangle(
    frame_w: u32,
    frame_h: u32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> RgbImage {
    let mut img = RgbImage::from_pixel(frame_w, frame_h, BLACK);
    for py in y..y + height {
        for px in x..x + width {
            img.put_pixel(px, py, WHITE);
        }
    }
    img
}

/// Black frame with a filled white polygon.
pub fn framed_polygon(frame_w: u32, frame_h: u32, corners: &[(i32, i32)]) -> RgbImage {
    let mut img = RgbImage::from_pixel(frame_w, frame_h, BLACK);
    let poly: Vec<Point<i32>> = corners.iter().map(|&(x, y)| Point::new(x, y)).collect();
    draw_polygon_mut(&mut img, &poly, WHITE);
    img
}

/// Binary edge map holding one filled rectangle of "edge" pixels spanning
/// `x0..=x1` by `y0..=y1`. Its outer boundary encloses exactly
/// `(x1 - x0) * (y1 - y0)` square pixels.
pub fn edge_block(frame_w: u32, frame_h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
    let mut img = GrayImage::new(frame_w, frame_h);
    for py in y0..=y1 {
        for px in x0..=x1 {
            img.put_pixel(px, py, Luma([255]));
        }
    }
    img
}

pub fn gp(x: i32, y: i32) -> GridPoint {
    GridPoint::new(x, y)
}
