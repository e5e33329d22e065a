use std::collections::{HashMap, HashSet};
use std::time::Duration;

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use ratatui::style::Color;

use crate::event::LogoLoadResult;

const UPPER_HALF_BLOCK: char = '▀';
const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

/// One terminal cell of a rendered logo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCell {
    pub symbol: char,
    pub fg: Color,
    pub bg: Color,
}

/// Logo rasterised to `width` x `height` cells, two pixels per cell
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u16,
    height: u16,
    cells: Vec<TileCell>,
}

impl TileGrid {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<TileCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Fit `image` inside the tile, centred, flattening transparency onto `backdrop`
    pub fn from_image(image: &DynamicImage, width: u16, height: u16, backdrop: [u8; 3]) -> Self {
        let px_w = width as u32;
        let px_h = height as u32 * 2;
        let fitted = if px_w == 0 || px_h == 0 {
            DynamicImage::new_rgba8(0, 0)
        } else {
            image.resize(px_w, px_h, FilterType::Triangle)
        };
        let (img_w, img_h) = fitted.dimensions();
        let off_x = (px_w.saturating_sub(img_w)) / 2;
        let off_y = (px_h.saturating_sub(img_h)) / 2;
        let rgba = fitted.to_rgba8();

        let pixel = |x: u32, y: u32| -> Color {
            if x < off_x || y < off_y || x - off_x >= img_w || y - off_y >= img_h {
                return Color::Rgb(backdrop[0], backdrop[1], backdrop[2]);
            }
            let p = rgba.get_pixel(x - off_x, y - off_y).0;
            let alpha = p[3] as u32;
            let blend = |c: u8, b: u8| ((c as u32 * alpha + b as u32 * (255 - alpha)) / 255) as u8;
            Color::Rgb(
                blend(p[0], backdrop[0]),
                blend(p[1], backdrop[1]),
                blend(p[2], backdrop[2]),
            )
        };

        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height as u32 {
            for col in 0..width as u32 {
                cells.push(TileCell {
                    symbol: UPPER_HALF_BLOCK,
                    fg: pixel(col, row * 2),
                    bg: pixel(col, row * 2 + 1),
                });
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }
}

/// Download state of one logo URL
#[derive(Debug, Clone)]
pub enum LogoState {
    Loading,
    Ready(TileGrid),
    /// Rendered as a broken-image frame with the alt text
    Broken(String),
}

/// Rasterised logos keyed by image URL
pub struct LogoCache {
    tile_width: u16,
    tile_height: u16,
    backdrop: [u8; 3],
    states: HashMap<String, LogoState>,
}

impl LogoCache {
    pub fn new(tile_width: u16, tile_height: u16, backdrop: [u8; 3]) -> Self {
        Self {
            tile_width,
            tile_height,
            backdrop,
            states: HashMap::new(),
        }
    }

    pub fn get(&self, url: &str) -> Option<&LogoState> {
        self.states.get(url)
    }

    /// Mark `url` as loading; `false` when it is already known
    ///
    /// An empty URL is marked broken right away and never downloaded.
    pub fn start_loading(&mut self, url: &str) -> bool {
        if self.states.contains_key(url) {
            return false;
        }
        if url.trim().is_empty() {
            self.states
                .insert(url.to_string(), LogoState::Broken("no image URL".to_string()));
            return false;
        }
        self.states.insert(url.to_string(), LogoState::Loading);
        true
    }

    /// Store a finished download
    ///
    /// Results for URLs evicted while in flight are dropped.
    pub fn apply(&mut self, result: LogoLoadResult) {
        match result {
            LogoLoadResult::Success { url, image } => {
                let Some(state) = self.states.get_mut(&url) else {
                    tracing::debug!("Dropping logo for evicted {}", url);
                    return;
                };
                *state = LogoState::Ready(TileGrid::from_image(
                    &image,
                    self.tile_width,
                    self.tile_height,
                    self.backdrop,
                ));
            }
            LogoLoadResult::Failure { url, error } => {
                tracing::warn!("Logo {} failed to load: {}", url, error);
                if let Some(state) = self.states.get_mut(&url) {
                    *state = LogoState::Broken(error);
                }
            }
        }
    }

    /// Drop every logo whose URL is not in `urls`
    pub fn retain_urls<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) {
        let keep: HashSet<&str> = urls.into_iter().collect();
        let before = self.states.len();
        self.states.retain(|url, _| keep.contains(url.as_str()));
        let evicted = before - self.states.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} cached logos", evicted);
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Download and decode one logo
pub async fn fetch_logo(url: &str) -> Result<DynamicImage, String> {
    let bytes = download_logo(url).await?;
    decode_logo(&bytes)
}

async fn download_logo(url: &str) -> Result<Vec<u8>, String> {
    url::Url::parse(url).map_err(|e| format!("Invalid URL: {}", e))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| format!("Client error: {}", e))?;

    let response = client
        .get(url)
        .header("Accept", "image/png,image/jpeg,image/gif,image/webp,image/*;q=0.8")
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Read error: {}", e))?;
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(format!("Logo too large ({} bytes)", bytes.len()));
    }
    Ok(bytes.to_vec())
}

/// Decode image bytes, trying magic bytes when auto-detection fails
pub fn decode_logo(bytes: &[u8]) -> Result<DynamicImage, String> {
    if bytes.is_empty() {
        return Err("Empty data".to_string());
    }

    if let Ok(img) = image::load_from_memory(bytes) {
        return Ok(img);
    }

    let format = if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(image::ImageFormat::Png)
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        Some(image::ImageFormat::Jpeg)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(image::ImageFormat::Gif)
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some(image::ImageFormat::WebP)
    } else {
        None
    };

    match format {
        Some(format) => image::load_from_memory_with_format(bytes, format)
            .map_err(|e| format!("{:?}: {}", format, e)),
        None => Err(format!("Unknown format ({}B)", bytes.len())),
    }
}
