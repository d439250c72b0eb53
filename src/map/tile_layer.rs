use crate::core::config::TileConfig;
use crate::core::geo::TileCoord;
use crate::core::viewport::Viewport;
use crate::map::style::MapStyle;
use crate::runtime::AsyncSpawner;
use crate::tiles::{TemplateSource, TileCache, TileKey, TileLoader};
use egui::{Color32, ColorImage, Painter, Pos2, Rect, TextureHandle, TextureOptions};
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Decoding is the expensive part; spread it over frames
const MAX_DECODES_PER_FRAME: usize = 6;

const TEXTURE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Raster base layer: downloads, decodes and paints the visible tiles
pub struct TileLayer {
    config: TileConfig,
    cache: TileCache,
    loader: Option<TileLoader>,
    textures: LruCache<TileKey, TextureHandle>,
    undecodable: HashSet<TileKey>,
}

impl TileLayer {
    /// Without a spawner the layer only paints placeholders
    pub fn new(config: &TileConfig, spawner: Option<Arc<dyn AsyncSpawner>>) -> Self {
        let loader = spawner.and_then(|spawner| match TileLoader::new(config, spawner) {
            Ok(loader) => Some(loader),
            Err(e) => {
                log::error!("tile downloads disabled: {}", e);
                None
            }
        });

        Self {
            config: config.clone(),
            cache: TileCache::new(config.cache_size),
            loader,
            textures: LruCache::new(TEXTURE_CAPACITY),
            undecodable: HashSet::new(),
        }
    }

    pub fn set_repaint_context(&mut self, ctx: &egui::Context) {
        if let Some(loader) = self.loader.as_mut() {
            let ctx = ctx.clone();
            loader.set_notifier(Arc::new(move || ctx.request_repaint()));
        }
    }

    /// Paints every tile covering `viewport` into `rect`. Returns true when
    /// the per-frame decode budget ran out and another frame should follow.
    pub fn paint(
        &mut self,
        painter: &Painter,
        rect: Rect,
        viewport: &Viewport,
        style: MapStyle,
    ) -> bool {
        if let Some(loader) = self.loader.as_mut() {
            for (key, data) in loader.drain() {
                self.cache.insert(key, data);
            }
        }

        let source = TemplateSource::for_style(style, &self.config);
        let range = viewport.visible_tiles();
        let mut decodes = 0;
        let mut incomplete = false;

        for y in range.min_y..=range.max_y {
            for x in range.min_x..=range.max_x {
                let coord = TileCoord::new(range.wrap_x(x), y as u32, range.zoom);
                let key = TileKey::new(style, coord);
                let (min, max) = viewport.tile_screen_bounds(range.zoom, x, y);
                let tile_rect = Rect::from_min_max(
                    Pos2::new(rect.min.x + min.x as f32, rect.min.y + min.y as f32),
                    Pos2::new(rect.min.x + max.x as f32, rect.min.y + max.y as f32),
                );

                if decodes < MAX_DECODES_PER_FRAME
                    && !self.undecodable.contains(&key)
                    && self.textures.get(&key).is_none()
                {
                    if let Some(bytes) = self.cache.get(&key) {
                        decodes += 1;
                        match decode(&bytes) {
                            Some(image) => {
                                let name = format!(
                                    "tile_{:?}_{}_{}_{}",
                                    style, coord.z, coord.x, coord.y
                                );
                                let texture = painter.ctx().load_texture(
                                    name,
                                    image,
                                    TextureOptions::LINEAR,
                                );
                                self.textures.put(key, texture);
                            }
                            None => {
                                log::warn!("tile {:?} is not a decodable image", key);
                                self.undecodable.insert(key);
                            }
                        }
                    }
                }

                match self.textures.get(&key) {
                    Some(texture) => {
                        painter.image(
                            texture.id(),
                            tile_rect,
                            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                            Color32::WHITE,
                        );
                    }
                    None => {
                        incomplete = true;
                        painter.rect_filled(tile_rect, 0.0, placeholder_color(style));
                        if !self.cache.contains(&key) {
                            if let Some(loader) = self.loader.as_mut() {
                                loader.request(&source, key);
                            }
                        }
                    }
                }
            }
        }

        incomplete && decodes > 0
    }
}

fn placeholder_color(style: MapStyle) -> Color32 {
    match style {
        MapStyle::Standard => Color32::from_rgb(230, 228, 224),
        MapStyle::Satellite => Color32::from_rgb(40, 48, 56),
    }
}

fn decode(bytes: &[u8]) -> Option<ColorImage> {
    let img = image::load_from_memory(bytes).ok()?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_raw(),
    ))
}
