//! PDF output via `pdf-writer`.
//!
//! One `Content` stream per page; fonts are the built-in base-14 Type1 fonts
//! registered lazily on first use, images become XObjects as they are drawn.
//! All resources are listed on every page, which keeps the resource
//! dictionaries simple at a negligible size cost.

use std::io::{BufReader, Cursor};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use super::DrawBackend;
use crate::error::Error;
use crate::fonts::{FontVariant, to_winansi_bytes};
use crate::model::{ImageData, ImageFormat};

pub struct PdfBackend {
    pdf: Pdf,
    next_id: i32,
    page_width: f32,
    page_height: f32,
    /// Finished page content streams, in page order.
    pages: Vec<Content>,
    current: Content,
    /// Registered fonts: (variant, pdf resource name, object ref).
    fonts: Vec<(FontVariant, String, Ref)>,
    images: Vec<(String, Ref)>,
    active_font: Option<(FontVariant, f32)>,
}

impl PdfBackend {
    pub fn new(page_width: f32, page_height: f32) -> Self {
        PdfBackend {
            pdf: Pdf::new(),
            next_id: 1,
            page_width,
            page_height,
            pages: Vec::new(),
            current: Content::new(),
            fonts: Vec::new(),
            images: Vec::new(),
            active_font: None,
        }
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }

    /// Resource name for `font`, registering the Type1 font object on first
    /// use.
    fn font_name(&mut self, font: FontVariant) -> String {
        if let Some((_, name, _)) = self.fonts.iter().find(|(v, _, _)| *v == font) {
            return name.clone();
        }
        let font_ref = self.alloc();
        let pdf_name = format!("F{}", self.fonts.len() + 1);
        let mut obj = self.pdf.type1_font(font_ref);
        obj.base_font(Name(font.base_font().as_bytes()));
        obj.encoding_predefined(Name(b"WinAnsiEncoding"));
        drop(obj);
        self.fonts.push((font, pdf_name.clone(), font_ref));
        pdf_name
    }

    fn embed_image(&mut self, data: &ImageData) -> Result<String, Error> {
        let xobj_ref = self.alloc();
        let pdf_name = format!("Im{}", self.images.len() + 1);

        match data.format {
            ImageFormat::Jpeg => {
                let cursor = Cursor::new(&data.bytes);
                let reader = image::ImageReader::with_format(
                    BufReader::new(cursor),
                    image::ImageFormat::Jpeg,
                );
                let (w, h) = reader
                    .into_dimensions()
                    .map_err(|e| Error::Image(format!("bad jpeg: {e}")))?;
                let mut xobj = self.pdf.image_xobject(xobj_ref, &data.bytes);
                xobj.filter(Filter::DctDecode);
                xobj.width(w as i32);
                xobj.height(h as i32);
                xobj.color_space().device_rgb();
                xobj.bits_per_component(8);
            }
            ImageFormat::Png => {
                let cursor = Cursor::new(&data.bytes);
                let reader = image::ImageReader::with_format(
                    BufReader::new(cursor),
                    image::ImageFormat::Png,
                );
                let decoded = reader
                    .decode()
                    .map_err(|e| Error::Image(format!("bad png: {e}")))?;
                let rgba: image::RgbaImage = decoded.to_rgba8();
                let (w, h) = (rgba.width(), rgba.height());
                let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

                let rgb_data: Vec<u8> = rgba
                    .pixels()
                    .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                    .collect();
                let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

                let smask_ref = if has_alpha {
                    let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                    let compressed_alpha =
                        miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
                    let mask_ref = self.alloc();
                    let mut mask = self.pdf.image_xobject(mask_ref, &compressed_alpha);
                    mask.filter(Filter::FlateDecode);
                    mask.width(w as i32);
                    mask.height(h as i32);
                    mask.color_space().device_gray();
                    mask.bits_per_component(8);
                    Some(mask_ref)
                } else {
                    None
                };

                let mut xobj = self.pdf.image_xobject(xobj_ref, &compressed_rgb);
                xobj.filter(Filter::FlateDecode);
                xobj.width(w as i32);
                xobj.height(h as i32);
                xobj.color_space().device_rgb();
                xobj.bits_per_component(8);
                if let Some(mask_ref) = smask_ref {
                    xobj.s_mask(mask_ref);
                }
            }
        }

        self.images.push((pdf_name.clone(), xobj_ref));
        Ok(pdf_name)
    }

    /// Assemble the document and return the serialized PDF bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.pages
            .push(std::mem::replace(&mut self.current, Content::new()));

        let catalog_id = self.alloc();
        let pages_id = self.alloc();
        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();

        for (i, c) in std::mem::take(&mut self.pages).into_iter().enumerate() {
            let raw = c.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            self.pdf
                .stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        self.pdf.catalog(catalog_id).pages(pages_id);
        self.pdf
            .pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = self.pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            {
                let mut fonts = resources.fonts();
                for (_, name, font_ref) in &self.fonts {
                    fonts.pair(Name(name.as_bytes()), *font_ref);
                }
            }
            if !self.images.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &self.images {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        self.pdf.finish()
    }
}

impl DrawBackend for PdfBackend {
    fn start_new_page(&mut self) {
        self.pages
            .push(std::mem::replace(&mut self.current, Content::new()));
    }

    fn set_font(&mut self, font: FontVariant, size: f32) {
        self.active_font = Some((font, size));
    }

    fn set_fill_color(&mut self, rgb: [u8; 3]) {
        let [r, g, b] = rgb;
        self.current
            .set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        let Some((font, size)) = self.active_font else {
            return;
        };
        let name = self.font_name(font);
        let bytes = to_winansi_bytes(text);
        self.current
            .begin_text()
            .set_font(Name(name.as_bytes()), size)
            .next_line(x, self.page_height - y)
            .show(Str(&bytes))
            .end_text();
    }

    fn draw_image(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        data: &ImageData,
    ) -> Result<(), Error> {
        let name = self.embed_image(data)?;
        // y is the image top edge; PDF places from the bottom-left corner.
        let y_bottom = self.page_height - y - h;
        self.current.save_state();
        self.current.transform([w, 0.0, 0.0, h, x, y_bottom]);
        self.current.x_object(Name(name.as_bytes()));
        self.current.restore_state();
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let y_bottom = self.page_height - y - h;
        self.current.rect(x, y_bottom, w, h);
        self.current.fill_nonzero();
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        self.current.save_state();
        self.current.set_line_width(width);
        self.current.move_to(x1, self.page_height - y1);
        self.current.line_to(x2, self.page_height - y2);
        self.current.stroke();
        self.current.restore_state();
    }
}
