//! Minimal PPTX (Office Open XML presentation) writer.
//!
//! A .pptx file is a ZIP archive of XML parts tied together by relationship
//! files. This module writes the smallest package PowerPoint will accept:
//! content types, the presentation part, one slide master / layout / theme,
//! and per slide a slide part, its relationships, and the PNG media file.
//!
//! The boilerplate parts that never vary (master, layout, theme, root
//! relationships) are embedded constants; everything that depends on slide
//! count or placement is emitted through `quick_xml::Writer`.
//!
//! ## Units
//!
//! All positions and sizes inside the package are EMU (English Metric
//! Units): 914 400 per inch. Images carry no physical size of their own, so
//! pixel dimensions are converted at the OOXML screen convention of 96 DPI,
//! i.e. 9 525 EMU per pixel. "Native size" below always means the image's
//! pixel size expressed in EMU at that convention.

use crate::config::SlideSize;
use crate::error::Pdf2PptxError;
use crate::geometry;
use crate::output::SlidePlacement;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMU per pixel at the 96-DPI screen convention.
pub const EMU_PER_PIXEL: i64 = 9_525;

// ── Namespaces and content types ─────────────────────────────────────────

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_DOC_RELS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";

// ── Static boilerplate parts ─────────────────────────────────────────────

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#;

const SLIDE_MASTER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#;

const SLIDE_MASTER_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#;

const SLIDE_LAYOUT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1"><p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#;

const SLIDE_LAYOUT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#;

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#;

// ── Deck ─────────────────────────────────────────────────────────────────

/// One slide: the PNG bytes and the fitted placement of its picture.
#[derive(Debug, Clone)]
struct Slide {
    /// Original file name, used for the picture's display name.
    name: String,
    png: Vec<u8>,
    placement: SlidePlacement,
}

/// An in-memory slide deck with a fixed canvas size.
///
/// The canvas is set exactly once at construction, before any slide is
/// added, and shared unscaled by every slide's fit computation.
pub struct SlideDeck {
    size: SlideSize,
    slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn new(size: SlideSize) -> Self {
        Self {
            size,
            slides: Vec::new(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Placements of all slides added so far, in slide order.
    pub fn placements(&self) -> Vec<SlidePlacement> {
        self.slides.iter().map(|s| s.placement).collect()
    }

    /// Append one slide showing `image_path` fitted and centered on the
    /// canvas. The image is placed at its native size (pixels at 96 DPI),
    /// then shrunk — never enlarged — to fit the canvas.
    pub fn add_image_slide(&mut self, image_path: &Path) -> Result<SlidePlacement, Pdf2PptxError> {
        if !image_path.exists() {
            return Err(Pdf2PptxError::ImageMissing {
                path: image_path.to_path_buf(),
            });
        }

        let (px_w, px_h) =
            image::image_dimensions(image_path).map_err(|e| Pdf2PptxError::ImageUnreadable {
                path: image_path.to_path_buf(),
                detail: e.to_string(),
            })?;

        let native_w = px_w as i64 * EMU_PER_PIXEL;
        let native_h = px_h as i64 * EMU_PER_PIXEL;
        if native_w <= 0 || native_h <= 0 {
            return Err(Pdf2PptxError::InvalidDimension {
                width: px_w as f64,
                height: px_h as f64,
            });
        }

        let fit = geometry::fit_within(
            (native_w as f64, native_h as f64),
            (self.size.width as f64, self.size.height as f64),
        )?;

        let png = std::fs::read(image_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Pdf2PptxError::ImageMissing {
                    path: image_path.to_path_buf(),
                }
            } else {
                Pdf2PptxError::ImageUnreadable {
                    path: image_path.to_path_buf(),
                    detail: e.to_string(),
                }
            }
        })?;

        let placement = SlidePlacement {
            page: self.slides.len() + 1,
            width: fit.width as i64,
            height: fit.height as i64,
            left: fit.left as i64,
            top: fit.top as i64,
        };

        debug!(
            "Slide {}: {}x{} px → {}x{} EMU at ({}, {})",
            placement.page, px_w, px_h, placement.width, placement.height, placement.left,
            placement.top
        );

        self.slides.push(Slide {
            name: image_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("page_{}.png", self.slides.len() + 1)),
            png,
            placement,
        });

        Ok(placement)
    }

    /// Write the deck as a .pptx package at `dest`.
    pub fn save(&self, dest: &Path) -> Result<(), Pdf2PptxError> {
        if self.is_empty() {
            return Err(Pdf2PptxError::EmptyDeck);
        }

        let save_failed = |detail: String| Pdf2PptxError::DeckSaveFailed {
            path: dest.to_path_buf(),
            detail,
        };

        let file = std::fs::File::create(dest).map_err(|e| save_failed(e.to_string()))?;
        let mut zip = ZipWriter::new(file);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let add_part = |zip: &mut ZipWriter<std::fs::File>,
                            name: &str,
                            content: &[u8]|
         -> Result<(), Pdf2PptxError> {
            zip.start_file(name, options)
                .map_err(|e| save_failed(e.to_string()))?;
            zip.write_all(content).map_err(|e| save_failed(e.to_string()))
        };

        let xml_failed = |e: quick_xml::Error| save_failed(e.to_string());

        add_part(
            &mut zip,
            "[Content_Types].xml",
            &self.content_types_xml().map_err(xml_failed)?,
        )?;
        add_part(&mut zip, "_rels/.rels", ROOT_RELS.as_bytes())?;
        add_part(
            &mut zip,
            "ppt/presentation.xml",
            &self.presentation_xml().map_err(xml_failed)?,
        )?;
        add_part(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            &self.presentation_rels_xml().map_err(xml_failed)?,
        )?;
        add_part(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            SLIDE_MASTER_XML.as_bytes(),
        )?;
        add_part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            SLIDE_MASTER_RELS.as_bytes(),
        )?;
        add_part(
            &mut zip,
            "ppt/slideLayouts/slideLayout1.xml",
            SLIDE_LAYOUT_XML.as_bytes(),
        )?;
        add_part(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            SLIDE_LAYOUT_RELS.as_bytes(),
        )?;
        add_part(&mut zip, "ppt/theme/theme1.xml", THEME_XML.as_bytes())?;

        for (i, slide) in self.slides.iter().enumerate() {
            let ordinal = i + 1;
            add_part(
                &mut zip,
                &format!("ppt/slides/slide{ordinal}.xml"),
                &slide_xml(slide).map_err(xml_failed)?,
            )?;
            add_part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{ordinal}.xml.rels"),
                &slide_rels_xml(ordinal).map_err(xml_failed)?,
            )?;
            add_part(
                &mut zip,
                &format!("ppt/media/image{ordinal}.png"),
                &slide.png,
            )?;
        }

        zip.finish().map_err(|e| save_failed(e.to_string()))?;
        debug!("Wrote {} slides to {}", self.slides.len(), dest.display());
        Ok(())
    }

    fn content_types_xml(&self) -> Result<Vec<u8>, quick_xml::Error> {
        let mut w = xml_writer()?;
        start(&mut w, "Types", &[("xmlns", NS_CONTENT_TYPES)])?;
        empty(
            &mut w,
            "Default",
            &[
                ("Extension", "rels"),
                ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
            ],
        )?;
        empty(
            &mut w,
            "Default",
            &[("Extension", "xml"), ("ContentType", "application/xml")],
        )?;
        empty(
            &mut w,
            "Default",
            &[("Extension", "png"), ("ContentType", "image/png")],
        )?;

        let overrides = [
            ("/ppt/presentation.xml", CT_PRESENTATION),
            ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
            ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
            ("/ppt/theme/theme1.xml", CT_THEME),
        ];
        for (part, ct) in overrides {
            empty(&mut w, "Override", &[("PartName", part), ("ContentType", ct)])?;
        }
        for i in 1..=self.slides.len() {
            let part = format!("/ppt/slides/slide{i}.xml");
            empty(
                &mut w,
                "Override",
                &[("PartName", part.as_str()), ("ContentType", CT_SLIDE)],
            )?;
        }
        end(&mut w, "Types")?;
        Ok(w.into_inner())
    }

    fn presentation_xml(&self) -> Result<Vec<u8>, quick_xml::Error> {
        let mut w = xml_writer()?;
        start(
            &mut w,
            "p:presentation",
            &[
                ("xmlns:a", NS_DRAWING),
                ("xmlns:r", NS_DOC_RELS),
                ("xmlns:p", NS_PRESENTATION),
            ],
        )?;

        start(&mut w, "p:sldMasterIdLst", &[])?;
        empty(
            &mut w,
            "p:sldMasterId",
            &[("id", "2147483648"), ("r:id", "rId1")],
        )?;
        end(&mut w, "p:sldMasterIdLst")?;

        start(&mut w, "p:sldIdLst", &[])?;
        for i in 1..=self.slides.len() {
            // Slide ids start at 256 by OOXML convention; the master takes
            // rId1, so slide i maps to rId(i+1).
            let id = (255 + i).to_string();
            let rid = format!("rId{}", i + 1);
            empty(
                &mut w,
                "p:sldId",
                &[("id", id.as_str()), ("r:id", rid.as_str())],
            )?;
        }
        end(&mut w, "p:sldIdLst")?;

        let cx = self.size.width.to_string();
        let cy = self.size.height.to_string();
        empty(&mut w, "p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        empty(&mut w, "p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;

        end(&mut w, "p:presentation")?;
        Ok(w.into_inner())
    }

    fn presentation_rels_xml(&self) -> Result<Vec<u8>, quick_xml::Error> {
        let mut w = xml_writer()?;
        start(&mut w, "Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
        empty(
            &mut w,
            "Relationship",
            &[
                ("Id", "rId1"),
                ("Type", REL_SLIDE_MASTER),
                ("Target", "slideMasters/slideMaster1.xml"),
            ],
        )?;
        for i in 1..=self.slides.len() {
            let rid = format!("rId{}", i + 1);
            let target = format!("slides/slide{i}.xml");
            empty(
                &mut w,
                "Relationship",
                &[
                    ("Id", rid.as_str()),
                    ("Type", REL_SLIDE),
                    ("Target", target.as_str()),
                ],
            )?;
        }
        end(&mut w, "Relationships")?;
        Ok(w.into_inner())
    }
}

// ── Per-slide XML ────────────────────────────────────────────────────────

fn slide_xml(slide: &Slide) -> Result<Vec<u8>, quick_xml::Error> {
    let p = &slide.placement;
    let mut w = xml_writer()?;
    start(
        &mut w,
        "p:sld",
        &[
            ("xmlns:a", NS_DRAWING),
            ("xmlns:r", NS_DOC_RELS),
            ("xmlns:p", NS_PRESENTATION),
        ],
    )?;
    start(&mut w, "p:cSld", &[])?;
    start(&mut w, "p:spTree", &[])?;

    start(&mut w, "p:nvGrpSpPr", &[])?;
    empty(&mut w, "p:cNvPr", &[("id", "1"), ("name", "")])?;
    empty(&mut w, "p:cNvGrpSpPr", &[])?;
    empty(&mut w, "p:nvPr", &[])?;
    end(&mut w, "p:nvGrpSpPr")?;
    empty(&mut w, "p:grpSpPr", &[])?;

    start(&mut w, "p:pic", &[])?;
    start(&mut w, "p:nvPicPr", &[])?;
    empty(&mut w, "p:cNvPr", &[("id", "2"), ("name", slide.name.as_str())])?;
    start(&mut w, "p:cNvPicPr", &[])?;
    empty(&mut w, "a:picLocks", &[("noChangeAspect", "1")])?;
    end(&mut w, "p:cNvPicPr")?;
    empty(&mut w, "p:nvPr", &[])?;
    end(&mut w, "p:nvPicPr")?;

    start(&mut w, "p:blipFill", &[])?;
    empty(&mut w, "a:blip", &[("r:embed", "rId1")])?;
    start(&mut w, "a:stretch", &[])?;
    empty(&mut w, "a:fillRect", &[])?;
    end(&mut w, "a:stretch")?;
    end(&mut w, "p:blipFill")?;

    start(&mut w, "p:spPr", &[])?;
    start(&mut w, "a:xfrm", &[])?;
    let (x, y) = (p.left.to_string(), p.top.to_string());
    let (cx, cy) = (p.width.to_string(), p.height.to_string());
    empty(&mut w, "a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
    empty(&mut w, "a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    end(&mut w, "a:xfrm")?;
    start(&mut w, "a:prstGeom", &[("prst", "rect")])?;
    empty(&mut w, "a:avLst", &[])?;
    end(&mut w, "a:prstGeom")?;
    end(&mut w, "p:spPr")?;
    end(&mut w, "p:pic")?;

    end(&mut w, "p:spTree")?;
    end(&mut w, "p:cSld")?;
    start(&mut w, "p:clrMapOvr", &[])?;
    empty(&mut w, "a:masterClrMapping", &[])?;
    end(&mut w, "p:clrMapOvr")?;
    end(&mut w, "p:sld")?;
    Ok(w.into_inner())
}

fn slide_rels_xml(ordinal: usize) -> Result<Vec<u8>, quick_xml::Error> {
    let mut w = xml_writer()?;
    start(&mut w, "Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    let image = format!("../media/image{ordinal}.png");
    empty(
        &mut w,
        "Relationship",
        &[("Id", "rId1"), ("Type", REL_IMAGE), ("Target", image.as_str())],
    )?;
    empty(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId2"),
            ("Type", REL_SLIDE_LAYOUT),
            ("Target", "../slideLayouts/slideLayout1.xml"),
        ],
    )?;
    end(&mut w, "Relationships")?;
    Ok(w.into_inner())
}

// ── quick-xml helpers ────────────────────────────────────────────────────

fn xml_writer() -> Result<Writer<Vec<u8>>, quick_xml::Error> {
    let mut w = Writer::new(Vec::new());
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(w)
}

fn start(
    w: &mut Writer<Vec<u8>>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), quick_xml::Error> {
    let mut e = BytesStart::new(name);
    for attr in attrs {
        e.push_attribute(*attr);
    }
    w.write_event(Event::Start(e))
}

fn empty(
    w: &mut Writer<Vec<u8>>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), quick_xml::Error> {
    let mut e = BytesStart::new(name);
    for attr in attrs {
        e.push_attribute(*attr);
    }
    w.write_event(Event::Empty(e))
}

fn end(w: &mut Writer<Vec<u8>>, name: &str) -> Result<(), quick_xml::Error> {
    w.write_event(Event::End(BytesEnd::new(name)))
}
