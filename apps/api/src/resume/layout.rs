//! Résumé pagination: lays a `ResumeDocument` out onto A4 pages.
//!
//! # Architecture
//! - Pure and backend-free: the output is a list of pages of `DrawOp`s in
//!   millimetres from the top-left corner. `render.rs` turns them into PDF.
//! - A single top-to-bottom pass. The `DocumentCursor` is threaded by value
//!   through every section writer, which returns the advanced cursor.
//! - Section order is fixed: header, summary, experience, education, skills, projects.
//!
//! # Page-break rules
//! - Experience entry: break if `y + 4·lh > H − margin`.
//! - Education entry / skill category: break if `y + 2·lh > H − margin`.
//! - Projects: the whole section is dropped unless `y + 3·lh < H − margin`;
//!   once emitted, each project breaks if `y + 3·lh > H − margin`.
//! - A section heading always lands on the same page as its first block.
//! - Wrapped paragraphs flow line by line onto new pages.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::resume::font_metrics::{get_metrics, FontFamily, FontMetricTable};
use crate::resume::models::ResumeDocument;

const NAME_PT: f32 = 28.0;
const TITLE_PT: f32 = 16.0;
const HEADING_PT: f32 = 14.0;
const ENTRY_PT: f32 = 12.0;
const BODY_PT: f32 = 10.0;

const GRAY_DARK: u8 = 40;
const GRAY_TITLE: u8 = 80;
const GRAY_BODY: u8 = 60;
const GRAY_META: u8 = 100;

/// Extra space below a section heading, on top of one line height.
const HEADING_GAP_MM: f32 = 2.0;
/// Extra space below the title line of the header.
const TITLE_GAP_MM: f32 = 5.0;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Page geometry and typographic rhythm, all in millimetres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub font: FontFamily,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    /// Baseline of the first header line on page 1.
    pub top_offset_mm: f32,
    pub line_height_mm: f32,
    pub section_spacing_mm: f32,
    /// Spacing after each experience entry and project.
    pub entry_spacing_mm: f32,
    /// Left indent of bullets and project descriptions.
    pub indent_mm: f32,
}

/// A4 portrait, 15mm margins, 7mm line height.
pub fn default_page_config(font: FontFamily) -> PageConfig {
    PageConfig {
        font,
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 15.0,
        top_offset_mm: 20.0,
        line_height_mm: 7.0,
        section_spacing_mm: 10.0,
        entry_spacing_mm: 5.0,
        indent_mm: 5.0,
    }
}

impl PageConfig {
    pub fn text_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Lowest baseline allowed on a page.
    pub fn bottom_limit_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }

    fn right_edge_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    /// `x` is the right edge of the text.
    Right,
}

/// A single drawing instruction. Coordinates are millimetres from the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size_pt: f32,
        /// 0 = black, 255 = white.
        gray: u8,
        align: Align,
        text: String,
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutDocument {
    pub font: FontFamily,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Running write position during layout. Discarded once layout completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentCursor {
    /// Baseline of the next line, in mm from the top of the page.
    pub y: f32,
    pub page_index: usize,
}

impl DocumentCursor {
    pub fn start(config: &PageConfig) -> Self {
        DocumentCursor {
            y: config.top_offset_mm,
            page_index: 0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the whole document. Page count is the greedy minimum for the content.
pub fn layout_document(doc: &ResumeDocument, config: &PageConfig) -> LaidOutDocument {
    let setter = Typesetter::new(config);
    let mut out = setter.empty_document();

    let mut cursor = DocumentCursor::start(config);
    cursor = setter.write_header(&mut out, cursor, doc);
    cursor = setter.write_summary(&mut out, cursor, doc);
    cursor = setter.write_experience(&mut out, cursor, doc);
    cursor = setter.write_education(&mut out, cursor, doc);
    cursor = setter.write_skills(&mut out, cursor, doc);
    cursor = setter.write_projects(&mut out, cursor, doc);

    debug!(
        pages = out.page_count(),
        final_y = cursor.y,
        "résumé layout complete"
    );
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Section writers
// ────────────────────────────────────────────────────────────────────────────

struct Typesetter<'a> {
    config: &'a PageConfig,
    metrics: &'static FontMetricTable,
}

impl<'a> Typesetter<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            metrics: get_metrics(&config.font),
        }
    }

    fn empty_document(&self) -> LaidOutDocument {
        LaidOutDocument {
            font: self.config.font,
            page_width_mm: self.config.page_width_mm,
            page_height_mm: self.config.page_height_mm,
            pages: vec![Page::default()],
        }
    }

    fn lh(&self) -> f32 {
        self.config.line_height_mm
    }

    fn write_header(
        &self,
        out: &mut LaidOutDocument,
        mut cursor: DocumentCursor,
        doc: &ResumeDocument,
    ) -> DocumentCursor {
        let x = self.config.margin_mm;

        self.text(out, cursor, x, NAME_PT, GRAY_DARK, Align::Left, &doc.name);
        cursor.y += self.lh();

        self.text(out, cursor, x, TITLE_PT, GRAY_TITLE, Align::Left, &doc.title);
        cursor.y += self.lh() + TITLE_GAP_MM;

        let contact = format!(
            "Email: {} | Phone: {} | Location: {}",
            doc.contact.email, doc.contact.phone, doc.contact.location
        );
        self.text(out, cursor, x, BODY_PT, GRAY_META, Align::Left, &contact);
        cursor.y += self.lh() + self.config.section_spacing_mm;

        cursor
    }

    fn write_summary(
        &self,
        out: &mut LaidOutDocument,
        cursor: DocumentCursor,
        doc: &ResumeDocument,
    ) -> DocumentCursor {
        let lines = self
            .metrics
            .split_to_width(&doc.summary, self.config.text_width_mm(), BODY_PT);
        if lines.is_empty() {
            return cursor;
        }

        let cursor = self.heading(out, cursor, "Summary", 0.0);
        let mut cursor = self.flow_lines(
            out,
            cursor,
            &lines,
            self.config.margin_mm,
            BODY_PT,
            GRAY_BODY,
        );
        cursor.y += self.config.section_spacing_mm;
        cursor
    }

    fn write_experience(
        &self,
        out: &mut LaidOutDocument,
        cursor: DocumentCursor,
        doc: &ResumeDocument,
    ) -> DocumentCursor {
        if doc.experience.is_empty() {
            return cursor;
        }
        let entry_need = 4.0 * self.lh();
        let bullet_width = self.config.text_width_mm() - self.config.indent_mm;

        let mut cursor = self.heading(out, cursor, "Experience", entry_need);
        for exp in &doc.experience {
            cursor = self.ensure_space(out, cursor, entry_need);

            let heading = format!("{} at {}", exp.title, exp.company);
            self.text(out, cursor, self.config.margin_mm, ENTRY_PT, GRAY_BODY, Align::Left, &heading);
            self.text(
                out,
                cursor,
                self.config.right_edge_mm(),
                BODY_PT,
                GRAY_META,
                Align::Right,
                &exp.period,
            );
            cursor.y += self.lh();

            for desc in &exp.description {
                let lines = self
                    .metrics
                    .split_to_width(&format!("• {desc}"), bullet_width, BODY_PT);
                cursor = self.flow_lines(
                    out,
                    cursor,
                    &lines,
                    self.config.margin_mm + self.config.indent_mm,
                    BODY_PT,
                    GRAY_BODY,
                );
            }
            cursor.y += self.config.entry_spacing_mm;
        }
        cursor.y += self.config.section_spacing_mm;
        cursor
    }

    fn write_education(
        &self,
        out: &mut LaidOutDocument,
        cursor: DocumentCursor,
        doc: &ResumeDocument,
    ) -> DocumentCursor {
        if doc.education.is_empty() {
            return cursor;
        }
        let entry_need = 2.0 * self.lh();

        let mut cursor = self.heading(out, cursor, "Education", entry_need);
        for edu in &doc.education {
            cursor = self.ensure_space(out, cursor, entry_need);
            self.text(out, cursor, self.config.margin_mm, ENTRY_PT, GRAY_BODY, Align::Left, &edu.degree);
            self.text(
                out,
                cursor,
                self.config.right_edge_mm(),
                BODY_PT,
                GRAY_META,
                Align::Right,
                &format!("{}, {}", edu.institution, edu.period),
            );
            cursor.y += self.lh();
        }
        cursor.y += self.config.section_spacing_mm;
        cursor
    }

    fn write_skills(
        &self,
        out: &mut LaidOutDocument,
        cursor: DocumentCursor,
        doc: &ResumeDocument,
    ) -> DocumentCursor {
        if doc.skills.is_empty() {
            return cursor;
        }
        let entry_need = 2.0 * self.lh();

        let mut cursor = self.heading(out, cursor, "Skills", entry_need);
        for skill in &doc.skills {
            cursor = self.ensure_space(out, cursor, entry_need);
            let line = format!("{}: {}", skill.category, skill.items.join(", "));
            let lines = self
                .metrics
                .split_to_width(&line, self.config.text_width_mm(), BODY_PT);
            cursor = self.flow_lines(out, cursor, &lines, self.config.margin_mm, BODY_PT, GRAY_BODY);
        }
        cursor.y += self.config.section_spacing_mm;
        cursor
    }

    /// Projects are optional: near the bottom of a page the section is dropped
    /// instead of starting a new page.
    fn write_projects(
        &self,
        out: &mut LaidOutDocument,
        cursor: DocumentCursor,
        doc: &ResumeDocument,
    ) -> DocumentCursor {
        if doc.projects.is_empty() {
            return cursor;
        }
        let entry_need = 3.0 * self.lh();
        if cursor.y + entry_need >= self.config.bottom_limit_mm() {
            debug!(
                y = cursor.y,
                page = cursor.page_index,
                "not enough room left, projects section dropped"
            );
            return cursor;
        }
        let desc_width = self.config.text_width_mm() - self.config.indent_mm;

        let mut cursor = self.heading(out, cursor, "Projects", entry_need);
        for project in &doc.projects {
            cursor = self.ensure_space(out, cursor, entry_need);
            self.text(out, cursor, self.config.margin_mm, ENTRY_PT, GRAY_BODY, Align::Left, &project.title);
            self.text(
                out,
                cursor,
                self.config.right_edge_mm(),
                BODY_PT,
                GRAY_META,
                Align::Right,
                &format!("Technologies: {}", project.technologies.join(", ")),
            );
            cursor.y += self.lh();

            let lines = self
                .metrics
                .split_to_width(&project.description, desc_width, BODY_PT);
            cursor = self.flow_lines(
                out,
                cursor,
                &lines,
                self.config.margin_mm + self.config.indent_mm,
                BODY_PT,
                GRAY_META,
            );
            cursor.y += self.config.entry_spacing_mm;
        }
        cursor
    }

    // ── primitives ──────────────────────────────────────────────────────────

    /// Writes an underlined section heading. `first_block` is the height the
    /// section's first entry needs; heading and entry move to a new page together.
    fn heading(
        &self,
        out: &mut LaidOutDocument,
        cursor: DocumentCursor,
        label: &str,
        first_block: f32,
    ) -> DocumentCursor {
        let advance = self.lh() + HEADING_GAP_MM;
        let mut cursor = self.ensure_space(out, cursor, advance + first_block);

        self.text(out, cursor, self.config.margin_mm, HEADING_PT, GRAY_DARK, Align::Left, label);
        out.pages[cursor.page_index].ops.push(DrawOp::Rule {
            x1: self.config.margin_mm,
            y1: cursor.y + 1.0,
            x2: self.config.right_edge_mm(),
            y2: cursor.y + 1.0,
        });
        cursor.y += advance;
        cursor
    }

    /// Writes pre-wrapped lines one line height apart, breaking the page
    /// whenever a baseline would fall below the bottom margin.
    fn flow_lines(
        &self,
        out: &mut LaidOutDocument,
        mut cursor: DocumentCursor,
        lines: &[String],
        x: f32,
        size_pt: f32,
        gray: u8,
    ) -> DocumentCursor {
        for line in lines {
            if cursor.y > self.config.bottom_limit_mm() {
                cursor = self.new_page(out, cursor);
            }
            self.text(out, cursor, x, size_pt, gray, Align::Left, line);
            cursor.y += self.lh();
        }
        cursor
    }

    fn ensure_space(
        &self,
        out: &mut LaidOutDocument,
        cursor: DocumentCursor,
        needed: f32,
    ) -> DocumentCursor {
        if cursor.y + needed > self.config.bottom_limit_mm() {
            self.new_page(out, cursor)
        } else {
            cursor
        }
    }

    fn new_page(&self, out: &mut LaidOutDocument, cursor: DocumentCursor) -> DocumentCursor {
        out.pages.push(Page::default());
        DocumentCursor {
            y: self.config.margin_mm,
            page_index: cursor.page_index + 1,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &self,
        out: &mut LaidOutDocument,
        cursor: DocumentCursor,
        x: f32,
        size_pt: f32,
        gray: u8,
        align: Align,
        text: &str,
    ) {
        out.pages[cursor.page_index].ops.push(DrawOp::Text {
            x,
            y: cursor.y,
            size_pt,
            gray,
            align,
            text: text.to_string(),
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
