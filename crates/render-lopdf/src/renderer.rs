use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use plansheet_layout::{FontFace, LayoutElement, PageGeometry, PositionedElement, TextElement};
use plansheet_render_core::utils::{flip_y, font_resource_name, to_win_ansi};
use plansheet_render_core::{DocumentRenderer, RenderError};

const PRODUCER: &str = "plansheet";

/// An in-memory PDF renderer using the `lopdf` library.
/// It builds the document's object graph and then writes it to a byte buffer.
pub struct LopdfRenderer {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    resources_id: ObjectId,
    started: bool,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            resources_id,
            started: false,
        }
    }

    fn font_object(face: FontFace) -> Object {
        Object::Dictionary(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        })
    }
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for LopdfRenderer {
    fn begin_document(&mut self, title: &str) -> Result<(), RenderError> {
        let regular_id = self.document.add_object(Self::font_object(FontFace::Helvetica));
        let bold_id = self.document.add_object(Self::font_object(FontFace::HelveticaBold));

        // One shared resources dictionary for every page.
        let resources_dict = dictionary! {
            "Font" => dictionary! {
                font_resource_name(FontFace::Helvetica) => regular_id,
                font_resource_name(FontFace::HelveticaBold) => bold_id,
            },
        };
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources_dict));

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![],
            "Count" => 0,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        let catalog_id = self.document.add_object(catalog_dict);
        self.document.trailer.set("Root", catalog_id);

        let info_dict = dictionary! {
            "Title" => Object::string_literal(to_win_ansi(title)),
            "Producer" => Object::string_literal(PRODUCER),
        };
        let info_id = self.document.add_object(info_dict);
        self.document.trailer.set("Info", info_id);

        self.started = true;
        Ok(())
    }

    fn render_page(
        &mut self,
        elements: &[PositionedElement],
        geometry: &PageGeometry,
    ) -> Result<(), RenderError> {
        if !self.started {
            return Err(RenderError::NotStarted);
        }

        let mut page_ctx = PageContext::new(geometry.height);
        for element in elements {
            page_ctx.draw_element(element);
        }
        let content = page_ctx.finish();

        // Streams stay uncompressed so the output is easy to inspect.
        let content_stream = Stream::new(dictionary! {}, content.encode()?);
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);

        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        if !self.started {
            return Err(RenderError::NotStarted);
        }
        if let Some(Object::Dictionary(pages_dict)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", self.page_ids.len() as i32);
        }

        let mut buffer = Vec::new();
        self.document.save_to(&mut buffer)?;
        log::debug!(
            "Wrote PDF with {} page(s), {} bytes.",
            self.page_ids.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}

struct PageContext {
    page_height: f32,
    content: Content,
    state: PageRenderState,
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    line_width: Option<f32>,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn draw_element(&mut self, el: &PositionedElement) {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Line { thickness } => self.draw_line(*thickness, el),
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        let pdf_y = flip_y(el.y, self.page_height);
        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(text.font, text.size);
        self.content
            .operations
            .push(Operation::new("Td", vec![el.x.into(), pdf_y.into()]));
        self.content.operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(to_win_ansi(&text.content))],
        ));
        self.content.operations.push(Operation::new("ET", vec![]));
    }

    fn draw_line(&mut self, thickness: f32, el: &PositionedElement) {
        let line_y = flip_y(el.y, self.page_height);
        if self.state.line_width != Some(thickness) {
            self.content
                .operations
                .push(Operation::new("w", vec![thickness.into()]));
            self.state.line_width = Some(thickness);
        }
        self.content
            .operations
            .push(Operation::new("m", vec![el.x.into(), line_y.into()]));
        self.content
            .operations
            .push(Operation::new("l", vec![(el.x + el.width).into(), line_y.into()]));
        self.content.operations.push(Operation::new("S", vec![]));
    }

    // Font state persists across BT/ET blocks, so only changes are emitted.
    fn set_font(&mut self, font: FontFace, size: f32) {
        if self.state.font != Some((font, size)) {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![font_resource_name(font).into(), size.into()],
            ));
            self.state.font = Some((font, size));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plansheet_layout::{LaidOutDocument, LayoutElement};
    use plansheet_render_core::render_document;

    fn text(content: &str, y: f32, font: FontFace) -> PositionedElement {
        PositionedElement {
            x: 42.5,
            y,
            width: 10.0,
            height: 10.0,
            element: LayoutElement::Text(TextElement {
                content: content.to_string(),
                font,
                size: 10.0,
            }),
        }
    }

    fn two_page_document() -> LaidOutDocument {
        LaidOutDocument {
            title: "Week 1".to_string(),
            pages: vec![
                vec![
                    text("Weekly Curriculum Plan", 60.0, FontFace::HelveticaBold),
                    text("07h00\u{2013}07h30 Morning care & breakfast", 80.0, FontFace::Helvetica),
                ],
                vec![PositionedElement {
                    x: 42.5,
                    y: 100.0,
                    width: 510.0,
                    height: 0.5,
                    element: LayoutElement::Line { thickness: 0.5 },
                }],
            ],
            geometry: PageGeometry::default(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn writes_one_pdf_page_per_layout_page() {
        let bytes = render_document(LopdfRenderer::new(), &two_page_document()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn text_is_win_ansi_encoded() {
        let bytes = render_document(LopdfRenderer::new(), &two_page_document()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let (_, first_page) = doc.get_pages().into_iter().next().unwrap();
        let content = Content::decode(&doc.get_page_content(first_page).unwrap()).unwrap();

        let strings: Vec<Vec<u8>> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first()?.as_str().ok().map(<[u8]>::to_vec))
            .collect();
        assert_eq!(strings.len(), 2);
        assert!(strings[1].starts_with(b"07h00\x9607h30"));
    }

    #[test]
    fn output_is_deterministic() {
        let first = render_document(LopdfRenderer::new(), &two_page_document()).unwrap();
        let second = render_document(LopdfRenderer::new(), &two_page_document()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn pages_before_begin_are_rejected() {
        let mut renderer = LopdfRenderer::new();
        let err = renderer.render_page(&[], &PageGeometry::default()).unwrap_err();
        assert!(matches!(err, RenderError::NotStarted));
    }
}
