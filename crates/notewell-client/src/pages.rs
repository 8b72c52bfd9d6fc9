//! Page editing session: one page's title plus its block editor,
//! persisted through the pages endpoints.

use log::error;

use notewell_engine::editor::EditorSession;

use crate::api::{Api, Page, PageContent, PageInput};

pub struct PageSession<A: Api> {
    api: A,
    /// `None` until the first successful save creates the page.
    page_id: Option<i64>,
    title: String,
    parent_id: Option<i64>,
    editor: EditorSession,
    alert: Option<String>,
}

impl<A: Api> PageSession<A> {
    /// Start a fresh, unsaved page.
    pub fn new(api: A, title: impl Into<String>) -> Self {
        Self {
            api,
            page_id: None,
            title: title.into(),
            parent_id: None,
            editor: EditorSession::new(),
            alert: None,
        }
    }

    /// Open an existing page, hydrating the editor from its content.
    pub fn open(api: A, page: &Page) -> Self {
        let mut editor = EditorSession::new();
        editor.load_records(&page.content.blocks);
        Self {
            api,
            page_id: Some(page.id),
            title: page.title.clone(),
            parent_id: page.parent_id,
            editor,
            alert: None,
        }
    }

    pub fn page_id(&self) -> Option<i64> {
        self.page_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorSession {
        &mut self.editor
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Persist the page: POST on first save, PUT afterwards. The body
    /// carries the editor's records under `content.blocks`. Returns
    /// whether the save succeeded.
    pub fn save(&mut self) -> bool {
        let input = PageInput {
            title: self.title.clone(),
            content: PageContent {
                blocks: self.editor.to_records(),
            },
            parent_id: self.parent_id,
        };

        let result = match self.page_id {
            Some(id) => self.api.update_page(id, &input),
            None => self.api.create_page(&input),
        };

        match result {
            Ok(page) => {
                self.page_id = Some(page.id);
                true
            }
            Err(err) => {
                error!("error saving page: {err}");
                self.alert = Some("Failed to save page.".to_string());
                false
            }
        }
    }
}
