use crate::error::{ApiError, SelectionError};
use crate::models::{QueryContext, Tag};
use crate::utils::{next_char_boundary, prev_char_boundary};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Tags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagLoad {
    Pending,
    Loaded,
    Failed(String),
}

/// The search form: a free-text query and a single-choice tag list. A
/// non-empty query disables the tags; submit decides which one wins.
#[derive(Debug)]
pub struct SelectionFlow {
    pub query: String,
    pub cursor_position: usize,
    pub tags: Vec<Tag>,
    pub tag_load: TagLoad,
    pub selected_tag: Option<Tag>,
    pub tag_cursor: usize,
    pub focus: Focus,
    pub last_error: Option<SelectionError>,
    generation: u64,
}

impl Default for SelectionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionFlow {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            cursor_position: 0,
            tags: Vec::new(),
            tag_load: TagLoad::Pending,
            selected_tag: None,
            tag_cursor: 0,
            focus: Focus::Query,
            last_error: None,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a tag fetch for this activation and return its generation.
    pub fn begin_tag_load(&mut self, generation: u64) -> u64 {
        self.generation = generation;
        self.tag_load = TagLoad::Pending;
        generation
    }

    /// Apply a tag fetch result. Failures leave the list empty; the query
    /// stays usable. Returns false for results from another activation.
    pub fn finish_tag_load(&mut self, generation: u64, result: Result<Vec<Tag>, ApiError>) -> bool {
        if generation != self.generation || self.tag_load != TagLoad::Pending {
            debug!(generation, current = self.generation, "Discarding stale tag response");
            return false;
        }

        match result {
            Ok(tags) => {
                info!(count = tags.len(), "Tags loaded");
                self.tags = tags;
                self.tag_load = TagLoad::Loaded;
            }
            Err(e) => {
                warn!(error = %e, "Tag request failed");
                self.tags.clear();
                self.tag_load = TagLoad::Failed(e.to_string());
            }
        }
        self.tag_cursor = 0;
        true
    }

    /// Any text at all, blanks included, takes precedence over the tags.
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn tags_enabled(&self) -> bool {
        !self.has_query()
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.cursor_position = self.query.len();
        self.last_error = None;
        if self.has_query() {
            self.focus = Focus::Query;
        }
    }

    pub fn set_tag(&mut self, tag: &Tag) -> Result<(), SelectionError> {
        if !self.tags_enabled() {
            return Err(SelectionError::TagsDisabled);
        }
        let Some(pos) = self.tags.iter().position(|t| t == tag) else {
            return Err(SelectionError::UnknownTag(tag.id().to_string()));
        };
        self.tag_cursor = pos;
        self.selected_tag = Some(tag.clone());
        self.last_error = None;
        Ok(())
    }

    /// Build the context to quiz on. Text wins over a stale tag selection.
    pub fn submit(&mut self) -> Result<QueryContext, SelectionError> {
        let result = if self.has_query() {
            let text = self.query.trim();
            if text.is_empty() {
                Err(SelectionError::BlankQuery)
            } else {
                Ok(QueryContext::Text(text.to_string()))
            }
        } else if let Some(tag) = &self.selected_tag {
            Ok(QueryContext::Tag(tag.clone()))
        } else {
            Err(SelectionError::NothingSelected)
        };

        match &result {
            Ok(context) => {
                self.last_error = None;
                info!(mode = ?context.mode(), query = context.value(), "Selection submitted");
            }
            Err(e) => {
                debug!(error = %e, "Selection rejected");
                self.last_error = Some(e.clone());
            }
        }
        result
    }

    pub fn insert_char(&mut self, c: char) {
        let pos = self.cursor_position.min(self.query.len());
        self.query.insert(pos, c);
        self.cursor_position = pos + c.len_utf8();
        self.last_error = None;
    }

    pub fn backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let start = prev_char_boundary(&self.query, self.cursor_position);
        self.query.replace_range(start..self.cursor_position.min(self.query.len()), "");
        self.cursor_position = start;
        self.last_error = None;
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = prev_char_boundary(&self.query, self.cursor_position);
    }

    pub fn cursor_right(&mut self) {
        self.cursor_position = next_char_boundary(&self.query, self.cursor_position);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.query.len();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Query if self.tags_enabled() && !self.tags.is_empty() => Focus::Tags,
            _ => Focus::Query,
        };
    }

    pub fn move_tag_cursor(&mut self, delta: isize) {
        if self.tags.is_empty() {
            return;
        }
        self.tag_cursor = self
            .tag_cursor
            .saturating_add_signed(delta)
            .min(self.tags.len() - 1);
    }

    pub fn select_highlighted_tag(&mut self) -> Result<(), SelectionError> {
        let Some(tag) = self.tags.get(self.tag_cursor).cloned() else {
            return Ok(());
        };
        self.set_tag(&tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(tags: &[&str]) -> SelectionFlow {
        let mut flow = SelectionFlow::new();
        let generation = flow.begin_tag_load(1);
        assert!(flow.finish_tag_load(
            generation,
            Ok(tags.iter().map(|t| Tag::new(*t)).collect())
        ));
        flow
    }

    #[test]
    fn test_text_submit_builds_text_context() {
        let mut flow = loaded(&["rust"]);
        flow.set_query("  lifetimes ");
        assert_eq!(
            flow.submit(),
            Ok(QueryContext::Text("lifetimes".to_string()))
        );
    }

    #[test]
    fn test_tag_submit_builds_tag_context() {
        let mut flow = loaded(&["rust", "tokio"]);
        flow.set_tag(&Tag::new("tokio")).unwrap();
        assert_eq!(flow.submit(), Ok(QueryContext::Tag(Tag::new("tokio"))));
    }

    #[test]
    fn test_text_typed_after_tag_wins() {
        let mut flow = loaded(&["rust"]);
        flow.set_tag(&Tag::new("rust")).unwrap();
        for c in "traits".chars() {
            flow.insert_char(c);
        }
        // Stored tag is kept but inert.
        assert_eq!(flow.selected_tag, Some(Tag::new("rust")));
        assert!(!flow.tags_enabled());
        assert_eq!(flow.submit(), Ok(QueryContext::Text("traits".to_string())));
    }

    #[test]
    fn test_tag_selection_disabled_while_text_present() {
        let mut flow = loaded(&["rust"]);
        flow.set_query("x");
        assert_eq!(flow.set_tag(&Tag::new("rust")), Err(SelectionError::TagsDisabled));
        assert_eq!(flow.selected_tag, None);
    }

    #[test]
    fn test_clearing_text_reenables_stored_tag() {
        let mut flow = loaded(&["rust"]);
        flow.set_tag(&Tag::new("rust")).unwrap();
        flow.set_query("abc");
        flow.set_query("");
        assert_eq!(flow.submit(), Ok(QueryContext::Tag(Tag::new("rust"))));
    }

    #[test]
    fn test_blank_text_never_falls_back_to_tag() {
        let mut flow = loaded(&["rust"]);
        flow.set_tag(&Tag::new("rust")).unwrap();
        flow.set_query("   ");

        assert!(!flow.tags_enabled());
        assert_eq!(flow.submit(), Err(SelectionError::BlankQuery));
        assert_eq!(flow.last_error, Some(SelectionError::BlankQuery));
        assert_eq!(flow.selected_tag, Some(Tag::new("rust")));
    }

    #[test]
    fn test_text_is_trimmed_on_submit() {
        let mut flow = loaded(&[]);
        flow.set_query("  traits ");
        assert_eq!(flow.submit(), Ok(QueryContext::Text("traits".to_string())));
    }

    #[test]
    fn test_empty_submit_reports_error() {
        let mut flow = loaded(&[]);
        assert_eq!(flow.submit(), Err(SelectionError::NothingSelected));
        assert_eq!(flow.last_error, Some(SelectionError::NothingSelected));

        flow.insert_char('a');
        assert_eq!(flow.last_error, None);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let mut flow = loaded(&["rust"]);
        assert_eq!(
            flow.set_tag(&Tag::new("go")),
            Err(SelectionError::UnknownTag("go".to_string()))
        );
    }

    #[test]
    fn test_tag_failure_leaves_text_submittable() {
        let mut flow = SelectionFlow::new();
        let generation = flow.begin_tag_load(4);
        let err = ApiError::Status {
            status: 503,
            body: String::new(),
        };
        assert!(flow.finish_tag_load(generation, Err(err)));
        assert!(flow.tags.is_empty());
        assert!(matches!(flow.tag_load, TagLoad::Failed(_)));

        flow.set_query("ownership");
        assert_eq!(
            flow.submit(),
            Ok(QueryContext::Text("ownership".to_string()))
        );
    }

    #[test]
    fn test_stale_tag_response_ignored() {
        let mut flow = SelectionFlow::new();
        flow.begin_tag_load(1);
        flow.begin_tag_load(2);
        assert!(!flow.finish_tag_load(1, Ok(vec![Tag::new("old")])));
        assert!(flow.finish_tag_load(2, Ok(vec![Tag::new("new")])));
        assert!(!flow.finish_tag_load(2, Ok(vec![Tag::new("again")])));
        assert_eq!(flow.tags, vec![Tag::new("new")]);
    }

    #[test]
    fn test_cursor_editing() {
        let mut flow = SelectionFlow::new();
        for c in "helo".chars() {
            flow.insert_char(c);
        }
        flow.cursor_left();
        flow.insert_char('l');
        assert_eq!(flow.query, "hello");
        assert_eq!(flow.cursor_position, 4);

        flow.cursor_end();
        flow.backspace();
        assert_eq!(flow.query, "hell");

        flow.cursor_home();
        flow.backspace();
        assert_eq!(flow.query, "hell");
        flow.cursor_right();
        flow.backspace();
        assert_eq!(flow.query, "ell");
        assert_eq!(flow.cursor_position, 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut flow = SelectionFlow::new();
        flow.insert_char('é');
        flow.insert_char('t');
        flow.cursor_left();
        flow.backspace();
        assert_eq!(flow.query, "t");
        assert_eq!(flow.cursor_position, 0);
    }

    #[test]
    fn test_focus_and_tag_cursor() {
        let mut flow = loaded(&["a", "b", "c"]);
        flow.toggle_focus();
        assert_eq!(flow.focus, Focus::Tags);
        flow.move_tag_cursor(5);
        assert_eq!(flow.tag_cursor, 2);
        flow.select_highlighted_tag().unwrap();
        assert_eq!(flow.selected_tag, Some(Tag::new("c")));
        flow.toggle_focus();
        assert_eq!(flow.focus, Focus::Query);

        flow.set_query("text");
        flow.toggle_focus();
        assert_eq!(flow.focus, Focus::Query);
    }
}
