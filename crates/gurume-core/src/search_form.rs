//! Client-side search form and pagination state.
//!
//! The form keeps the page size as text, the way the form control holds it,
//! and tracks a 1-based page number. Every transition that issues a search
//! converts the page into a 1-based upstream offset; the search endpoint is
//! never sent a page number.
//!
//! Each control has its own loading flag. A control cannot fire again while
//! its own request is outstanding, but nothing stops a different control
//! from issuing a concurrent request.

use thiserror::Error;

use crate::criteria::{SearchCriteria, DEFAULT_PAGE_SIZE};
use crate::scene::ScenePreset;
use crate::shop::SearchResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub area: String,
    pub genre: String,
    pub budget: String,
    pub party_size: String,
    pub amenities: Vec<String>,
    /// Page size as entered; parsed by [`SearchForm::page_size`].
    pub count: String,
    /// 1-based.
    pub page: u32,
    pub special_category: Option<String>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            area: String::new(),
            genre: String::new(),
            budget: String::new(),
            party_size: String::new(),
            amenities: Vec::new(),
            count: DEFAULT_PAGE_SIZE.to_string(),
            page: 1,
            special_category: None,
        }
    }
}

impl SearchForm {
    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.count
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|c| *c > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// `(page - 1) * page_size + 1`, saturating at `i64::MAX`.
    #[must_use]
    pub fn start_offset(&self) -> i64 {
        (i64::from(self.page.max(1)) - 1)
            .saturating_mul(self.page_size())
            .saturating_add(1)
    }

    /// Criteria for the search endpoint. `count` and `start` are always set.
    #[must_use]
    pub fn to_criteria(&self) -> SearchCriteria {
        let text = |s: &str| (!s.is_empty()).then(|| s.to_string());
        SearchCriteria {
            area: text(&self.area),
            genre: text(&self.genre),
            budget: text(&self.budget),
            party_size: text(&self.party_size),
            amenities: self.amenities.clone(),
            count: Some(self.page_size()),
            start: Some(self.start_offset()),
            special_category: self.special_category.as_deref().and_then(text),
        }
    }

    /// Adds the flag if absent, removes it if present.
    pub fn toggle_amenity(&mut self, flag: &str) {
        if let Some(pos) = self.amenities.iter().position(|f| f == flag) {
            self.amenities.remove(pos);
        } else {
            self.amenities.push(flag.to_string());
        }
    }

    /// Overwrites the preset's fields and rewinds to page 1. Page size is kept.
    pub fn apply_scene(&mut self, preset: &ScenePreset) {
        self.area = preset.area_keyword();
        self.genre = preset.genre.unwrap_or_default().to_string();
        self.budget = preset.budget.unwrap_or_default().to_string();
        self.party_size = preset.party_size.to_string();
        self.amenities = preset.amenities.iter().map(ToString::to_string).collect();
        self.special_category = Some(preset.special_category.unwrap_or_default().to_string());
        self.page = 1;
    }
}

/// Derived state of the previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub page_size: i64,
    /// `ceil(total_available / page_size)`.
    pub last_page: i64,
    /// Controls are only shown when there is more than one page's worth of results.
    pub visible: bool,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Pager {
    #[must_use]
    pub fn new(form: &SearchForm, result: &SearchResult) -> Self {
        let page_size = form.page_size();
        let available = result.total_available.max(0);
        let last_page = available / page_size + i64::from(available % page_size != 0);
        // A short page is taken to be the last one, whatever total_available says.
        let short_page = result.total_returned < page_size;
        Self {
            page: form.page,
            page_size,
            last_page,
            visible: available > page_size,
            has_previous: form.page > 1,
            has_next: !short_page && form.page < u32::MAX && i64::from(form.page) < last_page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Submit,
    Scene(&'static str),
    Previous,
    Next,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0:?} already has a request in flight")]
pub struct Busy(pub Control);

#[derive(Debug, Default)]
pub struct SearchSession {
    form: SearchForm,
    result: Option<SearchResult>,
    error: Option<String>,
    active_scene: Option<&'static str>,
    in_flight: Vec<Control>,
}

impl SearchSession {
    #[must_use]
    pub fn new(form: SearchForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    #[must_use]
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn active_scene(&self) -> Option<&'static str> {
        self.active_scene
    }

    #[must_use]
    pub fn is_loading(&self, control: Control) -> bool {
        self.in_flight.contains(&control)
    }

    #[must_use]
    pub fn pager(&self) -> Option<Pager> {
        self.result.as_ref().map(|r| Pager::new(&self.form, r))
    }

    /// Searches from page 1 with the current form.
    ///
    /// # Errors
    ///
    /// Returns [`Busy`] if a submit is already outstanding.
    pub fn submit(&mut self) -> Result<SearchCriteria, Busy> {
        self.begin(Control::Submit)?;
        self.form.page = 1;
        self.result = None;
        Ok(self.form.to_criteria())
    }

    /// Applies a scene preset and searches immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Busy`] if this scene's previous search is still outstanding.
    pub fn apply_scene(&mut self, preset: &'static ScenePreset) -> Result<SearchCriteria, Busy> {
        self.begin(Control::Scene(preset.id))?;
        self.active_scene = Some(preset.id);
        self.form.apply_scene(preset);
        self.result = None;
        Ok(self.form.to_criteria())
    }

    /// Advances one page. `Ok(None)` when the next control is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`Busy`] if a next-page request is still outstanding.
    pub fn next_page(&mut self) -> Result<Option<SearchCriteria>, Busy> {
        if !self.pager().is_some_and(|p| p.has_next) {
            return Ok(None);
        }
        self.begin(Control::Next)?;
        self.form.page += 1;
        Ok(Some(self.form.to_criteria()))
    }

    /// Goes back one page. `Ok(None)` on page 1.
    ///
    /// # Errors
    ///
    /// Returns [`Busy`] if a previous-page request is still outstanding.
    pub fn previous_page(&mut self) -> Result<Option<SearchCriteria>, Busy> {
        if self.form.page <= 1 {
            return Ok(None);
        }
        self.begin(Control::Previous)?;
        self.form.page -= 1;
        Ok(Some(self.form.to_criteria()))
    }

    /// Records the outcome of a request issued by `control` and clears its loading flag.
    pub fn complete(&mut self, control: Control, outcome: Result<SearchResult, String>) {
        self.in_flight.retain(|c| *c != control);
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }

    /// Clears the form back to defaults and forgets the last result.
    pub fn reset(&mut self) {
        self.form = SearchForm::default();
        self.result = None;
        self.error = None;
        self.active_scene = None;
    }

    fn begin(&mut self, control: Control) -> Result<(), Busy> {
        if self.is_loading(control) {
            return Err(Busy(control));
        }
        self.in_flight.push(control);
        self.error = None;
        Ok(())
    }
}
